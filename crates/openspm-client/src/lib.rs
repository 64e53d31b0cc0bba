//! Command client for the SPM instrument controller.
//!
//! Every call opens a connection, writes one length-prefixed command and
//! closes the connection. Nothing is read back: the protocol has no
//! acknowledgement, so a successful return means the bytes were handed to the
//! OS, not that the controller executed the command.

pub mod client;
pub mod config;
pub mod error;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
