//! TCP transport to the SPM instrument controller.
//!
//! The controller accepts one command per connection: connect, write one
//! framed message, close. This crate provides the connect side behind the
//! [`Connector`] trait plus a small listener for local testing.

pub mod addr;
pub mod error;
pub mod tcp;
pub mod traits;

pub use addr::{ControllerAddr, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{Result, TransportError};
pub use tcp::{
    ControllerListener, TcpConnector, TransportConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT,
};
pub use traits::Connector;
