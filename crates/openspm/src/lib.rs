//! Client-side toolkit for the OpenLabSPM instrument controller.
//!
//! The controller accepts one length-prefixed text command per TCP
//! connection and writes scan data as flat binary array files. This crate
//! bundles both halves.
//!
//! # Crate Structure
//!
//! - [`frame`]: 4-byte big-endian length-prefixed framing
//! - [`command`]: command values, text rendering and typed command builders
//! - [`transport`]: TCP connector and listener for the controller port
//! - [`client`]: fire-and-forget [`client::Client`] with one method per command
//! - [`data`]: array, channel-list and output-list file codecs

/// Re-export frame types.
pub mod frame {
    pub use openspm_frame::*;
}

/// Re-export command types.
pub mod command {
    pub use openspm_command::*;
}

/// Re-export transport types.
pub mod transport {
    pub use openspm_transport::*;
}

/// Re-export client types.
pub mod client {
    pub use openspm_client::*;
}

/// Re-export data file types.
pub mod data {
    pub use openspm_data::*;
}
