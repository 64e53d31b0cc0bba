//! Length-prefixed message framing for the SPM controller protocol.
//!
//! Every command sent to the controller is framed as:
//! - A 4-byte big-endian unsigned payload length
//! - Exactly that many payload bytes (UTF-8 command text)
//!
//! There is no magic, terminator or checksum. The controller reads the
//! prefix, then the payload, and closes the connection.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
