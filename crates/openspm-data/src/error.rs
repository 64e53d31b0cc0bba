use std::path::PathBuf;

/// Errors that can occur while encoding or decoding data files.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The number of values does not match the product of the shape.
    #[error("shape {shape:?} needs {expected} values, got {actual}")]
    ShapeMismatch {
        shape: [i32; 4],
        expected: usize,
        actual: usize,
    },

    /// A shape dimension is negative or the element count overflows.
    #[error("invalid shape {0:?}")]
    InvalidShape([i32; 4]),

    /// Fewer header bytes than the fixed header size.
    #[error("truncated header ({len} bytes, need {need})")]
    TruncatedHeader { len: usize, need: usize },

    /// The payload is not a whole number of 4-byte values.
    #[error("truncated payload ({len} bytes is not a multiple of 4)")]
    TruncatedPayload { len: usize },

    /// The payload length disagrees with the declared shape or count.
    #[error("payload size mismatch (expected {expected} bytes, found {actual})")]
    PayloadSizeMismatch { expected: usize, actual: usize },

    /// A channel list declares a negative count.
    #[error("invalid channel count {0}")]
    InvalidCount(i32),

    /// A channel list too long for its `i32` count field.
    #[error("too many channels ({0})")]
    TooManyChannels(usize),

    /// An I/O error occurred reading or writing a file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
