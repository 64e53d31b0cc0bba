/// Errors that can occur sending a command.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The command could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] openspm_command::EncodeError),

    /// The controller connection could not be opened.
    #[error("transport error: {0}")]
    Transport(#[from] openspm_transport::TransportError),

    /// The framed message could not be written.
    #[error("frame error: {0}")]
    Frame(#[from] openspm_frame::FrameError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
