/// Errors that can occur while encoding a command message.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The command name is empty.
    #[error("command name must not be empty")]
    EmptyCommandName,

    /// An argument value has no rendering rule.
    #[error("argument {name:?} has unsupported value kind: {kind}")]
    UnsupportedValueKind { name: String, kind: &'static str },

    /// The rendered text could not be framed.
    #[error("framing failed: {0}")]
    Frame(#[from] openspm_frame::FrameError),
}

pub type Result<T> = std::result::Result<T, EncodeError>;
