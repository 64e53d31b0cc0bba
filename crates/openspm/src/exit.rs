use std::fmt;
use std::io;

use openspm_client::ClientError;
use openspm_command::EncodeError;
use openspm_data::DataError;
use openspm_frame::FrameError;
use openspm_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::AddrInUse => TRANSPORT_ERROR,
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Connect { ref source, .. } | TransportError::Bind { ref source, .. } => {
            let code = io_error(context, io::Error::from(source.kind())).code;
            CliError::new(code, format!("{context}: {err}"))
        }
        TransportError::Accept(source) | TransportError::Io(source) => io_error(context, source),
        TransportError::Resolve { .. } => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) if source.kind() == io::ErrorKind::InvalidData => {
            CliError::new(DATA_INVALID, format!("{context}: {source}"))
        }
        FrameError::Io(source) => io_error(context, source),
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
    }
}

pub fn encode_error(context: &str, err: EncodeError) -> CliError {
    match err {
        EncodeError::Frame(err) => frame_error(context, err),
        other => CliError::new(USAGE, format!("{context}: {other}")),
    }
}

pub fn client_error(context: &str, err: ClientError) -> CliError {
    match err {
        ClientError::Encode(err) => encode_error(context, err),
        ClientError::Transport(err) => transport_error(context, err),
        ClientError::Frame(err) => frame_error(context, err),
    }
}

pub fn data_error(context: &str, err: DataError) -> CliError {
    match err {
        DataError::Io { source, path } => {
            io_error(&format!("{context} ({})", path.display()), source)
        }
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_connect_is_transport_error() {
        let err = transport_error(
            "send failed",
            TransportError::Connect {
                addr: "127.0.0.1:8070".into(),
                source: io::Error::from(io::ErrorKind::ConnectionRefused),
            },
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
        assert!(err.message.contains("127.0.0.1:8070"));
    }

    #[test]
    fn connect_timeout_maps_to_124() {
        let err = client_error(
            "send failed",
            ClientError::Transport(TransportError::Connect {
                addr: "10.0.0.1:8070".into(),
                source: io::Error::from(io::ErrorKind::TimedOut),
            }),
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn encode_errors_are_usage() {
        let err = client_error(
            "send failed",
            ClientError::Encode(EncodeError::EmptyCommandName),
        );
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn corrupt_data_is_data_invalid() {
        let err = data_error(
            "inspect failed",
            DataError::TruncatedHeader { len: 3, need: 16 },
        );
        assert_eq!(err.code, DATA_INVALID);

        let err = data_error(
            "inspect failed",
            DataError::Io {
                path: "missing.dat".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("missing.dat"));
    }
}
