use std::fmt;
use std::io;

use simagent_client::ClientError;
use simagent_frame::FrameError;

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
        | io::ErrorKind::BrokenPipe => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn client_error(context: &str, err: ClientError) -> CliError {
    match err {
        ClientError::Frame(err) => frame_error(context, err),
        ClientError::Resolve { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        ClientError::InvalidEndpoint(_) => CliError::new(USAGE, format!("{context}: {err}")),
        ClientError::NotConnected => CliError::new(INTERNAL, format!("{context}: {err}")),
        ClientError::Cancelled => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_maps_to_transport_error() {
        let err = io_error(
            "connect",
            io::Error::from(io::ErrorKind::ConnectionRefused),
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
    }

    #[test]
    fn invalid_endpoint_maps_to_usage() {
        let err = client_error(
            "parse",
            ClientError::InvalidEndpoint("nonsense".to_string()),
        );
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("nonsense"));
    }

    #[test]
    fn oversized_payload_maps_to_data_invalid() {
        let err = frame_error(
            "read",
            FrameError::PayloadTooLarge { size: 99, max: 10 },
        );
        assert_eq!(err.code, DATA_INVALID);
    }
}
