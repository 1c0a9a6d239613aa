/// Errors that can occur in client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Frame-level error (stream reset, broken pipe, truncated frame,
    /// oversized payload).
    #[error("frame error: {0}")]
    Frame(#[from] simagent_frame::FrameError),

    /// The endpoint could not be resolved to a socket address.
    ///
    /// Unlike connection refusal, this is a caller error and is never
    /// retried.
    #[error("failed to resolve {endpoint}: {source}")]
    Resolve {
        endpoint: String,
        source: std::io::Error,
    },

    /// The endpoint string is not of the form `host:port`.
    #[error("invalid endpoint {0:?} (expected host:port)")]
    InvalidEndpoint(String),

    /// An operation that requires a live connection was called without one.
    #[error("not connected")]
    NotConnected,

    /// The operation was cancelled via the client's token.
    ///
    /// This is the clean-shutdown signal, not a failure.
    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ClientError>;
