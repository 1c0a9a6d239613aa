use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use simagent_frame::{FrameConfig, FrameError, FrameReader, FrameWriter, DEFAULT_MAX_PAYLOAD};
use tracing::{debug, error, info};

use crate::cancel::CancelToken;
use crate::connector::{self, Endpoint};
use crate::error::{ClientError, Result};
use crate::handler::MessageHandler;
use crate::message::Message;
use crate::throttle::LogThrottle;
use crate::writer::MessageWriter;

/// Default period between repeated connect-retry diagnostics.
pub const DEFAULT_RETRY_LOG_PERIOD: Duration = Duration::from_secs(3);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum inbound/outbound payload size in bytes.
    pub max_payload_size: usize,
    /// Minimum interval between connect-retry log lines.
    pub retry_log_period: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            retry_log_period: DEFAULT_RETRY_LOG_PERIOD,
        }
    }
}

/// How a read loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpExit {
    /// The server closed the connection at a frame boundary.
    Closed,
    /// The client's cancel token fired.
    Cancelled,
}

/// A client for one remote endpoint.
///
/// Owns at most one live connection at a time; reconnecting replaces the
/// connection, it never mutates one in place. Reads and writes go through
/// independent halves of the same stream, so a handler may write a reply
/// before the next frame is read.
pub struct Client {
    endpoint: Endpoint,
    config: ClientConfig,
    throttle: LogThrottle,
    cancel: CancelToken,
    reader: Option<FrameReader<TcpStream>>,
    writer: Option<MessageWriter>,
}

impl Client {
    /// Create a disconnected client for `endpoint`.
    pub fn new(endpoint: Endpoint, config: ClientConfig) -> Self {
        let throttle = LogThrottle::new(config.retry_log_period);
        Self {
            endpoint,
            config,
            throttle,
            cancel: CancelToken::new(),
            reader: None,
            writer: None,
        }
    }

    /// A clone of the client's cancel token, for handlers and signal
    /// handlers.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether a connection is currently established.
    pub fn is_connected(&self) -> bool {
        self.reader.is_some()
    }

    /// Establish the connection, retrying indefinitely on refusal or
    /// transient network errors.
    ///
    /// Blocks until a connection succeeds or the cancel token fires
    /// (`Err(ClientError::Cancelled)`). Resolution failures propagate
    /// immediately. Any existing connection is torn down first.
    pub fn connect(&mut self) -> Result<()> {
        self.disconnect();

        let stream = connector::dial(&self.endpoint, &mut self.throttle, &self.cancel)?;
        let reader_stream = stream.try_clone().map_err(FrameError::Io)?;

        let frame_config = FrameConfig {
            max_payload_size: self.config.max_payload_size,
        };
        self.reader = Some(FrameReader::with_config(reader_stream, frame_config.clone()));
        self.writer = Some(MessageWriter::new(FrameWriter::with_config(
            stream,
            frame_config,
        )));

        info!(endpoint = %self.endpoint, "connected");
        Ok(())
    }

    /// Close the connection and discard buffered state.
    ///
    /// Idempotent: a no-op when not connected.
    pub fn disconnect(&mut self) {
        if let Some(writer) = self.writer.take() {
            let stream = writer.into_inner().into_inner();
            let _ = stream.shutdown(Shutdown::Both);
            debug!("disconnected");
        }
        // Dropping the reader discards any partially accumulated frame.
        self.reader = None;
    }

    /// Serialize and send one message on the current connection.
    ///
    /// A serialization failure drops the message (logged, `Ok`). A
    /// connection-level error disconnects and returns `Err` — the same
    /// observable outcome as a read-side stream failure.
    pub fn send(&mut self, message: &Message) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(ClientError::NotConnected);
        };
        let result = writer.send(message);
        if result.is_err() {
            self.disconnect();
        }
        result
    }

    /// Drive the read side of the current connection until it closes, fails,
    /// or the cancel token fires.
    ///
    /// Each complete frame is decoded as a [`Message`] and dispatched to
    /// `handler` synchronously, in arrival order. Undecodable frames are
    /// logged and dropped; the loop continues. A clean close at a frame
    /// boundary returns `Ok(PumpExit::Closed)`; a stream error disconnects
    /// and returns `Err`. Cancellation returns `Ok(PumpExit::Cancelled)`
    /// without touching the connection.
    pub fn read_loop<H: MessageHandler>(&mut self, handler: &mut H) -> Result<PumpExit> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(PumpExit::Cancelled);
            }

            let reader = self.reader.as_mut().ok_or(ClientError::NotConnected)?;
            let payload = match reader.read_frame() {
                Ok(Some(payload)) => payload,
                Ok(None) => {
                    self.disconnect();
                    return Ok(PumpExit::Closed);
                }
                Err(err) => {
                    self.disconnect();
                    return Err(err.into());
                }
            };

            let message: Message = match serde_json::from_slice(&payload) {
                Ok(message) => message,
                Err(err) => {
                    error!(error = %err, len = payload.len(), "dropping undecodable frame");
                    continue;
                }
            };
            debug!(msg_type = message.msg_type, "received message");

            let writer = self.writer.as_mut().ok_or(ClientError::NotConnected)?;
            if let Err(err) = handler.on_message(writer, message) {
                self.disconnect();
                return Err(err);
            }
        }
    }

    /// Connect-and-read forever: reconnect after every close or stream
    /// error, return only on cancellation (or a non-retriable connect
    /// error).
    ///
    /// Stream errors are logged once per connection and are not fatal.
    pub fn run<H: MessageHandler>(&mut self, handler: &mut H) -> Result<()> {
        loop {
            info!(endpoint = %self.endpoint, "trying to connect");
            match self.connect() {
                Ok(()) => {}
                Err(ClientError::Cancelled) => return Ok(()),
                Err(err) => return Err(err),
            }

            match self.read_loop(handler) {
                Ok(PumpExit::Cancelled) => {
                    self.disconnect();
                    return Ok(());
                }
                Ok(PumpExit::Closed) => info!("connection closed by server"),
                Err(err) => error!(error = %err, "connection error"),
            }
        }
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.disconnect();
    }
}
