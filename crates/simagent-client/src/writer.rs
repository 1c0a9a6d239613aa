use std::net::TcpStream;

use simagent_frame::FrameWriter;
use tracing::{debug, error};

use crate::error::Result;
use crate::message::Message;

/// Serializes messages and writes them as frames onto the connection.
///
/// Handed to [`MessageHandler`](crate::MessageHandler) invocations so a
/// handler can reply on the same connection before the next frame is read.
pub struct MessageWriter {
    frames: FrameWriter<TcpStream>,
}

impl MessageWriter {
    /// Wrap a frame writer.
    pub fn new(frames: FrameWriter<TcpStream>) -> Self {
        Self { frames }
    }

    /// Serialize and send one message.
    ///
    /// A message that fails to serialize is logged and dropped — not fatal.
    /// A connection-level error is returned so the caller can tear the
    /// connection down.
    pub fn send(&mut self, message: &Message) -> Result<()> {
        let payload = match serde_json::to_vec(message) {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, msg_type = message.msg_type, "dropping unserializable message");
                return Ok(());
            }
        };

        debug!(msg_type = message.msg_type, len = payload.len(), "sending message");
        self.frames.send(&payload)?;
        Ok(())
    }

    pub(crate) fn into_inner(self) -> FrameWriter<TcpStream> {
        self.frames
    }
}
