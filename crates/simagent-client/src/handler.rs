use crate::error::Result;
use crate::message::Message;
use crate::writer::MessageWriter;

/// Application callback invoked once per decoded message.
///
/// Invocation is synchronous and in arrival order: the handler for frame N
/// completes (including any write it issues through `outbound`) before frame
/// N+1 is read. A handler stops the enclosing read loop by cancelling the
/// client's [`CancelToken`](crate::CancelToken); returning an error tears
/// the connection down instead.
pub trait MessageHandler {
    fn on_message(&mut self, outbound: &mut MessageWriter, message: Message) -> Result<()>;
}

impl<F> MessageHandler for F
where
    F: FnMut(&mut MessageWriter, Message) -> Result<()>,
{
    fn on_message(&mut self, outbound: &mut MessageWriter, message: Message) -> Result<()> {
        self(outbound, message)
    }
}
