//! Reconnecting TCP client for the simserver length-prefixed JSON protocol.
//!
//! This is the "just works" layer. A [`Client`] owns one connection at a
//! time: it dials (retrying indefinitely with throttled diagnostics), reads
//! framed JSON messages off the stream, and hands each decoded [`Message`]
//! to an application-supplied [`MessageHandler`], which may write back on
//! the same connection or cancel the loop via a [`CancelToken`].

pub mod cancel;
pub mod client;
pub mod connector;
pub mod error;
pub mod handler;
pub mod message;
pub mod throttle;
pub mod writer;

pub use cancel::CancelToken;
pub use client::{Client, ClientConfig, PumpExit};
pub use connector::Endpoint;
pub use error::{ClientError, Result};
pub use handler::MessageHandler;
pub use message::Message;
pub use throttle::LogThrottle;
pub use writer::MessageWriter;
