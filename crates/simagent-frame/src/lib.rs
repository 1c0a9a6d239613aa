//! Length-prefixed message framing for the simserver wire protocol.
//!
//! Every message on the wire is framed as:
//! - A 4-byte little-endian payload length
//! - The payload bytes
//!
//! Nothing else. No magic, no version, no handshake. The payload content is
//! opaque to this crate; higher layers decide what the bytes mean.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_frame, decode_header, encode_frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
