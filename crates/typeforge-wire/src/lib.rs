//! Token stream plumbing for typeforge.
//!
//! Values never touch raw sockets or files in this layer. They travel
//! through an in-memory token stream:
//!
//! - **Sink** ([`TokenWriter`]): an append-only byte buffer.
//! - **Source** ([`TokenReader`]): a cursor over a borrowed byte slice.
//! - **Frame adapters** ([`FrameWriter`], [`FrameReader`]): wrap a sink or
//!   source into the length-prefixed shape a codec writes into and reads
//!   from.
//!
//! # Layout
//!
//! ```text
//! absent value:  [0x00]
//! framed value:  [0x01][length: u32 big-endian][payload: length bytes]
//! ```
//!
//! The payload bytes belong to whatever codec produced them. This crate
//! only knows where a frame starts and where it ends.

mod error;
mod frame;
mod reader;
mod writer;

pub use error::WireError;
pub use frame::{DEFAULT_MAX_FRAME_LEN, FrameReader, FrameWriter};
pub use reader::TokenReader;
pub use writer::TokenWriter;

use std::fmt;

/// Tag byte that opens every entry in a token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Token {
    /// An absent value. Nothing follows the tag.
    Null = 0x00,
    /// A length-prefixed codec frame follows the tag.
    Frame = 0x01,
}

impl Token {
    /// Returns the tag byte written to the stream.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parses a tag byte. Returns `None` for bytes that aren't tags.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Null),
            0x01 => Some(Self::Frame),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Frame => write!(f, "frame"),
        }
    }
}
