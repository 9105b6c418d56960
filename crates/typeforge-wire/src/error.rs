use crate::Token;

/// Errors that can occur while reading or writing a token stream.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The source ran out of bytes in the middle of an entry.
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// A byte in tag position isn't a known [`Token`].
    #[error("unknown token tag 0x{0:02x}")]
    UnknownToken(u8),

    /// A valid tag was found, but not the one the reader needed.
    #[error("expected {expected} token, found {found}")]
    UnexpectedToken { expected: Token, found: Token },

    /// A frame is larger than the configured limit.
    #[error("frame of {len} bytes exceeds limit of {max} bytes")]
    FrameTooLarge { len: usize, max: usize },
}
