//! The output sink.

use crate::Token;

/// An append-only byte sink.
///
/// Everything written goes to the end of an owned buffer. Nothing is ever
/// rewritten, so a partially failed write leaves earlier entries intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenWriter {
    buf: Vec<u8>,
}

impl TokenWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends a tag byte.
    pub fn write_token(&mut self, token: Token) {
        self.buf.push(token.as_byte());
    }

    /// Appends the null sentinel.
    pub fn write_null(&mut self) {
        self.write_token(Token::Null);
    }

    /// Appends a big-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrows the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
