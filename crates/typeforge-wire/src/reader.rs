//! The input source.

use crate::{Token, WireError};

/// A forward-only cursor over a borrowed byte slice.
///
/// Slices handed out by [`read_bytes`](Self::read_bytes) borrow from the
/// original input, not from the reader, so they outlive the cursor.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the next tag without consuming it.
    ///
    /// # Errors
    /// - [`WireError::UnexpectedEof`] if the source is exhausted
    /// - [`WireError::UnknownToken`] if the next byte isn't a tag
    pub fn peek_token(&self) -> Result<Token, WireError> {
        let byte = *self.data.get(self.pos).ok_or(WireError::UnexpectedEof {
            needed: 1,
            remaining: 0,
        })?;
        Token::from_byte(byte).ok_or(WireError::UnknownToken(byte))
    }

    /// Reads and consumes the next tag.
    pub fn read_token(&mut self) -> Result<Token, WireError> {
        let token = self.peek_token()?;
        self.pos += 1;
        Ok(token)
    }

    /// Consumes a null sentinel if one is next.
    ///
    /// Returns `Ok(true)` when a null was consumed and `Ok(false)` when the
    /// next entry is something else (the cursor doesn't move).
    pub fn try_read_null(&mut self) -> Result<bool, WireError> {
        if self.peek_token()? == Token::Null {
            self.pos += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.read_bytes(4)?);
        Ok(u32::from_be_bytes(raw))
    }

    /// Reads exactly `len` bytes.
    ///
    /// # Errors
    /// Returns [`WireError::UnexpectedEof`] (without moving the cursor) if
    /// fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(WireError::UnexpectedEof {
                needed: len,
                remaining,
            });
        }
        let data: &'a [u8] = self.data;
        let bytes = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let reader = TokenReader::new(&[0x01]);
        assert_eq!(reader.peek_token().unwrap(), Token::Frame);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_token_on_empty_source_is_eof() {
        let mut reader = TokenReader::new(&[]);
        assert!(matches!(
            reader.read_token(),
            Err(WireError::UnexpectedEof { needed: 1, remaining: 0 })
        ));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let mut reader = TokenReader::new(&[0x7F]);
        assert!(matches!(reader.read_token(), Err(WireError::UnknownToken(0x7F))));
    }

    #[test]
    fn test_try_read_null_only_consumes_null() {
        let data = [0x00, 0x01];
        let mut reader = TokenReader::new(&data);

        assert!(reader.try_read_null().unwrap());
        assert_eq!(reader.position(), 1);

        assert!(!reader.try_read_null().unwrap());
        assert_eq!(reader.position(), 1, "a frame tag must stay unread");
    }

    #[test]
    fn test_read_u32_big_endian() {
        let mut reader = TokenReader::new(&[0x00, 0x00, 0x01, 0x00]);
        assert_eq!(reader.read_u32().unwrap(), 256);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_short_read_leaves_cursor_in_place() {
        let mut reader = TokenReader::new(&[1, 2, 3]);
        let result = reader.read_bytes(5);
        assert!(matches!(
            result,
            Err(WireError::UnexpectedEof { needed: 5, remaining: 3 })
        ));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_bytes(3).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_read_bytes_outlive_reader() {
        let data = vec![9u8, 8, 7];
        let bytes = {
            let mut reader = TokenReader::new(&data);
            reader.read_bytes(2).unwrap()
        };
        assert_eq!(bytes, &[9, 8]);
    }
}
