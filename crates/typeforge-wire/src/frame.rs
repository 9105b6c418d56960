//! Frame adapters: the shape codecs read and write.
//!
//! A codec produces an opaque payload. The adapters bracket it with a
//! [`Token::Frame`] tag and a big-endian `u32` length so a reader knows
//! exactly how many bytes belong to one value.

use crate::{Token, TokenReader, TokenWriter, WireError};

/// Default upper bound on a single frame's payload (16 MiB).
pub const DEFAULT_MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Writes length-prefixed frames into a [`TokenWriter`].
#[derive(Debug)]
pub struct FrameWriter<'w> {
    sink: &'w mut TokenWriter,
    max_len: usize,
}

impl<'w> FrameWriter<'w> {
    /// Wraps `sink` with the default frame limit.
    pub fn new(sink: &'w mut TokenWriter) -> Self {
        Self::with_max_len(sink, DEFAULT_MAX_FRAME_LEN)
    }

    /// Wraps `sink` with a custom frame limit.
    pub fn with_max_len(sink: &'w mut TokenWriter, max_len: usize) -> Self {
        Self { sink, max_len }
    }

    /// Writes one frame.
    ///
    /// # Errors
    /// Returns [`WireError::FrameTooLarge`] if the payload exceeds the
    /// limit. Nothing is written in that case.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<(), WireError> {
        let len = payload.len();
        let max = self.max_len.min(u32::MAX as usize);
        if len > max {
            return Err(WireError::FrameTooLarge { len, max });
        }
        let Ok(prefix) = u32::try_from(len) else {
            return Err(WireError::FrameTooLarge { len, max });
        };

        self.sink.write_token(Token::Frame);
        self.sink.write_u32(prefix);
        self.sink.write_bytes(payload);
        tracing::trace!(len, "frame written");
        Ok(())
    }
}

/// Reads length-prefixed frames from a [`TokenReader`].
#[derive(Debug)]
pub struct FrameReader<'r, 'a> {
    source: &'r mut TokenReader<'a>,
    max_len: usize,
}

impl<'r, 'a> FrameReader<'r, 'a> {
    /// Wraps `source` with the default frame limit.
    pub fn new(source: &'r mut TokenReader<'a>) -> Self {
        Self::with_max_len(source, DEFAULT_MAX_FRAME_LEN)
    }

    /// Wraps `source` with a custom frame limit.
    pub fn with_max_len(source: &'r mut TokenReader<'a>, max_len: usize) -> Self {
        Self { source, max_len }
    }

    /// Reads one frame and returns its payload.
    ///
    /// The source only advances when the whole frame was read. On error
    /// it is left where it was, so the caller can still inspect the entry
    /// (e.g. with [`TokenReader::try_read_null`]).
    ///
    /// # Errors
    /// - [`WireError::UnexpectedToken`]: the next entry isn't a frame
    ///   (e.g. a null sentinel)
    /// - [`WireError::FrameTooLarge`]: the declared length exceeds the limit
    /// - [`WireError::UnexpectedEof`]: the payload is truncated
    pub fn read_frame(&mut self) -> Result<&'a [u8], WireError> {
        let mut cursor = self.source.clone();
        match cursor.read_token()? {
            Token::Frame => {}
            found => {
                return Err(WireError::UnexpectedToken {
                    expected: Token::Frame,
                    found,
                });
            }
        }

        let len = cursor.read_u32()? as usize;
        if len > self.max_len {
            return Err(WireError::FrameTooLarge {
                len,
                max: self.max_len,
            });
        }
        let payload = cursor.read_bytes(len)?;
        *self.source = cursor;
        tracing::trace!(len, "frame read");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let mut sink = TokenWriter::new();
        FrameWriter::new(&mut sink).write_frame(b"hi").unwrap();
        assert_eq!(sink.as_bytes(), &[0x01, 0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn test_frames_read_back_in_order() {
        let mut sink = TokenWriter::new();
        let mut frames = FrameWriter::new(&mut sink);
        frames.write_frame(b"first").unwrap();
        frames.write_frame(b"").unwrap();
        frames.write_frame(b"third").unwrap();

        let bytes = sink.into_bytes();
        let mut source = TokenReader::new(&bytes);
        let mut frames = FrameReader::new(&mut source);
        assert_eq!(frames.read_frame().unwrap(), b"first");
        assert_eq!(frames.read_frame().unwrap(), b"");
        assert_eq!(frames.read_frame().unwrap(), b"third");
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_oversized_write_is_rejected_without_side_effects() {
        let mut sink = TokenWriter::new();
        let result = FrameWriter::with_max_len(&mut sink, 4).write_frame(b"too long");
        assert!(matches!(
            result,
            Err(WireError::FrameTooLarge { len: 8, max: 4 })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_oversized_declared_length_is_rejected() {
        let mut sink = TokenWriter::new();
        FrameWriter::new(&mut sink).write_frame(&[0u8; 32]).unwrap();

        let bytes = sink.into_bytes();
        let mut source = TokenReader::new(&bytes);
        let result = FrameReader::with_max_len(&mut source, 16).read_frame();
        assert!(matches!(
            result,
            Err(WireError::FrameTooLarge { len: 32, max: 16 })
        ));
    }

    #[test]
    fn test_null_where_frame_expected() {
        let mut sink = TokenWriter::new();
        sink.write_null();

        let bytes = sink.into_bytes();
        let mut source = TokenReader::new(&bytes);
        let result = FrameReader::new(&mut source).read_frame();
        assert!(matches!(
            result,
            Err(WireError::UnexpectedToken {
                expected: Token::Frame,
                found: Token::Null,
            })
        ));
    }

    #[test]
    fn test_truncated_payload_is_eof() {
        let bytes = [0x01, 0, 0, 0, 10, 1, 2, 3];
        let mut source = TokenReader::new(&bytes);
        let result = FrameReader::new(&mut source).read_frame();
        assert!(matches!(
            result,
            Err(WireError::UnexpectedEof { needed: 10, remaining: 3 })
        ));
        assert_eq!(source.position(), 0);
    }

    #[test]
    fn test_failed_read_leaves_null_in_place() {
        let mut sink = TokenWriter::new();
        sink.write_null();
        FrameWriter::new(&mut sink).write_frame(b"next").unwrap();

        let bytes = sink.into_bytes();
        let mut source = TokenReader::new(&bytes);
        assert!(FrameReader::new(&mut source).read_frame().is_err());
        assert_eq!(source.position(), 0);

        assert!(source.try_read_null().unwrap());
        assert_eq!(FrameReader::new(&mut source).read_frame().unwrap(), b"next");
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_oversized_read_does_not_advance() {
        let mut sink = TokenWriter::new();
        FrameWriter::new(&mut sink).write_frame(&[7u8; 32]).unwrap();

        let bytes = sink.into_bytes();
        let mut source = TokenReader::new(&bytes);
        assert!(FrameReader::with_max_len(&mut source, 16).read_frame().is_err());
        assert_eq!(source.position(), 0);
    }
}
