//! Error types for the codec layer.
//!
//! Each variant wraps the underlying format error and prints it as part
//! of its own message, so callers see one `CodecError` type no matter
//! which codec was selected.

/// Errors that can occur while encoding or decoding a payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The binary codec couldn't encode a value.
    #[error("binary encode failed: {0}")]
    BinaryEncode(postcard::Error),

    /// The binary codec couldn't decode a payload.
    ///
    /// Common causes: truncated payload, payload written for a different
    /// type, or a payload produced by another codec.
    #[error("binary decode failed: {0}")]
    BinaryDecode(postcard::Error),

    /// The JSON codec couldn't encode a value.
    #[cfg(feature = "json")]
    #[error("json encode failed: {0}")]
    JsonEncode(serde_json::Error),

    /// The JSON codec couldn't decode a payload.
    #[cfg(feature = "json")]
    #[error("json decode failed: {0}")]
    JsonDecode(serde_json::Error),
}

impl CodecError {
    /// Returns `true` for failures that happened on the decode side.
    pub fn is_decode(&self) -> bool {
        match self {
            Self::BinaryDecode(_) => true,
            #[cfg(feature = "json")]
            Self::JsonDecode(_) => true,
            _ => false,
        }
    }
}
