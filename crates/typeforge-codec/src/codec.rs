//! Codec trait and implementations for encoding/decoding schema values.
//!
//! The registry doesn't care HOW a value becomes bytes. It needs something
//! that implements [`Codec`], and it picks one from the closed set in
//! [`WireFormat`]. [`BinaryCodec`] (postcard) is the default;
//! [`JsonCodec`] exists for inspecting payloads while debugging.

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::CodecError;

/// A codec that can encode Rust values to a payload and decode them back.
///
/// ## Generic methods
///
/// `encode` and `decode` are generic over the value type, so this trait
/// is not object-safe. The registry erases the value type one level up,
/// in operations built per schema type, and picks the codec through
/// [`WireCodec`].
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a payload.
    ///
    /// # Errors
    /// Returns an encode variant of [`CodecError`] if the value can't be
    /// represented in this format.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserializes a payload back into a value.
    ///
    /// # Errors
    /// Returns a decode variant of [`CodecError`] if the payload is
    /// malformed, truncated, or doesn't match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;

    /// Short, stable name of the format.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// BinaryCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] producing compact binary payloads via `postcard`.
///
/// The payload has no field names or type tags. It is driven entirely by
/// the field layout of the schema type, so the writer and the reader must
/// agree on `T`.
///
/// ## Example
///
/// ```rust
/// use typeforge_codec::{BinaryCodec, Codec};
///
/// let codec = BinaryCodec;
/// let bytes = codec.encode(&(7u32, "seven".to_string())).unwrap();
/// let decoded: (u32, String) = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, (7, "seven".to_string()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        postcard::to_stdvec(value).map_err(CodecError::BinaryEncode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        postcard::from_bytes(data).map_err(CodecError::BinaryDecode)
    }

    fn name(&self) -> &'static str {
        "binary"
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Human-readable and larger than [`BinaryCodec`]. Useful when you want to
/// look at payloads in logs.
///
/// This is behind the `json` feature flag (enabled by default).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(CodecError::JsonEncode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(data).map_err(CodecError::JsonDecode)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which codec a registry binds its serializers and deserializers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Compact postcard payloads.
    #[default]
    Binary,

    /// JSON payloads.
    #[cfg(feature = "json")]
    Json,
}

impl WireFormat {
    /// Returns the codec for this format.
    pub fn codec(self) -> WireCodec {
        match self {
            Self::Binary => WireCodec::Binary(BinaryCodec),
            #[cfg(feature = "json")]
            Self::Json => WireCodec::Json(JsonCodec),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codec().name())
    }
}

/// The closed set of codecs, dispatched by `match`.
///
/// Typed operations hold a `WireCodec` by value (it's `Copy`), so they
/// don't need to be generic over the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireCodec {
    Binary(BinaryCodec),
    #[cfg(feature = "json")]
    Json(JsonCodec),
}

impl WireCodec {
    /// Returns the format this codec implements.
    pub fn format(&self) -> WireFormat {
        match self {
            Self::Binary(_) => WireFormat::Binary,
            #[cfg(feature = "json")]
            Self::Json(_) => WireFormat::Json,
        }
    }
}

impl Default for WireCodec {
    fn default() -> Self {
        WireFormat::default().codec()
    }
}

impl Codec for WireCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Binary(codec) => codec.encode(value),
            #[cfg(feature = "json")]
            Self::Json(codec) => codec.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        match self {
            Self::Binary(codec) => codec.decode(data),
            #[cfg(feature = "json")]
            Self::Json(codec) => codec.decode(data),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Binary(codec) => codec.name(),
            #[cfg(feature = "json")]
            Self::Json(codec) => codec.name(),
        }
    }
}
