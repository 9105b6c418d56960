//! Schema marker and wire codecs for typeforge.
//!
//! This crate defines what it means for a type to be serializable by the
//! registry, and how such a value is turned into bytes:
//!
//! - **Schema** ([`Schema`] trait, [`SchemaInfo`]): the marker a type
//!   carries to declare itself a wire schema type, plus the metadata the
//!   registry validates before building codecs for it.
//! - **Codec** ([`Codec`] trait, [`BinaryCodec`], [`JsonCodec`]): how a
//!   schema value is converted to and from an opaque payload.
//! - **Selection** ([`WireFormat`], [`WireCodec`]): the closed set of
//!   codecs a registry can be configured with.
//! - **Errors** ([`CodecError`]): what can go wrong while encoding or
//!   decoding.
//!
//! # Where it sits
//!
//! ```text
//! Registry (above)  ← builds typed copy/encode/decode operations per Schema type
//!     ↕
//! Codec (this crate)  ← value ↔ payload bytes
//!     ↕
//! Wire (below)  ← payload bytes ↔ framed token stream
//! ```

mod codec;
mod error;
mod schema;

pub use codec::{BinaryCodec, Codec, WireCodec, WireFormat};
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::CodecError;
pub use schema::{Schema, SchemaInfo, SchemaViolation};
