//! The three per-type operations and how they're built.
//!
//! Two layers, same as a typed handler behind a dyn handler:
//!
//! - **Typed**: [`TypedCopier<T>`], [`TypedSerializer<T>`],
//!   [`TypedDeserializer<T>`] know the concrete schema type.
//! - **Erased**: [`Copier`], [`WireSerializer`], [`WireDeserializer`] are
//!   object-safe, so one map can hold operations for every type.

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::Arc;

use typeforge_codec::{Codec, Schema, WireCodec};
use typeforge_wire::{FrameReader, FrameWriter, TokenReader, TokenWriter};

use crate::{Object, Operation, RegistryConfig, RegistryError};

/// Produces a structurally independent copy of a value.
pub trait Copier: Send + Sync {
    fn copy(&self, value: &dyn Object) -> Result<Box<dyn Object>, RegistryError>;
}

/// Encodes a value into a token sink.
pub trait WireSerializer: Send + Sync {
    fn serialize(&self, value: &dyn Object, sink: &mut TokenWriter) -> Result<(), RegistryError>;
}

/// Decodes a value from a token source.
pub trait WireDeserializer: Send + Sync {
    fn deserialize(&self, source: &mut TokenReader<'_>) -> Result<Box<dyn Object>, RegistryError>;
}

fn downcast<T: Schema>(value: &dyn Object, operation: Operation) -> Result<&T, RegistryError> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| RegistryError::TypeMismatch {
            operation,
            expected: type_name::<T>(),
            found: value.type_name(),
        })
}

// ---------------------------------------------------------------------------
// Typed operations
// ---------------------------------------------------------------------------

/// Copies a `T` through its `Clone` impl.
pub struct TypedCopier<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Schema> TypedCopier<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Schema> Default for TypedCopier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Schema> Copier for TypedCopier<T> {
    fn copy(&self, value: &dyn Object) -> Result<Box<dyn Object>, RegistryError> {
        let typed = downcast::<T>(value, Operation::Copy)?;
        Ok(Box::new(typed.clone()))
    }
}

/// Encodes a `T` with the bound codec and writes it as one frame.
pub struct TypedSerializer<T> {
    codec: WireCodec,
    /// Payloads longer than this are rejected before anything is written.
    max_frame_len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Schema> TypedSerializer<T> {
    pub fn new(codec: WireCodec, max_frame_len: usize) -> Self {
        Self {
            codec,
            max_frame_len,
            _marker: PhantomData,
        }
    }
}

impl<T: Schema> WireSerializer for TypedSerializer<T> {
    fn serialize(&self, value: &dyn Object, sink: &mut TokenWriter) -> Result<(), RegistryError> {
        let typed = downcast::<T>(value, Operation::Serialize)?;
        let payload = self.codec.encode(typed)?;
        FrameWriter::with_max_len(sink, self.max_frame_len).write_frame(&payload)?;
        Ok(())
    }
}

/// Reads one frame and decodes it as a `T` with the bound codec.
pub struct TypedDeserializer<T> {
    codec: WireCodec,
    /// Declared lengths above this are rejected before the payload is read.
    max_frame_len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Schema> TypedDeserializer<T> {
    pub fn new(codec: WireCodec, max_frame_len: usize) -> Self {
        Self {
            codec,
            max_frame_len,
            _marker: PhantomData,
        }
    }
}

impl<T: Schema> WireDeserializer for TypedDeserializer<T> {
    fn deserialize(&self, source: &mut TokenReader<'_>) -> Result<Box<dyn Object>, RegistryError> {
        let payload = FrameReader::with_max_len(source, self.max_frame_len).read_frame()?;
        let value: T = self.codec.decode(payload)?;
        Ok(Box::new(value))
    }
}

// ---------------------------------------------------------------------------
// CodecSet
// ---------------------------------------------------------------------------

/// The three operations built for one type.
#[derive(Clone)]
pub struct CodecSet {
    /// Clones the value through `T: Clone`.
    pub copier: Arc<dyn Copier>,

    /// Encodes with the configured codec and writes one frame.
    pub serializer: Arc<dyn WireSerializer>,

    /// Reads one frame and decodes it with the same codec.
    pub deserializer: Arc<dyn WireDeserializer>,
}

/// Builds the operations for `T`, bound to the registry's codec settings.
///
/// A pointer to this function (one per `T`) is what a
/// [`TypeDescriptor`](crate::TypeDescriptor) carries, so the registry can
/// build operations for a type it only knows at runtime.
pub(crate) fn build_codec_set<T: Schema>(config: &RegistryConfig) -> CodecSet {
    let codec = config.codec();
    CodecSet {
        copier: Arc::new(TypedCopier::<T>::new()),
        serializer: Arc::new(TypedSerializer::<T>::new(codec, config.max_frame_len)),
        deserializer: Arc::new(TypedDeserializer::<T>::new(codec, config.max_frame_len)),
    }
}
