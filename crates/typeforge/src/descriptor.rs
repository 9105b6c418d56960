//! Runtime type metadata.
//!
//! A [`TypeDescriptor`] is what a caller hands the registry to ask "can you
//! handle this type?". It carries the type's identity, its name, whether
//! it is a concrete type or a generic definition, and, for schema types,
//! a pointer to the function that builds its codecs.

use std::any::{Any, type_name};
use std::fmt;

use typeforge_codec::{Schema, SchemaInfo};

use crate::RegistryConfig;
use crate::TypeKey;
use crate::ops::{CodecSet, build_codec_set};

/// Whether a type has a concrete layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A fully constructed type.
    Concrete,
    /// A generic definition still waiting for its type arguments.
    OpenGeneric,
}

/// The schema marker as seen at runtime: metadata plus a codec builder
/// monomorphized for the marked type.
#[derive(Clone, Copy)]
pub(crate) struct SchemaBinding {
    info: SchemaInfo,
    build: fn(&RegistryConfig) -> CodecSet,
}

impl SchemaBinding {
    pub(crate) fn info(&self) -> SchemaInfo {
        self.info
    }

    pub(crate) fn build(&self, config: &RegistryConfig) -> CodecSet {
        (self.build)(config)
    }
}

/// Runtime description of a type.
///
/// ## Constructors
///
/// | Constructor | Shape | Schema marker |
/// |-------------|-------|---------------|
/// | [`of::<T>()`](Self::of) | concrete | yes |
/// | [`unmarked::<T>()`](Self::unmarked) | concrete | no |
/// | [`open_generic::<Tag>(name)`](Self::open_generic) | open generic | no |
///
/// Equality and hashing go by [`TypeKey`] only.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    key: TypeKey,
    name: &'static str,
    shape: TypeShape,
    schema: Option<SchemaBinding>,
}

impl TypeDescriptor {
    /// Describes a concrete schema type.
    pub fn of<T: Schema>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            name: type_name::<T>(),
            shape: TypeShape::Concrete,
            schema: Some(SchemaBinding {
                info: SchemaInfo::of::<T>(),
                build: build_codec_set::<T>,
            }),
        }
    }

    /// Describes a concrete type that carries no schema marker.
    pub fn unmarked<T: Any>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            name: type_name::<T>(),
            shape: TypeShape::Concrete,
            schema: None,
        }
    }

    /// Describes a generic definition such as `Envelope<T>` before `T` is
    /// chosen.
    ///
    /// Rust has no runtime value for an uninstantiated generic, so `Tag` is
    /// any type the caller uses to stand for the definition.
    pub fn open_generic<Tag: Any>(name: &'static str) -> Self {
        Self {
            key: TypeKey::of::<Tag>(),
            name,
            shape: TypeShape::OpenGeneric,
            schema: None,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    /// Returns `true` for a generic definition without concrete arguments.
    pub fn is_open_generic(&self) -> bool {
        self.shape == TypeShape::OpenGeneric
    }

    /// Returns `true` if the type declares itself a schema type.
    pub fn has_schema_marker(&self) -> bool {
        self.schema.is_some()
    }

    /// Schema metadata, for marked types.
    pub fn schema_info(&self) -> Option<SchemaInfo> {
        self.schema.map(|binding| binding.info())
    }

    pub(crate) fn binding(&self) -> Option<SchemaBinding> {
        self.schema
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeDescriptor {}

impl std::hash::Hash for TypeDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("schema", &self.schema_info())
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
