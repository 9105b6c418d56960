//! Error types for the registry.
//!
//! [`RegistrationError`] comes out of the eligibility path (building codecs
//! for a type), [`RegistryError`] out of the dispatch path. Lower-layer
//! errors convert in through `#[from]`, so `?` works across layers.

use std::fmt;

use typeforge_codec::{CodecError, SchemaViolation};
use typeforge_wire::WireError;

/// The kind of operation a registry dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Copy,
    Serialize,
    Deserialize,
}

impl Operation {
    /// Code reported to the [`Logger`](crate::Logger) when this operation
    /// has no codec.
    pub fn warning_code(self) -> u32 {
        match self {
            Self::Copy => 1,
            Self::Serialize => 2,
            Self::Deserialize => 3,
        }
    }

    /// Name of the codec that performs this operation.
    pub fn codec_noun(self) -> &'static str {
        match self {
            Self::Copy => "copier",
            Self::Serialize => "serializer",
            Self::Deserialize => "deserializer",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Serialize => write!(f, "serialize"),
            Self::Deserialize => write!(f, "deserialize"),
        }
    }
}

/// Building the codecs for an eligible type failed.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// The type's schema metadata is malformed. Nothing was registered.
    #[error("malformed schema for type {type_name}: {violation}")]
    MalformedSchema {
        type_name: &'static str,
        violation: SchemaViolation,
    },
}

/// Errors returned by registry dispatch.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A required argument was absent. Raised before any lookup.
    #[error("invalid argument: `{0}` is required")]
    InvalidArgument(&'static str),

    /// The type has no codec for the requested operation.
    #[error("no {} registered for type {type_name} ({operation} failed)", .operation.codec_noun())]
    MissingCodec {
        type_name: &'static str,
        operation: Operation,
    },

    /// A value reached a codec built for a different type.
    #[error("{operation} codec for {expected} received a value of type {found}")]
    TypeMismatch {
        operation: Operation,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl RegistryError {
    /// Name of the offending type, when the error is about one.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::MissingCodec { type_name, .. } => Some(*type_name),
            Self::TypeMismatch { found, .. } => Some(*found),
            Self::Registration(RegistrationError::MalformedSchema { type_name, .. }) => {
                Some(*type_name)
            }
            _ => None,
        }
    }
}
