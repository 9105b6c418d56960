//! # Typeforge
//!
//! Type-keyed codec registry for a host serialization framework.
//!
//! A host asks the [`Registry`] whether it can handle a type. The first
//! time the answer is yes, the registry builds three operations for that
//! type (deep copy, serialize, deserialize) and caches them under its
//! [`TypeKey`]. Every later call dispatches straight to the cached
//! operation, chosen by the value's runtime type.
//!
//! Only types that implement [`Schema`] are eligible. Open generic
//! definitions never are.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use typeforge::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Order {
//!     id: u64,
//!     items: Vec<String>,
//! }
//!
//! impl Schema for Order {
//!     const SCHEMA_NAME: &'static str = "shop.order";
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new(RegistryConfig::default());
//! assert!(registry.is_supported_type(&TypeDescriptor::of::<Order>())?);
//!
//! let order = Order { id: 7, items: vec!["tea".into()] };
//! let bytes = registry.to_bytes(&order)?;
//! let back: Order = registry.from_bytes(&bytes)?;
//! assert_eq!(back, order);
//! # Ok(())
//! # }
//! ```

mod config;
mod descriptor;
mod diagnostics;
mod error;
mod host;
mod key;
mod object;
mod ops;
mod registry;
mod statics;

pub use config::RegistryConfig;
pub use descriptor::{TypeDescriptor, TypeShape};
pub use diagnostics::{Logger, TracingLogger};
pub use error::{Operation, RegistrationError, RegistryError};
pub use host::ExternalSerializer;
pub use key::TypeKey;
pub use object::Object;
pub use ops::{
    CodecSet, Copier, TypedCopier, TypedDeserializer, TypedSerializer, WireDeserializer,
    WireSerializer,
};
pub use registry::Registry;
pub use statics::{StaticSchema, static_schemas};

#[doc(hidden)]
pub use statics::__private;

pub use typeforge_codec::{
    BinaryCodec, Codec, CodecError, Schema, SchemaInfo, SchemaViolation, WireCodec, WireFormat,
};
#[cfg(feature = "json")]
pub use typeforge_codec::JsonCodec;
pub use typeforge_wire::{Token, TokenReader, TokenWriter, WireError};

pub mod prelude {
    pub use crate::{
        ExternalSerializer, Logger, Object, Registry, RegistryConfig, RegistryError, Schema,
        TokenReader, TokenWriter, TracingLogger, TypeDescriptor, WireFormat,
    };
}
