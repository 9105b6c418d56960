//! The schema marker.

use serde::{Serialize, de::DeserializeOwned};

/// Marks a type as a wire schema type.
///
/// Only types carrying this marker are eligible for codec registration.
/// The trait bounds are exactly what the registry needs to build the three
/// operations for the type:
///
/// - `Clone` → the deep copy
/// - `Serialize` / `DeserializeOwned` → the wire encoder and decoder
/// - `Send + Sync + 'static` → operations are shared across threads and
///   stored for the registry's whole lifetime
///
/// ## Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use typeforge_codec::Schema;
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Heartbeat {
///     sent_at: u64,
/// }
///
/// impl Schema for Heartbeat {
///     const SCHEMA_NAME: &'static str = "demo.heartbeat";
/// }
/// ```
pub trait Schema: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Stable name of the schema. Must be non-empty and contain no
    /// whitespace or control characters.
    const SCHEMA_NAME: &'static str;

    /// Schema revision. Must be at least 1.
    const SCHEMA_VERSION: u16 = 1;
}

/// Metadata declared by a [`Schema`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaInfo {
    pub name: &'static str,
    pub version: u16,
}

/// Why a [`SchemaInfo`] is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("schema name is empty")]
    EmptyName,

    #[error("schema name contains invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("schema version must be at least 1")]
    ZeroVersion,
}

impl SchemaInfo {
    /// Reads the metadata declared by `T`.
    pub fn of<T: Schema>() -> Self {
        Self {
            name: T::SCHEMA_NAME,
            version: T::SCHEMA_VERSION,
        }
    }

    /// Checks that the metadata is well formed.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if self.name.is_empty() {
            return Err(SchemaViolation::EmptyName);
        }
        if let Some(bad) = self
            .name
            .chars()
            .find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(SchemaViolation::InvalidCharacter(bad));
        }
        if self.version == 0 {
            return Err(SchemaViolation::ZeroVersion);
        }
        Ok(())
    }
}
