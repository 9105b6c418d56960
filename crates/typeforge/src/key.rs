//! Type identity.

use std::any::{Any, TypeId};

/// Stable, hashable identity of a concrete runtime type.
///
/// Wraps [`TypeId`], never a name string: two distinct types that happen
/// to share a name get distinct keys, and one type always maps to the same
/// key for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(TypeId);

impl TypeKey {
    /// Returns the key of `T`.
    pub fn of<T: ?Sized + Any>() -> Self {
        Self(TypeId::of::<T>())
    }

    /// Returns the underlying [`TypeId`].
    pub fn type_id(self) -> TypeId {
        self.0
    }
}

impl From<TypeId> for TypeKey {
    fn from(id: TypeId) -> Self {
        Self(id)
    }
}
