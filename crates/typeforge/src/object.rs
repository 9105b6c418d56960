//! Type-erased values.

use std::any::{Any, type_name};

use crate::TypeKey;

/// A value of any `'static` type, viewed through its runtime type.
///
/// Every `Any + Send + Sync` type implements `Object`, so any owned value
/// can be handed to the registry as `&dyn Object`. The methods go through
/// the vtable and therefore report the *runtime* type, not the declared
/// one.
///
/// ## Pitfall
///
/// `Box<dyn Object>` is itself `Any + Send + Sync`, so it is also an
/// `Object`. Pass `&*boxed` (the inner value), not `&boxed`, or the
/// registry will see the box type.
pub trait Object: Any + Send + Sync {
    /// Key of the runtime type.
    fn type_key(&self) -> TypeKey;

    /// Name of the runtime type, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Upcasts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts to `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> Object for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

impl dyn Object {
    /// Returns `true` if the runtime type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the value as `T` if that's its runtime type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Takes the value as `T` if that's its runtime type.
    pub fn downcast<T: Any>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}
