//! Link-time schema registration.
//!
//! Types submitted with [`submit_schema!`](crate::submit_schema) are
//! collected by `inventory` and can be registered in one go with
//! [`Registry::preload_static`](crate::Registry::preload_static).

use crate::TypeDescriptor;

/// One statically submitted schema type.
pub struct StaticSchema {
    describe: fn() -> TypeDescriptor,
}

impl StaticSchema {
    pub const fn new(describe: fn() -> TypeDescriptor) -> Self {
        Self { describe }
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        (self.describe)()
    }
}

inventory::collect!(StaticSchema);

/// Descriptors of every submitted schema type, in no particular order.
pub fn static_schemas() -> impl Iterator<Item = TypeDescriptor> {
    inventory::iter::<StaticSchema>
        .into_iter()
        .map(StaticSchema::descriptor)
}

/// Submits schema types for [`Registry::preload_static`](crate::Registry::preload_static).
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Order { id: u64 }
///
/// impl Schema for Order {
///     const SCHEMA_NAME: &'static str = "shop.order";
/// }
///
/// typeforge::submit_schema!(Order);
/// ```
#[macro_export]
macro_rules! submit_schema {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::__private::inventory::submit! {
                $crate::StaticSchema::new($crate::TypeDescriptor::of::<$ty>)
            }
        )+
    };
}

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
