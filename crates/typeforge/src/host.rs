//! The surface a host serialization framework calls into.

use std::sync::Arc;

use typeforge_wire::{TokenReader, TokenWriter};

use crate::{Logger, Object, Registry, RegistrationError, RegistryError, TypeDescriptor};

/// Pluggable serializer contract.
///
/// A host holds one implementation behind `Arc<dyn ExternalSerializer>`,
/// asks [`is_supported_type`](Self::is_supported_type) before routing a
/// type to it, and then dispatches values of that type through the other
/// three methods.
pub trait ExternalSerializer: Send + Sync {
    /// Hands over the host's logger. Only the first call has an effect.
    fn initialize(&self, logger: Arc<dyn Logger>) -> bool;

    fn is_supported_type(&self, ty: &TypeDescriptor) -> Result<bool, RegistrationError>;

    fn deep_copy(&self, value: Option<&dyn Object>)
    -> Result<Option<Box<dyn Object>>, RegistryError>;

    fn serialize(
        &self,
        value: Option<&dyn Object>,
        sink: Option<&mut TokenWriter>,
        expected_type: Option<&TypeDescriptor>,
    ) -> Result<(), RegistryError>;

    fn deserialize(
        &self,
        expected_type: Option<&TypeDescriptor>,
        source: Option<&mut TokenReader<'_>>,
    ) -> Result<Box<dyn Object>, RegistryError>;
}

impl ExternalSerializer for Registry {
    fn initialize(&self, logger: Arc<dyn Logger>) -> bool {
        Registry::initialize(self, logger)
    }

    fn is_supported_type(&self, ty: &TypeDescriptor) -> Result<bool, RegistrationError> {
        Registry::is_supported_type(self, ty)
    }

    fn deep_copy(
        &self,
        value: Option<&dyn Object>,
    ) -> Result<Option<Box<dyn Object>>, RegistryError> {
        Registry::deep_copy(self, value)
    }

    fn serialize(
        &self,
        value: Option<&dyn Object>,
        sink: Option<&mut TokenWriter>,
        expected_type: Option<&TypeDescriptor>,
    ) -> Result<(), RegistryError> {
        Registry::serialize(self, value, sink, expected_type)
    }

    fn deserialize(
        &self,
        expected_type: Option<&TypeDescriptor>,
        source: Option<&mut TokenReader<'_>>,
    ) -> Result<Box<dyn Object>, RegistryError> {
        Registry::deserialize(self, expected_type, source)
    }
}
