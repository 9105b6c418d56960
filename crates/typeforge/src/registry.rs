//! The registry: eligibility, registration, and dispatch.
//!
//! # Concurrency note
//!
//! `Registry` is shared by reference (usually behind an `Arc`) across any
//! number of threads. The three operation maps are `DashMap`s, so reads and
//! insert-if-absent writes need no outside locking. Entries are never
//! removed or replaced, which means a lookup that succeeded stays valid.
//!
//! Two threads may race to register the same type. Both build a full set
//! of operations; each map keeps whichever insert lands first and the
//! loser's operations are dropped. Since operations for one type are
//! interchangeable, that's harmless.
//!
//! The copier map is written last and is the one the eligibility fast path
//! checks. Once any caller sees a type as supported, its serializer and
//! deserializer are already in place.

use std::any::type_name;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use typeforge_codec::Schema;
use typeforge_wire::{TokenReader, TokenWriter};

use crate::descriptor::SchemaBinding;
use crate::diagnostics::Diagnostics;
use crate::ops::{Copier, WireDeserializer, WireSerializer};
use crate::statics::static_schemas;
use crate::{
    Logger, Object, Operation, RegistrationError, RegistryConfig, RegistryError, TypeDescriptor,
    TypeKey,
};

/// Type-keyed cache of copy, serialize, and deserialize operations.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ initialize(logger) ──→ is_supported_type(T) ──→ deep_copy / serialize / deserialize
///                (optional)              │ first time for T:
///                                        ▼
///                                 register(T) → maps grow by one entry each
/// ```
///
/// There is no teardown and no eviction: an entry lives as long as the
/// registry.
///
/// ## Dispatch keys
///
/// `deep_copy` and `serialize` look operations up by the value's
/// *runtime* type. `deserialize` has no value yet, so it uses the expected
/// type the caller passes in.
pub struct Registry {
    /// TypeKey → copier. Written last during registration, so presence
    /// here means the other two maps are populated too.
    copiers: DashMap<TypeKey, Arc<dyn Copier>>,

    /// TypeKey → serializer, looked up by the value's runtime type.
    serializers: DashMap<TypeKey, Arc<dyn WireSerializer>>,

    /// TypeKey → deserializer, looked up by the caller's expected type.
    deserializers: DashMap<TypeKey, Arc<dyn WireDeserializer>>,

    /// TypeKey → type name, for `registered_types` and log fields.
    names: DashMap<TypeKey, &'static str>,

    /// Number of copier inserts that won their race.
    registrations: AtomicUsize,

    /// Where missing-codec warnings go. Empty until `initialize`.
    diagnostics: Diagnostics,

    /// Settings every built codec is bound to. Fixed at construction.
    config: RegistryConfig,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            copiers: DashMap::new(),
            serializers: DashMap::new(),
            deserializers: DashMap::new(),
            names: DashMap::new(),
            registrations: AtomicUsize::new(0),
            diagnostics: Diagnostics::default(),
            config,
        }
    }

    /// Creates a registry and registers every type submitted with
    /// [`submit_schema!`](crate::submit_schema).
    pub fn with_static_schemas(config: RegistryConfig) -> Result<Self, RegistrationError> {
        let registry = Self::new(config);
        registry.preload_static()?;
        Ok(registry)
    }

    /// Wires the logger that dispatch failures are reported to.
    ///
    /// Only the first call takes effect; later calls return `false` and
    /// leave the installed logger in place.
    pub fn initialize(&self, logger: Arc<dyn Logger>) -> bool {
        let installed = self.diagnostics.install(logger);
        if !installed {
            tracing::debug!("registry logger already initialized, keeping the first one");
        }
        installed
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Eligibility and registration
    // -----------------------------------------------------------------------

    /// Returns whether the registry can handle `ty`, registering it on the
    /// first successful check.
    ///
    /// - already registered → `true`, nothing else inspected
    /// - open generic definition → `false`
    /// - no schema marker → `false`
    /// - otherwise the type is registered and the answer is `true`
    ///
    /// Repeated calls never re-register.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] if the type's schema metadata is
    /// malformed. The type stays unregistered.
    pub fn is_supported_type(&self, ty: &TypeDescriptor) -> Result<bool, RegistrationError> {
        if self.copiers.contains_key(&ty.key()) {
            return Ok(true);
        }
        if ty.is_open_generic() {
            tracing::trace!(type_name = ty.name(), "open generic definition is not supported");
            return Ok(false);
        }
        let Some(binding) = ty.binding() else {
            tracing::trace!(type_name = ty.name(), "type carries no schema marker");
            return Ok(false);
        };

        self.register(ty, binding)?;
        Ok(true)
    }

    /// Builds the three operations for `ty` and publishes them.
    fn register(
        &self,
        ty: &TypeDescriptor,
        binding: SchemaBinding,
    ) -> Result<(), RegistrationError> {
        let info = binding.info();
        info.validate()
            .map_err(|violation| RegistrationError::MalformedSchema {
                type_name: ty.name(),
                violation,
            })?;

        let set = binding.build(&self.config);
        let key = ty.key();

        // Insert-if-absent everywhere: a racing thread may already have
        // published its own set.
        self.names.entry(key).or_insert(ty.name());
        self.serializers.entry(key).or_insert(set.serializer);
        self.deserializers.entry(key).or_insert(set.deserializer);

        // Published last: this is the entry `is_supported_type` checks.
        let won = match self.copiers.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(set.copier);
                true
            }
            Entry::Occupied(_) => false,
        };

        if won {
            self.registrations.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                type_name = ty.name(),
                schema = info.name,
                version = info.version,
                format = %self.config.wire_format,
                "codecs registered"
            );
        } else {
            tracing::trace!(type_name = ty.name(), "lost registration race, discarding codecs");
        }
        Ok(())
    }

    /// Registers every type submitted with
    /// [`submit_schema!`](crate::submit_schema). Returns how many of them
    /// are supported afterwards.
    pub fn preload_static(&self) -> Result<usize, RegistrationError> {
        let mut supported = 0;
        for descriptor in static_schemas() {
            if self.is_supported_type(&descriptor)? {
                supported += 1;
            }
        }
        tracing::debug!(supported, "static schemas preloaded");
        Ok(supported)
    }

    /// Returns `true` if `key` has a copier (and therefore a full set).
    pub fn is_registered(&self, key: TypeKey) -> bool {
        self.copiers.contains_key(&key)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.copiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.copiers.is_empty()
    }

    /// How many registrations won their insert race. Equals
    /// [`len`](Self::len) once all registrations have finished.
    pub fn registration_count(&self) -> usize {
        self.registrations.load(Ordering::Relaxed)
    }

    /// Names of registered types, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .copiers
            .iter()
            .filter_map(|entry| self.names.get(entry.key()).map(|name| *name))
            .collect();
        names.sort_unstable();
        names
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Returns a deep copy of `value`, or `None` for `None`.
    ///
    /// The copier is chosen by the value's runtime type.
    ///
    /// # Errors
    /// [`RegistryError::MissingCodec`] if that type has no copier.
    pub fn deep_copy(
        &self,
        value: Option<&dyn Object>,
    ) -> Result<Option<Box<dyn Object>>, RegistryError> {
        match value {
            Some(value) => self.copy_object(value).map(Some),
            None => Ok(None),
        }
    }

    /// Writes `value` into `sink`.
    ///
    /// `None` writes the null sentinel without any lookup. Otherwise the
    /// serializer is chosen by the value's runtime type; `expected_type`
    /// is accepted but doesn't take part in dispatch.
    ///
    /// # Errors
    /// - [`RegistryError::InvalidArgument`] if `sink` is `None`
    /// - [`RegistryError::MissingCodec`] if the runtime type has no serializer
    /// - codec or wire errors from the serializer itself
    pub fn serialize(
        &self,
        value: Option<&dyn Object>,
        sink: Option<&mut TokenWriter>,
        expected_type: Option<&TypeDescriptor>,
    ) -> Result<(), RegistryError> {
        let sink = sink.ok_or(RegistryError::InvalidArgument("sink"))?;
        let Some(value) = value else {
            sink.write_null();
            return Ok(());
        };
        if let Some(expected) = expected_type {
            tracing::trace!(
                expected = expected.name(),
                actual = value.type_name(),
                "serializing by runtime type"
            );
        }
        self.serialize_object(value, sink)
    }

    /// Reads one value of `expected_type` from `source`.
    ///
    /// # Errors
    /// - [`RegistryError::InvalidArgument`] if `expected_type` or `source`
    ///   is `None`
    /// - [`RegistryError::MissingCodec`] if the type has no deserializer
    /// - codec or wire errors from the deserializer itself
    pub fn deserialize(
        &self,
        expected_type: Option<&TypeDescriptor>,
        source: Option<&mut TokenReader<'_>>,
    ) -> Result<Box<dyn Object>, RegistryError> {
        let expected = expected_type.ok_or(RegistryError::InvalidArgument("expected_type"))?;
        let source = source.ok_or(RegistryError::InvalidArgument("source"))?;
        let deserializer = self.lookup(
            &self.deserializers,
            expected.key(),
            expected.name(),
            Operation::Deserialize,
        )?;
        deserializer.deserialize(source)
    }

    // -----------------------------------------------------------------------
    // Typed conveniences
    // -----------------------------------------------------------------------

    /// Deep-copies a value whose type is known statically.
    pub fn copy_value<T: Schema>(&self, value: &T) -> Result<T, RegistryError> {
        let copy = self.copy_object(value)?;
        let found = (*copy).type_name();
        copy.downcast::<T>()
            .map(|boxed| *boxed)
            .ok_or(RegistryError::TypeMismatch {
                operation: Operation::Copy,
                expected: type_name::<T>(),
                found,
            })
    }

    /// Serializes `value` into a fresh buffer.
    pub fn to_bytes(&self, value: &dyn Object) -> Result<Vec<u8>, RegistryError> {
        let mut sink = TokenWriter::new();
        self.serialize_object(value, &mut sink)?;
        Ok(sink.into_bytes())
    }

    /// Deserializes a `T` from a buffer produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes<T: Schema>(&self, bytes: &[u8]) -> Result<T, RegistryError> {
        let deserializer = self.lookup(
            &self.deserializers,
            TypeKey::of::<T>(),
            type_name::<T>(),
            Operation::Deserialize,
        )?;
        let mut source = TokenReader::new(bytes);
        let value = deserializer.deserialize(&mut source)?;
        let found = (*value).type_name();
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .ok_or(RegistryError::TypeMismatch {
                operation: Operation::Deserialize,
                expected: type_name::<T>(),
                found,
            })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn copy_object(&self, value: &dyn Object) -> Result<Box<dyn Object>, RegistryError> {
        let copier = self.lookup(
            &self.copiers,
            value.type_key(),
            value.type_name(),
            Operation::Copy,
        )?;
        copier.copy(value)
    }

    fn serialize_object(
        &self,
        value: &dyn Object,
        sink: &mut TokenWriter,
    ) -> Result<(), RegistryError> {
        let serializer = self.lookup(
            &self.serializers,
            value.type_key(),
            value.type_name(),
            Operation::Serialize,
        )?;
        serializer.serialize(value, sink)
    }

    /// Clones the operation out of `map` so no shard lock is held while it
    /// runs. Reports and returns `MissingCodec` if it's absent.
    fn lookup<V: ?Sized>(
        &self,
        map: &DashMap<TypeKey, Arc<V>>,
        key: TypeKey,
        type_name: &'static str,
        operation: Operation,
    ) -> Result<Arc<V>, RegistryError> {
        let found = map.get(&key).map(|entry| Arc::clone(entry.value()));
        match found {
            Some(op) => Ok(op),
            None => {
                self.diagnostics.warn(
                    operation.warning_code(),
                    || format!("no {} found for type {type_name}", operation.codec_noun()),
                    None,
                );
                Err(RegistryError::MissingCodec {
                    type_name,
                    operation,
                })
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Schema for Point {
        const SCHEMA_NAME: &'static str = "geo.point";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Path {
        name: String,
        points: Vec<Point>,
    }

    impl Schema for Path {
        const SCHEMA_NAME: &'static str = "geo.path";
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Nameless;

    impl Schema for Nameless {
        const SCHEMA_NAME: &'static str = "";
    }

    fn registry_with<T: Schema>() -> Registry {
        let registry = Registry::default();
        assert!(registry.is_supported_type(&TypeDescriptor::of::<T>()).unwrap());
        registry
    }

    // =====================================================================
    // is_supported_type()
    // =====================================================================

    #[test]
    fn test_new_registry_is_empty() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.registration_count(), 0);
    }

    #[test]
    fn test_first_check_registers_all_three_operations() {
        let registry = registry_with::<Point>();
        let key = TypeKey::of::<Point>();

        assert!(registry.is_registered(key));
        assert!(registry.serializers.contains_key(&key));
        assert!(registry.deserializers.contains_key(&key));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_repeated_checks_do_not_reregister() {
        let registry = registry_with::<Point>();
        for _ in 0..5 {
            assert!(registry.is_supported_type(&TypeDescriptor::of::<Point>()).unwrap());
        }
        assert_eq!(registry.registration_count(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_fast_path_skips_marker_check() {
        // Once registered, even a descriptor without the marker answers true.
        let registry = registry_with::<Point>();
        assert!(registry.is_supported_type(&TypeDescriptor::unmarked::<Point>()).unwrap());
    }

    #[test]
    fn test_malformed_schema_is_not_registered() {
        let registry = Registry::default();
        let result = registry.is_supported_type(&TypeDescriptor::of::<Nameless>());
        assert!(matches!(
            result,
            Err(RegistrationError::MalformedSchema { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registered_types_are_sorted_names() {
        let registry = registry_with::<Point>();
        registry.is_supported_type(&TypeDescriptor::of::<Path>()).unwrap();

        let names = registry.registered_types();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("Path"));
        assert!(names[1].ends_with("Point"));
    }

    // =====================================================================
    // dispatch
    // =====================================================================

    #[test]
    fn test_copy_value_returns_equal_independent_value() {
        let registry = registry_with::<Path>();
        let original = Path {
            name: "loop".into(),
            points: vec![Point { x: 0, y: 0 }, Point { x: 1, y: 1 }],
        };

        let mut copy = registry.copy_value(&original).unwrap();
        assert_eq!(copy, original);

        copy.points[0].x = 100;
        assert_eq!(original.points[0].x, 0);
    }

    #[test]
    fn test_to_bytes_from_bytes() {
        let registry = registry_with::<Point>();
        let bytes = registry.to_bytes(&Point { x: -3, y: 7 }).unwrap();
        let point: Point = registry.from_bytes(&bytes).unwrap();
        assert_eq!(point, Point { x: -3, y: 7 });
    }

    #[test]
    fn test_from_bytes_unregistered_is_missing_codec() {
        let registry = Registry::default();
        let result = registry.from_bytes::<Point>(&[]);
        assert!(matches!(
            result,
            Err(RegistryError::MissingCodec {
                operation: Operation::Deserialize,
                ..
            })
        ));
    }

    #[test]
    fn test_nested_schema_type_needs_no_separate_registration() {
        // Path contains Points, but only Path's codecs are used.
        let registry = registry_with::<Path>();
        let path = Path {
            name: "p".into(),
            points: vec![Point { x: 1, y: 2 }],
        };
        let bytes = registry.to_bytes(&path).unwrap();
        assert_eq!(registry.from_bytes::<Path>(&bytes).unwrap(), path);
        assert!(!registry.is_registered(TypeKey::of::<Point>()));
    }

    #[test]
    fn test_initialize_is_first_wins() {
        let registry = Registry::default();
        assert!(registry.initialize(Arc::new(crate::TracingLogger)));
        assert!(!registry.initialize(Arc::new(crate::TracingLogger)));
    }
}
