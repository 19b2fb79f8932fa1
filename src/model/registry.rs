//! Model identity and the session-scoped descriptor registry.
//!
//! Models are plain Rust types used as identities; their schema metadata is
//! registered explicitly in a [`ModelRegistry`] rather than attached through
//! any ambient global state. The registry is built once and only read during
//! compilation.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use crate::model::{FieldMeta, RecordMeta, TypeMeta};

/// Identity of a registered model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ModelId {
    /// The identity of model type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The unqualified type name, for display and file naming.
    pub fn name(&self) -> &str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }

    /// The fully qualified Rust type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lazy reference to another model.
///
/// Either an already-resolved identity or a deferred thunk evaluated on
/// first use, so mutually referencing models can point at each other
/// before both descriptors exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelRef {
    /// An already-resolved model identity.
    Resolved(ModelId),
    /// A deferred resolver, evaluated when the reference is first followed.
    Deferred(fn() -> ModelId),
}

impl ModelRef {
    /// A resolved reference to model type `T`.
    pub fn of<T: 'static>() -> Self {
        ModelRef::Resolved(ModelId::of::<T>())
    }

    /// A deferred reference evaluated on first use.
    pub fn deferred(thunk: fn() -> ModelId) -> Self {
        ModelRef::Deferred(thunk)
    }

    /// Resolve to the target model identity.
    pub fn resolve(&self) -> ModelId {
        match self {
            ModelRef::Resolved(id) => *id,
            ModelRef::Deferred(thunk) => thunk(),
        }
    }
}

/// The registered metadata of one model: record attributes plus an ordered
/// field list.
///
/// Fields keep declaration order. Adding a field under an identifier that
/// already exists overwrites its metadata but keeps the original position.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    record: RecordMeta,
    order: Vec<String>,
    fields: HashMap<String, (FieldMeta, TypeMeta)>,
}

impl ModelDescriptor {
    /// Create a descriptor with the given record attributes and no fields.
    pub fn new(record: RecordMeta) -> Self {
        Self {
            record,
            order: Vec::new(),
            fields: HashMap::new(),
        }
    }

    /// Add a field whose schema name equals its identifier.
    pub fn field(self, id: &str, ty: TypeMeta) -> Self {
        let meta = FieldMeta::new(id);
        self.field_with(id, meta, ty)
    }

    /// Add a field with explicit attribute metadata.
    pub fn field_with(mut self, id: &str, meta: FieldMeta, ty: TypeMeta) -> Self {
        if !self.order.iter().any(|existing| existing == id) {
            self.order.push(id.to_string());
        }
        self.fields.insert(id.to_string(), (meta, ty));
        self
    }

    /// The record-level attributes.
    pub fn record(&self) -> &RecordMeta {
        &self.record
    }

    /// Field identifiers in declaration order.
    pub fn field_ids(&self) -> &[String] {
        &self.order
    }

    /// Look up one field's attribute and type metadata.
    pub fn get(&self, id: &str) -> Option<&(FieldMeta, TypeMeta)> {
        self.fields.get(id)
    }
}

/// Session-scoped registry of model descriptors.
///
/// Built once before compilation and treated as immutable afterwards; the
/// schema builder only reads through the lookup methods.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<ModelId, ModelDescriptor>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the descriptor for model type `T`, returning its identity.
    ///
    /// Registering the same model twice replaces the previous descriptor.
    pub fn register<T: 'static>(&mut self, descriptor: ModelDescriptor) -> ModelId {
        let id = ModelId::of::<T>();
        self.models.insert(id, descriptor);
        id
    }

    /// Whether a descriptor is registered for `id`.
    pub fn contains(&self, id: ModelId) -> bool {
        self.models.contains_key(&id)
    }

    /// The full descriptor registered for `id`.
    pub fn descriptor(&self, id: ModelId) -> Option<&ModelDescriptor> {
        self.models.get(&id)
    }

    /// Record-level metadata for `id`.
    pub fn record_meta(&self, id: ModelId) -> Option<&RecordMeta> {
        self.models.get(&id).map(ModelDescriptor::record)
    }

    /// Ordered field identifiers for `id`.
    pub fn field_ids(&self, id: ModelId) -> Option<&[String]> {
        self.models.get(&id).map(ModelDescriptor::field_ids)
    }

    /// Attribute metadata for one field of `id`.
    pub fn field_meta(&self, id: ModelId, field: &str) -> Option<&FieldMeta> {
        self.models.get(&id).and_then(|d| d.get(field)).map(|(meta, _)| meta)
    }

    /// Type metadata for one field of `id`.
    pub fn field_type(&self, id: ModelId, field: &str) -> Option<&TypeMeta> {
        self.models.get(&id).and_then(|d| d.get(field)).map(|(_, ty)| ty)
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
