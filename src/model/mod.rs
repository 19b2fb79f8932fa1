//! Model metadata: the declarative type descriptions attached to data models.
//!
//! This module defines the metadata graph consumed by the schema builder:
//! per-field type descriptors ([`TypeMeta`]), field attributes ([`FieldMeta`]),
//! record attributes ([`RecordMeta`]), and the session-scoped
//! [`ModelRegistry`] that holds one descriptor per registered model.

mod meta;
mod registry;

pub use meta::{EnumMeta, FieldMeta, FieldOrder, FixedMeta, Primitive, RecordMeta, TypeMeta};
pub use registry::{ModelDescriptor, ModelId, ModelRef, ModelRegistry};
