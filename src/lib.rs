//! Declarative Avro schema generation from registered data models.
//!
//! Models describe their Avro shape with per-field type descriptors held in
//! a [`ModelRegistry`]; the schema builder compiles each registered model
//! into an Avro schema tree that can be validated, rendered, or written as a
//! `.avsc` document.
//!
//! # Example
//! ```
//! use avrodecl::{build_schema, ModelDescriptor, ModelRegistry, RecordMeta, TypeMeta};
//!
//! struct Origin;
//!
//! let mut registry = ModelRegistry::new();
//! let id = registry.register::<Origin>(
//!     ModelDescriptor::new(RecordMeta::new("Origin"))
//!         .field("continent", TypeMeta::string()),
//! );
//!
//! let schema = build_schema(&registry, id).unwrap();
//! assert_eq!(schema.display_name(), "Origin");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod schema;

// Re-export main types
pub use config::{Config, ModelSpec};
pub use error::{BuildError, ConfigError, Error, SchemaError};
pub use generate::{
    compile_models, render_schemas, stringify_schema, write_schemas, CompiledModel,
};
pub use model::{
    EnumMeta, FieldMeta, FieldOrder, FixedMeta, ModelDescriptor, ModelId, ModelRef, ModelRegistry,
    Primitive, RecordMeta, TypeMeta,
};
pub use schema::{
    build_schema, is_schema_valid, nullify, validate_schema, ArraySchema, AvroSchema, EnumSchema,
    FieldSchema, FixedSchema, MapSchema, RecordSchema, SchemaBuilder,
};
