//! Avro schema trees, schema building, and structural validation.
//!
//! This module defines the output schema type system (primitives, complex
//! types, named type references), the recursive builder that compiles model
//! metadata into schema trees, and the validator behind the `valid` flag.

mod builder;
mod types;
mod validate;

pub use builder::{build_schema, nullify, SchemaBuilder};
pub use types::{
    ArraySchema, AvroSchema, EnumSchema, FieldSchema, FixedSchema, MapSchema, RecordSchema,
};
pub use validate::{is_schema_valid, validate_schema};
