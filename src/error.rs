//! Error types for schema generation.

use std::io;
use thiserror::Error;

/// Errors raised while building a schema from registered model metadata.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The model is not registered or its record metadata is incomplete.
    #[error("Could not create schema due to missing metadata on model: {0}")]
    MetadataMissing(String),

    /// A record reference points at a model that is not registered.
    #[error("Could not resolve referenced model: {0}")]
    UnresolvableReference(String),

    /// A type tag arriving from outside the closed metadata set is not
    /// recognized by the schema builder.
    #[error("The type name '{0}' is unknown to the schema builder")]
    UnknownTypeKind(String),

    /// A model references itself, directly or through other models.
    #[error("Cyclic model reference: {0}")]
    CyclicReference(String),

    /// A field's type failed to resolve; carries the owning field's name.
    #[error("Could not resolve schema for field '{field}': {source}")]
    FieldResolution {
        field: String,
        #[source]
        source: Box<BuildError>,
    },
}

/// Errors found by the structural schema validator.
///
/// These are never fatal to compilation - they only clear the `valid`
/// flag on a compiled model.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema violates an Avro specification rule.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

/// Errors in the generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration failed validation; the message lists every finding.
    #[error("The configuration contains some errors:\n{0}")]
    Invalid(String),
}

/// Top-level error type for the generator.
#[derive(Debug, Error)]
pub enum Error {
    /// Schema build error
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error while writing schema files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
