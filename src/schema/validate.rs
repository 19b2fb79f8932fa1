//! Structural validation of compiled schemas.
//!
//! Checks the Avro specification rules that schema construction cannot
//! guarantee: naming, union shape, enum symbols, and fixed sizes. Validation
//! is never fatal to compilation; a failing schema is still returned by the
//! batch compiler, merely flagged invalid.

use std::collections::HashSet;

use tracing::warn;

use crate::error::SchemaError;
use crate::schema::AvroSchema;

/// Check whether a schema is structurally valid.
///
/// Logs the first violation at warn level and returns `false`.
pub fn is_schema_valid(schema: &AvroSchema) -> bool {
    match validate_schema(schema) {
        Ok(()) => true,
        Err(err) => {
            warn!(schema = %schema.display_name(), %err, "schema failed validation");
            false
        }
    }
}

/// Validate a schema against the Avro specification rules.
///
/// # Errors
/// Returns [`SchemaError::InvalidSchema`] describing the first violation
/// found.
pub fn validate_schema(schema: &AvroSchema) -> Result<(), SchemaError> {
    match schema {
        AvroSchema::Record(record) => {
            validate_name(&record.name, "Record")?;
            let mut seen = HashSet::new();
            for field in &record.fields {
                validate_name(&field.name, "Field")?;
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::InvalidSchema(format!(
                        "Record '{}' contains duplicate field '{}'",
                        record.name, field.name
                    )));
                }
                validate_schema(&field.schema)?;
            }
            Ok(())
        }

        AvroSchema::Enum(e) => {
            validate_name(&e.name, "Enum")?;
            if e.symbols.is_empty() {
                return Err(SchemaError::InvalidSchema(format!(
                    "Enum '{}' must have at least one symbol",
                    e.name
                )));
            }
            let mut seen = HashSet::new();
            for symbol in &e.symbols {
                validate_name(symbol, "Enum symbol")?;
                if !seen.insert(symbol.as_str()) {
                    return Err(SchemaError::InvalidSchema(format!(
                        "Enum '{}' contains duplicate symbol '{}'",
                        e.name, symbol
                    )));
                }
            }
            if let Some(default) = &e.default {
                if !e.symbols.iter().any(|s| s == default) {
                    return Err(SchemaError::InvalidSchema(format!(
                        "Enum '{}' default '{}' is not one of its symbols",
                        e.name, default
                    )));
                }
            }
            Ok(())
        }

        AvroSchema::Fixed(f) => {
            validate_name(&f.name, "Fixed")?;
            if f.size == 0 {
                return Err(SchemaError::InvalidSchema(format!(
                    "Fixed '{}' must have a non-zero size",
                    f.name
                )));
            }
            Ok(())
        }

        AvroSchema::Array(a) => validate_schema(&a.items),
        AvroSchema::Map(m) => validate_schema(&m.values),

        AvroSchema::Union(members) => validate_union(members),

        AvroSchema::Named(name) => {
            // Bare references may be fully qualified; each dotted segment
            // must itself be a valid name.
            for segment in name.split('.') {
                validate_name(segment, "Reference")?;
            }
            Ok(())
        }

        // Primitive types are valid by construction
        _ => Ok(()),
    }
}

/// Validate that a name follows Avro naming rules.
///
/// Names must start with `[A-Za-z_]` and contain only `[A-Za-z0-9_]`.
fn validate_name(name: &str, context: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::InvalidSchema(format!(
            "{context} name cannot be empty"
        )));
    }

    let mut chars = name.chars();
    let first = chars.next().unwrap_or('_');
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(SchemaError::InvalidSchema(format!(
            "{context} name '{name}' must start with a letter or underscore"
        )));
    }

    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(SchemaError::InvalidSchema(format!(
                "{context} name '{name}' contains invalid character '{ch}'"
            )));
        }
    }

    Ok(())
}

/// Validate union schema rules.
///
/// Unions must be non-empty, must not directly contain another union, and
/// must not contain two branches of the same unnamed type. Two named types
/// with different names are permitted.
fn validate_union(members: &[AvroSchema]) -> Result<(), SchemaError> {
    if members.is_empty() {
        return Err(SchemaError::InvalidSchema(
            "Union schema cannot be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, member) in members.iter().enumerate() {
        if matches!(member, AvroSchema::Union(_)) {
            return Err(SchemaError::InvalidSchema(format!(
                "Union contains nested union at position {i}"
            )));
        }
        if !seen.insert(type_key(member)) {
            return Err(SchemaError::InvalidSchema(format!(
                "Union contains duplicate type '{}' at position {i}",
                type_key(member)
            )));
        }
        validate_schema(member)?;
    }

    Ok(())
}

/// A uniqueness key for union branch checking: the type tag for unnamed
/// types, the fully qualified name for named ones.
fn type_key(schema: &AvroSchema) -> String {
    match schema {
        AvroSchema::Record(r) => format!("record:{}", r.fullname()),
        AvroSchema::Enum(e) => format!("enum:{}", e.fullname()),
        AvroSchema::Fixed(f) => format!("fixed:{}", f.fullname()),
        AvroSchema::Named(n) => format!("named:{n}"),
        other => other.display_name(),
    }
}
