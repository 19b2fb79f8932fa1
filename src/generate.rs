//! Batch compilation and schema file output.
//!
//! Applies the schema builder to every configured model, flags each result
//! through the structural validator, and writes or renders the produced
//! `.avsc` documents.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ModelSpec;
use crate::error::{BuildError, Error};
use crate::model::{ModelId, ModelRegistry};
use crate::schema::{build_schema, is_schema_valid, AvroSchema};

/// One compiled model: its schema plus derived reporting attributes.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    /// Identity of the source model.
    pub id: ModelId,
    /// The compiled schema tree.
    pub schema: AvroSchema,
    /// Whether the schema passed structural validation.
    pub valid: bool,
    /// Display name derived from the schema.
    pub name: String,
    /// Output file name, defaulted to `<name>.avsc` when not configured.
    pub file_name: String,
}

/// Compile every configured model, in order.
///
/// Compilation is strictly sequential and fail-fast across the whole batch:
/// the first model that fails aborts the run and nothing is reported for the
/// others. Validation failures are not fatal; they only clear the model's
/// `valid` flag.
///
/// # Errors
/// Propagates the first [`BuildError`] encountered.
pub fn compile_models(
    registry: &ModelRegistry,
    models: &[ModelSpec],
) -> Result<Vec<CompiledModel>, BuildError> {
    models
        .iter()
        .map(|spec| {
            let schema = build_schema(registry, spec.model)?;
            let valid = is_schema_valid(&schema);
            let name = schema.display_name();
            let file_name = spec
                .avsc_file_name
                .clone()
                .unwrap_or_else(|| format!("{name}.avsc"));
            Ok(CompiledModel {
                id: spec.model,
                schema,
                valid,
                name,
                file_name,
            })
        })
        .collect()
}

/// Serialize a schema as pretty-printed JSON with two-space indentation and
/// a single trailing newline.
pub fn stringify_schema(schema: &AvroSchema) -> String {
    let value = schema.to_json_value();
    let body = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "null".to_string());
    format!("{body}\n")
}

/// Write the valid compiled models to `out_dir`, one file per model.
///
/// Invalid models are skipped. Parent directories are created as needed, so
/// file names may contain path separators.
///
/// # Errors
/// Returns an IO error if a directory or file cannot be written.
pub fn write_schemas(models: &[CompiledModel], out_dir: &Path) -> Result<(), Error> {
    let to_write: Vec<&CompiledModel> = models
        .iter()
        .filter(|m| m.valid && !m.file_name.is_empty())
        .collect();

    if to_write.is_empty() {
        warn!("No valid models found to write");
        return Ok(());
    }

    info!("Writing {} files...", to_write.len());
    for model in to_write {
        let out_path = out_dir.join(&model.file_name);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, stringify_schema(&model.schema))?;
        info!(" * wrote {} to {}", model.name, model.file_name);
    }

    Ok(())
}

/// Render the valid compiled models for stdout output.
///
/// Returns `None` when no valid model is present.
pub fn render_schemas(models: &[CompiledModel]) -> Option<String> {
    let to_print: Vec<&CompiledModel> = models.iter().filter(|m| m.valid).collect();
    if to_print.is_empty() {
        return None;
    }

    Some(
        to_print
            .iter()
            .map(|model| {
                format!(
                    "{} - {}\n\n{}",
                    model.name,
                    model.file_name,
                    stringify_schema(&model.schema)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
