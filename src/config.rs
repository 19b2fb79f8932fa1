//! Generator configuration: which models to compile and where to write them.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::model::{ModelId, ModelRegistry};

/// One configured model: its identity plus an optional output file name.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Identity of the registered model.
    pub model: ModelId,
    /// Output file name; defaults to `<display name>.avsc` when absent.
    pub avsc_file_name: Option<String>,
}

impl ModelSpec {
    /// Configure model type `T` with the default file name.
    pub fn of<T: 'static>() -> Self {
        Self {
            model: ModelId::of::<T>(),
            avsc_file_name: None,
        }
    }

    /// Configure an explicit model identity.
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            avsc_file_name: None,
        }
    }

    /// Set the output file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.avsc_file_name = Some(file_name.into());
        self
    }
}

/// Generator configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Models to compile, in order.
    pub models: Vec<ModelSpec>,
    /// Output directory; schemas are printed to stdout when absent.
    pub out_dir: Option<PathBuf>,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add model type `T` with the default file name.
    pub fn model<T: 'static>(mut self) -> Self {
        self.models.push(ModelSpec::of::<T>());
        self
    }

    /// Add an explicit model spec.
    pub fn model_spec(mut self, spec: ModelSpec) -> Self {
        self.models.push(spec);
        self
    }

    /// Set the output directory.
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    /// Validate the configuration against the registry.
    ///
    /// All findings are collected into a single error message, one bullet
    /// per invalidity.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the model list is empty, a
    /// configured model is not registered, or a supplied file name is empty.
    pub fn validate(&self, registry: &ModelRegistry) -> Result<(), ConfigError> {
        let mut invalidities: Vec<String> = Vec::new();

        if self.models.is_empty() {
            invalidities.push("'models' cannot be an empty list".to_string());
        }

        for (idx, spec) in self.models.iter().enumerate() {
            if !registry.contains(spec.model) {
                invalidities.push(format!(
                    "'models[{idx}]' ({}) is not a registered model",
                    spec.model
                ));
            }
            if let Some(file_name) = &spec.avsc_file_name {
                if file_name.is_empty() {
                    invalidities.push(format!(
                        "if defined, 'models[{idx}].avsc_file_name' must be non-empty"
                    ));
                }
            }
        }

        if invalidities.is_empty() {
            Ok(())
        } else {
            let listed: Vec<String> = invalidities.iter().map(|inv| format!("* {inv}")).collect();
            Err(ConfigError::Invalid(listed.join("\n")))
        }
    }
}
