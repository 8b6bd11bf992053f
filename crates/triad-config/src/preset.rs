//! Preset file format.

use std::path::Path;

use serde::{Deserialize, Serialize};
use triad_chain::{ParamId, ParameterSet, ParameterStore};

use crate::error::FileOp;
use crate::{ConfigError, ValidationError};

/// A named set of the four chain parameters.
///
/// # TOML Format
///
/// ```toml
/// name = "Slapback"
/// description = "Short room, light gate"
///
/// [parameters]
/// delayTime = 0.12
/// feedback = 0.25
/// roomSize = 0.2
/// threshold = 0.02
/// ```
///
/// Missing parameters take their defaults; unknown keys are rejected.
/// Out-of-range values load fine and are clamped when applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values.
    #[serde(default)]
    pub parameters: ParameterSet,
}

impl Preset {
    /// Create a preset holding the default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: ParameterSet::default(),
        }
    }

    /// Create a preset with a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the parameter values.
    #[must_use]
    pub fn with_parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = parameters;
        self
    }

    /// Capture the current values of a store.
    pub fn from_store(name: impl Into<String>, store: &ParameterStore) -> Self {
        Self::new(name).with_parameters(store.snapshot())
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::file(FileOp::Read, path, e))?;
        let preset = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "preset loaded");
        Ok(preset)
    }

    /// Parse a preset from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::file(FileOp::CreateDir, parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::file(FileOp::Write, path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "preset saved");
        Ok(())
    }

    /// Render the preset as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the preset can be applied.
    ///
    /// Values outside a parameter's range are accepted (they clamp on
    /// apply); NaN and infinities are not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        for id in ParamId::ALL {
            let value = self.parameters.get(id);
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    param: id.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Validate, then write every parameter into `store` (clamped).
    pub fn apply(&self, store: &ParameterStore) -> Result<(), ConfigError> {
        self.validate()?;
        store.apply(&self.parameters);
        tracing::info!(name = %self.name, "preset applied");
        Ok(())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Default")
    }
}
