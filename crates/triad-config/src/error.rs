//! Error types for preset handling.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a preset file.
    Read,
    /// Writing a preset file.
    Write,
    /// Creating the parent directory of a preset file.
    CreateDir,
}

impl std::fmt::Display for FileOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Errors from loading, saving, resolving or validating presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A filesystem call failed.
    #[error("failed to {op} '{path}': {source}")]
    File {
        /// What was being attempted.
        op: FileOp,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid preset document.
    #[error("invalid preset TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The preset could not be rendered as TOML.
    #[error("cannot serialize preset: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Neither a factory preset nor an existing file.
    #[error("no factory preset or file named '{0}'")]
    PresetNotFound(String),

    /// The preset parsed but holds values that cannot be applied.
    #[error("invalid preset: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    pub(crate) fn file(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::File {
            op,
            path: path.into(),
            source,
        }
    }
}

/// A preset value that can never be applied.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// NaN or infinite parameter value.
    #[error("parameter '{param}' is not a finite number: {value}")]
    NonFinite {
        /// Host-facing parameter name.
        param: &'static str,
        /// The offending value.
        value: f32,
    },

    /// Empty preset name.
    #[error("preset name must not be empty")]
    EmptyName,
}
