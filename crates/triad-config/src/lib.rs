//! Presets for the triad effects chain.
//!
//! A [`Preset`] is a named [`ParameterSet`](triad_chain::ParameterSet)
//! stored as TOML. Presets are validated before they touch a
//! [`ParameterStore`](triad_chain::ParameterStore), and four factory
//! presets ship with the library.
//!
//! # Example
//!
//! ```rust
//! use triad_chain::{ParamId, ParameterStore};
//! use triad_config::get_factory_preset;
//!
//! let store = ParameterStore::new();
//! let preset = get_factory_preset("cathedral").unwrap();
//! preset.apply(&store).unwrap();
//!
//! assert_eq!(store.get(ParamId::RoomSize), 1.0);
//! ```

mod error;
mod preset;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::{ConfigError, FileOp, ValidationError};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use preset::Preset;

use std::path::Path;

/// Resolve a preset argument: a factory preset name, or a path to a TOML
/// file.
pub fn resolve_preset(name_or_path: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name_or_path) {
        return Ok(preset);
    }

    let path = Path::new(name_or_path);
    if path.exists() {
        return Preset::load(path);
    }

    Err(ConfigError::PresetNotFound(name_or_path.to_string()))
}
