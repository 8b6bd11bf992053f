//! Factory presets bundled with the library.
//!
//! Always available without external files. Names are matched
//! case-insensitively against both the lookup key and the preset's `name`.
//!
//! `delayTime` only sets the repeat length when the echo runs in tapped
//! mode. In the default cursor mode every preset repeats after one second.

use crate::Preset;

/// Factory preset lookup keys.
pub static FACTORY_PRESET_NAMES: &[&str] = &["default", "slapback", "cathedral", "tight-gate"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("slapback", SLAPBACK_PRESET),
    ("cathedral", CATHEDRAL_PRESET),
    ("tight-gate", TIGHT_GATE_PRESET),
];

const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Parameter defaults"

[parameters]
delayTime = 0.5
feedback = 0.5
roomSize = 0.8
threshold = 0.1
"#;

const SLAPBACK_PRESET: &str = r#"
name = "Slapback"
description = "Short repeat in a small room, gate nearly open (repeat length needs tapped mode)"

[parameters]
delayTime = 0.12
feedback = 0.2
roomSize = 0.2
threshold = 0.01
"#;

const CATHEDRAL_PRESET: &str = r#"
name = "Cathedral"
description = "Strong echo feedback into the largest room, gate open"

[parameters]
delayTime = 0.8
feedback = 0.6
roomSize = 1.0
threshold = 0.0
"#;

const TIGHT_GATE_PRESET: &str = r#"
name = "Tight Gate"
description = "Medium room with an aggressive gate that chops the tail"

[parameters]
delayTime = 0.25
feedback = 0.3
roomSize = 0.5
threshold = 0.3
"#;

/// Every factory preset, in [`FACTORY_PRESET_NAMES`] order.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml_str(toml).ok())
        .collect()
}

/// Look up a factory preset by key (`"tight-gate"`) or name (`"Tight Gate"`).
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(key, toml)| Some((key, Preset::from_toml_str(toml).ok()?)))
        .find(|(key, preset)| {
            key.to_lowercase() == name_lower || preset.name.to_lowercase() == name_lower
        })
        .map(|(_, preset)| preset)
}

/// Whether `name` resolves to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
