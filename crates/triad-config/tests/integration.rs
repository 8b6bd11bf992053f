//! Preset file I/O against a real filesystem.

use tempfile::TempDir;
use triad_chain::{ParamId, ParameterSet, Pipeline};
use triad_config::{ConfigError, FileOp, Preset, factory_presets, resolve_preset};

#[test]
fn save_and_load_preset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("room.toml");

    let preset = Preset::new("Room")
        .with_description("saved from a test")
        .with_parameters(ParameterSet {
            delay_time: 0.3,
            feedback: 0.4,
            room_size: 0.6,
            threshold: 0.02,
        });
    preset.save(&path).unwrap();
    assert!(path.exists());

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, preset);
}

#[test]
fn load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Preset::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::File {
            op: FileOp::Read,
            ..
        }
    ));
}

#[test]
fn load_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "name = [").unwrap();
    assert!(matches!(
        Preset::load(&path).unwrap_err(),
        ConfigError::Parse(_)
    ));
}

#[test]
fn resolve_factory_then_path() {
    assert_eq!(resolve_preset("slapback").unwrap().name, "Slapback");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mine.toml");
    Preset::new("Mine").save(&path).unwrap();
    assert_eq!(resolve_preset(path.to_str().unwrap()).unwrap().name, "Mine");

    assert!(matches!(
        resolve_preset("no-such-preset"),
        Err(ConfigError::PresetNotFound(_))
    ));
}

#[test]
fn factory_presets_drive_a_pipeline() {
    for preset in factory_presets() {
        let mut pipeline = Pipeline::new();
        preset.apply(pipeline.parameters()).unwrap();
        assert_eq!(
            pipeline.parameters().get(ParamId::Threshold),
            preset.parameters.threshold
        );

        pipeline.prepare(48000.0, 256).unwrap();
        let mut data = vec![0.0f32; 512];
        data[0] = 1.0;
        pipeline
            .process(&mut triad_chain::AudioBlock::new(&mut data, 2, 256).unwrap())
            .unwrap();
        assert!(data.iter().all(|x| x.is_finite()), "{}", preset.name);
    }
}
