//! Integration tests for the `triad` binary.

use std::process::Command;

use tempfile::TempDir;
use triad_chain::ParamId;
use triad_config::Preset;
use triad_io::{PlanarAudio, WavSpec, read_wav, write_wav};

fn triad_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_triad"))
}

fn write_click(dir: &TempDir, sample_rate: u32, frames: usize) -> std::path::PathBuf {
    let mut audio = PlanarAudio::new(2, frames);
    audio.channel_mut(0)[0] = 0.9;
    audio.channel_mut(1)[0] = 0.9;
    let path = dir.path().join("click.wav");
    let spec = WavSpec {
        sample_rate,
        ..Default::default()
    };
    write_wav(&path, &audio, spec).unwrap();
    path
}

// ---------------------------------------------------------------------------
// `triad params` / `triad presets`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_every_parameter() {
    let output = triad_bin().arg("params").output().expect("failed to run triad params");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in ["delayTime", "feedback", "roomSize", "threshold"] {
        assert!(stdout.contains(id), "params listing should contain '{id}'");
    }
}

#[test]
fn cli_params_rejects_unknown_name() {
    let output = triad_bin().args(["params", "drive"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_presets_list_and_show() {
    let output = triad_bin().args(["presets", "list"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cathedral"));
    assert!(stdout.contains("Slapback"));

    let output = triad_bin().args(["presets", "show", "slapback"]).output().unwrap();
    assert!(output.status.success());
    let shown = Preset::from_toml_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(shown.name, "Slapback");
}

// ---------------------------------------------------------------------------
// `triad process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_appends_tail() {
    let dir = TempDir::new().unwrap();
    let input = write_click(&dir, 8000, 4000);
    let output_path = dir.path().join("out.wav");

    let output = triad_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .args(["--preset", "cathedral", "--tail", "0.5", "--block-size", "256"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Done!"));

    let (audio, spec) = read_wav(&output_path).unwrap();
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(audio.num_channels(), 2);
    assert_eq!(audio.num_frames(), 8000);
    assert!(audio.channel(0)[4000..].iter().any(|&x| x != 0.0));
}

#[test]
fn cli_process_rejects_unknown_parameter() {
    let dir = TempDir::new().unwrap();
    let input = write_click(&dir, 8000, 100);

    let output = triad_bin()
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .args(["--param", "drive=1.0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_process_rejects_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = triad_bin()
        .arg("process")
        .arg(dir.path().join("missing.wav"))
        .arg(dir.path().join("out.wav"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_state_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let input = write_click(&dir, 8000, 800);
    let state = dir.path().join("state.bin");

    let output = triad_bin()
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .args(["--param", "delayTime=0.37", "--save-state"])
        .arg(&state)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(std::fs::read(&state).unwrap(), 0.37f32.to_le_bytes());

    let preset_path = dir.path().join("saved.toml");
    let output = triad_bin()
        .args(["presets", "save"])
        .arg(&preset_path)
        .args(["--name", "Restored", "--load-state"])
        .arg(&state)
        .output()
        .unwrap();
    assert!(output.status.success());

    let preset = Preset::load(&preset_path).unwrap();
    assert_eq!(preset.name, "Restored");
    assert!((preset.parameters.get(ParamId::DelayTime) - 0.37).abs() < 1e-6);
    assert_eq!(
        preset.parameters.get(ParamId::Feedback),
        ParamId::Feedback.descriptor().default
    );
}

#[test]
fn cli_presets_save_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("p.toml");
    std::fs::write(&path, "existing").unwrap();

    let output = triad_bin()
        .args(["presets", "save"])
        .arg(&path)
        .args(["--name", "New"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
}

// ---------------------------------------------------------------------------
// `triad impulse`
// ---------------------------------------------------------------------------

#[test]
fn cli_impulse_renders_response() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ir.wav");

    let output = triad_bin()
        .arg("impulse")
        .arg(&path)
        .args(["--sample-rate", "8000", "--duration", "0.5"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "impulse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (audio, spec) = read_wav(&path).unwrap();
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(audio.num_channels(), 2);
    assert_eq!(audio.num_frames(), 4000);
    assert!((audio.channel(0)[0] - 0.8).abs() < 1e-6);
    assert!((audio.channel(1)[0] - 0.8).abs() < 1e-6);
}

#[test]
fn cli_impulse_rejects_bad_bit_depth() {
    let dir = TempDir::new().unwrap();
    let output = triad_bin()
        .arg("impulse")
        .arg(dir.path().join("ir.wav"))
        .args(["--bit-depth", "8"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
