//! Shared CLI helpers used across multiple commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use triad_chain::{DelayMode, ParameterStore, Pipeline};
use triad_config::resolve_preset;
use triad_io::PlanarAudio;

/// Parameter flags shared by every command that builds a chain.
#[derive(Args, Debug, Default)]
pub struct ChainArgs {
    /// Factory preset name or path to a preset TOML file
    #[arg(long, short)]
    pub preset: Option<String>,

    /// Parameter override as name=value (e.g., "delayTime=0.25"), repeatable
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Load delayTime from a saved state blob
    #[arg(long, value_name = "FILE")]
    pub load_state: Option<PathBuf>,

    /// Read the echo at delayTime instead of at the full buffer length
    #[arg(long)]
    pub tapped: bool,
}

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.trim().to_string(), value.trim().to_string())),
        None => Err(format!(
            "Invalid parameter format: '{}' (expected name=value)",
            s
        )),
    }
}

/// Fill a store from a preset, a state blob and overrides, in that order.
pub fn build_store(args: &ChainArgs) -> anyhow::Result<ParameterStore> {
    let store = ParameterStore::new();

    if let Some(name) = &args.preset {
        let preset = resolve_preset(name)
            .with_context(|| format!("Preset '{name}' not found. Use 'triad presets list' to see available presets."))?;
        preset.apply(&store)?;
        println!("Preset: {}", preset.name);
    }

    if let Some(path) = &args.load_state {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read state file {}", path.display()))?;
        store
            .deserialize_state(&bytes)
            .with_context(|| format!("Invalid state file {}", path.display()))?;
    }

    for (name, value) in &args.params {
        let value: f32 = value
            .parse()
            .with_context(|| format!("Invalid value for {name}: '{value}'"))?;
        store.set_by_name(name, value)?;
    }

    Ok(store)
}

/// Build a pipeline from the shared flags.
pub fn build_pipeline(args: &ChainArgs) -> anyhow::Result<Pipeline> {
    let store = build_store(args)?;
    let mode = if args.tapped {
        DelayMode::Tapped
    } else {
        DelayMode::Cursor
    };
    Ok(Pipeline::with_store(store).with_delay_mode(mode))
}

/// Print the parameter values a pipeline will start from.
pub fn print_parameters(pipeline: &Pipeline) {
    let snapshot = pipeline.parameters().snapshot();
    let line: Vec<String> = triad_chain::ParamId::ALL
        .iter()
        .map(|&id| {
            let desc = id.descriptor();
            format!("{}={:.3}{}", id, snapshot.get(id), desc.unit.suffix())
        })
        .collect();
    println!("Parameters: {}", line.join(", "));
}

/// Progress bar over `len` frames.
pub fn frame_progress(len: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Root-mean-square level over every channel.
pub fn rms(audio: &PlanarAudio) -> f32 {
    let count = audio.num_channels() * audio.num_frames();
    if count == 0 {
        return 0.0;
    }
    let sum: f32 = audio.channels().flatten().map(|s| s * s).sum();
    (sum / count as f32).sqrt()
}

/// Format a linear level as dBFS.
pub fn format_db(linear: f32) -> String {
    format!("{:.1} dBFS", triad_core::linear_to_db(linear))
}

/// Check a WAV bit depth argument.
pub fn check_bit_depth(bits: u16) -> anyhow::Result<u16> {
    match bits {
        16 | 24 | 32 => Ok(bits),
        other => anyhow::bail!("Unsupported bit depth {other}: use 16, 24 or 32"),
    }
}
