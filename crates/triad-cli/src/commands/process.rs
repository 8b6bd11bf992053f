//! Offline file processing through the chain.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use triad_io::{OfflineHost, WavSpec, read_wav, write_wav};

use super::common::{
    ChainArgs, build_pipeline, check_bit_depth, format_db, frame_progress, print_parameters, rms,
};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    chain: ChainArgs,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value = "0")]
    tail: f32,

    /// Block size for processing
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Write the final state blob to this file
    #[arg(long, value_name = "FILE")]
    save_state: Option<PathBuf>,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let bit_depth = check_bit_depth(args.bit_depth)?;
    if !args.tail.is_finite() || args.tail < 0.0 {
        anyhow::bail!("--tail must be a non-negative number of seconds");
    }

    println!("Reading {}...", args.input.display());
    let (mut audio, spec) = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    println!(
        "  {} channel(s), {} Hz, {} frames ({:.2}s)",
        audio.num_channels(),
        spec.sample_rate,
        audio.num_frames(),
        audio.num_frames() as f32 / spec.sample_rate as f32
    );

    let input_rms = rms(&audio);
    let input_peak = audio.peak();

    let tail_frames = triad_core::seconds_to_samples(args.tail, spec.sample_rate as f32);
    audio.append_silence(tail_frames);

    let pipeline = build_pipeline(&args.chain)?;
    print_parameters(&pipeline);

    println!("Processing in blocks of {}...", args.block_size);
    let pb = frame_progress(audio.num_frames())?;
    let mut host = OfflineHost::new(pipeline, f64::from(spec.sample_rate), args.block_size);
    host.render_with_progress(&mut audio, |done, _| pb.set_position(done as u64))?;
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {}, Peak {}",
        format_db(input_rms),
        format_db(input_peak)
    );
    println!(
        "  Output: RMS {}, Peak {}",
        format_db(rms(&audio)),
        format_db(audio.peak())
    );

    let out_spec = WavSpec {
        bits_per_sample: bit_depth,
        ..spec
    };
    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, out_spec)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(path) = &args.save_state {
        let state = host.processor().serialize_state();
        std::fs::write(path, state)
            .with_context(|| format!("Failed to write state file {}", path.display()))?;
        println!("State saved to {}", path.display());
    }

    println!("Done!");
    Ok(())
}
