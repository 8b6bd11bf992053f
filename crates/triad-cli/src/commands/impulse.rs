//! Impulse response rendering.

use std::path::PathBuf;

use clap::Args;
use triad_io::{OfflineHost, PlanarAudio, WavSpec, write_wav};

use super::common::{ChainArgs, build_pipeline, check_bit_depth, frame_progress, print_parameters};

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    chain: ChainArgs,

    /// Sample rate in Hz
    #[arg(short, long, default_value = "48000")]
    sample_rate: u32,

    /// Length of the response in seconds
    #[arg(short, long, default_value = "3.0")]
    duration: f32,

    /// Number of output channels; the impulse is placed on every channel
    #[arg(long, default_value = "2")]
    channels: usize,

    /// Block size for processing
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    let bit_depth = check_bit_depth(args.bit_depth)?;
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    if args.channels == 0 || args.channels > usize::from(u16::MAX) {
        anyhow::bail!("--channels must be between 1 and {}", u16::MAX);
    }

    let frames = triad_core::seconds_to_samples(args.duration, args.sample_rate as f32);
    if frames == 0 {
        anyhow::bail!("--duration must be positive");
    }

    let mut audio = PlanarAudio::new(args.channels, frames);
    for channel in audio.channels_mut() {
        channel[0] = 1.0;
    }

    let pipeline = build_pipeline(&args.chain)?;
    print_parameters(&pipeline);

    println!(
        "Rendering {:.2}s impulse response at {} Hz...",
        args.duration, args.sample_rate
    );
    let pb = frame_progress(frames)?;
    let mut host = OfflineHost::new(pipeline, f64::from(args.sample_rate), args.block_size);
    host.render_with_progress(&mut audio, |done, _| pb.set_position(done as u64))?;
    pb.finish_with_message("done");

    let spec = WavSpec {
        channels: args.channels as u16,
        sample_rate: args.sample_rate,
        bits_per_sample: bit_depth,
    };
    println!("Writing {}...", args.output.display());
    write_wav(&args.output, &audio, spec)?;
    println!("Done!");

    Ok(())
}
