//! Integration tests for triad-io: WAV files through the full chain.

use tempfile::NamedTempFile;
use triad_chain::{ParamId, Pipeline};
use triad_io::{OfflineHost, PlanarAudio, WavSpec, read_wav, write_wav};

/// Stereo sine burst followed by silence.
fn burst(sample_rate: u32, frames: usize) -> PlanarAudio {
    let left: Vec<f32> = (0..frames)
        .map(|i| {
            if i < frames / 4 {
                (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin() * 0.5
            } else {
                0.0
            }
        })
        .collect();
    let right = left.iter().map(|x| -x).collect();
    PlanarAudio::from_channels(vec![left, right]).unwrap()
}

#[test]
fn wav_roundtrip_multichannel_24bit() {
    let audio = PlanarAudio::from_channels(
        (0..4)
            .map(|c| (0..512).map(|i| ((i * (c + 1)) as f32 * 0.01).sin() * 0.8).collect())
            .collect(),
    )
    .unwrap();
    let spec = WavSpec {
        channels: 4,
        sample_rate: 96000,
        bits_per_sample: 24,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &audio, spec).unwrap();
    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();

    assert_eq!(loaded_spec, spec);
    assert_eq!(loaded.num_channels(), 4);
    for (a, b) in audio.channels().zip(loaded.channels()) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-6, "{x} vs {y}");
        }
    }
}

#[test]
fn file_through_pipeline() {
    let sr = 44100;
    let input = burst(sr, sr as usize / 2);
    let in_file = NamedTempFile::new().unwrap();
    write_wav(in_file.path(), &input, WavSpec::default()).unwrap();

    let (mut audio, spec) = read_wav(in_file.path()).unwrap();
    let pipeline = Pipeline::new();
    pipeline.parameters().set(ParamId::Threshold, 0.0);
    let mut host = OfflineHost::new(pipeline, f64::from(spec.sample_rate), 512);
    host.render(&mut audio).unwrap();

    assert!(!host.processor().is_prepared(), "Host releases after render");
    assert_eq!(audio.num_frames(), input.num_frames());
    assert!(audio.peak() < 10.0);

    let tail_start = input.num_frames() / 4 + 2000;
    assert!(
        audio.channel(0)[tail_start..].iter().any(|&x| x != 0.0),
        "Reverb tail continues after the burst"
    );

    let out_file = NamedTempFile::new().unwrap();
    write_wav(out_file.path(), &audio, spec).unwrap();
    let (reloaded, _) = read_wav(out_file.path()).unwrap();
    assert_eq!(reloaded, audio);
}

#[test]
fn uneven_final_block_matches_single_pass() {
    let input = burst(48000, 3000);

    let mut blocked = input.clone();
    OfflineHost::new(Pipeline::new(), 48000.0, 256)
        .render(&mut blocked)
        .unwrap();

    let mut whole = input.clone();
    OfflineHost::new(Pipeline::new(), 48000.0, 3000)
        .render(&mut whole)
        .unwrap();

    for (a, b) in blocked.channels().zip(whole.channels()) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-6);
        }
    }
}

#[test]
fn mono_file_is_processed() {
    let mut audio = PlanarAudio::new(1, 4096);
    audio.channel_mut(0)[0] = 1.0;

    let pipeline = Pipeline::new();
    pipeline.parameters().set(ParamId::Threshold, 0.0);
    OfflineHost::new(pipeline, 44100.0, 1024)
        .render(&mut audio)
        .unwrap();

    assert!((audio.channel(0)[0] - 0.8).abs() < 1e-6);
    assert!(audio.channel(0)[1200..].iter().any(|&x| x != 0.0));
}
