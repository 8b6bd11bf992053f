//! WAV file reading and writing.

use crate::{Error, PlanarAudio, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample. 32 is written as IEEE float, 16 and 24 as PCM.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Full-scale value of a signed integer sample with `bits` bits.
fn int_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(2, 32) - 1)) as f32
}

/// Read a WAV file, keeping every channel.
///
/// Integer files are scaled to `[-1, 1)`; float files are read as is.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(PlanarAudio, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let format = reader.spec().sample_format;
    let spec = WavSpec::from(reader.spec());

    let interleaved = match format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample).recip();
            let mut samples = Vec::with_capacity(reader.len() as usize);
            for sample in reader.into_samples::<i32>() {
                samples.push(sample? as f32 * scale);
            }
            samples
        }
    };

    let audio = PlanarAudio::from_interleaved(&interleaved, usize::from(spec.channels));
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = audio.num_frames(),
        "read wav"
    );
    Ok((audio, spec))
}

/// Write `audio` to a WAV file.
///
/// The channel count comes from `audio`, not from `spec`. Integer formats
/// clip to full scale; 32 bits is written as float.
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &PlanarAudio, spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: u16::try_from(audio.num_channels())
            .map_err(|_| Error::InvalidAudio(format!("{} channels", audio.num_channels())))?,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    let float = spec.bits_per_sample == 32;
    let scale = int_scale(spec.bits_per_sample);

    for frame in 0..audio.num_frames() {
        for channel in audio.channels() {
            let x = channel[frame];
            if float {
                writer.write_sample(x)?;
            } else {
                writer.write_sample((x * scale).clamp(-scale, scale - 1.0) as i32)?;
            }
        }
    }
    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        bits = spec.bits_per_sample,
        frames = audio.num_frames(),
        "wrote wav"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(channels: usize, frames: usize) -> PlanarAudio {
        PlanarAudio::from_channels(
            (0..channels)
                .map(|c| {
                    (0..frames)
                        .map(|i| ((i + c * 7) as f32 / frames as f32).sin() * 0.9)
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_f32() {
        let audio = ramp(2, 1000);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &audio, WavSpec::default()).unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.bits_per_sample, 32);
        assert_eq!(loaded, audio);
    }

    #[test]
    fn test_roundtrip_i16() {
        let audio = ramp(1, 1000);
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            bits_per_sample: 16,
            ..Default::default()
        };
        write_wav(file.path(), &audio, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 1);
        for (a, b) in audio.channel(0).iter().zip(loaded.channel(0)) {
            assert!((a - b).abs() < 1.0 / 16384.0, "{a} vs {b}");
        }
    }

    #[test]
    fn test_integer_clips() {
        let audio = PlanarAudio::from_channels(vec![vec![2.0, -2.0]]).unwrap();
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            bits_per_sample: 24,
            ..Default::default()
        };
        write_wav(file.path(), &audio, spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert!(loaded.channel(0)[0] < 1.0 && loaded.channel(0)[0] > 0.999);
        assert_eq!(loaded.channel(0)[1], -1.0);
    }
}
