//! Owned multi-channel audio.

use crate::{Error, Result};

/// Audio stored one `Vec` per channel, all of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarAudio {
    channels: Vec<Vec<f32>>,
}

impl PlanarAudio {
    /// `channels` channels of `frames` zeros.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channels],
        }
    }

    /// Wrap per-channel sample vectors.
    ///
    /// Fails if the channels differ in length.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Result<Self> {
        if let Some(first) = channels.first()
            && let Some(bad) = channels.iter().position(|c| c.len() != first.len())
        {
            return Err(Error::InvalidAudio(format!(
                "channel {bad} has {} frames, channel 0 has {}",
                channels[bad].len(),
                first.len()
            )));
        }
        Ok(Self { channels })
    }

    /// Split interleaved samples into channels. A trailing partial frame is
    /// dropped.
    pub fn from_interleaved(samples: &[f32], channels: usize) -> Self {
        if channels == 0 {
            return Self::default();
        }
        let frames = samples.len() / channels;
        let mut out = Self::new(channels, frames);
        for (i, frame) in samples.chunks_exact(channels).enumerate() {
            for (c, &sample) in frame.iter().enumerate() {
                out.channels[c][i] = sample;
            }
        }
        out
    }

    /// Interleave the channels frame by frame.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.num_channels() * self.num_frames());
        for i in 0..self.num_frames() {
            out.extend(self.channels.iter().map(|c| c[i]));
        }
        out
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// One channel's samples.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// One channel's samples, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    /// Iterate over the channels.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Iterate mutably over the channels.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice)
    }

    /// Extend every channel by `frames` zeros, e.g. to let a tail ring out.
    pub fn append_silence(&mut self, frames: usize) {
        for channel in &mut self.channels {
            channel.resize(channel.len() + frames, 0.0);
        }
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0f32, |peak, &x| peak.max(x.abs()))
    }

    /// Unwrap into per-channel vectors.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_roundtrip() {
        let interleaved = [1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        let audio = PlanarAudio::from_interleaved(&interleaved, 2);
        assert_eq!(audio.num_channels(), 2);
        assert_eq!(audio.num_frames(), 3);
        assert_eq!(audio.channel(0), &[1.0, 2.0, 3.0]);
        assert_eq!(audio.channel(1), &[-1.0, -2.0, -3.0]);
        assert_eq!(audio.to_interleaved(), interleaved);
    }

    #[test]
    fn test_partial_frame_dropped() {
        let audio = PlanarAudio::from_interleaved(&[1.0, 2.0, 3.0], 2);
        assert_eq!(audio.num_frames(), 1);
    }

    #[test]
    fn test_ragged_channels_rejected() {
        let result = PlanarAudio::from_channels(vec![vec![0.0; 4], vec![0.0; 3]]);
        assert!(matches!(result, Err(Error::InvalidAudio(_))));
    }

    #[test]
    fn test_append_silence_and_peak() {
        let mut audio = PlanarAudio::from_channels(vec![vec![0.5, -0.75]]).unwrap();
        audio.append_silence(3);
        assert_eq!(audio.num_frames(), 5);
        assert_eq!(audio.channel(0)[4], 0.0);
        assert_eq!(audio.peak(), 0.75);
    }
}
