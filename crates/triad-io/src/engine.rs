//! Offline host: drives an [`AudioProcessor`] over whole files.

use triad_chain::AudioProcessor;
use triad_core::AudioBlock;

use crate::{Error, PlanarAudio, Result};

/// Feeds audio to a processor in fixed-size blocks, the way a real-time
/// host would, but as fast as possible.
///
/// Each render prepares the processor, streams every block through one
/// scratch buffer allocated up front, and releases the processor again,
/// even when a block fails.
///
/// # Example
///
/// ```rust
/// use triad_chain::Pipeline;
/// use triad_io::{OfflineHost, PlanarAudio};
///
/// let mut audio = PlanarAudio::new(2, 1000);
/// audio.channel_mut(0)[0] = 1.0;
///
/// let mut host = OfflineHost::new(Pipeline::new(), 44100.0, 256);
/// host.render(&mut audio).unwrap();
/// ```
#[derive(Debug)]
pub struct OfflineHost<P: AudioProcessor> {
    processor: P,
    sample_rate: f64,
    block_size: usize,
}

impl<P: AudioProcessor> OfflineHost<P> {
    /// Wrap a processor.
    pub fn new(processor: P, sample_rate: f64, block_size: usize) -> Self {
        Self {
            processor,
            sample_rate,
            block_size,
        }
    }

    /// Sample rate passed to `prepare`.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Frames per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The wrapped processor.
    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// The wrapped processor, mutably.
    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }

    /// Unwrap the processor.
    pub fn into_inner(self) -> P {
        self.processor
    }

    /// Process `audio` in place.
    pub fn render(&mut self, audio: &mut PlanarAudio) -> Result<()> {
        self.render_with_progress(audio, |_, _| {})
    }

    /// Process `audio` in place, calling `progress(done, total)` in frames
    /// after every block.
    pub fn render_with_progress<F>(&mut self, audio: &mut PlanarAudio, mut progress: F) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        if self.block_size == 0 {
            return Err(Error::Processing(triad_chain::ChainError::InvalidBlockSize(0)));
        }

        let channels = audio.num_channels();
        let total = audio.num_frames();
        tracing::info!(
            channels,
            frames = total,
            sample_rate = self.sample_rate,
            block_size = self.block_size,
            "offline render started"
        );

        self.processor.prepare(self.sample_rate, self.block_size)?;
        let mut scratch = vec![0.0f32; channels * self.block_size];
        let result = self.stream_blocks(audio, &mut scratch, &mut progress);
        self.processor.release();

        match &result {
            Ok(()) => tracing::info!(frames = total, "offline render finished"),
            Err(e) => tracing::warn!(error = %e, "offline render aborted"),
        }
        result
    }

    fn stream_blocks<F>(
        &mut self,
        audio: &mut PlanarAudio,
        scratch: &mut [f32],
        progress: &mut F,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        let channels = audio.num_channels();
        let total = audio.num_frames();
        let mut start = 0;

        while start < total {
            let frames = (total - start).min(self.block_size);
            let end = start + frames;
            let data = &mut scratch[..channels * frames];

            for (plane, channel) in data.chunks_exact_mut(frames).zip(audio.channels()) {
                plane.copy_from_slice(&channel[start..end]);
            }

            let mut block = AudioBlock::new(data, channels, frames)
                .ok_or_else(|| Error::InvalidAudio("scratch buffer too small".to_string()))?;
            self.processor.process(&mut block)?;

            for (plane, channel) in data.chunks_exact(frames).zip(audio.channels_mut()) {
                channel[start..end].copy_from_slice(plane);
            }

            start = end;
            progress(start, total);
        }
        Ok(())
    }
}
