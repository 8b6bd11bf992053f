//! Borrowed multi-channel audio block.
//!
//! The host owns the sample memory. For the duration of one processing call
//! the chain borrows it as an [`AudioBlock`]: a planar, channel-major view
//! over `channels * frames` samples. Every stage mutates the same view in
//! place; nothing is copied, resized or retained.
//!
//! ```text
//! data: [ ch0 f0 .. ch0 fN | ch1 f0 .. ch1 fN | ... ]
//! ```

/// Mutable planar view over caller-owned samples.
///
/// # Example
///
/// ```rust
/// use triad_core::AudioBlock;
///
/// let mut data = [0.0f32; 2 * 4];
/// let mut block = AudioBlock::new(&mut data, 2, 4).unwrap();
///
/// block.channel_mut(1)[0] = 0.5;
/// assert_eq!(block.num_frames(), 4);
/// assert_eq!(data[4], 0.5);
/// ```
#[derive(Debug)]
pub struct AudioBlock<'a> {
    data: &'a mut [f32],
    channels: usize,
    frames: usize,
}

impl<'a> AudioBlock<'a> {
    /// Wraps `data` as `channels` planes of `frames` samples.
    ///
    /// Returns `None` if `data` holds fewer than `channels * frames`
    /// samples. Extra trailing samples are left outside the view.
    pub fn new(data: &'a mut [f32], channels: usize, frames: usize) -> Option<Self> {
        let len = channels.checked_mul(frames)?;
        let data = data.get_mut(..len)?;
        Some(Self {
            data,
            channels,
            frames,
        })
    }

    /// Wraps a single channel.
    pub fn mono(data: &'a mut [f32]) -> Self {
        let frames = data.len();
        Self {
            data,
            channels: 1,
            frames,
        }
    }

    /// Number of channels in the view.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Number of samples per channel.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames
    }

    /// Whether the view holds no samples at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= num_channels()`.
    #[inline]
    pub fn channel(&self, channel: usize) -> &[f32] {
        let start = channel * self.frames;
        &self.data[start..start + self.frames]
    }

    /// Mutable samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= num_channels()`.
    #[inline]
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        let start = channel * self.frames;
        &mut self.data[start..start + self.frames]
    }

    /// Iterates mutably over every channel in order.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        // chunks_exact_mut rejects a zero chunk size.
        let frames = self.frames.max(1);
        let take = if self.frames == 0 { 0 } else { self.channels };
        self.data.chunks_exact_mut(frames).take(take)
    }

    /// The first two channels as disjoint mutable slices.
    ///
    /// Returns `None` for blocks with fewer than two channels.
    pub fn stereo_mut(&mut self) -> Option<(&mut [f32], &mut [f32])> {
        if self.channels < 2 {
            return None;
        }
        let (left, rest) = self.data.split_at_mut(self.frames);
        Some((left, &mut rest[..self.frames]))
    }

    /// All samples, channel-major.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        self.data
    }

    /// Zeroes every sample in the view.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}
