//! Schroeder allpass diffuser.
//!
//! Four of these in series follow the comb bank of each reverb tank and
//! smear its discrete echoes into a dense tail.

use crate::RingBuffer;
use crate::flush_denormal;

/// Feedback used by every diffuser of the reverb network.
pub const DIFFUSION: f32 = 0.5;

/// Schroeder allpass filter over a [`RingBuffer`].
///
/// For an impulse the output is `-1` immediately, then `1, g, g², ...`
/// every `capacity` samples, where `g` is the feedback.
///
/// # Example
///
/// ```rust
/// use triad_core::AllpassFilter;
///
/// let mut ap = AllpassFilter::new(556);
/// assert_eq!(ap.process(1.0), -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    line: RingBuffer,
    gain: f32,
}

impl AllpassFilter {
    /// Diffuser with a `delay_samples` line and [`DIFFUSION`] feedback.
    ///
    /// # Panics
    ///
    /// Panics if `delay_samples` is 0.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            line: RingBuffer::new(delay_samples),
            gain: DIFFUSION,
        }
    }

    /// Builder form of [`set_feedback`](Self::set_feedback).
    pub fn with_feedback(mut self, gain: f32) -> Self {
        self.set_feedback(gain);
        self
    }

    /// Feedback gain, kept inside `(-1, 1)`.
    #[inline]
    pub fn set_feedback(&mut self, gain: f32) {
        self.gain = gain.clamp(-0.99, 0.99);
    }

    /// Current feedback gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.gain
    }

    /// Run one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.line.read();
        self.line
            .write(flush_denormal(input + delayed * self.gain));
        delayed - input
    }

    /// Zero the line.
    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// Line length in samples.
    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }
}
