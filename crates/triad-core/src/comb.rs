//! Lowpass-feedback comb filter.
//!
//! Eight of these run in parallel inside each reverb tank. The one-pole
//! lowpass in the loop makes high frequencies die out faster than lows.

use crate::RingBuffer;
use crate::flush_denormal;

/// Upper bound on loop gain.
const MAX_FEEDBACK: f32 = 0.99;

/// Comb filter whose feedback passes through a one-pole lowpass.
///
/// ```text
/// y[n]  = line[n - N]
/// lp[n] = y[n] * (1 - d) + lp[n - 1] * d
/// line  <- x[n] + lp[n] * g
/// ```
///
/// # Example
///
/// ```rust
/// use triad_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// comb.set_feedback(0.84);
/// comb.set_damp(0.2);
///
/// // Nothing reaches the output until the line has been traversed once.
/// assert_eq!(comb.process(1.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    line: RingBuffer,
    feedback: f32,
    damp: f32,
    lowpass: f32,
}

impl CombFilter {
    /// Comb with a `delay_samples` line, feedback 0.5 and damping 0.5.
    ///
    /// # Panics
    ///
    /// Panics if `delay_samples` is 0.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            line: RingBuffer::new(delay_samples),
            feedback: 0.5,
            damp: 0.5,
            lowpass: 0.0,
        }
    }

    /// Loop gain, clamped to `[0, 0.99]`.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    /// Current loop gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Lowpass coefficient in `[0, 1]`. 0 leaves the loop bright, values
    /// near 1 darken it.
    #[inline]
    pub fn set_damp(&mut self, damp: f32) {
        self.damp = damp.clamp(0.0, 1.0);
    }

    /// Current lowpass coefficient.
    #[inline]
    pub fn damp(&self) -> f32 {
        self.damp
    }

    /// Run one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let out = self.line.read();
        self.lowpass = flush_denormal(out + (self.lowpass - out) * self.damp);
        self.line.write(input + self.lowpass * self.feedback);
        out
    }

    /// Zero the line and the lowpass state.
    pub fn clear(&mut self) {
        self.line.clear();
        self.lowpass = 0.0;
    }

    /// Line length in samples.
    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }
}
