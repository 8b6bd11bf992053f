//! Hard noise gate.
//!
//! Each sample is compared against the threshold on its own: no envelope,
//! no hysteresis, no attack or release. Quieter samples become exactly 0.0,
//! everything else passes bit-for-bit.

use triad_core::{AudioBlock, Effect};

/// Stateless amplitude gate.
///
/// # Example
///
/// ```rust
/// use triad_core::{AudioBlock, Effect};
/// use triad_effects::Gate;
///
/// let mut gate = Gate::new();
/// gate.set_threshold(0.1);
///
/// let mut data = [0.05, -0.2, 0.1, -0.09];
/// gate.process(&mut AudioBlock::mono(&mut data));
/// assert_eq!(data, [0.0, -0.2, 0.1, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Gate {
    threshold: f32,
}

impl Gate {
    /// Create a gate with the default threshold of 0.1.
    pub fn new() -> Self {
        Self { threshold: 0.1 }
    }

    /// Set the threshold as a linear amplitude (0.0 to 1.0).
    pub fn set_threshold(&mut self, threshold: f32) {
        if !threshold.is_nan() {
            self.threshold = threshold.clamp(0.0, 1.0);
        }
    }

    /// Current threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Gate a single sample.
    #[inline]
    pub fn apply(&self, sample: f32) -> f32 {
        if sample.abs() < self.threshold { 0.0 } else { sample }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Gate {
    fn prepare(&mut self, _sample_rate: f32, _max_block_size: usize) {}

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        let threshold = self.threshold;
        for sample in block.as_mut_slice() {
            if sample.abs() < threshold {
                *sample = 0.0;
            }
        }
    }

    fn reset(&mut self) {}
}
