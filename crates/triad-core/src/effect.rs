//! The stage trait shared by every effect in the chain.
//!
//! A stage is prepared once per stream configuration, then processes
//! blocks in place. The lifecycle mirrors the host contract:
//!
//! - [`Effect::prepare`] sizes and clears all state. It may allocate.
//! - [`Effect::process`] mutates one block in place. It must not allocate,
//!   lock, block or perform I/O.
//! - [`Effect::reset`] clears state without touching parameters.
//! - [`Effect::release`] frees heavy buffers until the next `prepare`.
//!
//! The trait is object safe, so stages can also live behind `dyn Effect`.

use crate::AudioBlock;

/// Core trait for all block-processing stages.
///
/// # Example
///
/// ```rust
/// use triad_core::{AudioBlock, Effect};
///
/// struct Gain(f32);
///
/// impl Effect for Gain {
///     fn prepare(&mut self, _sample_rate: f32, _max_block_size: usize) {}
///
///     fn process(&mut self, block: &mut AudioBlock<'_>) {
///         for sample in block.as_mut_slice() {
///             *sample *= self.0;
///         }
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut data = [1.0f32; 4];
/// let mut block = AudioBlock::new(&mut data, 2, 2).unwrap();
/// Gain(0.5).process(&mut block);
/// assert_eq!(data, [0.5; 4]);
/// ```
pub trait Effect {
    /// Configure for a sample rate and the largest block that will follow.
    ///
    /// Allocates or resizes internal buffers and clears all state. Called
    /// outside the real-time path; calling it again reconfigures.
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize);

    /// Process one block in place.
    ///
    /// Must degrade gracefully for channel counts the stage does not
    /// natively support: pass-through or clamp, never index out of bounds.
    fn process(&mut self, block: &mut AudioBlock<'_>);

    /// Clear internal state (delay lines, filter memories) without
    /// changing parameters.
    fn reset(&mut self);

    /// Free heavy resources. Default does nothing.
    ///
    /// After `release`, `process` must be a harmless no-op until the next
    /// `prepare`.
    fn release(&mut self) {}
}
