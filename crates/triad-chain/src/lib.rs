//! Triad Chain - orchestration of the triad effects chain
//!
//! Wires the three stages of `triad-effects` into a fixed-order
//! [`Pipeline`] driven by a host, with a lock-free [`ParameterStore`]
//! shared between the control side and the audio thread.
//!
//! # Threads
//!
//! - The audio thread owns the [`Pipeline`] and calls `prepare`, `process`
//!   and `release` in sequence.
//! - Any number of control threads hold clones of the [`ParameterStore`]
//!   and write to it at any time. Writes are clamped and atomic per value.
//!
//! ```rust
//! use std::thread;
//! use triad_chain::{ParamId, Pipeline};
//! use triad_core::AudioBlock;
//!
//! let mut pipeline = Pipeline::new();
//! let store = pipeline.parameters().clone();
//!
//! let control = thread::spawn(move || store.set(ParamId::Threshold, 0.05));
//!
//! pipeline.prepare(44100.0, 128)?;
//! let mut data = vec![0.0f32; 2 * 128];
//! pipeline.process(&mut AudioBlock::new(&mut data, 2, 128).unwrap())?;
//! control.join().unwrap();
//! # Ok::<(), triad_chain::ChainError>(())
//! ```

pub mod error;
pub mod params;
pub mod pipeline;
pub mod state;

pub use error::ChainError;
pub use params::{ParamId, ParameterSet, ParameterStore};
pub use pipeline::{Lifecycle, MAX_BLOCK_SIZE, MAX_SAMPLE_RATE, Pipeline};
pub use state::STATE_LEN;

pub use triad_core::AudioBlock;
pub use triad_effects::DelayMode;

/// The interface a host adapter drives.
///
/// `prepare` before streaming, `process` once per block on the audio
/// thread, `release` when streaming stops.
pub trait AudioProcessor {
    /// Configure for a sample rate and maximum block size. May allocate.
    fn prepare(&mut self, sample_rate: f64, max_block_size: usize) -> Result<(), ChainError>;

    /// Transform one block in place. Must not allocate or block.
    fn process(&mut self, block: &mut AudioBlock<'_>) -> Result<(), ChainError>;

    /// Drop heavy resources. Idempotent.
    fn release(&mut self);
}
