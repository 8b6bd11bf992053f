//! Fixed-order effects pipeline: Echo, then Reverb, then Gate.
//!
//! # Lifecycle
//!
//! ```text
//!                  prepare                 release
//! Uninitialized ───────────► Prepared ───────────► Released
//!       │                    ▲  │  ▲                   │
//!       │                    │  └──┘ process / prepare │
//!       │                    └─────────────────────────┘
//!       └──────────── release ───────────►      prepare
//! ```
//!
//! `prepare` sizes and clears every stage; it may be called again at any
//! time from the control side to reconfigure. `process` is valid only while
//! prepared and otherwise returns an error without touching the buffer.
//!
//! # Parameter precision
//!
//! Parameters are read from the [`ParameterStore`] once at the start of each
//! `process` call. A write made on the control thread is heard from the next
//! block on; no sample inside a block sees a different value than the first.

use triad_core::{AudioBlock, Effect};
use triad_effects::{DelayMode, Echo, Gate, Reverb, ReverbParameters};

use crate::{AudioProcessor, ChainError, ParameterSet, ParameterStore};

/// Highest sample rate `prepare` accepts, in Hz.
pub const MAX_SAMPLE_RATE: f64 = 768_000.0;

/// Largest block `prepare` accepts, in frames.
pub const MAX_BLOCK_SIZE: usize = 1 << 16;

/// Reverb damping used by the chain.
const REVERB_DAMPING: f32 = 0.5;
/// Reverb wet level used by the chain.
const REVERB_WET: f32 = 0.3;
/// Reverb dry level used by the chain.
const REVERB_DRY: f32 = 0.4;
/// Reverb stereo width used by the chain.
const REVERB_WIDTH: f32 = 1.0;

/// Where the pipeline is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifecycle {
    /// Constructed, never prepared.
    Uninitialized,
    /// Ready to process blocks of up to `max_block_size` frames.
    Prepared {
        /// Sample rate given to `prepare`.
        sample_rate: f64,
        /// Largest block `process` accepts.
        max_block_size: usize,
    },
    /// Resources dropped; `prepare` again to resume.
    Released,
}

/// The effects chain.
///
/// # Example
///
/// ```rust
/// use triad_chain::{ParamId, Pipeline};
/// use triad_core::AudioBlock;
///
/// let mut pipeline = Pipeline::new();
/// let control = pipeline.parameters().clone();
/// control.set(ParamId::RoomSize, 0.6);
///
/// pipeline.prepare(48000.0, 256)?;
///
/// let mut data = vec![0.0f32; 2 * 256];
/// data[0] = 1.0;
/// pipeline.process(&mut AudioBlock::new(&mut data, 2, 256).unwrap())?;
///
/// pipeline.release();
/// # Ok::<(), triad_chain::ChainError>(())
/// ```
#[derive(Debug)]
pub struct Pipeline {
    store: ParameterStore,
    echo: Echo,
    reverb: Reverb,
    gate: Gate,
    lifecycle: Lifecycle,
}

impl Pipeline {
    /// Create an unprepared pipeline with a fresh store at defaults.
    pub fn new() -> Self {
        Self::with_store(ParameterStore::new())
    }

    /// Create an unprepared pipeline reading from an existing store.
    pub fn with_store(store: ParameterStore) -> Self {
        Self {
            store,
            echo: Echo::new(),
            reverb: Reverb::new(),
            gate: Gate::new(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Select how the echo derives its read position.
    ///
    /// Defaults to [`DelayMode::Cursor`], where the delay time is inert.
    #[must_use]
    pub fn with_delay_mode(mut self, mode: DelayMode) -> Self {
        self.echo.set_mode(mode);
        self
    }

    /// The store this pipeline reads. Clone it to hand to a control thread.
    pub fn parameters(&self) -> &ParameterStore {
        &self.store
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether `process` will accept blocks.
    pub fn is_prepared(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Prepared { .. })
    }

    /// The echo stage, for inspection.
    pub fn echo(&self) -> &Echo {
        &self.echo
    }

    /// The reverb stage, for inspection.
    pub fn reverb(&self) -> &Reverb {
        &self.reverb
    }

    /// The gate stage, for inspection.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Size and clear every stage for `sample_rate` and blocks of up to
    /// `max_block_size` frames.
    ///
    /// Allocates. Call from the control side, never concurrently with
    /// `process`.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) -> Result<(), ChainError> {
        // NaN fails both comparisons.
        let rate_ok = sample_rate > 0.0 && sample_rate <= MAX_SAMPLE_RATE;
        if !rate_ok {
            return Err(ChainError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 || max_block_size > MAX_BLOCK_SIZE {
            return Err(ChainError::InvalidBlockSize(max_block_size));
        }

        let params = self.store.snapshot();
        self.apply_parameters(&params);

        let rate = sample_rate as f32;
        self.echo.prepare(rate, max_block_size);
        self.reverb.prepare(rate, max_block_size);
        self.gate.prepare(rate, max_block_size);

        tracing::info!(
            sample_rate,
            max_block_size,
            delay_capacity = self.echo.capacity(),
            previous = ?self.lifecycle,
            "pipeline prepared"
        );
        self.lifecycle = Lifecycle::Prepared {
            sample_rate,
            max_block_size,
        };
        Ok(())
    }

    /// Run Echo, Reverb and Gate over `block` in place.
    ///
    /// Real-time safe: no allocation, no locks, no logging. Fails without
    /// touching the buffer when the pipeline is not prepared or the block
    /// is larger than the prepared maximum.
    pub fn process(&mut self, block: &mut AudioBlock<'_>) -> Result<(), ChainError> {
        let Lifecycle::Prepared { max_block_size, .. } = self.lifecycle else {
            return Err(ChainError::NotPrepared);
        };
        if block.num_frames() > max_block_size {
            return Err(ChainError::BlockTooLarge {
                frames: block.num_frames(),
                max: max_block_size,
            });
        }

        let params = self.store.snapshot();
        self.apply_parameters(&params);

        self.echo.process(block);
        self.reverb.process(block);
        self.gate.process(block);
        Ok(())
    }

    /// Clear the echo lines and reverb tail. Parameters and lifecycle are
    /// unchanged.
    pub fn reset(&mut self) {
        self.echo.reset();
        self.reverb.reset();
        self.gate.reset();
    }

    /// Drop the stage buffers. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.lifecycle == Lifecycle::Released {
            return;
        }
        self.echo.release();
        self.reverb.release();
        self.gate.release();
        tracing::info!(previous = ?self.lifecycle, "pipeline released");
        self.lifecycle = Lifecycle::Released;
    }

    /// Read a parameter by host-facing name.
    pub fn get_parameter(&self, name: &str) -> Result<f32, ChainError> {
        self.store.get_by_name(name)
    }

    /// Write a parameter by host-facing name (clamped).
    pub fn set_parameter(&self, name: &str, value: f32) -> Result<(), ChainError> {
        self.store.set_by_name(name, value)
    }

    /// Encode the persisted state (the delay time).
    pub fn serialize_state(&self) -> [u8; crate::STATE_LEN] {
        self.store.serialize_state()
    }

    /// Restore state written by [`serialize_state`](Self::serialize_state).
    pub fn deserialize_state(&self, bytes: &[u8]) -> Result<(), ChainError> {
        self.store.deserialize_state(bytes)
    }

    fn apply_parameters(&mut self, params: &ParameterSet) {
        self.echo.set_delay_time(params.delay_time);
        self.echo.set_feedback(params.feedback);
        self.reverb.set_parameters(ReverbParameters {
            room_size: params.room_size,
            damping: REVERB_DAMPING,
            wet_level: REVERB_WET,
            dry_level: REVERB_DRY,
            width: REVERB_WIDTH,
        });
        self.gate.set_threshold(params.threshold);
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioProcessor for Pipeline {
    fn prepare(&mut self, sample_rate: f64, max_block_size: usize) -> Result<(), ChainError> {
        Pipeline::prepare(self, sample_rate, max_block_size)
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) -> Result<(), ChainError> {
        Pipeline::process(self, block)
    }

    fn release(&mut self) {
        Pipeline::release(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamId;

    #[test]
    fn test_process_before_prepare_fails() {
        let mut pipeline = Pipeline::new();
        let mut data = [0.5f32; 8];
        let result = pipeline.process(&mut AudioBlock::new(&mut data, 2, 4).unwrap());
        assert_eq!(result, Err(ChainError::NotPrepared));
        assert_eq!(data, [0.5; 8], "Buffer untouched");
    }

    #[test]
    fn test_prepare_validates() {
        let mut pipeline = Pipeline::new();
        assert_eq!(
            pipeline.prepare(0.0, 512),
            Err(ChainError::InvalidSampleRate(0.0))
        );
        assert!(pipeline.prepare(f64::NAN, 512).is_err());
        assert!(pipeline.prepare(f64::INFINITY, 512).is_err());
        assert_eq!(
            pipeline.prepare(44100.0, 0),
            Err(ChainError::InvalidBlockSize(0))
        );
        assert_eq!(pipeline.lifecycle(), Lifecycle::Uninitialized);
    }

    #[test]
    fn test_prepare_rejects_oversized_config() {
        let mut pipeline = Pipeline::new();
        // Finite as f64, infinite once narrowed for the stages.
        assert_eq!(
            pipeline.prepare(1.0e39, 512),
            Err(ChainError::InvalidSampleRate(1.0e39))
        );
        assert_eq!(
            pipeline.prepare(1.0e10, 512),
            Err(ChainError::InvalidSampleRate(1.0e10))
        );
        assert_eq!(
            pipeline.prepare(44100.0, usize::MAX),
            Err(ChainError::InvalidBlockSize(usize::MAX))
        );
        assert_eq!(pipeline.lifecycle(), Lifecycle::Uninitialized);

        pipeline.prepare(MAX_SAMPLE_RATE, MAX_BLOCK_SIZE).unwrap();
        assert!(pipeline.is_prepared());
        assert_eq!(pipeline.echo().capacity(), 768_000);
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut pipeline = Pipeline::new();
        pipeline.prepare(44100.0, 64).unwrap();
        assert_eq!(
            pipeline.lifecycle(),
            Lifecycle::Prepared {
                sample_rate: 44100.0,
                max_block_size: 64
            }
        );

        pipeline.release();
        pipeline.release();
        assert_eq!(pipeline.lifecycle(), Lifecycle::Released);

        let mut data = [0.5f32; 8];
        assert_eq!(
            pipeline.process(&mut AudioBlock::new(&mut data, 2, 4).unwrap()),
            Err(ChainError::NotPrepared)
        );

        pipeline.prepare(48000.0, 64).unwrap();
        assert!(pipeline.is_prepared());
        assert_eq!(pipeline.echo().capacity(), 48000);
    }

    #[test]
    fn test_release_from_uninitialized() {
        let mut pipeline = Pipeline::new();
        pipeline.release();
        assert_eq!(pipeline.lifecycle(), Lifecycle::Released);
    }

    #[test]
    fn test_block_too_large() {
        let mut pipeline = Pipeline::new();
        pipeline.prepare(44100.0, 4).unwrap();
        let mut data = [0.5f32; 16];
        assert_eq!(
            pipeline.process(&mut AudioBlock::new(&mut data, 2, 8).unwrap()),
            Err(ChainError::BlockTooLarge { frames: 8, max: 4 })
        );
        assert_eq!(data, [0.5; 16]);
    }

    #[test]
    fn test_parameters_reach_stages_each_block() {
        let mut pipeline = Pipeline::new();
        pipeline.prepare(44100.0, 16).unwrap();

        pipeline.parameters().set(ParamId::Feedback, 0.3);
        pipeline.parameters().set(ParamId::Threshold, 0.4);
        pipeline.parameters().set(ParamId::RoomSize, 0.2);
        pipeline.parameters().set(ParamId::DelayTime, 0.75);

        let mut data = [0.0f32; 32];
        pipeline.process(&mut AudioBlock::new(&mut data, 2, 16).unwrap()).unwrap();

        assert_eq!(pipeline.echo().feedback(), 0.3);
        assert_eq!(pipeline.echo().delay_time(), 0.75);
        assert_eq!(pipeline.gate().threshold(), 0.4);
        let reverb = pipeline.reverb().parameters();
        assert_eq!(reverb.room_size, 0.2);
        assert_eq!(reverb.damping, REVERB_DAMPING);
        assert_eq!(reverb.wet_level, REVERB_WET);
    }

    #[test]
    fn test_reset_keeps_parameters_and_lifecycle() {
        let mut pipeline = Pipeline::new();
        pipeline.prepare(1000.0, 10).unwrap();
        pipeline.set_parameter("roomSize", 0.1).unwrap();

        let mut data = [0.9f32; 20];
        pipeline.process(&mut AudioBlock::new(&mut data, 2, 10).unwrap()).unwrap();
        assert_eq!(pipeline.echo().cursor(), 10);

        pipeline.reset();
        assert_eq!(pipeline.echo().cursor(), 0);
        assert!(pipeline.is_prepared());
        assert_eq!(pipeline.get_parameter("roomSize").unwrap(), 0.1);
    }

    #[test]
    fn test_state_via_pipeline() {
        let pipeline = Pipeline::new();
        pipeline.set_parameter("delayTime", 0.37).unwrap();
        let blob = pipeline.serialize_state();

        let fresh = Pipeline::new();
        fresh.deserialize_state(&blob).unwrap();
        assert!((fresh.get_parameter("delayTime").unwrap() - 0.37).abs() < 1e-6);
    }
}
