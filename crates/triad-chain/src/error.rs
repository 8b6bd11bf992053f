//! Error types for the chain.

use thiserror::Error;

/// Errors raised by the pipeline, the parameter store and state restore.
///
/// Variants returned from [`Pipeline::process`](crate::Pipeline::process)
/// carry only `Copy` data, so failing on the audio thread never allocates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    /// `process` was called before `prepare` or after `release`.
    #[error("pipeline is not prepared")]
    NotPrepared,

    /// The block has more frames than the size given to `prepare`.
    #[error("block of {frames} frames exceeds the prepared maximum of {max}")]
    BlockTooLarge {
        /// Frames in the offending block.
        frames: usize,
        /// Maximum block size from `prepare`.
        max: usize,
    },

    /// Sample rate is not in `(0, MAX_SAMPLE_RATE]`.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    /// Maximum block size is zero or above `MAX_BLOCK_SIZE`.
    #[error("invalid maximum block size: {0}")]
    InvalidBlockSize(usize),

    /// No parameter has this name.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// A persisted state blob could not be decoded.
    #[error("malformed state: {0}")]
    MalformedState(&'static str),
}
