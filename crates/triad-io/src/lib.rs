//! Offline host adapter for the triad effects chain.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`], keeping every channel
//! - **Planar audio**: [`PlanarAudio`], one sample vector per channel
//! - **Block driver**: [`OfflineHost`], which plays the host's role for any
//!   [`AudioProcessor`](triad_chain::AudioProcessor)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use triad_chain::Pipeline;
//! use triad_io::{OfflineHost, read_wav, write_wav};
//!
//! let (mut audio, spec) = read_wav("input.wav")?;
//!
//! let mut host = OfflineHost::new(Pipeline::new(), spec.sample_rate as f64, 512);
//! host.render(&mut audio)?;
//!
//! write_wav("output.wav", &audio, spec)?;
//! ```

mod audio;
mod engine;
mod wav;

pub use audio::PlanarAudio;
pub use engine::OfflineHost;
pub use wav::{WavSpec, read_wav, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The processor rejected a lifecycle call or a block.
    #[error("Processing error: {0}")]
    Processing(#[from] triad_chain::ChainError),

    /// Audio data with an impossible shape.
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
