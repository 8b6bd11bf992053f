//! Triad Effects - the three stages of the triad chain
//!
//! - [`Echo`] - Feedback echo over per-channel circular lines sharing one cursor
//! - [`Reverb`] - Stereo Freeverb network
//! - [`Gate`] - Stateless amplitude gate
//!
//! Every stage implements [`triad_core::Effect`] and processes an
//! [`AudioBlock`](triad_core::AudioBlock) in place.
//!
//! ## Example
//!
//! ```rust
//! use triad_core::{AudioBlock, Effect};
//! use triad_effects::{Echo, Gate, Reverb};
//!
//! let mut stages: [Box<dyn Effect>; 3] = [
//!     Box::new(Echo::new()),
//!     Box::new(Reverb::new()),
//!     Box::new(Gate::new()),
//! ];
//! for stage in &mut stages {
//!     stage.prepare(44100.0, 128);
//! }
//!
//! let mut data = [0.0f32; 256];
//! data[0] = 1.0;
//! let mut block = AudioBlock::new(&mut data, 2, 128).unwrap();
//! for stage in &mut stages {
//!     stage.process(&mut block);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod echo;
pub mod gate;
pub mod reverb;

// Re-export main types at crate root
pub use echo::{DelayMode, Echo, MAX_DELAY_SECONDS, MAX_FEEDBACK, MIN_DELAY_SECONDS};
pub use gate::Gate;
pub use reverb::{Reverb, ReverbParameters};
