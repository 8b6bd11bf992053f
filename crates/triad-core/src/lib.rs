//! Triad Core - DSP primitives for the triad effects chain
//!
//! This crate provides the building blocks shared by the echo, reverb and
//! gate stages, designed for real-time processing with zero allocation in
//! the audio path.
//!
//! # Core Abstractions
//!
//! - [`AudioBlock`] - Borrowed planar view over caller-owned samples
//! - [`Effect`] - Object-safe stage trait (prepare / process / reset / release)
//!
//! ## Delay Storage
//!
//! - [`RingBuffer`] - Fixed-capacity circular buffer with a single cursor
//!
//! ## Reverb Building Blocks
//!
//! - [`CombFilter`] - Lowpass-feedback comb filter
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Name, id, range and default of a control
//! - [`LinearSmoothedParam`] - Linear ramps for click-free coefficient changes
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! triad-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: buffers are sized in `prepare`, never in `process`
//! - **No dependencies on std**: `libm` for math
//! - **In place**: stages mutate the host's buffer, they never own it

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod buffer;
pub mod comb;
pub mod delay;
pub mod effect;
pub mod math;
pub mod param;
pub mod param_info;

// Re-export main types at crate root
pub use allpass::AllpassFilter;
pub use buffer::AudioBlock;
pub use comb::CombFilter;
pub use delay::RingBuffer;
pub use effect::Effect;
pub use math::{db_to_linear, flush_denormal, linear_to_db, seconds_to_samples};
pub use param::LinearSmoothedParam;
pub use param_info::{ParamDescriptor, ParamUnit};
