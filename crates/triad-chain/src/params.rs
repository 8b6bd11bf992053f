//! The four user controls and their lock-free store.
//!
//! Values live in `AtomicU32` cells holding the `f32` bit pattern, one cell
//! per parameter. A load or store moves the whole value at once, so a reader
//! on the audio thread can never observe a half-written float.
//!
//! Writers use `Release`, readers `Acquire`: a value committed on the
//! control thread is visible to the next `process` call that loads it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use triad_core::{ParamDescriptor, ParamUnit};

use crate::ChainError;

const DELAY_TIME: ParamDescriptor =
    ParamDescriptor::new("Delay Time", "delayTime", ParamUnit::Seconds, 0.01, 1.0, 0.5);
const FEEDBACK: ParamDescriptor =
    ParamDescriptor::new("Feedback", "feedback", ParamUnit::None, 0.0, 0.95, 0.5);
const ROOM_SIZE: ParamDescriptor =
    ParamDescriptor::new("Room Size", "roomSize", ParamUnit::None, 0.0, 1.0, 0.8);
const THRESHOLD: ParamDescriptor =
    ParamDescriptor::new("Threshold", "threshold", ParamUnit::None, 0.0, 1.0, 0.1);

/// Identifies one of the four controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Echo tap position in seconds.
    DelayTime,
    /// Echo feedback gain.
    Feedback,
    /// Reverb room size.
    RoomSize,
    /// Gate amplitude cutoff.
    Threshold,
}

impl ParamId {
    /// Every parameter in store order.
    pub const ALL: [ParamId; 4] = [
        ParamId::DelayTime,
        ParamId::Feedback,
        ParamId::RoomSize,
        ParamId::Threshold,
    ];

    /// Name, unit, range and default.
    pub const fn descriptor(self) -> &'static ParamDescriptor {
        match self {
            ParamId::DelayTime => &DELAY_TIME,
            ParamId::Feedback => &FEEDBACK,
            ParamId::RoomSize => &ROOM_SIZE,
            ParamId::Threshold => &THRESHOLD,
        }
    }

    /// Host-facing name, e.g. `"delayTime"`.
    pub const fn name(self) -> &'static str {
        self.descriptor().string_id
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamId {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| ChainError::UnknownParameter(s.to_string()))
    }
}

/// A plain copy of all four values.
///
/// Serialized field names match the host-facing parameter names. Missing
/// fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterSet {
    /// Echo tap position in seconds (0.01 to 1.0).
    pub delay_time: f32,
    /// Echo feedback gain (0.0 to 0.95).
    pub feedback: f32,
    /// Reverb room size (0.0 to 1.0).
    pub room_size: f32,
    /// Gate threshold (0.0 to 1.0).
    pub threshold: f32,
}

impl ParameterSet {
    /// Value of one parameter.
    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::DelayTime => self.delay_time,
            ParamId::Feedback => self.feedback,
            ParamId::RoomSize => self.room_size,
            ParamId::Threshold => self.threshold,
        }
    }

    /// Overwrite one parameter without clamping.
    pub fn set(&mut self, id: ParamId, value: f32) {
        match id {
            ParamId::DelayTime => self.delay_time = value,
            ParamId::Feedback => self.feedback = value,
            ParamId::RoomSize => self.room_size = value,
            ParamId::Threshold => self.threshold = value,
        }
    }

    /// Returns a copy with every value clamped to its range.
    ///
    /// NaN values are replaced by the parameter's default.
    #[must_use]
    pub fn clamped(self) -> Self {
        let mut out = self;
        for id in ParamId::ALL {
            let desc = id.descriptor();
            let value = self.get(id);
            out.set(id, if value.is_nan() { desc.default } else { desc.clamp(value) });
        }
        out
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            delay_time: DELAY_TIME.default,
            feedback: FEEDBACK.default,
            room_size: ROOM_SIZE.default,
            threshold: THRESHOLD.default,
        }
    }
}

/// Lock-free store shared between the control side and the audio thread.
///
/// Cloning is cheap: every clone points at the same cells.
///
/// # Example
///
/// ```rust
/// use triad_chain::{ParamId, ParameterStore};
///
/// let store = ParameterStore::new();
/// let control = store.clone();
///
/// control.set(ParamId::Feedback, 5.0);
/// assert_eq!(store.get(ParamId::Feedback), 0.95);
/// ```
#[derive(Clone)]
pub struct ParameterStore {
    values: Arc<[AtomicU32; 4]>,
}

impl ParameterStore {
    /// Create a store holding the defaults.
    pub fn new() -> Self {
        let defaults = ParameterSet::default();
        Self {
            values: Arc::new(ParamId::ALL.map(|id| AtomicU32::new(defaults.get(id).to_bits()))),
        }
    }

    /// Read the last committed value (lock-free, never blocks).
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        f32::from_bits(self.values[id.index()].load(Ordering::Acquire))
    }

    /// Clamp `value` to the parameter's range and commit it.
    ///
    /// NaN is ignored and leaves the stored value unchanged.
    #[inline]
    pub fn set(&self, id: ParamId, value: f32) {
        if value.is_nan() {
            return;
        }
        let clamped = id.descriptor().clamp(value);
        self.values[id.index()].store(clamped.to_bits(), Ordering::Release);
    }

    /// Read a parameter by host-facing name.
    pub fn get_by_name(&self, name: &str) -> Result<f32, ChainError> {
        Ok(self.get(name.parse()?))
    }

    /// Write a parameter by host-facing name.
    pub fn set_by_name(&self, name: &str, value: f32) -> Result<(), ChainError> {
        self.set(name.parse()?, value);
        Ok(())
    }

    /// Load all four values.
    ///
    /// Each value is read atomically; the four reads are not one atomic
    /// unit, so a concurrent writer may be seen for some parameters only.
    pub fn snapshot(&self) -> ParameterSet {
        ParameterSet {
            delay_time: self.get(ParamId::DelayTime),
            feedback: self.get(ParamId::Feedback),
            room_size: self.get(ParamId::RoomSize),
            threshold: self.get(ParamId::Threshold),
        }
    }

    /// Commit every value of `set` (each clamped).
    pub fn apply(&self, set: &ParameterSet) {
        for id in ParamId::ALL {
            self.set(id, set.get(id));
        }
    }

    /// Restore every parameter to its default.
    pub fn reset_to_defaults(&self) {
        self.apply(&ParameterSet::default());
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("values", &self.snapshot())
            .finish()
    }
}
