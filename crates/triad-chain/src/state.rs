//! Persisted state.
//!
//! The state blob is exactly one little-endian `f32`: the delay time. The
//! other three parameters are not persisted and keep whatever value the
//! store holds when the blob is restored.

use crate::{ChainError, ParamId, ParameterStore};

/// Size in bytes of a serialized state blob.
pub const STATE_LEN: usize = 4;

impl ParameterStore {
    /// Encode the persisted state.
    pub fn serialize_state(&self) -> [u8; STATE_LEN] {
        self.get(ParamId::DelayTime).to_le_bytes()
    }

    /// Restore the delay time from a blob written by
    /// [`serialize_state`](Self::serialize_state).
    ///
    /// The value is clamped to its range. Bytes past the first four are
    /// ignored. A short blob or a non-finite value is rejected and the store
    /// is left unchanged.
    pub fn deserialize_state(&self, bytes: &[u8]) -> Result<(), ChainError> {
        let Some(head) = bytes.first_chunk::<STATE_LEN>() else {
            tracing::warn!(len = bytes.len(), "state blob too short, keeping current values");
            return Err(ChainError::MalformedState("expected at least 4 bytes"));
        };

        let delay_time = f32::from_le_bytes(*head);
        if !delay_time.is_finite() {
            tracing::warn!("state blob holds a non-finite delay time, keeping current values");
            return Err(ChainError::MalformedState("delay time is not finite"));
        }

        self.set(ParamId::DelayTime, delay_time);
        tracing::debug!(delay_time = self.get(ParamId::DelayTime), "state restored");
        Ok(())
    }
}
