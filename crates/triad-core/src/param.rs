//! Linear parameter ramps for click-free coefficient changes.
//!
//! Parameters reach the stages once per block. Coefficients that feed a
//! recursive network (the reverb's comb feedback and damping, its wet and
//! dry gains) must not jump, so they glide to each new target over a short
//! fixed window instead.
//!
//! ```rust
//! use triad_core::LinearSmoothedParam;
//!
//! let mut gain = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
//! gain.set_target(1.0);
//!
//! // 10 ms at 48 kHz = 480 samples
//! for _ in 0..480 {
//!     gain.advance();
//! }
//! assert_eq!(gain.get(), 1.0);
//! ```

/// A value that moves toward its target at a constant rate.
///
/// Each call to [`set_target`](Self::set_target) restarts a ramp of a
/// fixed length in samples; the last step lands exactly on the target.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    value: f32,
    target: f32,
    step: f32,
    remaining: u32,
    ramp_ms: f32,
    /// Ramp length in samples at the current rate.
    ramp_len: u32,
}

impl LinearSmoothedParam {
    /// Settled parameter with a 10 ms ramp at 44.1 kHz.
    pub fn new(initial: f32) -> Self {
        Self::with_config(initial, 44100.0, 10.0)
    }

    /// Settled parameter with an explicit rate and ramp time.
    pub fn with_config(initial: f32, sample_rate: f32, ramp_ms: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            ramp_ms,
            ramp_len: ramp_samples(ramp_ms, sample_rate),
        }
    }

    /// Start a ramp from the current value to `target`.
    ///
    /// Re-sending the current target does not restart the ramp.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;

        if self.ramp_len == 0 {
            self.snap_to_target();
        } else {
            self.step = (target - self.value) / self.ramp_len as f32;
            self.remaining = self.ramp_len;
        }
    }

    /// Jump to `value`, cancelling any ramp.
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.snap_to_target();
    }

    /// Change the rate used for the next ramp.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.ramp_len = ramp_samples(self.ramp_ms, sample_rate);
    }

    /// Step once and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.remaining {
            0 => {}
            1 => {
                self.value = self.target;
                self.remaining = 0;
            }
            _ => {
                self.value += self.step;
                self.remaining -= 1;
            }
        }
        self.value
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Value the ramp is heading for.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// `true` once the ramp has finished.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }

    /// Finish the ramp now.
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
        self.step = 0.0;
        self.remaining = 0;
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn ramp_samples(ms: f32, sample_rate: f32) -> u32 {
    let samples = ms * 0.001 * sample_rate;
    if samples.is_finite() && samples >= 1.0 {
        samples as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_is_linear() {
        let mut p = LinearSmoothedParam::with_config(0.0, 1000.0, 10.0);
        p.set_target(1.0);

        let steps: [f32; 10] = core::array::from_fn(|_| p.advance());
        for pair in steps[..9].windows(2) {
            assert!((pair[1] - pair[0] - 0.1).abs() < 1e-5);
        }
        assert_eq!(steps[9], 1.0);
        assert!(p.is_settled());
    }

    #[test]
    fn test_retarget_mid_ramp() {
        let mut p = LinearSmoothedParam::with_config(0.0, 1000.0, 10.0);
        p.set_target(1.0);
        for _ in 0..5 {
            p.advance();
        }
        p.set_target(0.0);
        assert!(!p.is_settled());

        for _ in 0..10 {
            p.advance();
        }
        assert_eq!(p.get(), 0.0);
    }

    #[test]
    fn test_same_target_keeps_ramp() {
        let mut p = LinearSmoothedParam::with_config(0.0, 1000.0, 10.0);
        p.set_target(1.0);
        for _ in 0..4 {
            p.advance();
        }
        p.set_target(1.0);
        for _ in 0..6 {
            p.advance();
        }
        assert!(p.is_settled());
    }

    #[test]
    fn test_zero_time_is_immediate() {
        let mut p = LinearSmoothedParam::with_config(0.3, 48000.0, 0.0);
        p.set_target(0.9);
        assert_eq!(p.get(), 0.9);
        assert!(p.is_settled());
    }

    #[test]
    fn test_rate_change_rescales_ramp() {
        let mut p = LinearSmoothedParam::with_config(0.0, 1000.0, 10.0);
        p.set_sample_rate(2000.0);
        p.set_target(1.0);
        for _ in 0..19 {
            p.advance();
        }
        assert!(!p.is_settled());
        assert_eq!(p.advance(), 1.0);
    }

    #[test]
    fn test_snap_and_immediate() {
        let mut p = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
        p.set_target(0.5);
        p.snap_to_target();
        assert_eq!(p.get(), 0.5);

        p.set_immediate(0.2);
        assert_eq!(p.get(), 0.2);
        assert_eq!(p.target(), 0.2);
    }
}
