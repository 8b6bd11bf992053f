//! Static parameter declarations.
//!
//! Every user-facing control is declared once as a [`ParamDescriptor`]: its
//! display name, stable string id, unit, range and default. The descriptor
//! is the single source of truth for clamping, for host-style normalized
//! values, and for listing parameters in front ends.
//!
//! # Example
//!
//! ```rust
//! use triad_core::{ParamDescriptor, ParamUnit};
//!
//! const FEEDBACK: ParamDescriptor =
//!     ParamDescriptor::new("Feedback", "feedback", ParamUnit::None, 0.0, 0.95, 0.5);
//!
//! assert_eq!(FEEDBACK.clamp(5.0), 0.95);
//! assert_eq!(FEEDBACK.clamp(-1.0), 0.0);
//! ```

/// Metadata describing one continuous parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Delay Time").
    pub name: &'static str,

    /// Stable identifier used by hosts, presets and the CLI (e.g., "delayTime").
    ///
    /// Once published this must never change.
    pub string_id: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value at construction and after a reset to defaults.
    pub default: f32,
}

impl ParamDescriptor {
    /// Declare a parameter.
    ///
    /// `default` must lie inside `min..=max`.
    pub const fn new(
        name: &'static str,
        string_id: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            string_id,
            unit,
            min,
            max,
            default,
        }
    }

    /// Clamps a value to the declared range.
    ///
    /// NaN is passed through unchanged; callers that must never store NaN
    /// check [`f32::is_nan`] first.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Whether `value` lies inside the declared range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Converts a plain value to the normalized range 0.0 to 1.0.
    ///
    /// ```rust
    /// use triad_core::{ParamDescriptor, ParamUnit};
    ///
    /// let desc = ParamDescriptor::new("Room Size", "roomSize", ParamUnit::None, 0.0, 1.0, 0.8);
    /// assert_eq!(desc.normalize(0.25), 0.25);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / range
    }

    /// Converts a normalized value (0.0 to 1.0) back to the parameter range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Seconds (s) - for time parameters like delay time.
    Seconds,

    /// No unit - for gains and normalized amounts.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use triad_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Seconds.suffix(), " s");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Seconds => " s",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: ParamDescriptor =
        ParamDescriptor::new("Delay Time", "delayTime", ParamUnit::Seconds, 0.01, 1.0, 0.5);

    #[test]
    fn test_clamp() {
        assert_eq!(DELAY.clamp(0.0), 0.01);
        assert_eq!(DELAY.clamp(2.0), 1.0);
        assert_eq!(DELAY.clamp(0.37), 0.37);
        assert!(DELAY.clamp(f32::NAN).is_nan());
    }

    #[test]
    fn test_contains() {
        assert!(DELAY.contains(DELAY.default));
        assert!(DELAY.contains(0.01));
        assert!(!DELAY.contains(1.5));
        assert!(!DELAY.contains(f32::NAN));
    }

    #[test]
    fn test_normalize_roundtrip() {
        for value in [0.01, 0.25, 0.5, 1.0] {
            let back = DELAY.denormalize(DELAY.normalize(value));
            assert!((back - value).abs() < 1e-6, "{value} -> {back}");
        }
    }

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(DELAY.normalize(5.0), 1.0);
        assert_eq!(DELAY.denormalize(-1.0), 0.01);
    }

    #[test]
    fn test_degenerate_range() {
        let fixed = ParamDescriptor::new("Fixed", "fixed", ParamUnit::None, 0.5, 0.5, 0.5);
        assert_eq!(fixed.normalize(0.5), 0.0);
    }
}
