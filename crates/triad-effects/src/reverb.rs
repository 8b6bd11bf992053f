//! Stereo algorithmic reverb.
//!
//! A Freeverb network: per side, 8 lowpass-feedback comb filters in
//! parallel followed by 4 allpass diffusers in series. Both sides are fed
//! the same mono sum; the right side's delay lengths are spread by a few
//! samples to decorrelate the two outputs.
//!
//! ```text
//!            ┌─ comb ─┐
//! (L+R)*g ──►├─ comb ─┤── ap ── ap ── ap ── ap ──► wetL
//!            └─ ...  ─┘
//! ```
//!
//! The output mixes both tank outputs into each side through `wet1`
//! (same side) and `wet2` (opposite side), so `width` blends from full
//! stereo down to mono.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use triad_core::{AllpassFilter, AudioBlock, CombFilter, Effect, LinearSmoothedParam};

/// Freeverb comb filter delay times (at 44.1kHz reference).
/// These are mutually prime to avoid resonances.
const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Freeverb allpass filter delay times (at 44.1kHz reference).
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];

/// Reference sample rate for tuning constants.
const REFERENCE_RATE: f32 = 44100.0;

/// Extra samples added to every right-side delay.
const STEREO_SPREAD: usize = 23;

/// Gain applied to the mono sum before it enters the tanks.
const INPUT_GAIN: f32 = 0.015;

const ROOM_SCALE: f32 = 0.28;
const ROOM_OFFSET: f32 = 0.7;
const DAMP_SCALE: f32 = 0.4;
const WET_SCALE: f32 = 3.0;
const DRY_SCALE: f32 = 2.0;

/// Coefficient ramp length in milliseconds.
const SMOOTHING_MS: f32 = 10.0;

/// Scale delay times from reference rate to target rate.
fn scale_to_rate(samples: usize, target_rate: f32) -> usize {
    (libm::roundf(samples as f32 * target_rate / REFERENCE_RATE) as usize).max(1)
}

/// Controls of the reverb network, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParameters {
    /// Tail length: maps onto comb feedback `0.7..=0.98`.
    pub room_size: f32,
    /// High-frequency absorption in the feedback loops.
    pub damping: f32,
    /// Reverberant signal level.
    pub wet_level: f32,
    /// Unprocessed signal level.
    pub dry_level: f32,
    /// Stereo width of the wet signal (0 = mono).
    pub width: f32,
}

impl ReverbParameters {
    /// Returns a copy with every field clamped to `[0, 1]`.
    ///
    /// NaN fields fall back to the default value for that field.
    #[must_use]
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let fix = |value: f32, default: f32| {
            if value.is_nan() {
                default
            } else {
                value.clamp(0.0, 1.0)
            }
        };
        Self {
            room_size: fix(self.room_size, defaults.room_size),
            damping: fix(self.damping, defaults.damping),
            wet_level: fix(self.wet_level, defaults.wet_level),
            dry_level: fix(self.dry_level, defaults.dry_level),
            width: fix(self.width, defaults.width),
        }
    }

    fn comb_feedback(&self) -> f32 {
        self.room_size * ROOM_SCALE + ROOM_OFFSET
    }

    fn comb_damping(&self) -> f32 {
        self.damping * DAMP_SCALE
    }

    /// Returns `(dry, wet1, wet2)` output gains.
    fn gains(&self) -> (f32, f32, f32) {
        let wet = self.wet_level * WET_SCALE;
        (
            self.dry_level * DRY_SCALE,
            0.5 * wet * (1.0 + self.width),
            0.5 * wet * (1.0 - self.width),
        )
    }
}

impl Default for ReverbParameters {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
        }
    }
}

/// One side of the network.
#[derive(Debug, Clone)]
struct Tank {
    combs: Vec<CombFilter>,
    allpasses: Vec<AllpassFilter>,
}

impl Tank {
    fn new(sample_rate: f32, spread: usize) -> Self {
        Self {
            combs: COMB_TUNINGS_44K
                .iter()
                .map(|&len| CombFilter::new(scale_to_rate(len + spread, sample_rate)))
                .collect(),
            allpasses: ALLPASS_TUNINGS_44K
                .iter()
                .map(|&len| AllpassFilter::new(scale_to_rate(len + spread, sample_rate)))
                .collect(),
        }
    }

    #[inline]
    fn process(&mut self, input: f32, damp: f32, feedback: f32) -> f32 {
        let mut acc = 0.0;
        for comb in &mut self.combs {
            comb.set_damp(damp);
            comb.set_feedback(feedback);
            acc += comb.process(input);
        }
        for allpass in &mut self.allpasses {
            acc = allpass.process(acc);
        }
        acc
    }

    fn clear(&mut self) {
        self.combs.iter_mut().for_each(CombFilter::clear);
        self.allpasses.iter_mut().for_each(AllpassFilter::clear);
    }
}

/// Stereo Freeverb stage.
///
/// # Channel handling
///
/// | channels | behaviour |
/// |---|---|
/// | 0 | nothing to do |
/// | 1 | left network only, `out = wet * tank(x) + dry * x` |
/// | 2 | full stereo |
/// | 3+ | channels 0 and 1 in stereo, the rest pass through |
///
/// # Example
///
/// ```rust
/// use triad_core::{AudioBlock, Effect};
/// use triad_effects::{Reverb, ReverbParameters};
///
/// let mut reverb = Reverb::new();
/// reverb.set_parameters(ReverbParameters { room_size: 0.8, ..Default::default() });
/// reverb.prepare(48000.0, 256);
///
/// let mut data = [0.0f32; 512];
/// data[0] = 1.0;
/// reverb.process(&mut AudioBlock::new(&mut data, 2, 256).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Reverb {
    /// Left and right networks, empty until `prepare`
    tanks: Vec<Tank>,
    params: ReverbParameters,
    damping: LinearSmoothedParam,
    feedback: LinearSmoothedParam,
    dry_gain: LinearSmoothedParam,
    wet_gain1: LinearSmoothedParam,
    wet_gain2: LinearSmoothedParam,
    sample_rate: f32,
}

impl Reverb {
    /// Create an unprepared reverb with default parameters.
    pub fn new() -> Self {
        let params = ReverbParameters::default();
        let (dry, wet1, wet2) = params.gains();
        let smoothed = |value| LinearSmoothedParam::with_config(value, REFERENCE_RATE, SMOOTHING_MS);

        Self {
            tanks: Vec::new(),
            params,
            damping: smoothed(params.comb_damping()),
            feedback: smoothed(params.comb_feedback()),
            dry_gain: smoothed(dry),
            wet_gain1: smoothed(wet1),
            wet_gain2: smoothed(wet2),
            sample_rate: REFERENCE_RATE,
        }
    }

    /// Update the controls. Coefficients glide to the new values over 10 ms;
    /// the network state is kept.
    pub fn set_parameters(&mut self, params: ReverbParameters) {
        let params = params.clamped();
        if params == self.params {
            return;
        }

        let (dry, wet1, wet2) = params.gains();
        self.damping.set_target(params.comb_damping());
        self.feedback.set_target(params.comb_feedback());
        self.dry_gain.set_target(dry);
        self.wet_gain1.set_target(wet1);
        self.wet_gain2.set_target(wet2);
        self.params = params;
    }

    /// Current (clamped) controls.
    pub fn parameters(&self) -> ReverbParameters {
        self.params
    }

    /// Sample rate of the last `prepare`.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Whether the filter memories are allocated.
    pub fn is_prepared(&self) -> bool {
        !self.tanks.is_empty()
    }

    fn smoothers(&mut self) -> [&mut LinearSmoothedParam; 5] {
        [
            &mut self.damping,
            &mut self.feedback,
            &mut self.dry_gain,
            &mut self.wet_gain1,
            &mut self.wet_gain2,
        ]
    }

    fn process_mono(&mut self, samples: &mut [f32]) {
        let Some(tank) = self.tanks.first_mut() else {
            return;
        };

        for sample in samples.iter_mut() {
            let input = *sample * INPUT_GAIN;
            let damp = self.damping.advance();
            let feedback = self.feedback.advance();
            let out = tank.process(input, damp, feedback);

            let dry = self.dry_gain.advance();
            let wet1 = self.wet_gain1.advance();
            *sample = out * wet1 + *sample * dry;
        }
    }

    fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        let [left_tank, right_tank] = self.tanks.as_mut_slice() else {
            return;
        };

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let input = (*l + *r) * INPUT_GAIN;
            let damp = self.damping.advance();
            let feedback = self.feedback.advance();
            let out_l = left_tank.process(input, damp, feedback);
            let out_r = right_tank.process(input, damp, feedback);

            let dry = self.dry_gain.advance();
            let wet1 = self.wet_gain1.advance();
            let wet2 = self.wet_gain2.advance();
            *l = out_l * wet1 + out_r * wet2 + *l * dry;
            *r = out_r * wet1 + out_l * wet2 + *r * dry;
        }
    }
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Reverb {
    fn prepare(&mut self, sample_rate: f32, _max_block_size: usize) {
        self.sample_rate = sample_rate;
        self.tanks = alloc::vec![Tank::new(sample_rate, 0), Tank::new(sample_rate, STEREO_SPREAD)];
        for param in self.smoothers() {
            param.set_sample_rate(sample_rate);
            param.snap_to_target();
        }
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        if !self.is_prepared() {
            return;
        }

        match block.num_channels() {
            0 => {}
            1 => self.process_mono(block.channel_mut(0)),
            _ => {
                if let Some((left, right)) = block.stereo_mut() {
                    self.process_stereo(left, right);
                }
            }
        }
    }

    fn reset(&mut self) {
        self.tanks.iter_mut().for_each(Tank::clear);
        for param in self.smoothers() {
            param.snap_to_target();
        }
    }

    fn release(&mut self) {
        self.tanks = Vec::new();
    }
}
