//! Feedback echo with a shared circular cursor.
//!
//! Every channel owns a circular line, but all lines share one cursor that
//! advances exactly once per sample frame, so stereo material stays in
//! lock-step. Per frame and channel:
//!
//! ```text
//! delayed    = line[c][read]
//! out        = in + delayed * feedback
//! line[c][pos] = out
//! pos        = (pos + 1) mod capacity
//! ```
//!
//! In [`DelayMode::Cursor`] (the default) `read == pos`: the echo period is
//! the full line capacity and the delay time control has no audible effect.
//! [`DelayMode::Tapped`] reads `delay_time * sample_rate` samples behind the
//! cursor instead, giving a true variable-length echo.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use triad_core::{AudioBlock, Effect, flush_denormal, seconds_to_samples};

/// Lower bound of the delay time control, in seconds.
pub const MIN_DELAY_SECONDS: f32 = 0.01;
/// Upper bound of the delay time control, in seconds.
pub const MAX_DELAY_SECONDS: f32 = 1.0;
/// Feedback ceiling. Staying below 1.0 keeps the loop energy bounded.
pub const MAX_FEEDBACK: f32 = 0.95;

/// How the echo picks its read position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayMode {
    /// Read the slot under the shared cursor, one full line behind.
    ///
    /// The delay time is stored but does not move the tap.
    #[default]
    Cursor,
    /// Read `round(delay_time * sample_rate)` samples behind the cursor.
    Tapped,
}

/// Multi-channel feedback echo.
///
/// The number of delay lines is fixed at construction. A block with more
/// channels than lines feeds its extra channels through the last line.
///
/// # Example
///
/// ```rust
/// use triad_core::{AudioBlock, Effect};
/// use triad_effects::Echo;
///
/// let mut echo = Echo::new();
/// echo.prepare(48000.0, 256);
/// echo.set_feedback(0.5);
///
/// let mut data = [0.0f32; 2 * 256];
/// data[0] = 1.0;
/// let mut block = AudioBlock::new(&mut data, 2, 256).unwrap();
/// echo.process(&mut block);
///
/// assert_eq!(echo.cursor(), 256);
/// ```
#[derive(Debug, Clone)]
pub struct Echo {
    /// One circular line per channel, all `capacity` long
    lines: Vec<Vec<f32>>,
    /// Number of lines allocated by `prepare`
    num_lines: usize,
    /// Shared cursor, in `0..capacity`
    cursor: usize,
    capacity: usize,
    sample_rate: f32,
    delay_time: f32,
    feedback: f32,
    mode: DelayMode,
}

impl Echo {
    /// Create an unprepared stereo echo with default controls
    /// (0.5 s, feedback 0.5).
    pub fn new() -> Self {
        Self::with_channels(2)
    }

    /// Create an unprepared echo with `channels` delay lines (at least one).
    pub fn with_channels(channels: usize) -> Self {
        Self {
            lines: Vec::new(),
            num_lines: channels.max(1),
            cursor: 0,
            capacity: 0,
            sample_rate: 44100.0,
            delay_time: 0.5,
            feedback: 0.5,
            mode: DelayMode::Cursor,
        }
    }

    /// Set the delay time in seconds (0.01 to 1.0).
    pub fn set_delay_time(&mut self, seconds: f32) {
        if !seconds.is_nan() {
            self.delay_time = seconds.clamp(MIN_DELAY_SECONDS, MAX_DELAY_SECONDS);
        }
    }

    /// Current delay time in seconds.
    pub fn delay_time(&self) -> f32 {
        self.delay_time
    }

    /// Set the feedback gain (0.0 to 0.95).
    pub fn set_feedback(&mut self, feedback: f32) {
        if !feedback.is_nan() {
            self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
        }
    }

    /// Current feedback gain.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Select how the read position is derived.
    pub fn set_mode(&mut self, mode: DelayMode) {
        self.mode = mode;
    }

    /// Current read mode.
    pub fn mode(&self) -> DelayMode {
        self.mode
    }

    /// Shared cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Samples per line; 0 before `prepare` and after `release`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of delay lines.
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// Contents of one delay line, if allocated.
    pub fn line(&self, index: usize) -> Option<&[f32]> {
        self.lines.get(index).map(Vec::as_slice)
    }

    /// Distance in samples between the write cursor and the read tap.
    ///
    /// Equals the capacity in [`DelayMode::Cursor`].
    pub fn delay_samples(&self) -> usize {
        match self.mode {
            DelayMode::Cursor => self.capacity,
            DelayMode::Tapped => {
                seconds_to_samples(self.delay_time, self.sample_rate).clamp(1, self.capacity.max(1))
            }
        }
    }

    fn is_allocated(&self) -> bool {
        self.capacity > 0 && !self.lines.is_empty()
    }
}

impl Default for Echo {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Echo {
    /// Sizes every line to hold at least one second (and at least one
    /// maximum block), zeroed, with the cursor at 0.
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        let one_second = libm::ceilf(sample_rate) as usize;
        let capacity = one_second.max(max_block_size).max(1);

        self.sample_rate = sample_rate;
        if self.capacity == capacity && self.lines.len() == self.num_lines {
            for line in &mut self.lines {
                line.fill(0.0);
            }
        } else {
            self.lines = vec![vec![0.0; capacity]; self.num_lines];
            self.capacity = capacity;
        }
        self.cursor = 0;
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        if !self.is_allocated() {
            return;
        }

        let capacity = self.capacity;
        let feedback = self.feedback;
        let start = self.cursor;
        let read_start = (start + capacity - self.delay_samples() % capacity) % capacity;
        let last_line = self.lines.len() - 1;

        for (c, samples) in block.channels_mut().enumerate() {
            let line = &mut self.lines[c.min(last_line)];
            let mut pos = start;
            let mut read = read_start;

            for sample in samples.iter_mut() {
                let delayed = line[read];
                let out = *sample + delayed * feedback;
                *sample = out;
                line[pos] = flush_denormal(out);

                pos += 1;
                if pos == capacity {
                    pos = 0;
                }
                read += 1;
                if read == capacity {
                    read = 0;
                }
            }
        }

        self.cursor = (start + block.num_frames()) % capacity;
    }

    fn reset(&mut self) {
        for line in &mut self.lines {
            line.fill(0.0);
        }
        self.cursor = 0;
    }

    fn release(&mut self) {
        self.lines = Vec::new();
        self.capacity = 0;
        self.cursor = 0;
    }
}
