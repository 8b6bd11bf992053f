//! Circular delay buffer for time-based effects.
//!
//! [`RingBuffer`] backs the memories of the reverb's comb and allpass
//! filters. The echo keeps its own lines because all of its channels share
//! one cursor.
//!
//! # Cursor model
//!
//! The buffer keeps one cursor. The slot under the cursor holds the oldest
//! sample, i.e. the sample written exactly `capacity` writes ago. Writing
//! stores a sample at the cursor and advances it by one, wrapping modulo the
//! capacity. A filter that reads the slot under the cursor before writing it
//! therefore sees a delay of exactly `capacity` samples.
//!
//! ```text
//!   oldest ─┐        newest ─┐
//!  [ . . . [c] . . . . . . [c-1] ]
//!           ↑ cursor
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-capacity circular sample buffer (heap-allocated once).
///
/// The buffer is allocated at construction and never reallocates. Reads and
/// writes are allocation-free and suitable for the audio thread.
///
/// # Example
///
/// ```rust
/// use triad_core::RingBuffer;
///
/// let mut ring = RingBuffer::new(4);
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     ring.write(x);
/// }
/// // Four writes later the cursor is back on the first sample.
/// assert_eq!(ring.read(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer {
    /// Circular storage
    buffer: Vec<f32>,
    /// Cursor: next slot to write, holds the oldest sample
    pos: usize,
}

impl RingBuffer {
    /// Creates a zeroed ring buffer holding `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Ring buffer capacity must be > 0");

        #[cfg(feature = "tracing")]
        tracing::trace!(capacity, "ring_buffer: allocate");

        Self {
            buffer: vec![0.0; capacity],
            pos: 0,
        }
    }

    /// Reads the oldest sample (the slot under the cursor).
    #[inline]
    pub fn read(&self) -> f32 {
        self.buffer[self.pos]
    }

    /// Stores `sample` at the cursor and advances the cursor by one.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.pos] = sample;
        self.pos = (self.pos + 1) % self.buffer.len();
    }

    /// Reads the oldest sample, then overwrites it with `sample`.
    #[inline]
    pub fn read_write(&mut self, sample: f32) -> f32 {
        let out = self.read();
        self.write(sample);
        out
    }

    /// Current cursor position, always in `0..capacity`.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Number of samples the buffer holds.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Raw storage, indexed by absolute slot.
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Zeroes the storage and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_equals_capacity() {
        let mut ring = RingBuffer::new(8);
        let mut outputs = [0.0f32; 16];

        for (i, out) in outputs.iter_mut().enumerate() {
            let input = if i == 0 { 1.0 } else { 0.0 };
            *out = ring.read_write(input);
        }

        assert_eq!(outputs[0], 0.0);
        assert_eq!(outputs[8], 1.0, "Impulse should reappear after 8 samples");
        assert_eq!(outputs.iter().filter(|&&x| x != 0.0).count(), 1);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut ring = RingBuffer::new(5);
        for n in 1..=23 {
            ring.write(0.0);
            assert_eq!(ring.cursor(), n % 5);
        }
    }

    #[test]
    fn test_clear() {
        let mut ring = RingBuffer::new(4);
        for _ in 0..6 {
            ring.write(0.5);
        }
        ring.clear();

        assert_eq!(ring.cursor(), 0);
        assert!(ring.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_panics() {
        let _ = RingBuffer::new(0);
    }
}
