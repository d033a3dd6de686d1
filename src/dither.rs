//! Time-division brightness.
//!
//! Each refresh tick compares the whole [`DisplayBuffer`] against a threshold
//! that sweeps 0-255. An LED at level 128 is lit on about half the ticks, so
//! at the ~4 kHz refresh rate the eye sees intermediate brightness. With the
//! default step of 16 the sweep repeats every 16 ticks.

use crate::buffer::DisplayBuffer;
use crate::pattern::LitPattern;
use crate::types::Comparison;

/// Default threshold increment per refresh tick.
pub const DEFAULT_REFRESH_STEP: u8 = 16;

/// Builds the lit pattern for one refresh tick.
pub fn build_pattern(buffer: &DisplayBuffer, threshold: u8, comparison: Comparison) -> LitPattern {
    buffer
        .levels()
        .iter()
        .enumerate()
        .fold(LitPattern::EMPTY, |pattern, (led, &level)| {
            pattern.with(led, comparison.is_lit(level, threshold))
        })
}

/// The sweeping dither threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DitherClock {
    threshold: u8,
    step: u8,
}

impl DitherClock {
    /// Starts a sweep at threshold 0.
    pub const fn new(step: u8) -> Self {
        Self { threshold: 0, step }
    }

    /// Advances one refresh tick and returns the new threshold.
    #[inline]
    pub fn advance(&mut self) -> u8 {
        self.threshold = self.threshold.wrapping_add(self.step);
        self.threshold
    }

    /// Current threshold.
    #[inline]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Threshold increment per tick.
    #[inline]
    pub fn step(&self) -> u8 {
        self.step
    }
}

impl Default for DitherClock {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_STEP)
    }
}
