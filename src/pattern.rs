//! One-bit-per-LED display patterns.

use crate::LED_COUNT;

/// A 16-bit lit/unlit pattern. Bit `i` set means logical LED `i` is lit.
///
/// Patterns are transient: built on every refresh tick or sample and handed
/// straight to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LitPattern(u16);

impl LitPattern {
    /// All LEDs dark.
    pub const EMPTY: LitPattern = LitPattern(0);

    /// All LEDs lit.
    pub const FULL: LitPattern = LitPattern(u16::MAX);

    /// Wraps raw pattern bits.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        LitPattern(bits)
    }

    /// Returns the raw pattern bits.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Thermometer code: the bottom `count` LEDs lit, the rest dark.
    ///
    /// Counts of 16 or more light the whole strip.
    pub const fn thermometer(count: u8) -> Self {
        if count as usize >= LED_COUNT {
            LitPattern::FULL
        } else {
            LitPattern((1u16 << count) - 1)
        }
    }

    /// Returns true if `led` is lit. Indices past the strip are never lit.
    #[inline]
    pub fn is_lit(self, led: usize) -> bool {
        led < LED_COUNT && self.0 & (1 << led) != 0
    }

    /// Returns a copy with `led` lit or dark.
    #[inline]
    pub fn with(self, led: usize, lit: bool) -> Self {
        if led >= LED_COUNT {
            return self;
        }
        if lit {
            LitPattern(self.0 | (1 << led))
        } else {
            LitPattern(self.0 & !(1 << led))
        }
    }

    /// Number of lit LEDs.
    #[inline]
    pub fn lit_count(self) -> u32 {
        self.0.count_ones()
    }
}

impl From<u16> for LitPattern {
    fn from(bits: u16) -> Self {
        LitPattern(bits)
    }
}

impl From<LitPattern> for u16 {
    fn from(pattern: LitPattern) -> Self {
        pattern.0
    }
}
