//! The 16-level brightness buffer behind the dithered refresh.

use crate::{GAMMA_TABLE, LED_COUNT};

/// Brightness of every LED on a 0-255 scale.
///
/// Written by the attract animation, read by the threshold builder on every
/// refresh tick. All entries are always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    levels: [u8; LED_COUNT],
}

impl DisplayBuffer {
    /// Creates a buffer holding `levels`.
    #[inline]
    pub const fn new(levels: [u8; LED_COUNT]) -> Self {
        Self { levels }
    }

    /// The boot state: a perceptual brightness ramp from dark to full.
    #[inline]
    pub const fn gamma_ramp() -> Self {
        Self::new(GAMMA_TABLE)
    }

    /// All LEDs at level 0.
    #[inline]
    pub const fn dark() -> Self {
        Self::new([0; LED_COUNT])
    }

    /// Brightness of `led`.
    #[inline]
    pub fn level(&self, led: usize) -> Option<u8> {
        self.levels.get(led).copied()
    }

    /// All levels in LED order.
    #[inline]
    pub fn levels(&self) -> &[u8; LED_COUNT] {
        &self.levels
    }

    /// Mutable access to all levels.
    #[inline]
    pub fn levels_mut(&mut self) -> &mut [u8; LED_COUNT] {
        &mut self.levels
    }

    /// Sets every LED to `level`.
    pub fn fill(&mut self, level: u8) {
        self.levels = [level; LED_COUNT];
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::gamma_ramp()
    }
}
