//! The attract animation: a bright pulse sweeping along the strip.
//!
//! Every LED sits on a mark `led * spacing` of a virtual track. Each control
//! tick advances the phase, the pulse position is `phase >> phase_shift`, and
//! each LED's brightness falls off linearly with its distance from the pulse.

use crate::buffer::DisplayBuffer;

/// Shape and speed of the attract pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttractConfig {
    /// Peak brightness; also the distance at which an LED goes dark.
    pub range: u8,

    /// Track distance between neighbouring LEDs.
    pub spacing: u16,

    /// Phase advance per control tick.
    pub increment: u16,

    /// Right shift from phase to track position.
    pub phase_shift: u8,
}

impl AttractConfig {
    /// The VU board's pulse: ~2.5 track units per tick, one LED wide.
    pub const BOARD: AttractConfig = AttractConfig {
        range: 255,
        spacing: 256,
        increment: 323,
        phase_shift: 4,
    };

    /// Brightness of `led` with the pulse at track position `pulse`.
    pub fn level_at(&self, led: usize, pulse: i32) -> u8 {
        let mark = led as i32 * i32::from(self.spacing);
        let level = i32::from(self.range) - (mark - pulse).abs();
        level.clamp(0, i32::from(u8::MAX)) as u8
    }

    /// Track position of the pulse for `phase`.
    #[inline]
    pub fn pulse_position(&self, phase: u16) -> i32 {
        i32::from(phase.checked_shr(u32::from(self.phase_shift)).unwrap_or(0))
    }

    /// Renders the whole strip for `phase`.
    pub fn render(&self, phase: u16, buffer: &mut DisplayBuffer) {
        let pulse = self.pulse_position(phase);
        for (led, level) in buffer.levels_mut().iter_mut().enumerate() {
            *level = self.level_at(led, pulse);
        }
    }
}

impl Default for AttractConfig {
    fn default() -> Self {
        Self::BOARD
    }
}

/// Free-running phase of the attract animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttractAnimation {
    config: AttractConfig,
    phase: u16,
}

impl AttractAnimation {
    /// Creates an animation at phase 0.
    pub const fn new(config: AttractConfig) -> Self {
        Self { config, phase: 0 }
    }

    /// Advances one control tick and renders the new frame into `buffer`.
    pub fn advance(&mut self, buffer: &mut DisplayBuffer) {
        self.phase = self.phase.wrapping_add(self.config.increment);
        self.config.render(self.phase, buffer);
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> u16 {
        self.phase
    }

    /// Pulse configuration.
    #[inline]
    pub fn config(&self) -> &AttractConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_zero_peaks_on_first_led() {
        let mut buffer = DisplayBuffer::gamma_ramp();
        AttractConfig::BOARD.render(0, &mut buffer);
        assert_eq!(buffer.level(0), Some(255));
        assert!(buffer.levels()[1..].iter().all(|&level| level == 0));
    }

    #[test]
    fn pulse_between_leds_lights_both_equally() {
        let mut buffer = DisplayBuffer::dark();
        // Track position 384 sits halfway between LED 1 (256) and LED 2 (512).
        AttractConfig::BOARD.render(384 << 4, &mut buffer);
        assert_eq!(buffer.level(1), Some(127));
        assert_eq!(buffer.level(2), Some(127));
        assert_eq!(buffer.level(0), Some(0));
        assert_eq!(buffer.level(3), Some(0));
    }

    #[test]
    fn advance_adds_increment_and_wraps() {
        let mut animation = AttractAnimation::new(AttractConfig::BOARD);
        let mut buffer = DisplayBuffer::dark();
        animation.advance(&mut buffer);
        assert_eq!(animation.phase(), 323);

        for _ in 0..203 {
            animation.advance(&mut buffer);
        }
        assert_eq!(animation.phase(), 323u16.wrapping_mul(204));
    }

    #[test]
    fn oversized_shift_parks_pulse_at_origin() {
        let config = AttractConfig {
            phase_shift: 16,
            ..AttractConfig::BOARD
        };
        assert_eq!(config.pulse_position(u16::MAX), 0);
    }
}
