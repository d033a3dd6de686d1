//! Analog sampling: the converter seam and bar quantization.

use crate::pattern::LitPattern;
use crate::types::{Mode, SamplerTrigger};

/// Default total right shift for Direct mode samples (10-bit result to 0-15).
pub const DEFAULT_DIRECT_SHIFT: u8 = 6;

/// Default right shift for Vu mode samples; reaches a full bar at 1/16 scale.
pub const DEFAULT_VU_SHIFT: u8 = 2;

/// Largest valid sample shift.
pub const MAX_SHIFT: u8 = 15;

/// Trait for abstracting the analog-to-digital converter.
///
/// The result is latched in two 8-bit data registers. Reading the low byte
/// locks the result until the high byte is read, so the low byte must always
/// be read first; [`read_sample`] enforces that order.
pub trait AnalogSampler {
    /// Applies a trigger source. `Disabled` must stop conversion events.
    fn configure(&mut self, trigger: SamplerTrigger);

    /// Reads the low data byte of the latest conversion.
    fn read_low(&mut self) -> u8;

    /// Reads the high data byte of the latest conversion.
    fn read_high(&mut self) -> u8;
}

/// Reads the latest conversion, low byte first.
#[inline]
pub fn read_sample<A: AnalogSampler + ?Sized>(sampler: &mut A) -> u16 {
    let low = sampler.read_low();
    let high = sampler.read_high();
    (u16::from(high) << 8) | u16::from(low)
}

/// Converts raw samples to bar counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quantizer {
    direct_shift: u8,
    vu_shift: u8,
}

impl Quantizer {
    /// Creates a quantizer.
    ///
    /// Both shifts must be at most [`MAX_SHIFT`]; [`ConfigBuilder::build`]
    /// rejects larger ones. Debug builds panic on an oversized shift, release
    /// builds clamp it.
    ///
    /// [`ConfigBuilder::build`]: crate::config::ConfigBuilder::build
    pub const fn new(direct_shift: u8, vu_shift: u8) -> Self {
        debug_assert!(direct_shift <= MAX_SHIFT, "direct shift exceeds 15");
        debug_assert!(vu_shift <= MAX_SHIFT, "vu shift exceeds 15");
        Self {
            direct_shift: clamp_shift(direct_shift),
            vu_shift: clamp_shift(vu_shift),
        }
    }

    /// Shift applied in `mode`, or `None` for modes that do not sample.
    pub fn shift(&self, mode: Mode) -> Option<u8> {
        match mode {
            Mode::Direct => Some(self.direct_shift),
            Mode::Vu => Some(self.vu_shift),
            Mode::Attract => None,
        }
    }

    /// Bar count 0-15 for `raw` in `mode`.
    ///
    /// The shifted value is masked to four bits, not saturated, matching the
    /// board firmware: Vu mode wraps once the input exceeds its range.
    pub fn bar_count(&self, mode: Mode, raw: u16) -> Option<u8> {
        self.shift(mode).map(|shift| ((raw >> shift) & 0x0F) as u8)
    }

    /// Thermometer pattern for `raw` in `mode`.
    pub fn pattern(&self, mode: Mode, raw: u16) -> Option<LitPattern> {
        self.bar_count(mode, raw).map(LitPattern::thermometer)
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECT_SHIFT, DEFAULT_VU_SHIFT)
    }
}

const fn clamp_shift(shift: u8) -> u8 {
    if shift > MAX_SHIFT { MAX_SHIFT } else { shift }
}
