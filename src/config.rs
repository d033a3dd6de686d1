//! Meter configuration and board revision presets.
//!
//! A [`MeterConfig`] is always valid: it is produced either by a
//! [`BoardRevision`] preset or by [`ConfigBuilder::build`], which checks every
//! field.

use crate::attract::AttractConfig;
use crate::debounce::{DEFAULT_DEBOUNCE_TICKS, MIN_DEBOUNCE_TICKS};
use crate::dither::DEFAULT_REFRESH_STEP;
use crate::layout::{BOARD_PIN_MAP, PinMap};
use crate::sampler::{DEFAULT_DIRECT_SHIFT, DEFAULT_VU_SHIFT, MAX_SHIFT, Quantizer};
use crate::types::{Comparison, ConfigError, Mode, SamplerTrigger};

/// Sampler trigger source for each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerTable {
    /// Trigger used in Direct mode.
    pub direct: SamplerTrigger,

    /// Trigger used in Vu mode.
    pub vu: SamplerTrigger,

    /// Trigger used in Attract mode. Must be `Disabled`.
    pub attract: SamplerTrigger,
}

impl TriggerTable {
    /// Direct on the control timer, Vu free-running, Attract off.
    pub const BOARD: TriggerTable = TriggerTable {
        direct: SamplerTrigger::ControlTimer,
        vu: SamplerTrigger::FreeRunning,
        attract: SamplerTrigger::Disabled,
    };

    /// Trigger for `mode`.
    #[inline]
    pub fn trigger(&self, mode: Mode) -> SamplerTrigger {
        match mode {
            Mode::Direct => self.direct,
            Mode::Vu => self.vu,
            Mode::Attract => self.attract,
        }
    }
}

impl Default for TriggerTable {
    fn default() -> Self {
        Self::BOARD
    }
}

/// Known board revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardRevision {
    /// First board: inclusive threshold, every sample timer-triggered with the
    /// full 6-bit shift, boots into Vu.
    Prototype,

    /// VU board: exclusive threshold, free-running Vu sampling, boots into
    /// Attract.
    #[default]
    VuBoard,
}

/// Validated meter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterConfig {
    boot_mode: Mode,
    comparison: Comparison,
    refresh_step: u8,
    debounce_ticks: u8,
    quantizer: Quantizer,
    triggers: TriggerTable,
    attract: AttractConfig,
    pin_map: PinMap,
}

impl MeterConfig {
    /// Creates a configuration builder starting from the VU board preset.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Preset for a board revision.
    pub fn for_revision(revision: BoardRevision) -> Self {
        match revision {
            BoardRevision::VuBoard => Self {
                boot_mode: Mode::Attract,
                comparison: Comparison::Exclusive,
                refresh_step: DEFAULT_REFRESH_STEP,
                debounce_ticks: DEFAULT_DEBOUNCE_TICKS,
                quantizer: Quantizer::new(DEFAULT_DIRECT_SHIFT, DEFAULT_VU_SHIFT),
                triggers: TriggerTable::BOARD,
                attract: AttractConfig::BOARD,
                pin_map: BOARD_PIN_MAP,
            },
            BoardRevision::Prototype => Self {
                boot_mode: Mode::Vu,
                comparison: Comparison::Inclusive,
                refresh_step: DEFAULT_REFRESH_STEP,
                debounce_ticks: DEFAULT_DEBOUNCE_TICKS,
                quantizer: Quantizer::new(DEFAULT_DIRECT_SHIFT, DEFAULT_DIRECT_SHIFT),
                triggers: TriggerTable {
                    vu: SamplerTrigger::ControlTimer,
                    ..TriggerTable::BOARD
                },
                attract: AttractConfig::BOARD,
                pin_map: BOARD_PIN_MAP,
            },
        }
    }

    /// Mode entered at startup.
    pub fn boot_mode(&self) -> Mode {
        self.boot_mode
    }

    /// Threshold comparison used by the refresh.
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Dither threshold increment per refresh tick.
    pub fn refresh_step(&self) -> u8 {
        self.refresh_step
    }

    /// Debounce window in control ticks.
    pub fn debounce_ticks(&self) -> u8 {
        self.debounce_ticks
    }

    /// Sample quantizer.
    pub fn quantizer(&self) -> Quantizer {
        self.quantizer
    }

    /// Per-mode sampler triggers.
    pub fn triggers(&self) -> TriggerTable {
        self.triggers
    }

    /// Attract pulse configuration.
    pub fn attract(&self) -> AttractConfig {
        self.attract
    }

    /// LED wiring.
    pub fn pin_map(&self) -> &PinMap {
        &self.pin_map
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self::for_revision(BoardRevision::default())
    }
}

impl From<BoardRevision> for MeterConfig {
    fn from(revision: BoardRevision) -> Self {
        Self::for_revision(revision)
    }
}

/// Builder for [`MeterConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    boot_mode: Mode,
    comparison: Comparison,
    refresh_step: u8,
    debounce_ticks: u8,
    direct_shift: u8,
    vu_shift: u8,
    triggers: TriggerTable,
    attract: AttractConfig,
    pin_map: PinMap,
}

impl ConfigBuilder {
    /// Creates a builder holding the VU board preset.
    pub fn new() -> Self {
        Self::from_revision(BoardRevision::VuBoard)
    }

    /// Creates a builder holding the preset for `revision`.
    pub fn from_revision(revision: BoardRevision) -> Self {
        let preset = MeterConfig::for_revision(revision);
        let quantizer = preset.quantizer;
        Self {
            boot_mode: preset.boot_mode,
            comparison: preset.comparison,
            refresh_step: preset.refresh_step,
            debounce_ticks: preset.debounce_ticks,
            direct_shift: quantizer.shift(Mode::Direct).unwrap_or(DEFAULT_DIRECT_SHIFT),
            vu_shift: quantizer.shift(Mode::Vu).unwrap_or(DEFAULT_VU_SHIFT),
            triggers: preset.triggers,
            attract: preset.attract,
            pin_map: preset.pin_map,
        }
    }

    /// Sets the mode entered at startup.
    pub fn boot_mode(mut self, mode: Mode) -> Self {
        self.boot_mode = mode;
        self
    }

    /// Sets the threshold comparison.
    pub fn comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Sets the dither threshold increment per refresh tick.
    pub fn refresh_step(mut self, step: u8) -> Self {
        self.refresh_step = step;
        self
    }

    /// Sets the debounce window in control ticks. At least 16.
    pub fn debounce_ticks(mut self, ticks: u8) -> Self {
        self.debounce_ticks = ticks;
        self
    }

    /// Sets the sample shift for Direct mode.
    pub fn direct_shift(mut self, shift: u8) -> Self {
        self.direct_shift = shift;
        self
    }

    /// Sets the sample shift for Vu mode.
    pub fn vu_shift(mut self, shift: u8) -> Self {
        self.vu_shift = shift;
        self
    }

    /// Sets the per-mode sampler triggers.
    pub fn triggers(mut self, triggers: TriggerTable) -> Self {
        self.triggers = triggers;
        self
    }

    /// Sets the attract pulse configuration.
    pub fn attract(mut self, attract: AttractConfig) -> Self {
        self.attract = attract;
        self
    }

    /// Sets the LED wiring.
    pub fn pin_map(mut self, pin_map: PinMap) -> Self {
        self.pin_map = pin_map;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    /// * `DebounceWindowTooShort` - Debounce window under 16 ticks
    /// * `ZeroRefreshStep` - Dither step of zero
    /// * `ShiftOutOfRange` - A sample shift above 15
    /// * `AttractSamplerEnabled` - Attract trigger is not `Disabled`
    /// * `ZeroAttractSpacing` - Attract spacing of zero
    /// * `PinOutOfRange` / `DuplicatePin` - Unusable LED wiring
    pub fn build(self) -> Result<MeterConfig, ConfigError> {
        if self.debounce_ticks < MIN_DEBOUNCE_TICKS {
            return Err(ConfigError::DebounceWindowTooShort {
                ticks: self.debounce_ticks,
            });
        }

        if self.refresh_step == 0 {
            return Err(ConfigError::ZeroRefreshStep);
        }

        for (mode, shift) in [(Mode::Direct, self.direct_shift), (Mode::Vu, self.vu_shift)] {
            if shift > MAX_SHIFT {
                return Err(ConfigError::ShiftOutOfRange { mode, shift });
            }
        }

        if self.triggers.attract.is_enabled() {
            return Err(ConfigError::AttractSamplerEnabled);
        }

        if self.attract.spacing == 0 {
            return Err(ConfigError::ZeroAttractSpacing);
        }

        let pin_map = PinMap::validated(*self.pin_map.pins())?;

        Ok(MeterConfig {
            boot_mode: self.boot_mode,
            comparison: self.comparison,
            refresh_step: self.refresh_step,
            debounce_ticks: self.debounce_ticks,
            quantizer: Quantizer::new(self.direct_shift, self.vu_shift),
            triggers: self.triggers,
            attract: self.attract,
            pin_map,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_vu_board() {
        let config = MeterConfig::default();
        assert_eq!(config.boot_mode(), Mode::Attract);
        assert_eq!(config.comparison(), Comparison::Exclusive);
        assert_eq!(config.quantizer().shift(Mode::Direct), Some(6));
        assert_eq!(config.quantizer().shift(Mode::Vu), Some(2));
        assert_eq!(config.triggers(), TriggerTable::BOARD);
    }

    #[test]
    fn prototype_preset_differs_where_the_boards_differ() {
        let config = MeterConfig::for_revision(BoardRevision::Prototype);
        assert_eq!(config.boot_mode(), Mode::Vu);
        assert_eq!(config.comparison(), Comparison::Inclusive);
        assert_eq!(config.quantizer().shift(Mode::Vu), Some(6));
        assert_eq!(config.triggers().trigger(Mode::Vu), SamplerTrigger::ControlTimer);
        assert_eq!(config.triggers().trigger(Mode::Attract), SamplerTrigger::Disabled);
    }

    #[test]
    fn builder_round_trips_presets() {
        for revision in [BoardRevision::Prototype, BoardRevision::VuBoard] {
            let built = ConfigBuilder::from_revision(revision).build();
            assert_eq!(built, Ok(MeterConfig::for_revision(revision)));
        }
    }

    #[test]
    fn builder_rejects_short_debounce() {
        for ticks in [0, 1, MIN_DEBOUNCE_TICKS - 1] {
            let result = MeterConfig::builder().debounce_ticks(ticks).build();
            assert_eq!(result, Err(ConfigError::DebounceWindowTooShort { ticks }));
        }
    }

    #[test]
    fn builder_accepts_minimum_and_longer_debounce() {
        for ticks in [MIN_DEBOUNCE_TICKS, 32, u8::MAX] {
            let config = MeterConfig::builder().debounce_ticks(ticks).build().unwrap();
            assert_eq!(config.debounce_ticks(), ticks);
        }
    }

    #[test]
    fn builder_rejects_zero_refresh_step() {
        let result = MeterConfig::builder().refresh_step(0).build();
        assert_eq!(result, Err(ConfigError::ZeroRefreshStep));
    }

    #[test]
    fn builder_rejects_oversized_shift() {
        let result = MeterConfig::builder().vu_shift(16).build();
        assert_eq!(
            result,
            Err(ConfigError::ShiftOutOfRange {
                mode: Mode::Vu,
                shift: 16
            })
        );
    }

    #[test]
    fn builder_rejects_sampling_in_attract() {
        let triggers = TriggerTable {
            attract: SamplerTrigger::FreeRunning,
            ..TriggerTable::BOARD
        };
        let result = MeterConfig::builder().triggers(triggers).build();
        assert_eq!(result, Err(ConfigError::AttractSamplerEnabled));
    }

    #[test]
    fn builder_rejects_shared_pin() {
        let mut pins = *BOARD_PIN_MAP.pins();
        pins[9] = pins[3];
        let result = MeterConfig::builder().pin_map(PinMap::new(pins)).build();
        assert_eq!(result, Err(ConfigError::DuplicatePin { first: 3, second: 9 }));
    }

    #[test]
    fn builder_rejects_zero_spacing() {
        let attract = AttractConfig {
            spacing: 0,
            ..AttractConfig::BOARD
        };
        let result = MeterConfig::builder().attract(attract).build();
        assert_eq!(result, Err(ConfigError::ZeroAttractSpacing));
    }
}
