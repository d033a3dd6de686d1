//! Core types shared by the handlers: display modes, sampler triggers and errors.

/// Display mode of the meter.
///
/// Cycled by the mode button in declaration order. Boots into `Attract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Samples on every control tick and shows the level as a bar.
    Direct,

    /// Samples continuously with a coarser shift, so small inputs fill the bar.
    Vu,

    /// Sampler off; a pulse sweeps across the strip.
    #[default]
    Attract,
}

impl Mode {
    /// Number of modes in the button cycle.
    pub const COUNT: u8 = 3;

    /// All modes in cycle order.
    pub const ALL: [Mode; Mode::COUNT as usize] = [Mode::Direct, Mode::Vu, Mode::Attract];

    /// Returns the mode the next button press selects.
    #[inline]
    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::COUNT)
    }

    /// Position of this mode in the cycle.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Mode::Direct => 0,
            Mode::Vu => 1,
            Mode::Attract => 2,
        }
    }

    /// Converts a raw mode number.
    ///
    /// Values outside the cycle select `Attract`, which needs no analog input.
    pub fn from_index(raw: u8) -> Self {
        match raw {
            0 => Mode::Direct,
            1 => Mode::Vu,
            _ => Mode::Attract,
        }
    }

    /// Returns true if this mode shows sampled levels.
    #[inline]
    pub fn uses_sampler(self) -> bool {
        self != Mode::Attract
    }
}

/// What starts an analog conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerTrigger {
    /// One conversion per control timer overflow.
    ControlTimer,

    /// A new conversion starts as soon as the previous one completes.
    FreeRunning,

    /// Converter off. No sample events are generated.
    Disabled,
}

impl SamplerTrigger {
    /// Returns true if conversions are generated.
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != SamplerTrigger::Disabled
    }
}

/// How a buffer level is compared with the dither threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Comparison {
    /// Lit when `level > threshold`. A level of 0 is never lit.
    #[default]
    Exclusive,

    /// Lit when `level >= threshold`. A level of 255 is always lit.
    Inclusive,
}

impl Comparison {
    /// Returns true if `level` is lit at `threshold`.
    #[inline]
    pub fn is_lit(self, level: u8, threshold: u8) -> bool {
        match self {
            Comparison::Exclusive => level > threshold,
            Comparison::Inclusive => level >= threshold,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce window shorter than 16 control ticks.
    DebounceWindowTooShort {
        /// Rejected window length.
        ticks: u8,
    },

    /// Dither threshold step of zero; the refresh would never sweep.
    ZeroRefreshStep,

    /// Sample shift too large for a 16-bit sample.
    ShiftOutOfRange {
        /// Mode the shift belongs to.
        mode: Mode,
        /// Rejected shift amount.
        shift: u8,
    },

    /// Pin number outside an 8-bit port.
    PinOutOfRange {
        /// Logical LED index.
        led: usize,
        /// Rejected pin number.
        pin: u8,
    },

    /// Two LEDs assigned to the same port pin.
    DuplicatePin {
        /// First LED using the pin.
        first: usize,
        /// Second LED using the pin.
        second: usize,
    },

    /// Attract mode configured with an active sampler trigger.
    AttractSamplerEnabled,

    /// Attract pulse spacing of zero; every LED would sit on the same mark.
    ZeroAttractSpacing,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::DebounceWindowTooShort { ticks } => {
                write!(f, "debounce window of {} ticks is below the 16-tick minimum", ticks)
            }
            ConfigError::ZeroRefreshStep => {
                write!(f, "refresh threshold step must be non-zero")
            }
            ConfigError::ShiftOutOfRange { mode, shift } => {
                write!(
                    f,
                    "sample shift {} for {:?} mode exceeds 15 bits",
                    shift, mode
                )
            }
            ConfigError::PinOutOfRange { led, pin } => {
                write!(f, "LED {} assigned to pin {}, ports have 8 pins", led, pin)
            }
            ConfigError::DuplicatePin { first, second } => {
                write!(f, "LEDs {} and {} share the same port pin", first, second)
            }
            ConfigError::AttractSamplerEnabled => {
                write!(f, "attract mode requires the sampler to be disabled")
            }
            ConfigError::ZeroAttractSpacing => {
                write!(f, "attract pulse spacing must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
