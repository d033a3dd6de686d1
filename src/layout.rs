//! Physical wiring of the LED strip.
//!
//! Each logical LED is wired to one pin of one of four 8-bit output ports. The
//! assignment is not contiguous, so it lives in a [`PinMap`] table and every
//! port mask is derived from it. LEDs are active-low: a pin driven low lights
//! its LED.

use crate::LED_COUNT;
use crate::pattern::LitPattern;
use crate::types::ConfigError;

/// One of the four output ports that carry LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Port B: LEDs 7 and 8.
    B,
    /// Port C: LEDs 1 to 4.
    C,
    /// Port D: LEDs 0, 9 to 11, 14 and 15.
    D,
    /// Port E: LEDs 5, 6, 12 and 13.
    E,
}

impl Port {
    /// Number of LED ports.
    pub const COUNT: usize = 4;

    /// All LED ports in register order.
    pub const ALL: [Port; Port::COUNT] = [Port::B, Port::C, Port::D, Port::E];

    /// Slot of this port in a [`PortFrame`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Port::B => 0,
            Port::C => 1,
            Port::D => 2,
            Port::E => 3,
        }
    }
}

/// A single (port, pin) wiring entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// Output port.
    pub port: Port,

    /// Bit within the port register, 0-7.
    pub pin: u8,
}

impl PinAssignment {
    /// Creates a wiring entry.
    #[inline]
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self.pin & 0x07)
    }
}

/// Register values for the four LED ports, indexed by [`Port::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortFrame([u8; Port::COUNT]);

impl PortFrame {
    /// Creates a frame from raw register values in B, C, D, E order.
    #[inline]
    pub const fn new(values: [u8; Port::COUNT]) -> Self {
        PortFrame(values)
    }

    /// Value for `port`.
    #[inline]
    pub const fn get(&self, port: Port) -> u8 {
        self.0[port.index()]
    }

    /// Replaces the value for `port`.
    #[inline]
    pub fn set(&mut self, port: Port, value: u8) {
        self.0[port.index()] = value;
    }

    /// Raw values in B, C, D, E order.
    #[inline]
    pub const fn values(&self) -> [u8; Port::COUNT] {
        self.0
    }
}

/// Logical LED index to (port, pin) table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pins: [PinAssignment; LED_COUNT],
    masks: PortFrame,
}

impl PinMap {
    /// Builds a table without checking it. Used for the fixed board wiring.
    ///
    /// Pin numbers are reduced modulo 8; prefer [`PinMap::validated`] for
    /// tables that come from anywhere but this crate.
    pub const fn new(pins: [PinAssignment; LED_COUNT]) -> Self {
        let mut masks = [0u8; Port::COUNT];
        let mut led = 0;
        while led < LED_COUNT {
            let assignment = pins[led];
            masks[assignment.port.index()] |= assignment.bit();
            led += 1;
        }

        Self {
            pins,
            masks: PortFrame(masks),
        }
    }

    /// Builds a table, rejecting pins past bit 7 and pins used twice.
    pub fn validated(pins: [PinAssignment; LED_COUNT]) -> Result<Self, ConfigError> {
        for (led, assignment) in pins.iter().enumerate() {
            if assignment.pin > 7 {
                return Err(ConfigError::PinOutOfRange {
                    led,
                    pin: assignment.pin,
                });
            }
            if let Some(first) = pins[..led].iter().position(|other| other == assignment) {
                return Err(ConfigError::DuplicatePin { first, second: led });
            }
        }

        Ok(Self::new(pins))
    }

    /// Full wiring table.
    pub fn pins(&self) -> &[PinAssignment; LED_COUNT] {
        &self.pins
    }

    /// Wiring entry for `led`.
    #[inline]
    pub fn assignment(&self, led: usize) -> Option<PinAssignment> {
        self.pins.get(led).copied()
    }

    /// Bits of `port` that belong to the display.
    #[inline]
    pub fn port_mask(&self, port: Port) -> u8 {
        self.masks.get(port)
    }

    /// Display masks for every port.
    #[inline]
    pub fn masks(&self) -> PortFrame {
        self.masks
    }

    /// Encodes a pattern into active-low pin levels.
    ///
    /// Only masked bits are meaningful; bits outside the display masks are 0.
    pub fn encode(&self, pattern: LitPattern) -> PortFrame {
        let mut levels = self.masks;
        for (led, assignment) in self.pins.iter().enumerate() {
            if pattern.is_lit(led) {
                let port = assignment.port;
                levels.set(port, levels.get(port) & !assignment.bit());
            }
        }
        levels
    }

    /// Recovers the pattern from pin levels. Bits outside the masks are ignored.
    pub fn decode(&self, levels: &PortFrame) -> LitPattern {
        self.pins
            .iter()
            .enumerate()
            .fold(LitPattern::EMPTY, |pattern, (led, assignment)| {
                let high = levels.get(assignment.port) & assignment.bit() != 0;
                pattern.with(led, !high)
            })
    }
}

impl Default for PinMap {
    fn default() -> Self {
        BOARD_PIN_MAP
    }
}

const fn pin(port: Port, pin: u8) -> PinAssignment {
    PinAssignment::new(port, pin)
}

/// Wiring of the VU board, left to right in blocks of four.
pub const BOARD_PIN_MAP: PinMap = PinMap::new([
    pin(Port::D, 2),
    pin(Port::C, 5),
    pin(Port::C, 4),
    pin(Port::C, 3),
    pin(Port::C, 2),
    pin(Port::E, 3),
    pin(Port::E, 2),
    pin(Port::B, 1),
    pin(Port::B, 0),
    pin(Port::D, 7),
    pin(Port::D, 6),
    pin(Port::D, 5),
    pin(Port::E, 1),
    pin(Port::E, 0),
    pin(Port::D, 4),
    pin(Port::D, 3),
]);
