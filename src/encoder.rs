//! Writes lit patterns to the LED output ports.
//!
//! Provides the [`OutputPorts`] trait for hardware abstraction and the
//! [`Encoder`] that performs the masked, active-low register update.

use crate::layout::{PinMap, Port, PortFrame};
use crate::pattern::LitPattern;

/// Trait for abstracting the LED output port registers.
///
/// Implement this for your GPIO output registers. Both methods run inside
/// interrupt handlers and must not block. Ports hold other pins besides the
/// display; the encoder preserves them by reading before it writes.
pub trait OutputPorts {
    /// Returns the current output register value of `port`.
    fn read(&self, port: Port) -> u8;

    /// Writes the whole output register of `port`.
    fn write(&mut self, port: Port, value: u8);
}

/// Maps lit patterns through a [`PinMap`] onto port registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    map: PinMap,
}

impl Encoder {
    /// Creates an encoder for the given wiring.
    pub fn new(map: PinMap) -> Self {
        Self { map }
    }

    /// Displays `pattern`, touching only the display pins of each port.
    pub fn display<P: OutputPorts + ?Sized>(&self, ports: &mut P, pattern: LitPattern) {
        let levels = self.map.encode(pattern);
        self.apply(ports, &levels);
    }

    /// Turns every LED off.
    pub fn blank<P: OutputPorts + ?Sized>(&self, ports: &mut P) {
        self.display(ports, LitPattern::EMPTY);
    }

    /// Reads back the pattern currently shown on `ports`.
    pub fn shown<P: OutputPorts + ?Sized>(&self, ports: &P) -> LitPattern {
        let mut levels = PortFrame::default();
        for port in Port::ALL {
            levels.set(port, ports.read(port));
        }
        self.map.decode(&levels)
    }

    /// Wiring used by this encoder.
    pub fn pin_map(&self) -> &PinMap {
        &self.map
    }

    fn apply<P: OutputPorts + ?Sized>(&self, ports: &mut P, levels: &PortFrame) {
        for port in Port::ALL {
            let mask = self.map.port_mask(port);
            if mask == 0 {
                continue;
            }
            let current = ports.read(port);
            ports.write(port, (current & !mask) | (levels.get(port) & mask));
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(PinMap::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BOARD_PIN_MAP;

    struct Registers([u8; Port::COUNT]);

    impl OutputPorts for Registers {
        fn read(&self, port: Port) -> u8 {
            self.0[port.index()]
        }

        fn write(&mut self, port: Port, value: u8) {
            self.0[port.index()] = value;
        }
    }

    #[test]
    fn display_preserves_pins_outside_the_mask() {
        let mut regs = Registers([0xFF, 0xFF, 0xFF, 0xFF]);
        let encoder = Encoder::new(BOARD_PIN_MAP);

        encoder.display(&mut regs, LitPattern::FULL);

        assert_eq!(regs.0, [!0x03, !0x3C, !0xFC, !0x0F]);
    }

    #[test]
    fn blank_drives_display_pins_high() {
        let mut regs = Registers([0x40, 0x00, 0x01, 0xF0]);
        let encoder = Encoder::new(BOARD_PIN_MAP);

        encoder.blank(&mut regs);

        assert_eq!(regs.0, [0x43, 0x3C, 0xFD, 0xFF]);
    }

    #[test]
    fn encoder_keeps_its_wiring() {
        let encoder = Encoder::new(BOARD_PIN_MAP);
        assert_eq!(encoder.pin_map(), &BOARD_PIN_MAP);
        assert_eq!(Encoder::default().pin_map(), &PinMap::default());
    }

    #[test]
    fn shown_reads_back_displayed_pattern() {
        let mut regs = Registers([0x80, 0x02, 0x00, 0x40]);
        let encoder = Encoder::new(BOARD_PIN_MAP);

        encoder.display(&mut regs, LitPattern::from_bits(0xA5C3));

        assert_eq!(encoder.shown(&regs).bits(), 0xA5C3);
    }
}
