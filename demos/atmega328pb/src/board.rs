use avr_device::atmega328pb::{ADC, PORTB, PORTC, PORTD, PORTE, TC0, TC1};

use vu_meter::{AnalogSampler, ModeButton, OutputPorts, Port, PortFrame, SamplerTrigger, VuMeter};

/// ADEN | ADSC | ADATE | ADIE, clock / 64
const ADCSRA_RUN: u8 = 0xEE;

/// ADTS = 100: start a conversion on Timer0 overflow
const ADCSRB_TIMER0: u8 = 0x04;

/// ADTS = 000: retrigger on each completed conversion
const ADCSRB_FREE_RUNNING: u8 = 0x00;

/// Data register halves. Reading ADCL latches ADCH until it is read.
const ADCL: *const u8 = 0x78 as *const u8;
const ADCH: *const u8 = 0x79 as *const u8;

/// Mode button on PB6
const BUTTON_BIT: u8 = 1 << 6;

/// PC1 is unused and held by its pull-up
const PC1_PULL_UP: u8 = 1 << 1;

pub type Meter = VuMeter<LedPorts, Converter, Button>;

/// PORTB..PORTE output registers
pub struct LedPorts {
    portb: PORTB,
    portc: PORTC,
    portd: PORTD,
    porte: PORTE,
}

impl LedPorts {
    /// Takes the ports and makes every LED pin an output driven high (dark).
    ///
    /// PB6 stays an input with its pull-up enabled for the button, and PC1
    /// gets its pull-up.
    pub fn new(portb: PORTB, portc: PORTC, portd: PORTD, porte: PORTE, masks: PortFrame) -> Self {
        unsafe {
            portb.portb.modify(|r, w| w.bits(r.bits() | masks.get(Port::B) | BUTTON_BIT));
            portb.ddrb.modify(|r, w| w.bits((r.bits() | masks.get(Port::B)) & !BUTTON_BIT));
            portc.portc.modify(|r, w| w.bits(r.bits() | masks.get(Port::C) | PC1_PULL_UP));
            portc.ddrc.modify(|r, w| w.bits(r.bits() | masks.get(Port::C)));
            portd.portd.modify(|r, w| w.bits(r.bits() | masks.get(Port::D)));
            portd.ddrd.modify(|r, w| w.bits(r.bits() | masks.get(Port::D)));
            porte.porte.modify(|r, w| w.bits(r.bits() | masks.get(Port::E)));
            porte.ddre.modify(|r, w| w.bits(r.bits() | masks.get(Port::E)));
        }

        Self {
            portb,
            portc,
            portd,
            porte,
        }
    }
}

impl OutputPorts for LedPorts {
    fn read(&self, port: Port) -> u8 {
        match port {
            Port::B => self.portb.portb.read().bits(),
            Port::C => self.portc.portc.read().bits(),
            Port::D => self.portd.portd.read().bits(),
            Port::E => self.porte.porte.read().bits(),
        }
    }

    fn write(&mut self, port: Port, value: u8) {
        unsafe {
            match port {
                Port::B => self.portb.portb.write(|w| w.bits(value)),
                Port::C => self.portc.portc.write(|w| w.bits(value)),
                Port::D => self.portd.portd.write(|w| w.bits(value)),
                Port::E => self.porte.porte.write(|w| w.bits(value)),
            }
        }
    }
}

/// ADC0 against AVcc
pub struct Converter {
    adc: ADC,
}

impl Converter {
    /// Selects ADC0 with the AVcc reference and leaves the converter off.
    pub fn new(adc: ADC) -> Self {
        unsafe {
            adc.admux.write(|w| w.bits(0x40));
            adc.didr0.write(|w| w.bits(0x01));
            adc.adcsra.write(|w| w.bits(0));
        }
        Self { adc }
    }
}

impl AnalogSampler for Converter {
    fn configure(&mut self, trigger: SamplerTrigger) {
        unsafe {
            match trigger {
                SamplerTrigger::ControlTimer => {
                    self.adc.adcsrb.write(|w| w.bits(ADCSRB_TIMER0));
                    self.adc.adcsra.write(|w| w.bits(ADCSRA_RUN));
                }
                SamplerTrigger::FreeRunning => {
                    self.adc.adcsrb.write(|w| w.bits(ADCSRB_FREE_RUNNING));
                    self.adc.adcsra.write(|w| w.bits(ADCSRA_RUN));
                }
                SamplerTrigger::Disabled => self.adc.adcsra.write(|w| w.bits(0)),
            }
        }
    }

    fn read_low(&mut self) -> u8 {
        unsafe { core::ptr::read_volatile(ADCL) }
    }

    fn read_high(&mut self) -> u8 {
        unsafe { core::ptr::read_volatile(ADCH) }
    }
}

/// Active-low push button on PB6
pub struct Button;

impl ModeButton for Button {
    fn is_pressed(&mut self) -> bool {
        // PINB is read-only; PORTB itself belongs to LedPorts.
        let portb = unsafe { &*PORTB::ptr() };
        portb.pinb.read().bits() & BUTTON_BIT == 0
    }
}

/// Timer0: clock / 256, overflow interrupt (control tick, ~122 Hz at 8 MHz).
pub fn start_control_timer(tc0: &TC0) {
    unsafe {
        tc0.tccr0a.write(|w| w.bits(0x00));
        tc0.tccr0b.write(|w| w.bits(0x04));
        tc0.timsk0.write(|w| w.bits(0x01));
    }
}

/// Timer1: 8-bit fast PWM, clock / 8, overflow interrupt
/// (refresh tick, ~3.9 kHz at 8 MHz).
pub fn start_refresh_timer(tc1: &TC1) {
    unsafe {
        tc1.tccr1a.write(|w| w.bits(0x01));
        tc1.tccr1b.write(|w| w.bits(0x0A));
        tc1.timsk1.write(|w| w.bits(0x01));
    }
}
