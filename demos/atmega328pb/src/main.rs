#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;

use avr_device::atmega328pb::Peripherals;
use avr_device::interrupt;

use vu_meter::{BOARD_PIN_MAP, Event, MeterConfig, SharedMeter, VuMeter};

mod board;

use board::{Button, Converter, LedPorts, Meter};

static METER: SharedMeter<Meter> = SharedMeter::new();

/// Control timer overflow
#[avr_device::interrupt(atmega328pb)]
fn TIMER0_OVF() {
    METER.dispatch(Event::ControlTick);
}

/// Refresh timer overflow
#[avr_device::interrupt(atmega328pb)]
fn TIMER1_OVF() {
    METER.dispatch(Event::RefreshTick);
}

/// Conversion complete
#[avr_device::interrupt(atmega328pb)]
fn ADC() {
    METER.dispatch(Event::SampleReady);
}

#[avr_device::entry]
fn main() -> ! {
    let dp = match Peripherals::take() {
        Some(dp) => dp,
        None => loop {},
    };

    let ports = LedPorts::new(dp.PORTB, dp.PORTC, dp.PORTD, dp.PORTE, BOARD_PIN_MAP.masks());
    let converter = Converter::new(dp.ADC);
    METER.install(VuMeter::new(ports, converter, Button, MeterConfig::default()));

    board::start_control_timer(&dp.TC0);
    board::start_refresh_timer(&dp.TC1);

    unsafe { interrupt::enable() };

    loop {
        avr_device::asm::sleep();
    }
}
