//! Shared test infrastructure for vu-meter integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use vu_meter::{
    AnalogSampler, Event, EventQueue, MeterConfig, ModeButton, OutputPorts, Port, SamplerTrigger,
    VuMeter,
};

/// Bits on the LED ports that belong to other peripherals (B6 button pull-up,
/// C0 analog input, C1 pull-up, D0/D1 serial, E4-E7 unused).
pub const FOREIGN_BITS: [u8; 4] = [0x40, 0x02, 0x03, 0xF0];

/// Largest 10-bit conversion result.
pub const ADC_MAX: u16 = 0x03FF;

/// Refresh ticks per control tick (3906 Hz / 122 Hz).
pub const REFRESH_PER_CONTROL: usize = 32;

// ============================================================================
// Mock Ports
// ============================================================================

/// Mock output registers that count writes
pub struct MockPorts {
    registers: [u8; 4],
    writes: usize,
}

impl MockPorts {
    pub fn new() -> Self {
        Self::with_registers(FOREIGN_BITS)
    }

    pub fn with_registers(registers: [u8; 4]) -> Self {
        Self {
            registers,
            writes: 0,
        }
    }

    pub fn register(&self, port: Port) -> u8 {
        self.registers[port.index()]
    }

    pub fn registers(&self) -> [u8; 4] {
        self.registers
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl OutputPorts for MockPorts {
    fn read(&self, port: Port) -> u8 {
        self.registers[port.index()]
    }

    fn write(&mut self, port: Port, value: u8) {
        self.registers[port.index()] = value;
        self.writes += 1;
    }
}

// ============================================================================
// Mock Sampler
// ============================================================================

/// One data register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRead {
    Low,
    High,
}

/// Mock converter fed from a shared input cell
pub struct MockSampler<'a> {
    input: &'a Cell<u16>,
    trigger: SamplerTrigger,
    trigger_history: heapless::Vec<SamplerTrigger, 32>,
    reads: heapless::Vec<ByteRead, 64>,
    conversions: usize,
}

impl<'a> MockSampler<'a> {
    pub fn new(input: &'a Cell<u16>) -> Self {
        Self {
            input,
            trigger: SamplerTrigger::Disabled,
            trigger_history: heapless::Vec::new(),
            reads: heapless::Vec::new(),
            conversions: 0,
        }
    }

    pub fn trigger(&self) -> SamplerTrigger {
        self.trigger
    }

    pub fn trigger_history(&self) -> &[SamplerTrigger] {
        &self.trigger_history
    }

    pub fn reads(&self) -> &[ByteRead] {
        &self.reads
    }

    /// Number of completed low-then-high reads
    pub fn conversions(&self) -> usize {
        self.conversions
    }
}

impl AnalogSampler for MockSampler<'_> {
    fn configure(&mut self, trigger: SamplerTrigger) {
        self.trigger = trigger;
        let _ = self.trigger_history.push(trigger);
    }

    fn read_low(&mut self) -> u8 {
        let _ = self.reads.push(ByteRead::Low);
        self.input.get() as u8
    }

    fn read_high(&mut self) -> u8 {
        let _ = self.reads.push(ByteRead::High);
        self.conversions += 1;
        (self.input.get() >> 8) as u8
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Mock button reading a shared cell
pub struct MockButton<'a> {
    pressed: &'a Cell<bool>,
}

impl ModeButton for MockButton<'_> {
    fn is_pressed(&mut self) -> bool {
        self.pressed.get()
    }
}

// ============================================================================
// Board Harness
// ============================================================================

pub type TestMeter<'a> = VuMeter<MockPorts, MockSampler<'a>, MockButton<'a>>;

/// Analog input and button state shared with the mocks
pub struct Board {
    pub input: Cell<u16>,
    pub pressed: Cell<bool>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            input: Cell::new(0),
            pressed: Cell::new(false),
        }
    }

    pub fn meter(&self, config: MeterConfig) -> TestMeter<'_> {
        VuMeter::new(
            MockPorts::new(),
            MockSampler::new(&self.input),
            MockButton {
                pressed: &self.pressed,
            },
            config,
        )
    }

    /// Presses and releases the button, then waits out the debounce window
    pub fn press(&self, meter: &mut TestMeter<'_>) {
        self.pressed.set(true);
        control_tick(meter);
        self.pressed.set(false);
        for _ in 0..meter.debounce_remaining() {
            control_tick(meter);
        }
    }
}

// ============================================================================
// Hardware Simulation
// ============================================================================

/// Control timer overflow; starts a conversion when the sampler is timer-triggered
pub fn control_tick(meter: &mut TestMeter<'_>) {
    meter.handle(Event::ControlTick);
    if meter.sampler().trigger() == SamplerTrigger::ControlTimer {
        meter.handle(Event::SampleReady);
    }
}

/// Refresh timer overflow; a free-running sampler completes one conversion alongside
pub fn refresh_tick(meter: &mut TestMeter<'_>) {
    meter.handle(Event::RefreshTick);
    if meter.sampler().trigger() == SamplerTrigger::FreeRunning {
        meter.handle(Event::SampleReady);
    }
}

/// Queues the events of `frames` control periods the way the hardware
/// interleaves them, then replays them through the meter
pub fn run_frames(meter: &mut TestMeter<'_>, frames: usize) {
    let mut queue = EventQueue::<128>::new();
    for _ in 0..frames {
        queue.push(Event::ControlTick).unwrap();
        if meter.sampler().trigger() == SamplerTrigger::ControlTimer {
            queue.push(Event::SampleReady).unwrap();
        }
        for _ in 0..REFRESH_PER_CONTROL {
            queue.push(Event::RefreshTick).unwrap();
            if meter.sampler().trigger() == SamplerTrigger::FreeRunning {
                queue.push(Event::SampleReady).unwrap();
            }
        }
        queue.drain(|event| meter.handle(event));
    }
}
