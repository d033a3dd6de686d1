//! The meter context and its interrupt handlers.
//!
//! Provides [`VuMeter`], which owns every piece of shared state (display
//! buffer, mode, debounce counter, animation and dither phases) together with
//! the hardware seams, and exposes one method per interrupt source. Handlers
//! take `&mut self`; on the board the context lives in a
//! [`SharedMeter`](crate::shared::SharedMeter) so each handler runs inside a
//! critical section.

use crate::attract::AttractAnimation;
use crate::buffer::DisplayBuffer;
use crate::config::{MeterConfig, TriggerTable};
use crate::debounce::{Debouncer, ModeButton};
use crate::dither::{DitherClock, build_pattern};
use crate::encoder::{Encoder, OutputPorts};
use crate::event::Event;
use crate::pattern::LitPattern;
use crate::sampler::{AnalogSampler, Quantizer, read_sample};
use crate::types::{Comparison, Mode, SamplerTrigger};

/// Wrapping counters of handled events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterStats {
    /// Control ticks handled.
    pub control_ticks: u32,

    /// Refresh ticks handled.
    pub refresh_ticks: u32,

    /// Samples quantized and displayed.
    pub samples: u32,

    /// Samples that arrived while the mode does not sample.
    pub spurious_samples: u32,

    /// Mode transitions, including the boot entry.
    pub mode_changes: u32,
}

/// Drives a 16-LED meter board from its three interrupt sources.
///
/// # Type Parameters
/// * `P` - LED output ports
/// * `A` - Analog converter
/// * `B` - Mode button
pub struct VuMeter<P: OutputPorts, A: AnalogSampler, B: ModeButton> {
    ports: P,
    sampler: A,
    button: B,
    encoder: Encoder,
    buffer: DisplayBuffer,
    mode: Mode,
    debouncer: Debouncer,
    animation: AttractAnimation,
    dither: DitherClock,
    comparison: Comparison,
    quantizer: Quantizer,
    triggers: TriggerTable,
    last_pattern: LitPattern,
    stats: MeterStats,
}

impl<P: OutputPorts, A: AnalogSampler, B: ModeButton> VuMeter<P, A, B> {
    /// Creates the meter, blanks the display, seeds the buffer with the gamma
    /// ramp and enters the configured boot mode.
    pub fn new(mut ports: P, sampler: A, button: B, config: MeterConfig) -> Self {
        let encoder = Encoder::new(*config.pin_map());
        encoder.blank(&mut ports);

        let mut meter = Self {
            ports,
            sampler,
            button,
            encoder,
            buffer: DisplayBuffer::gamma_ramp(),
            mode: config.boot_mode(),
            debouncer: Debouncer::new(config.debounce_ticks()),
            animation: AttractAnimation::new(config.attract()),
            dither: DitherClock::new(config.refresh_step()),
            comparison: config.comparison(),
            quantizer: config.quantizer(),
            triggers: config.triggers(),
            last_pattern: LitPattern::EMPTY,
            stats: MeterStats::default(),
        };

        meter.enter_mode(config.boot_mode());
        meter
    }

    /// Dispatches one hardware event to its handler.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::ControlTick => self.on_control_tick(),
            Event::RefreshTick => self.on_refresh_tick(),
            Event::SampleReady => self.on_sample_ready(),
        }
    }

    /// Switches to `mode` and applies its sampler trigger.
    pub fn enter_mode(&mut self, mode: Mode) {
        let trigger = self.triggers.trigger(mode);
        self.mode = mode;
        self.sampler.configure(trigger);
        self.stats.mode_changes = self.stats.mode_changes.wrapping_add(1);

        #[cfg(feature = "defmt")]
        defmt::debug!("mode -> {}, sampler {}", mode, trigger);
    }

    /// Control timer handler.
    ///
    /// Polls the button, cycles the mode on a debounced press and, in Attract
    /// mode, renders the next animation frame into the buffer.
    pub fn on_control_tick(&mut self) {
        self.stats.control_ticks = self.stats.control_ticks.wrapping_add(1);

        let pressed = self.button.is_pressed();
        if self.debouncer.poll(pressed) {
            self.enter_mode(self.mode.next());
        }

        if self.mode == Mode::Attract {
            self.animation.advance(&mut self.buffer);
        }
    }

    /// Refresh timer handler.
    ///
    /// In Attract mode advances the dither threshold and shows the buffer
    /// against it. Other modes leave the LEDs to the sample handler.
    pub fn on_refresh_tick(&mut self) {
        self.stats.refresh_ticks = self.stats.refresh_ticks.wrapping_add(1);

        if self.mode != Mode::Attract {
            return;
        }

        let threshold = self.dither.advance();
        let pattern = build_pattern(&self.buffer, threshold, self.comparison);
        self.show(pattern);
    }

    /// Conversion-complete handler.
    ///
    /// Shows the sample as a hard bar, bypassing buffer and dithering. Ignored
    /// in modes that do not sample; the converter is not read then.
    pub fn on_sample_ready(&mut self) {
        if !self.mode.uses_sampler() {
            self.stats.spurious_samples = self.stats.spurious_samples.wrapping_add(1);
            return;
        }

        let raw = read_sample(&mut self.sampler);
        if let Some(pattern) = self.quantizer.pattern(self.mode, raw) {
            self.stats.samples = self.stats.samples.wrapping_add(1);
            self.show(pattern);
        }
    }

    fn show(&mut self, pattern: LitPattern) {
        self.encoder.display(&mut self.ports, pattern);
        self.last_pattern = pattern;
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Trigger source currently applied to the sampler.
    pub fn sampler_trigger(&self) -> SamplerTrigger {
        self.triggers.trigger(self.mode)
    }

    /// Brightness buffer.
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Mutable brightness buffer, for custom content shown in Attract mode.
    pub fn buffer_mut(&mut self) -> &mut DisplayBuffer {
        &mut self.buffer
    }

    /// Last pattern written to the ports.
    pub fn last_pattern(&self) -> LitPattern {
        self.last_pattern
    }

    /// Current dither threshold.
    pub fn threshold(&self) -> u8 {
        self.dither.threshold()
    }

    /// Current attract phase.
    pub fn attract_phase(&self) -> u16 {
        self.animation.phase()
    }

    /// Control ticks until another press is accepted.
    pub fn debounce_remaining(&self) -> u8 {
        self.debouncer.remaining()
    }

    /// Event counters.
    pub fn stats(&self) -> MeterStats {
        self.stats
    }

    /// LED output ports.
    pub fn ports(&self) -> &P {
        &self.ports
    }

    /// Analog converter.
    pub fn sampler(&self) -> &A {
        &self.sampler
    }

    /// Mode button.
    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    /// Encoder for the configured wiring.
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Stops sampling, blanks the LEDs and returns the hardware.
    pub fn release(mut self) -> (P, A, B) {
        self.sampler.configure(SamplerTrigger::Disabled);
        self.encoder.blank(&mut self.ports);
        (self.ports, self.sampler, self.button)
    }
}
