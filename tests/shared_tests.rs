//! Integration tests for SharedMeter dispatch

mod common;
use common::*;

use vu_meter::{Event, MeterConfig, Mode, SamplerTrigger, SharedMeter};

#[test]
fn events_before_install_are_dropped() {
    let shared: SharedMeter<TestMeter<'_>> = SharedMeter::new();

    assert!(!shared.dispatch(Event::ControlTick));
    assert!(!shared.dispatch(Event::RefreshTick));
    assert!(!shared.dispatch(Event::SampleReady));
}

#[test]
fn dispatch_reaches_installed_meter() {
    let board = Board::new();
    let shared = SharedMeter::new();
    assert!(shared.install(board.meter(MeterConfig::default())).is_none());

    assert!(shared.dispatch(Event::ControlTick));
    assert!(shared.dispatch(Event::RefreshTick));
    assert!(shared.dispatch(Event::SampleReady));

    let stats = shared.with(|meter| meter.stats()).unwrap();
    assert_eq!(stats.control_ticks, 1);
    assert_eq!(stats.refresh_ticks, 1);
    assert_eq!(stats.spurious_samples, 1);
}

#[test]
fn button_press_through_dispatch_reconfigures_sampler() {
    let board = Board::new();
    let shared = SharedMeter::new();
    shared.install(board.meter(MeterConfig::default()));
    board.input.set(ADC_MAX);

    board.pressed.set(true);
    shared.dispatch(Event::ControlTick);
    board.pressed.set(false);

    let (mode, trigger) = shared
        .with(|meter| (meter.mode(), meter.sampler().trigger()))
        .unwrap();
    assert_eq!(mode, Mode::Direct);
    assert_eq!(trigger, SamplerTrigger::ControlTimer);

    shared.dispatch(Event::SampleReady);
    let bits = shared.with(|meter| meter.last_pattern().bits()).unwrap();
    assert_eq!(bits, 0x7FFF);
}

#[test]
fn taken_meter_stops_receiving_events() {
    let board = Board::new();
    let shared = SharedMeter::new();
    shared.install(board.meter(MeterConfig::default()));

    shared.dispatch(Event::ControlTick);
    let meter = shared.take().unwrap();

    assert!(!shared.dispatch(Event::ControlTick));
    assert_eq!(meter.stats().control_ticks, 1);
}
