#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`VuMeter`**: Owns the shared state and exposes one handler per interrupt source
//! - **`Mode`**: Direct, Vu or Attract, cycled by the debounced mode button
//! - **`DisplayBuffer`**: 16 brightness levels shown through threshold dithering
//! - **`LitPattern`**: One bit per LED, written to the ports by the `Encoder`
//! - **`PinMap`**: Logical LED to (port, pin) wiring table
//! - **`OutputPorts`**, **`AnalogSampler`**, **`ModeButton`**: Traits to implement for your board
//! - **`MeterConfig`**: Validated settings, from a `BoardRevision` preset or the builder
//! - **`SharedMeter`**: Critical-section slot that interrupt handlers dispatch through
//!
//! The handlers never fail and never block. Errors exist only where
//! configuration is built ([`ConfigError`]) and where events are queued
//! ([`QueueFull`]).

pub mod attract;
pub mod buffer;
pub mod config;
pub mod debounce;
pub mod dither;
pub mod encoder;
pub mod event;
pub mod layout;
pub mod meter;
pub mod pattern;
pub mod sampler;
pub mod shared;
pub mod types;

pub use attract::{AttractAnimation, AttractConfig};
pub use buffer::DisplayBuffer;
pub use config::{BoardRevision, ConfigBuilder, MeterConfig, TriggerTable};
pub use debounce::{ActiveLow, Debouncer, ModeButton};
pub use dither::{DitherClock, build_pattern};
pub use encoder::{Encoder, OutputPorts};
pub use event::{Event, EventQueue, QueueFull};
pub use layout::{BOARD_PIN_MAP, PinAssignment, PinMap, Port, PortFrame};
pub use meter::{MeterStats, VuMeter};
pub use pattern::LitPattern;
pub use sampler::{AnalogSampler, Quantizer, read_sample};
pub use shared::SharedMeter;
pub use types::{Comparison, ConfigError, Mode, SamplerTrigger};

/// Number of LEDs on the board.
pub const LED_COUNT: usize = 16;

/// Approximately quadratic brightness ramp used to seed the display buffer.
pub const GAMMA_TABLE: [u8; LED_COUNT] = [
    0, 1, 4, 9, 16, 25, 36, 49, 64, 81, 100, 121, 144, 169, 196, 255,
];
