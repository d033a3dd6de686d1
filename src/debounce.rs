//! Mode button polling and debouncing.

use embedded_hal::digital::InputPin;

/// Shortest debounce window a configuration accepts, in control ticks
/// (~131 ms at 122 Hz).
pub const MIN_DEBOUNCE_TICKS: u8 = 16;

/// Default debounce window in control ticks.
pub const DEFAULT_DEBOUNCE_TICKS: u8 = MIN_DEBOUNCE_TICKS;

/// Trait for abstracting the mode button.
///
/// Sampled once per control tick. Handle read errors internally and report
/// them as "not pressed".
pub trait ModeButton {
    /// Returns true while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

/// Adapts an active-low [`InputPin`] (button to ground, pull-up enabled).
#[derive(Debug)]
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    /// Wraps a pulled-up input pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ModeButton for ActiveLow<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}

/// Countdown debouncer driven by the control tick.
///
/// A press is recognised only while the countdown is zero; recognising one
/// re-arms the countdown. The countdown runs only while the button is
/// released, so a held button never repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    window: u8,
    remaining: u8,
}

impl Debouncer {
    /// Creates an idle debouncer with a window of `window` ticks.
    pub const fn new(window: u8) -> Self {
        Self {
            window,
            remaining: 0,
        }
    }

    /// Feeds one control tick's button sample.
    ///
    /// # Returns
    /// `true` if this sample is a new press
    pub fn poll(&mut self, pressed: bool) -> bool {
        if pressed {
            if self.remaining == 0 {
                self.remaining = self.window;
                return true;
            }
        } else if self.remaining > 0 {
            self.remaining -= 1;
        }
        false
    }

    /// Ticks left before another press is accepted.
    #[inline]
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Configured window length.
    #[inline]
    pub fn window(&self) -> u8 {
        self.window
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_TICKS)
    }
}
