//! Interrupt-safe home for the meter context.
//!
//! The three interrupt handlers and the idle loop all reach the same
//! [`VuMeter`]. [`SharedMeter`] keeps it in a `critical_section::Mutex` so
//! each access runs with interrupts masked, which also makes a mode change
//! and its sampler reconfiguration appear atomic to the other handlers.

use core::cell::RefCell;
use critical_section::Mutex;

use crate::debounce::ModeButton;
use crate::encoder::OutputPorts;
use crate::event::Event;
use crate::meter::VuMeter;
use crate::sampler::AnalogSampler;

/// A context installed once at startup and borrowed by interrupt handlers.
///
/// Suitable for a `static`:
///
/// ```ignore
/// static METER: SharedMeter<Board> = SharedMeter::new();
/// ```
pub struct SharedMeter<M> {
    inner: Mutex<RefCell<Option<M>>>,
}

impl<M> SharedMeter<M> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Installs the context, returning any previous one.
    pub fn install(&self, value: M) -> Option<M> {
        critical_section::with(|cs| self.inner.borrow(cs).replace(Some(value)))
    }

    /// Removes the context.
    pub fn take(&self) -> Option<M> {
        critical_section::with(|cs| self.inner.borrow(cs).take())
    }

    /// Returns true once a context is installed.
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_some())
    }

    /// Runs `f` on the context inside a critical section.
    ///
    /// # Returns
    /// `None` if no context is installed yet
    pub fn with<R>(&self, f: impl FnOnce(&mut M) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().as_mut().map(f))
    }
}

impl<P, A, B> SharedMeter<VuMeter<P, A, B>>
where
    P: OutputPorts,
    A: AnalogSampler,
    B: ModeButton,
{
    /// Handles `event` inside a critical section.
    ///
    /// Events that arrive before the context is installed are dropped.
    ///
    /// # Returns
    /// `true` if the event reached a handler
    pub fn dispatch(&self, event: Event) -> bool {
        self.with(|meter| meter.handle(event)).is_some()
    }
}

impl<M> Default for SharedMeter<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_is_none_until_installed() {
        let slot: SharedMeter<u32> = SharedMeter::new();
        assert!(!slot.is_installed());
        assert_eq!(slot.with(|value| *value), None);

        assert_eq!(slot.install(7), None);
        assert_eq!(slot.with(|value| *value), Some(7));
    }

    #[test]
    fn with_mutates_in_place() {
        let slot = SharedMeter::new();
        slot.install(1u32);
        slot.with(|value| *value += 41);
        assert_eq!(slot.take(), Some(42));
        assert!(!slot.is_installed());
    }
}
