//! Hardware events and a fixed-capacity queue for deferring them.
//!
//! On the board each [`Event`] is an interrupt vector and is dispatched
//! immediately. An [`EventQueue`] lets a main loop or a host simulation
//! collect events and replay them in arrival order.

use heapless::Deque;

/// The three event sources of the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Control timer overflow (~122 Hz).
    ControlTick,

    /// Refresh timer overflow (~3.9 kHz).
    RefreshTick,

    /// Analog conversion complete.
    SampleReady,
}

/// Returned when an event does not fit in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub Event);

impl core::fmt::Display for QueueFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "event queue full, dropped {:?}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueueFull {}

/// FIFO of pending events.
///
/// # Type Parameters
/// * `N` - Maximum number of pending events
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    events: Deque<Event, N>,
    dropped: u32,
}

impl<const N: usize> EventQueue<N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Appends an event.
    ///
    /// # Errors
    /// `QueueFull` if the queue is at capacity; the event is dropped and counted.
    pub fn push(&mut self, event: Event) -> Result<(), QueueFull> {
        self.events.push_back(event).map_err(|event| {
            self.dropped = self.dropped.wrapping_add(1);
            QueueFull(event)
        })
    }

    /// Removes the oldest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Hands every pending event to `handler` in arrival order.
    ///
    /// # Returns
    /// Number of events handled
    pub fn drain<F: FnMut(Event)>(&mut self, mut handler: F) -> usize {
        let pending = self.events.len();
        for _ in 0..pending {
            match self.events.pop_front() {
                Some(event) => handler(event),
                None => return pending,
            }
        }
        pending
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
