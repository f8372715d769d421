//! `EventCalendar` — the time-ordered queue of pending events.
//!
//! # Ordering
//!
//! Entries are kept sorted non-decreasing by fire time.  `push` finds the
//! insertion point by binary search and places an event with a fire time
//! equal to existing entries **after** all of them, so events at the same
//! instant pop in the order they were scheduled.  Given the same sequence of
//! `push` calls, the `pop` order is fully determined — this FIFO-among-ties
//! rule is what makes whole runs replayable.
//!
//! The calendar owns no domain knowledge: `E` is opaque to it.  There is no
//! cancellation and no mutation of queued events.

use rail_core::SimTime;

use crate::error::{SimError, SimResult};

/// A pending-event queue ordered non-decreasing by fire time.
#[derive(Clone, Debug)]
pub struct EventCalendar<E> {
    entries: Vec<(SimTime, E)>,
}

impl<E> EventCalendar<E> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert an event firing at `time`.
    ///
    /// Binary search for the first entry with a **strictly greater** fire
    /// time; everything at `time` itself stays ahead of the new entry.
    pub fn push(&mut self, time: SimTime, event: E) {
        let mut lo = 0;
        let mut hi = self.entries.len();
        while lo != hi {
            let mid = (lo + hi) / 2;
            if time >= self.entries[mid].0 {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        self.entries.insert(lo, (time, event));
    }

    /// Remove and return the earliest event.
    ///
    /// The driver checks [`is_empty`](Self::is_empty) before popping; calling
    /// `pop` on an empty calendar is a programmer error and fails with
    /// [`SimError::EmptyCalendar`].
    pub fn pop(&mut self) -> SimResult<(SimTime, E)> {
        if self.entries.is_empty() {
            return Err(SimError::EmptyCalendar);
        }
        Ok(self.entries.remove(0))
    }

    /// Fire time of the earliest pending event, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.entries.first().map(|(t, _)| *t)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<E> Default for EventCalendar<E> {
    fn default() -> Self {
        Self::new()
    }
}
