//! The `Simulator` driver loop and the `SimModel` seam.

use rail_core::SimTime;

use crate::calendar::EventCalendar;
use crate::error::SimResult;

/// A discrete-event system model driven by [`Simulator::run`].
///
/// The driver owns time and the calendar; the model owns all domain state.
/// Handlers run synchronously: `handle_event` mutates model state and
/// schedules follow-up events on the simulator before returning.
pub trait SimModel {
    type Event;

    /// Reset per-run state (ledgers, logs).  Called once at the start of
    /// [`Simulator::run`], before any event is scheduled.
    fn clear(&mut self);

    /// Schedule the initial events for the run.
    fn starting_events(&mut self, sim: &mut Simulator<Self::Event>) -> SimResult<()>;

    /// Execute one event at the simulator's current time.
    fn handle_event(
        &mut self,
        sim: &mut Simulator<Self::Event>,
        event: Self::Event,
    ) -> SimResult<()>;
}

/// Owns simulated time and the event calendar; runs the main loop.
pub struct Simulator<E> {
    time:     SimTime,
    calendar: EventCalendar<E>,
}

impl<E> Simulator<E> {
    pub fn new() -> Self {
        Self {
            time:     0.0,
            calendar: EventCalendar::new(),
        }
    }

    /// The current simulated time, in hours.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Schedule `event` at `time`.
    ///
    /// `time` may equal the current time (handlers legitimately schedule for
    /// "now") but must not be negative.
    pub fn add_event(&mut self, time: SimTime, event: E) {
        debug_assert!(time >= 0.0, "events cannot fire before the epoch");
        self.calendar.push(time, event);
    }

    pub fn pending_events(&self) -> usize {
        self.calendar.len()
    }

    /// Run `model` until the calendar empties or the clock passes `horizon`.
    ///
    /// The horizon is checked against the time of the *previous* iteration,
    /// before the next pop: the event that moves the clock past the horizon
    /// still executes, and only the following pop is refused.  This
    /// check-before-pop ordering is part of the model's observable behavior
    /// and is pinned by a test.
    ///
    /// Running out of events or reaching the horizon is normal termination,
    /// not an error; any `Err` from a handler aborts the run immediately.
    pub fn run<M: SimModel<Event = E>>(
        &mut self,
        model: &mut M,
        horizon: SimTime,
    ) -> SimResult<()> {
        model.clear();
        model.starting_events(self)?;
        while !self.calendar.is_empty() && self.time <= horizon {
            let (time, event) = self.calendar.pop()?;
            self.time = time;
            model.handle_event(self, event)?;
        }
        Ok(())
    }
}

impl<E> Default for Simulator<E> {
    fn default() -> Self {
        Self::new()
    }
}
