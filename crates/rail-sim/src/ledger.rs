//! Queue ledgers and the queue-time log.
//!
//! Every terminal and every node carries a pair of ledgers:
//!
//! - **committed** — busy-until times of trains that have actually been
//!   dispatched; the tail is the time at which the facility next becomes
//!   free.
//! - **forecast** — provisional reservations appended while a routing
//!   decision is being made, before the corresponding dispatch commits.
//!   When several trains decide in the same instant, the second decision
//!   sees the first one's reservation and is steered away from the
//!   double-booked facility.
//!
//! Both ledgers are append-only and non-decreasing: every append is
//! `max(now, tail) + duration`, which can never fall below the tail.

use rail_core::SimTime;

/// An append-only, non-decreasing sequence of busy-until timestamps.
///
/// A fresh ledger holds the single entry `0.0`: the facility is free from
/// the epoch, and `tail()` never has to deal with emptiness.
#[derive(Clone, Debug)]
pub struct QueueLedger {
    entries: Vec<SimTime>,
}

impl QueueLedger {
    pub fn new() -> Self {
        Self { entries: vec![0.0] }
    }

    /// The time at which the facility becomes free after its most recent
    /// entry.
    #[inline]
    pub fn tail(&self) -> SimTime {
        self.entries.last().copied().unwrap_or(0.0)
    }

    pub fn push(&mut self, time: SimTime) {
        self.entries.push(time);
    }

    pub fn entries(&self) -> &[SimTime] {
        &self.entries
    }
}

impl Default for QueueLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// The committed/forecast ledger pair kept for each terminal and each node.
#[derive(Clone, Debug, Default)]
pub struct FacilityLedgers {
    pub committed: QueueLedger,
    pub forecast:  QueueLedger,
}

impl FacilityLedgers {
    pub fn new() -> Self {
        Self::default()
    }
}

// ── Queue-time log ────────────────────────────────────────────────────────────

/// One dispatch decision and how long it had to wait for its facility.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct QueueSample {
    /// Simulated time at which the dispatch was decided.
    pub decision_time: SimTime,
    /// How long the train waited before being serviced.
    pub wait: SimTime,
}

/// Append-only record of per-dispatch waits, one entry per dispatch.
#[derive(Clone, Debug, Default)]
pub struct QueueLog {
    samples: Vec<QueueSample>,
}

impl QueueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, decision_time: SimTime, wait: SimTime) {
        debug_assert!(wait >= 0.0);
        self.samples.push(QueueSample {
            decision_time,
            wait,
        });
    }

    /// Total system queue time: the sum of all recorded waits.
    pub fn total(&self) -> SimTime {
        self.samples.iter().map(|s| s.wait).sum()
    }

    pub fn samples(&self) -> &[QueueSample] {
        &self.samples
    }
}
