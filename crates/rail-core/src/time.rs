//! Simulation time model.
//!
//! # Design
//!
//! Time is a plain `f64` number of simulated **hours** since the start of the
//! run.  The domain's durations (service times, transit times, horizons) are
//! all expressed in hours, and transit times arise from `distance / speed`
//! divisions, so a float — not an integer tick — is the canonical unit.
//! Event ordering never relies on float equality: the calendar breaks ties by
//! insertion order, so two events at bit-identical times stay deterministic.

/// Absolute simulated time or a duration, in hours.
pub type SimTime = f64;

/// Fold an absolute simulated time onto a 24-hour clock face.
///
/// Used only for human-readable trace output (`17:00 - Train 2 ...`); all
/// scheduling arithmetic works on absolute hours.
#[inline]
pub fn hour_of_day(time: SimTime) -> SimTime {
    time.rem_euclid(24.0)
}
