//! Simulation-core error type.
//!
//! Every variant reflects an invariant violation in the caller-supplied
//! scenario or in model state; none are transient and none are retried.  The
//! driver loop itself never raises — running out of events or reaching the
//! horizon is normal termination.

use rail_core::{CoreError, Location, TerminalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// `pop` on an empty calendar — programmer error; the driver checks
    /// emptiness first.
    #[error("pop on an empty event calendar")]
    EmptyCalendar,

    /// A routing algorithm was handed an empty or fully-achieved candidate
    /// set — the topology or demand set is misconfigured.
    #[error("no eligible route from {at}")]
    NoRoute { at: Location },

    /// A train was dispatched for a service its terminal does not offer.
    /// Terminal selection filters on capability, so this indicates a
    /// hand-scheduled event with a bad payload.
    #[error("terminal {terminal} offers no matching service (to_load = {to_load})")]
    ServiceUnavailable {
        terminal: TerminalId,
        to_load:  bool,
    },

    /// A train's position/target held the wrong location kind for the
    /// transition being executed.
    #[error(transparent)]
    Location(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
