//! `rail-sim` — the discrete-event core of `railsim`.
//!
//! # Architecture
//!
//! [`Simulator`] owns the clock and the time-ordered [`EventCalendar`]; it
//! knows nothing about trains.  [`RailModel`] owns the network, the queue
//! ledgers, and the five dispatch handlers that drive each train through its
//! load → transit → unload cycle.  The two meet at the [`SimModel`] trait:
//! the driver pops the earliest event and hands it to the model, which
//! mutates entity/ledger state and schedules exactly one follow-up event
//! before returning.
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`calendar`]   | `EventCalendar` — ordered queue, FIFO among ties     |
//! | [`driver`]     | `Simulator`, `SimModel`                              |
//! | [`event`]      | `RailEvent` and its per-transition payload structs   |
//! | [`ledger`]     | `QueueLedger`, `FacilityLedgers`, `QueueLog`         |
//! | [`production`] | `ProductionLog` — per-route delivery series          |
//! | [`model`]      | `RailModel` dispatch handlers + routing algorithms   |
//! | [`stats`]      | post-run reporting accessors                         |
//! | [`observer`]   | `RailObserver` trace hooks                           |
//! | [`error`]      | `SimError`, `SimResult`                              |
//!
//! # Determinism
//!
//! For a fixed scenario and horizon the run is fully deterministic: the
//! calendar breaks equal-time ties by insertion order, both routing
//! algorithms break cost ties by traversal order (strict `<`), and the
//! production log iterates routes in sorted key order.

pub mod calendar;
pub mod driver;
pub mod error;
pub mod event;
pub mod ledger;
pub mod model;
pub mod observer;
pub mod production;
pub mod stats;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calendar::EventCalendar;
pub use driver::{SimModel, Simulator};
pub use error::{SimError, SimResult};
pub use event::{Arrival, Departure, Dispatch, RailEvent, Service};
pub use ledger::{FacilityLedgers, QueueLedger, QueueLog, QueueSample};
pub use model::RailModel;
pub use observer::{NoopObserver, RailObserver};
pub use production::{ProductionLog, ProductionSample};
