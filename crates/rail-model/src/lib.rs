//! `rail-model` — passive domain entities and scenario construction.
//!
//! Entities here carry no simulation logic: they are data records created
//! once by [`NetworkBuilder`] before a run and mutated (load, position,
//! demand counters) only by the `rail-sim` dispatch handlers over simulated
//! time.  All cross-references are arena indices (`Vec` + typed ID), never
//! shared pointers.
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`node`]     | `Node`, `DistanceLink`                          |
//! | [`terminal`] | `Terminal`, `Demand`                            |
//! | [`train`]    | `Train`                                         |
//! | [`network`]  | `Network` arena + validating `NetworkBuilder`   |
//! | [`error`]    | `ModelError`, `ModelResult`                     |

pub mod error;
pub mod network;
pub mod node;
pub mod terminal;
pub mod train;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ModelError, ModelResult};
pub use network::{Network, NetworkBuilder};
pub use node::{DistanceLink, Node};
pub use terminal::{Demand, Terminal};
pub use train::Train;
