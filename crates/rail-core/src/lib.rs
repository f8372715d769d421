//! `rail-core` — foundational types for the `railsim` rail-logistics simulator.
//!
//! This crate is a dependency of every other `rail-*` crate.  It intentionally
//! has no `rail-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                       |
//! |--------------|------------------------------------------------|
//! | [`ids`]      | `NodeId`, `TerminalId`, `TrainId`              |
//! | [`time`]     | `SimTime`, hour-of-day formatting              |
//! | [`location`] | `Location` (node-or-terminal train position)   |
//! | [`error`]    | `CoreError`, `CoreResult`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod location;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{NodeId, TerminalId, TrainId};
pub use location::Location;
pub use time::{SimTime, hour_of_day};
