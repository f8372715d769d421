//! Per-transition event payloads.
//!
//! One variant per dispatch transition, each carrying exactly the fields its
//! handler needs.  Keeping the payloads as small named structs (rather than
//! positional data) makes the state machine's contract checkable at compile
//! time: a handler cannot read a field its transition does not carry.

use rail_core::{NodeId, TerminalId, TrainId};

/// A train at a node has been assigned a destination terminal.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Dispatch {
    /// The node the train dispatches from.
    pub origin:   NodeId,
    /// The terminal chosen by the route decision.
    pub terminal: TerminalId,
    pub train:    TrainId,
}

/// A service (loading or unloading) completes at a terminal.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Service {
    pub terminal: TerminalId,
    /// The node the train returns to after service — the terminal's
    /// attached node.
    pub node:  NodeId,
    pub train: TrainId,
}

/// A train leaves a terminal's node for the closest neighboring node.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Departure {
    /// The train's current node (where the closest-node scan starts).
    pub node:  NodeId,
    pub train: TrainId,
}

/// A train arrives at a node and must pick its next terminal.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Arrival {
    /// The node the train transited from.
    pub from:  NodeId,
    /// The node the train has arrived at.
    pub node:  NodeId,
    pub train: TrainId,
}

/// The five transitions of the train cycle.
///
/// Each handler schedules exactly one follow-up event; the cycle has no
/// terminal state and repeats until the run's horizon.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RailEvent {
    DispatchToTerminal(Dispatch),
    FinishLoading(Service),
    FinishUnloading(Service),
    DispatchToNode(Departure),
    RouteDecision(Arrival),
}
