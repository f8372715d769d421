//! Scenario-construction error type.

use rail_core::{NodeId, TerminalId, TrainId};
use thiserror::Error;

/// Errors produced while building or validating a [`Network`](crate::Network).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("terminal {0} not found in network")]
    TerminalNotFound(TerminalId),

    #[error("train {0} not found in network")]
    TrainNotFound(TrainId),

    #[error("demand route {origin} -> {destiny} targets a terminal with no unloading service")]
    DemandWithoutUnloading {
        origin:  TerminalId,
        destiny: TerminalId,
    },

    #[error("invalid scenario: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
