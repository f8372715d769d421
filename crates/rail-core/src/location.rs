//! Polymorphic train position: a train sits either at a node or a terminal.
//!
//! Every dispatch handler knows which kind it expects at its transition; the
//! `expect_*` helpers turn a mismatch into a [`CoreError::LocationKind`]
//! instead of a silent mis-index into the wrong entity arena.

use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::ids::{NodeId, TerminalId};

/// Where a train currently is (or is headed): a transit node or a terminal.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Node(NodeId),
    Terminal(TerminalId),
}

impl Location {
    /// The node this location refers to, or an error if it is a terminal.
    pub fn expect_node(self) -> CoreResult<NodeId> {
        match self {
            Location::Node(id) => Ok(id),
            Location::Terminal(_) => Err(CoreError::LocationKind {
                expected: "node",
                found: self,
            }),
        }
    }

    /// The terminal this location refers to, or an error if it is a node.
    pub fn expect_terminal(self) -> CoreResult<TerminalId> {
        match self {
            Location::Terminal(id) => Ok(id),
            Location::Node(_) => Err(CoreError::LocationKind {
                expected: "terminal",
                found: self,
            }),
        }
    }

    pub fn is_node(self) -> bool {
        matches!(self, Location::Node(_))
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Location::Terminal(_))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Node(id) => write!(f, "node {}", id.0),
            Location::Terminal(id) => write!(f, "terminal {}", id.0),
        }
    }
}

impl From<NodeId> for Location {
    fn from(id: NodeId) -> Self {
        Location::Node(id)
    }
}

impl From<TerminalId> for Location {
    fn from(id: TerminalId) -> Self {
        Location::Terminal(id)
    }
}
