//! Transit nodes (yards/junctions) and the distance links between them.

use rail_core::{NodeId, TerminalId};

/// A directed distance link between two nodes.
///
/// Links are explicit and one-way: a symmetric connection is two links, one
/// in each direction, created by the topology builder.  The distance is set
/// once at construction and never changes.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceLink {
    pub origin:      NodeId,
    pub destiny:     NodeId,
    /// Link length in kilometres.
    pub distance_km: f64,
}

/// A transit point (yard or junction).  Immutable after construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:   NodeId,
    pub name: String,
    /// Outgoing distance links, in insertion order.  Traversal order matters:
    /// routing tie-breaks keep the first minimum encountered.
    pub links: Vec<DistanceLink>,
    /// Terminals reachable from this node, in insertion order.  This is the
    /// candidate set the terminal-selection algorithm scans on arrival.
    pub related_terminals: Vec<TerminalId>,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            links: Vec::new(),
            related_terminals: Vec::new(),
        }
    }
}
