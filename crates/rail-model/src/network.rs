//! The entity arena and its validating builder.
//!
//! # Data layout
//!
//! Nodes, terminals, and trains live in plain `Vec`s indexed by their typed
//! IDs.  All cross-references between entities are IDs into these arenas —
//! there are no shared mutable pointers, so the simulation model can borrow
//! individual entities mutably without aliasing.
//!
//! The builder accepts entities in any order and validates every
//! cross-reference in [`build`](NetworkBuilder::build); a `Network` that
//! exists is internally consistent, which is what lets the hot dispatch path
//! index arenas without re-checking.

use rail_core::{Location, NodeId, SimTime, TerminalId, TrainId};

use crate::error::{ModelError, ModelResult};
use crate::node::{DistanceLink, Node};
use crate::terminal::{Demand, Terminal};
use crate::train::Train;

// ── Network ───────────────────────────────────────────────────────────────────

/// The complete scenario: topology, terminals, demands, and the train fleet.
///
/// Construct via [`NetworkBuilder`].  Entity identity is stable for the
/// lifetime of the network; only mutable fields (train load/position, demand
/// counters) change during a run.
#[derive(Clone, Debug)]
pub struct Network {
    pub nodes:     Vec<Node>,
    pub terminals: Vec<Terminal>,
    pub trains:    Vec<Train>,
}

impl Network {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.index()]
    }

    pub fn terminal_mut(&mut self, id: TerminalId) -> &mut Terminal {
        &mut self.terminals[id.index()]
    }

    pub fn train(&self, id: TrainId) -> &Train {
        &self.trains[id.index()]
    }

    pub fn train_mut(&mut self, id: TrainId) -> &mut Train {
        &mut self.trains[id.index()]
    }

    /// All demand records across all terminals, for achievement reporting.
    pub fn demands(&self) -> impl Iterator<Item = &Demand> + '_ {
        self.terminals.iter().flat_map(|t| t.demands.iter())
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rail_model::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// let a = b.add_node("Yard A");
/// let c = b.add_node("Yard C");
/// b.connect(a, c, 120.0); // both directions
/// let t = b.add_terminal(c, Some(7.0), None);
/// b.relate_terminal(a, t);
/// b.add_train(a, 1_000.0, 0.0, 40.0, 47.0);
/// let net = b.build().unwrap();
/// assert_eq!(net.nodes.len(), 2);
/// assert_eq!(net.node(a).links.len(), 1); // directed: one link out of `a`
/// ```
#[derive(Default)]
pub struct NetworkBuilder {
    nodes:     Vec<Node>,
    terminals: Vec<Terminal>,
    trains:    Vec<Train>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transit node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, name));
        id
    }

    /// Add a **directed** distance link from `origin` to `destiny`.
    pub fn link(&mut self, origin: NodeId, destiny: NodeId, distance_km: f64) {
        self.nodes[origin.index()].links.push(DistanceLink {
            origin,
            destiny,
            distance_km,
        });
    }

    /// Convenience: add links in **both directions** between `a` and `b`.
    pub fn connect(&mut self, a: NodeId, b: NodeId, distance_km: f64) {
        self.link(a, b, distance_km);
        self.link(b, a, distance_km);
    }

    /// Add a terminal attached to `node`.  The terminal is automatically
    /// related to its own node; use [`relate_terminal`](Self::relate_terminal)
    /// to make it reachable from further nodes.
    pub fn add_terminal(
        &mut self,
        node: NodeId,
        loading_hours: Option<SimTime>,
        unloading_hours: Option<SimTime>,
    ) -> TerminalId {
        let id = TerminalId(self.terminals.len() as u32);
        self.terminals
            .push(Terminal::new(id, node, loading_hours, unloading_hours));
        self.nodes[node.index()].related_terminals.push(id);
        id
    }

    /// Mark `terminal` as reachable from `node`, appending it to the node's
    /// candidate list for route decisions.
    pub fn relate_terminal(&mut self, node: NodeId, terminal: TerminalId) {
        self.nodes[node.index()].related_terminals.push(terminal);
    }

    /// Register a delivery demand for the `origin → destiny` route.  The
    /// record lives on the destination terminal, where unloading updates it.
    pub fn add_demand(&mut self, origin: TerminalId, destiny: TerminalId, total: f64) {
        self.terminals[destiny.index()]
            .demands
            .push(Demand::new(origin, destiny, total));
    }

    /// Add a train starting at `origin` node.  A non-zero `initial_load`
    /// starts the train loaded; pair it with
    /// [`set_demand_origin`](Self::set_demand_origin) so the first unloading
    /// leg knows which route the cargo belongs to.
    pub fn add_train(
        &mut self,
        origin: NodeId,
        capacity: f64,
        initial_load: f64,
        speed_loaded: f64,
        speed_empty: f64,
    ) -> TrainId {
        let id = TrainId(self.trains.len() as u32);
        self.trains.push(Train {
            id,
            capacity,
            load: initial_load,
            position: Location::Node(origin),
            target: Location::Node(origin),
            speed_loaded,
            speed_empty,
            demand_origin: None,
            demand_destiny: None,
        });
        id
    }

    /// Pre-set the demand-origin leg of a train that starts already loaded.
    pub fn set_demand_origin(&mut self, train: TrainId, origin: TerminalId) {
        self.trains[train.index()].demand_origin = Some(origin);
    }

    /// Validate all cross-references and produce the [`Network`].
    pub fn build(self) -> ModelResult<Network> {
        let node_count = self.nodes.len() as u32;
        let terminal_count = self.terminals.len() as u32;

        for node in &self.nodes {
            for link in &node.links {
                if link.destiny.0 >= node_count {
                    return Err(ModelError::NodeNotFound(link.destiny));
                }
            }
            for &t in &node.related_terminals {
                if t.0 >= terminal_count {
                    return Err(ModelError::TerminalNotFound(t));
                }
            }
        }

        for terminal in &self.terminals {
            if terminal.node.0 >= node_count {
                return Err(ModelError::NodeNotFound(terminal.node));
            }
            for demand in &terminal.demands {
                if demand.origin.0 >= terminal_count {
                    return Err(ModelError::TerminalNotFound(demand.origin));
                }
                if !terminal.can_unload() {
                    return Err(ModelError::DemandWithoutUnloading {
                        origin:  demand.origin,
                        destiny: demand.destiny,
                    });
                }
            }
        }

        for train in &self.trains {
            let Location::Node(origin) = train.position else {
                return Err(ModelError::Invalid(format!(
                    "train {} must start at a node",
                    train.id
                )));
            };
            if origin.0 >= node_count {
                return Err(ModelError::NodeNotFound(origin));
            }
            if let Some(t) = train.demand_origin {
                if t.0 >= terminal_count {
                    return Err(ModelError::TerminalNotFound(t));
                }
            }
        }

        Ok(Network {
            nodes: self.nodes,
            terminals: self.terminals,
            trains: self.trains,
        })
    }
}
