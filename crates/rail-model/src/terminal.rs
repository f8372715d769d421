//! Terminals (load/unload facilities) and the delivery demands routed to them.

use rail_core::{NodeId, SimTime, TerminalId};

/// A target delivery quantity for one origin→destiny terminal route.
///
/// `current` only ever grows (unloading events add to it), and `achieved`
/// latches: once `current >= total` it becomes true and never reverts.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    pub origin:   TerminalId,
    pub destiny:  TerminalId,
    pub total:    f64,
    pub current:  f64,
    pub achieved: bool,
}

impl Demand {
    pub fn new(origin: TerminalId, destiny: TerminalId, total: f64) -> Self {
        Self {
            origin,
            destiny,
            total,
            current: 0.0,
            achieved: false,
        }
    }

    /// Add a delivered quantity and latch `achieved` if the total is reached.
    pub fn update_current(&mut self, quantity: f64) {
        debug_assert!(quantity >= 0.0, "deliveries only add demand");
        self.current += quantity;
        if self.current >= self.total {
            self.achieved = true;
        }
    }
}

/// A load or unload facility attached to one node.
///
/// Service capability is derived from the configured durations: a terminal
/// offers loading service iff `loading_hours` is set, and symmetrically for
/// unloading.  A terminal may support either, both, or (degenerate) neither.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terminal {
    pub id:   TerminalId,
    /// The node this terminal is attached to; trains return to it after
    /// service before transiting onward.
    pub node: NodeId,
    pub loading_hours:   Option<SimTime>,
    pub unloading_hours: Option<SimTime>,
    /// Demand records for routes **ending** here.  Loading legs carry no
    /// records, so origin terminals stay eligible after achievement.
    pub demands: Vec<Demand>,
}

impl Terminal {
    pub fn new(
        id: TerminalId,
        node: NodeId,
        loading_hours: Option<SimTime>,
        unloading_hours: Option<SimTime>,
    ) -> Self {
        Self {
            id,
            node,
            loading_hours,
            unloading_hours,
            demands: Vec::new(),
        }
    }

    pub fn can_load(&self) -> bool {
        self.loading_hours.is_some()
    }

    pub fn can_unload(&self) -> bool {
        self.unloading_hours.is_some()
    }

    /// The service duration for the requested operation, if offered.
    pub fn service_hours(&self, to_load: bool) -> Option<SimTime> {
        if to_load {
            self.loading_hours
        } else {
            self.unloading_hours
        }
    }

    /// The demand record for an exact `(origin, destiny)` pair, if any.
    pub fn demand(&self, origin: TerminalId, destiny: TerminalId) -> Option<&Demand> {
        self.demands
            .iter()
            .find(|d| d.origin == origin && d.destiny == destiny)
    }

    pub fn demand_mut(
        &mut self,
        origin: TerminalId,
        destiny: TerminalId,
    ) -> Option<&mut Demand> {
        self.demands
            .iter_mut()
            .find(|d| d.origin == origin && d.destiny == destiny)
    }
}
