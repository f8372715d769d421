//! Trains: the mobile entities cycling load → transit → unload.

use rail_core::{Location, SimTime, TerminalId, TrainId};

/// A train and its mutable cycle state.
///
/// `position` and `target` are polymorphic node-or-terminal locations; the
/// dispatch handlers pattern-match the expected kind at every transition.
/// `demand_origin`/`demand_destiny` track which demand route the cargo
/// currently aboard is fulfilling: the origin leg is set when loading
/// finishes, the destiny leg when unloading finishes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Train {
    pub id: TrainId,
    /// Tonnage loaded when a loading service completes.
    pub capacity: f64,
    /// Current cargo, in tonnes.  Zero means empty.
    pub load: f64,
    pub position: Location,
    pub target:   Location,
    /// Speed in km/h while carrying cargo.
    pub speed_loaded: f64,
    /// Speed in km/h while running empty.
    pub speed_empty: f64,
    pub demand_origin:  Option<TerminalId>,
    pub demand_destiny: Option<TerminalId>,
}

impl Train {
    pub fn is_loaded(&self) -> bool {
        self.load != 0.0
    }

    /// The applicable speed for the train's current load state.
    pub fn speed(&self) -> f64 {
        if self.is_loaded() {
            self.speed_loaded
        } else {
            self.speed_empty
        }
    }

    pub fn set_load(&mut self, load: f64) {
        debug_assert!(load >= 0.0);
        self.load = load;
    }

    /// Both legs of the current demand route, when known.
    pub fn demand_pair(&self) -> Option<(TerminalId, TerminalId)> {
        Some((self.demand_origin?, self.demand_destiny?))
    }
}
