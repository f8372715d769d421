//! Post-run reporting accessors.
//!
//! Everything here is read-only: the run is over, the model's ledgers and
//! logs are frozen, and these methods derive the summary series the caller
//! prints or exports.  Console output itself lives outside the core.

use rail_core::{NodeId, SimTime, TerminalId};
use rail_model::Demand;

use crate::ledger::{FacilityLedgers, QueueSample};
use crate::model::RailModel;
use crate::observer::RailObserver;
use crate::production::{ProductionLog, ProductionSample};

impl<O: RailObserver> RailModel<O> {
    /// Total system queue time: the sum of every recorded dispatch wait.
    pub fn total_queue_time(&self) -> SimTime {
        self.queue_log.total()
    }

    /// Every dispatch decision and its wait, in decision order.
    pub fn queue_samples(&self) -> &[QueueSample] {
        self.queue_log.samples()
    }

    /// The raw production log.
    pub fn production(&self) -> &ProductionLog {
        &self.production
    }

    /// Delivery series for one route, including the seed sample.
    pub fn route_production(
        &self,
        origin: TerminalId,
        destiny: TerminalId,
    ) -> Option<&[ProductionSample]> {
        self.production.route_loaded(origin, destiny)
    }

    /// Productivity series for one route: cumulative delivered quantity
    /// divided by elapsed time at each delivery, with the final undefined
    /// point dropped.
    pub fn route_productivity(&self, origin: TerminalId, destiny: TerminalId) -> Vec<f64> {
        match self.production.route_loaded(origin, destiny) {
            Some(series) => cumulative_over_time(series.iter()),
            None => Vec::new(),
        }
    }

    /// Aggregate productivity across all load-capable routes, concatenated
    /// in sorted route order.
    pub fn productivity(&self) -> Vec<f64> {
        cumulative_over_time(
            self.production
                .loaded_routes()
                .flat_map(|(_, series)| series.iter()),
        )
    }

    /// The demand table, for achievement reporting.
    pub fn demands(&self) -> impl Iterator<Item = &Demand> + '_ {
        self.network.demands()
    }

    /// Committed/forecast ledger pair of one terminal.
    pub fn terminal_ledger(&self, terminal: TerminalId) -> &FacilityLedgers {
        &self.terminal_ledgers[terminal.index()]
    }

    /// Committed/forecast ledger pair of one node.
    pub fn node_ledger(&self, node: NodeId) -> &FacilityLedgers {
        &self.node_ledgers[node.index()]
    }
}

/// Cumulative quantity over elapsed time, one point per sample, final point
/// dropped.
fn cumulative_over_time<'a>(samples: impl Iterator<Item = &'a ProductionSample>) -> Vec<f64> {
    let mut cumulative = 0.0;
    let mut series: Vec<f64> = samples
        .map(|s| {
            cumulative += s.quantity;
            cumulative / s.time
        })
        .collect();
    series.pop();
    series
}
