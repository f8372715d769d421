//! Per-route delivery series for productivity reporting.
//!
//! Each completed unloading appends `(time, quantity)` to the route's series
//! on both sides: the loading terminal's "loaded" log and the unloading
//! terminal's "unloaded" log.  Series are keyed by `(origin, destiny)` in a
//! `BTreeMap` so aggregate reporting iterates routes in a deterministic
//! order.
//!
//! Every series is seeded with `(SERIES_EPOCH, 0.0)`.  The epoch sits just
//! above zero so the first point of the cumulative-production-over-time
//! division stays finite.

use std::collections::BTreeMap;

use rail_core::{SimTime, TerminalId};

/// Time placed just after the origin for the seed sample of every series.
pub const SERIES_EPOCH: SimTime = 1e-10;

/// One delivery: `quantity` tonnes handed over at `time`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ProductionSample {
    pub time:     SimTime,
    pub quantity: f64,
}

type RouteSeries = BTreeMap<(TerminalId, TerminalId), Vec<ProductionSample>>;

/// Append-only per-route production record.
#[derive(Clone, Debug, Default)]
pub struct ProductionLog {
    loaded:   RouteSeries,
    unloaded: RouteSeries,
}

impl ProductionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn seed() -> Vec<ProductionSample> {
        vec![ProductionSample {
            time:     SERIES_EPOCH,
            quantity: 0.0,
        }]
    }

    /// Pre-create the loaded-side series for a route whose origin terminal
    /// can load.  Called by the model's `clear()` for every candidate route.
    pub fn seed_loaded(&mut self, origin: TerminalId, destiny: TerminalId) {
        self.loaded.entry((origin, destiny)).or_insert_with(Self::seed);
    }

    /// Pre-create the unloaded-side series for a route whose destination
    /// terminal can unload.
    pub fn seed_unloaded(&mut self, origin: TerminalId, destiny: TerminalId) {
        self.unloaded.entry((origin, destiny)).or_insert_with(Self::seed);
    }

    /// Record a completed delivery on both sides of the route.
    pub fn record(
        &mut self,
        origin: TerminalId,
        destiny: TerminalId,
        time: SimTime,
        quantity: f64,
    ) {
        let sample = ProductionSample { time, quantity };
        self.loaded
            .entry((origin, destiny))
            .or_insert_with(Self::seed)
            .push(sample);
        self.unloaded
            .entry((origin, destiny))
            .or_insert_with(Self::seed)
            .push(sample);
    }

    /// Loaded-side series in sorted route order.
    pub fn loaded_routes(
        &self,
    ) -> impl Iterator<Item = (&(TerminalId, TerminalId), &Vec<ProductionSample>)> {
        self.loaded.iter()
    }

    pub fn route_loaded(
        &self,
        origin: TerminalId,
        destiny: TerminalId,
    ) -> Option<&[ProductionSample]> {
        self.loaded.get(&(origin, destiny)).map(Vec::as_slice)
    }

    pub fn route_unloaded(
        &self,
        origin: TerminalId,
        destiny: TerminalId,
    ) -> Option<&[ProductionSample]> {
        self.unloaded.get(&(origin, destiny)).map(Vec::as_slice)
    }
}
