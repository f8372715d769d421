//! Trace hooks for train movements.
//!
//! All methods have default no-op implementations so implementors only need
//! to override what they care about.  Console/trace printing lives outside
//! the core — the demo binaries implement this trait to reproduce the
//! classic `17:00 - Train 0 departed …` log lines.

use rail_core::{Location, SimTime, TerminalId, TrainId};

/// Callbacks invoked by [`RailModel`][crate::RailModel] as each dispatch
/// handler begins.
pub trait RailObserver {
    /// A train dispatches from a node toward a terminal.
    fn on_terminal_dispatch(
        &mut self,
        _time: SimTime,
        _train: TrainId,
        _origin_name: &str,
        _terminal: TerminalId,
    ) {
    }

    /// A train finished loading and departs the terminal for `node_name`.
    fn on_loading_finished(
        &mut self,
        _time: SimTime,
        _train: TrainId,
        _terminal: TerminalId,
        _node_name: &str,
    ) {
    }

    /// A train finished unloading at a terminal.
    fn on_unloading_finished(&mut self, _time: SimTime, _train: TrainId, _terminal: TerminalId) {}

    /// A train arrived at the node named `node_name`, coming from a node or
    /// a terminal.
    fn on_node_arrival(
        &mut self,
        _time: SimTime,
        _train: TrainId,
        _from: Location,
        _node_name: &str,
    ) {
    }
}

/// Observer that ignores every callback.
#[derive(Default)]
pub struct NoopObserver;

impl RailObserver for NoopObserver {}
