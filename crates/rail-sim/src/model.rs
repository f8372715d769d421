//! The dispatch state machine and the demand-aware routing algorithms.
//!
//! # The train cycle
//!
//! ```text
//! RouteDecision ──► DispatchToTerminal ──► FinishLoading / FinishUnloading
//!       ▲                                              │
//!       └────────────── DispatchToNode ◄───────────────┘
//! ```
//!
//! Each handler mutates entity/ledger state and schedules exactly one
//! follow-up event.  The cycle has no terminal state: trains run until the
//! calendar empties or the horizon stops the driver.
//!
//! # Forecast vs. commit
//!
//! A route decision appends a provisional busy-until time to the winning
//! terminal's **forecast** ledger so that a second train deciding in the
//! same instant is steered away from the double-booked facility; the real
//! **committed** entry lands later, when the corresponding dispatch runs.

use rail_core::{Location, NodeId, SimTime, TerminalId, TrainId};
use rail_model::Network;

use crate::driver::{SimModel, Simulator};
use crate::error::{SimError, SimResult};
use crate::event::{Arrival, Departure, Dispatch, RailEvent, Service};
use crate::ledger::{FacilityLedgers, QueueLog};
use crate::observer::{NoopObserver, RailObserver};
use crate::production::ProductionLog;

/// The routing/state model: owns the network, all ledgers and logs, and the
/// five dispatch handlers.
///
/// All mutable simulation state lives here and is touched only from within
/// handler execution — the driver never reaches past the [`SimModel`] seam.
pub struct RailModel<O: RailObserver = NoopObserver> {
    pub(crate) network: Network,
    /// Committed/forecast ledger pair per terminal, indexed by `TerminalId`.
    pub(crate) terminal_ledgers: Vec<FacilityLedgers>,
    /// Committed/forecast ledger pair per node, indexed by `NodeId`.
    pub(crate) node_ledgers: Vec<FacilityLedgers>,
    pub(crate) queue_log: QueueLog,
    pub(crate) production: ProductionLog,
    observer: O,
}

impl RailModel<NoopObserver> {
    pub fn new(network: Network) -> Self {
        Self::with_observer(network, NoopObserver)
    }
}

impl<O: RailObserver> RailModel<O> {
    pub fn with_observer(network: Network, observer: O) -> Self {
        let terminal_count = network.terminals.len();
        let node_count = network.nodes.len();
        Self {
            network,
            terminal_ledgers: (0..terminal_count).map(|_| FacilityLedgers::new()).collect(),
            node_ledgers: (0..node_count).map(|_| FacilityLedgers::new()).collect(),
            queue_log: QueueLog::new(),
            production: ProductionLog::new(),
            observer,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Rebuild per-run state: fresh ledgers, empty queue log, and production
    /// series seeded for every capable route.
    fn reset(&mut self) {
        self.terminal_ledgers = (0..self.network.terminals.len())
            .map(|_| FacilityLedgers::new())
            .collect();
        self.node_ledgers = (0..self.network.nodes.len())
            .map(|_| FacilityLedgers::new())
            .collect();
        self.queue_log = QueueLog::new();

        let mut production = ProductionLog::new();
        for origin in &self.network.terminals {
            if !origin.can_load() {
                continue;
            }
            for destiny in &self.network.terminals {
                if destiny.id != origin.id {
                    production.seed_loaded(origin.id, destiny.id);
                }
            }
        }
        for destiny in &self.network.terminals {
            if !destiny.can_unload() {
                continue;
            }
            for origin in &self.network.terminals {
                if origin.id != destiny.id {
                    production.seed_unloaded(origin.id, destiny.id);
                }
            }
        }
        self.production = production;
    }

    // ── Routing algorithms ────────────────────────────────────────────────

    /// Demand-aware terminal selection.
    ///
    /// Scans `candidates` in order and keeps the eligible terminal with the
    /// strictly smallest `max(now, forecast tail) + service` — ties keep the
    /// first candidate encountered.  A candidate is skipped when it does not
    /// offer the needed service, or when its demand record for the exact
    /// `(origin, destiny)` pair is already achieved.  The winner's candidate
    /// time is appended to its forecast ledger before returning, so a second
    /// decision in the same instant sees the reservation.
    pub(crate) fn next_terminal(
        network: &Network,
        terminal_ledgers: &mut [FacilityLedgers],
        now: SimTime,
        candidates: &[TerminalId],
        demand_pair: (Option<TerminalId>, Option<TerminalId>),
        to_load: bool,
        at: NodeId,
    ) -> SimResult<TerminalId> {
        let mut best: Option<(TerminalId, SimTime)> = None;
        for &candidate in candidates {
            let terminal = network.terminal(candidate);
            let Some(service) = terminal.service_hours(to_load) else {
                continue;
            };
            if let (Some(origin), Some(destiny)) = demand_pair {
                if terminal
                    .demand(origin, destiny)
                    .is_some_and(|d| d.achieved)
                {
                    continue;
                }
            }
            let candidate_time =
                now.max(terminal_ledgers[candidate.index()].forecast.tail()) + service;
            if best.map_or(true, |(_, t)| candidate_time < t) {
                best = Some((candidate, candidate_time));
            }
        }

        let (winner, candidate_time) = best.ok_or(SimError::NoRoute {
            at: Location::Node(at),
        })?;
        terminal_ledgers[winner.index()].forecast.push(candidate_time);
        Ok(winner)
    }

    /// Pick the closest neighboring node by transit time.
    ///
    /// `transit = distance / speed` per outgoing link, strict `<` keeping
    /// the first minimum.  The destination's committed ledger tail is added
    /// only when the raw transit exceeds the current clock — the congestion
    /// penalty is discontinuous on purpose and pinned by a test.  The final
    /// transit time is truncated to a whole hour.
    pub(crate) fn closest_node(
        network: &Network,
        node_ledgers: &[FacilityLedgers],
        train: TrainId,
        position: NodeId,
        now: SimTime,
    ) -> SimResult<(NodeId, SimTime)> {
        let speed = network.train(train).speed();
        let mut best: Option<(NodeId, SimTime)> = None;
        for link in &network.node(position).links {
            let transit = link.distance_km / speed;
            if best.map_or(true, |(_, t)| transit < t) {
                best = Some((link.destiny, transit));
            }
        }

        let (destiny, mut transit) = best.ok_or(SimError::NoRoute {
            at: Location::Node(position),
        })?;
        if transit > now {
            transit += node_ledgers[destiny.index()].committed.tail();
        }
        Ok((destiny, transit.trunc()))
    }

    // ── Dispatch handlers ─────────────────────────────────────────────────

    /// A train at `origin` dispatches to its chosen terminal; service starts
    /// once the terminal frees up and the wait is charged to the queue log.
    fn dispatch_to_terminal(
        &mut self,
        sim: &mut Simulator<RailEvent>,
        d: Dispatch,
    ) -> SimResult<()> {
        let now = sim.time();
        self.observer.on_terminal_dispatch(
            now,
            d.train,
            &self.network.nodes[d.origin.index()].name,
            d.terminal,
        );

        let to_load = !self.network.train(d.train).is_loaded();
        let terminal = self.network.terminal(d.terminal);
        let service = terminal
            .service_hours(to_load)
            .ok_or(SimError::ServiceUnavailable {
                terminal: d.terminal,
                to_load,
            })?;
        let return_node = terminal.node;

        let wait = now.max(self.terminal_ledgers[d.terminal.index()].committed.tail());
        self.queue_log.record(now, wait - now);
        let done = wait + service;
        self.terminal_ledgers[d.terminal.index()].committed.push(done);

        let train = self.network.train_mut(d.train);
        train.position = Location::Node(d.origin);
        train.target = Location::Terminal(d.terminal);

        let service_done = Service {
            terminal: d.terminal,
            node:     return_node,
            train:    d.train,
        };
        let follow_up = if to_load {
            RailEvent::FinishLoading(service_done)
        } else {
            RailEvent::FinishUnloading(service_done)
        };
        sim.add_event(done, follow_up);
        Ok(())
    }

    /// Loading completes: the train takes on a full capacity load, records
    /// the origin leg of its demand route, and queues on the return node.
    fn finish_loading(&mut self, sim: &mut Simulator<RailEvent>, s: Service) -> SimResult<()> {
        let now = sim.time();
        self.observer.on_loading_finished(
            now,
            s.train,
            s.terminal,
            &self.network.nodes[s.node.index()].name,
        );

        let train = self.network.train_mut(s.train);
        train.target.expect_terminal()?;
        let capacity = train.capacity;
        train.set_load(capacity);
        train.demand_origin = Some(s.terminal);
        train.position = Location::Terminal(s.terminal);
        train.target = Location::Node(s.node);

        let wait = now.max(self.node_ledgers[s.node.index()].committed.tail());
        self.node_ledgers[s.node.index()].committed.push(wait);
        sim.add_event(
            wait,
            RailEvent::DispatchToNode(Departure {
                node:  s.node,
                train: s.train,
            }),
        );
        Ok(())
    }

    /// Unloading completes: the destiny leg closes the demand route, the
    /// delivery is credited to the demand record and the production log,
    /// and the now-empty train queues on the return node.
    fn finish_unloading(&mut self, sim: &mut Simulator<RailEvent>, s: Service) -> SimResult<()> {
        let now = sim.time();
        self.observer.on_unloading_finished(now, s.train, s.terminal);

        let (delivered, demand_pair) = {
            let train = self.network.train_mut(s.train);
            train.target.expect_terminal()?;
            train.demand_destiny = Some(s.terminal);
            let delivered = train.load;
            let demand_pair = train.demand_pair();
            train.set_load(0.0);
            train.position = Location::Terminal(s.terminal);
            train.target = Location::Node(s.node);
            (delivered, demand_pair)
        };

        if let Some((origin, destiny)) = demand_pair {
            // A missing record means the route carries no demand target;
            // the delivery still counts toward production.
            if let Some(demand) = self
                .network
                .terminal_mut(s.terminal)
                .demand_mut(origin, destiny)
            {
                demand.update_current(delivered);
            }
            self.production.record(origin, destiny, now, delivered);
        }

        let wait = now.max(self.node_ledgers[s.node.index()].committed.tail());
        self.node_ledgers[s.node.index()].committed.push(wait);
        sim.add_event(
            wait,
            RailEvent::DispatchToNode(Departure {
                node:  s.node,
                train: s.train,
            }),
        );
        Ok(())
    }

    /// The train departs its terminal's node for the closest neighbor; the
    /// transit is committed on the destination node's ledger and the wait
    /// charged to the queue log.
    fn dispatch_to_node(
        &mut self,
        sim: &mut Simulator<RailEvent>,
        dep: Departure,
    ) -> SimResult<()> {
        let now = sim.time();
        let came_from = self.network.train(dep.train).position;
        self.observer.on_node_arrival(
            now,
            dep.train,
            came_from,
            &self.network.nodes[dep.node.index()].name,
        );
        came_from.expect_terminal()?;

        self.network.train_mut(dep.train).position = Location::Node(dep.node);

        let (destiny, transit) =
            Self::closest_node(&self.network, &self.node_ledgers, dep.train, dep.node, now)?;

        let wait = now.max(self.node_ledgers[destiny.index()].committed.tail());
        let arrival = wait + transit;
        self.queue_log.record(now, wait - now);
        self.node_ledgers[destiny.index()].committed.push(arrival);

        self.network.train_mut(dep.train).target = Location::Node(destiny);
        sim.add_event(
            arrival,
            RailEvent::RouteDecision(Arrival {
                from:  dep.node,
                node:  destiny,
                train: dep.train,
            }),
        );
        Ok(())
    }

    /// The train arrives at a node and picks its next terminal among the
    /// node's related terminals; the wait is committed on the terminal's
    /// ledger and the dispatch scheduled for when the terminal frees up.
    fn route_decision(&mut self, sim: &mut Simulator<RailEvent>, a: Arrival) -> SimResult<()> {
        let now = sim.time();
        self.observer.on_node_arrival(
            now,
            a.train,
            Location::Node(a.from),
            &self.network.nodes[a.node.index()].name,
        );

        let (to_load, demand_pair) = {
            let train = self.network.train_mut(a.train);
            train.position.expect_node()?;
            train.position = Location::Node(a.node);
            (!train.is_loaded(), (train.demand_origin, train.demand_destiny))
        };

        let chosen = Self::next_terminal(
            &self.network,
            &mut self.terminal_ledgers,
            now,
            &self.network.nodes[a.node.index()].related_terminals,
            demand_pair,
            to_load,
            a.node,
        )?;

        let wait = now.max(self.terminal_ledgers[chosen.index()].committed.tail());
        self.terminal_ledgers[chosen.index()].committed.push(wait);

        self.network.train_mut(a.train).target = Location::Terminal(chosen);
        sim.add_event(
            wait,
            RailEvent::DispatchToTerminal(Dispatch {
                origin:   a.node,
                terminal: chosen,
                train:    a.train,
            }),
        );
        Ok(())
    }
}

impl<O: RailObserver> SimModel for RailModel<O> {
    type Event = RailEvent;

    fn clear(&mut self) {
        self.reset();
    }

    /// Schedule the first `DispatchToTerminal` for every train, treating its
    /// configured origin node as the current position.
    fn starting_events(&mut self, sim: &mut Simulator<RailEvent>) -> SimResult<()> {
        for i in 0..self.network.trains.len() {
            let train = &self.network.trains[i];
            let id = train.id;
            let origin = train.position.expect_node()?;
            let to_load = !train.is_loaded();
            let demand_pair = (train.demand_origin, train.demand_destiny);

            let chosen = Self::next_terminal(
                &self.network,
                &mut self.terminal_ledgers,
                sim.time(),
                &self.network.nodes[origin.index()].related_terminals,
                demand_pair,
                to_load,
                origin,
            )?;

            self.network.train_mut(id).target = Location::Terminal(chosen);
            sim.add_event(
                sim.time(),
                RailEvent::DispatchToTerminal(Dispatch {
                    origin,
                    terminal: chosen,
                    train: id,
                }),
            );
        }
        Ok(())
    }

    fn handle_event(
        &mut self,
        sim: &mut Simulator<RailEvent>,
        event: RailEvent,
    ) -> SimResult<()> {
        match event {
            RailEvent::DispatchToTerminal(d) => self.dispatch_to_terminal(sim, d),
            RailEvent::FinishLoading(s) => self.finish_loading(sim, s),
            RailEvent::FinishUnloading(s) => self.finish_unloading(sim, s),
            RailEvent::DispatchToNode(dep) => self.dispatch_to_node(sim, dep),
            RailEvent::RouteDecision(a) => self.route_decision(sim, a),
        }
    }
}
