//! patios — two-yard, three-terminal reference scenario.
//!
//! Two yards 800 km apart: Patio A hosts the loading terminal (7 h),
//! Patio B hosts two unloading terminals (6 h and 10 h).  Two 1 000 t
//! trains start loaded at Patio B and cycle for 15 simulated days, serving
//! 14 000 t and 3 000 t delivery demands.  Movements are traced to the
//! console and the report series land in `./output/`.

use std::fs;
use std::path::Path;

use anyhow::Result;

use rail_core::{Location, SimTime, TerminalId, TrainId, hour_of_day};
use rail_model::{Demand, Network, NetworkBuilder};
use rail_output::CsvReportWriter;
use rail_sim::{RailModel, RailObserver, Simulator};

// ── Constants ─────────────────────────────────────────────────────────────────

const TRAIN_CAPACITY_T:   f64 = 1_000.0;
const SPEED_LOADED_KMH:   f64 = 40.0;
const SPEED_EMPTY_KMH:    f64 = 47.0;
const HORIZON_HOURS:      SimTime = 15.0 * 24.0;

// ── Console trace ─────────────────────────────────────────────────────────────

/// Prints one `HH:00 - Train N …` line per movement, folding absolute time
/// onto a 24-hour clock face.
struct ConsoleTrace;

impl RailObserver for ConsoleTrace {
    fn on_terminal_dispatch(
        &mut self,
        time: SimTime,
        train: TrainId,
        origin_name: &str,
        terminal: TerminalId,
    ) {
        println!(
            "{:02.0}:00 - Train {} departed from {origin_name} to Terminal {}",
            hour_of_day(time),
            train.0,
            terminal.0,
        );
    }

    fn on_loading_finished(
        &mut self,
        time: SimTime,
        train: TrainId,
        terminal: TerminalId,
        node_name: &str,
    ) {
        println!(
            "{:02.0}:00 - Train {} finished loading and departed from Terminal {} to {node_name}",
            hour_of_day(time),
            train.0,
            terminal.0,
        );
    }

    fn on_unloading_finished(&mut self, time: SimTime, train: TrainId, terminal: TerminalId) {
        println!(
            "{:02.0}:00 - Train {} finished unloading at Terminal {}",
            hour_of_day(time),
            train.0,
            terminal.0,
        );
    }

    fn on_node_arrival(&mut self, time: SimTime, train: TrainId, from: Location, node_name: &str) {
        println!(
            "{:02.0}:00 - Train {} arrived at {node_name} from {from}",
            hour_of_day(time),
            train.0,
        );
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

fn build_scenario() -> Result<Network> {
    let mut b = NetworkBuilder::new();

    let patio_a = b.add_node("Patio A");
    let patio_b = b.add_node("Patio B");
    b.connect(patio_a, patio_b, 800.0);

    let loader = b.add_terminal(patio_a, Some(7.0), None);
    let sink_fast = b.add_terminal(patio_b, None, Some(6.0));
    let sink_slow = b.add_terminal(patio_b, None, Some(10.0));

    b.add_demand(loader, sink_fast, 14_000.0);
    b.add_demand(loader, sink_slow, 3_000.0);

    // Both trains start loaded at Patio B, carrying cargo taken on at the
    // loading terminal before the run began.
    for _ in 0..2 {
        let train = b.add_train(
            patio_b,
            TRAIN_CAPACITY_T,
            TRAIN_CAPACITY_T,
            SPEED_LOADED_KMH,
            SPEED_EMPTY_KMH,
        );
        b.set_demand_origin(train, loader);
    }

    Ok(b.build()?)
}

// ── Analytical bound ──────────────────────────────────────────────────────────

/// Worst-case cycle and loading times across all terminals: round-trip to
/// the farthest link of the terminal's node at loaded speed, plus both
/// service times.  Used for the analytical productivity bound.
fn performance_metrics(network: &Network) -> (f64, f64) {
    let mut cycle_time = 0.0_f64;
    let mut max_loading_time = 0.0_f64;
    for terminal in &network.terminals {
        let loading = terminal.loading_hours.unwrap_or(0.0);
        let unloading = terminal.unloading_hours.unwrap_or(0.0);
        let round_trip = network
            .node(terminal.node)
            .links
            .iter()
            .map(|l| 2.0 * l.distance_km / SPEED_LOADED_KMH)
            .fold(0.0_f64, f64::max);
        cycle_time = cycle_time.max(loading + unloading + round_trip);
        max_loading_time = max_loading_time.max(loading);
    }
    (max_loading_time, cycle_time)
}

fn print_demands<'a>(demands: impl Iterator<Item = &'a Demand>) {
    for demand in demands {
        println!(
            "\nDemand Terminals {}-{}",
            demand.origin.0, demand.destiny.0
        );
        println!(
            "Final demand: {:.0} / goal: {:.0} ({})",
            demand.current,
            demand.total,
            if demand.achieved { "achieved" } else { "not achieved" }
        );
    }
}

fn main() -> Result<()> {
    let network = build_scenario()?;
    let train_count = network.trains.len();

    let mut model = RailModel::with_observer(network, ConsoleTrace);
    let mut sim = Simulator::new();

    println!("######## Beginning simulation\n");
    sim.run(&mut model, HORIZON_HOURS)?;
    println!("\n######## End of simulation\n");

    // ── Performance report ────────────────────────────────────────────────
    let (max_loading_time, cycle_time) = performance_metrics(model.network());
    let max_trains = cycle_time / max_loading_time;
    let analytical =
        (train_count as f64).min(max_trains) * TRAIN_CAPACITY_T / cycle_time;
    let productivity = model.productivity();
    let numerical = productivity.last().copied().unwrap_or(0.0);

    println!("Performance data:\n");
    println!("Numerical productivity: {numerical:.0} t/h");
    println!("Analytical productivity: {analytical:.0} t/h");
    println!("Total queue time: {:.1} h", model.total_queue_time());
    print_demands(model.demands());

    // ── CSV export ────────────────────────────────────────────────────────
    let out_dir = Path::new("output");
    fs::create_dir_all(out_dir)?;
    let mut writer = CsvReportWriter::new(out_dir)?;
    writer.write_model(&model)?;
    writer.finish()?;
    println!("\nReport series written to {}", out_dir.display());

    Ok(())
}
