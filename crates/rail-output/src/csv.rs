//! CSV report backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use rail_sim::{RailModel, RailObserver};

use crate::error::OutputResult;

/// Writes a finished model's reporting series to three CSV files.
pub struct CsvReportWriter {
    queue_log:  Writer<File>,
    production: Writer<File>,
    demands:    Writer<File>,
    finished:   bool,
}

impl CsvReportWriter {
    /// Open (or create) the three CSV files in `dir` and write header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut queue_log = Writer::from_path(dir.join("queue_log.csv"))?;
        queue_log.write_record(["decision_time", "wait"])?;

        let mut production = Writer::from_path(dir.join("production.csv"))?;
        production.write_record(["origin", "destiny", "time", "quantity"])?;

        let mut demands = Writer::from_path(dir.join("demands.csv"))?;
        demands.write_record(["origin", "destiny", "total", "current", "achieved"])?;

        Ok(Self {
            queue_log,
            production,
            demands,
            finished: false,
        })
    }

    /// Export every reporting series of `model` in one pass.
    pub fn write_model<O: RailObserver>(&mut self, model: &RailModel<O>) -> OutputResult<()> {
        for sample in model.queue_samples() {
            self.queue_log.write_record(&[
                sample.decision_time.to_string(),
                sample.wait.to_string(),
            ])?;
        }

        for (&(origin, destiny), series) in model.production().loaded_routes() {
            for sample in series {
                self.production.write_record(&[
                    origin.0.to_string(),
                    destiny.0.to_string(),
                    sample.time.to_string(),
                    sample.quantity.to_string(),
                ])?;
            }
        }

        for demand in model.demands() {
            self.demands.write_record(&[
                demand.origin.0.to_string(),
                demand.destiny.0.to_string(),
                demand.total.to_string(),
                demand.current.to_string(),
                (demand.achieved as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.queue_log.flush()?;
        self.production.flush()?;
        self.demands.flush()?;
        Ok(())
    }
}
