//! `rail-output` — CSV export of railsim post-run reporting series.
//!
//! Creates three files in the configured output directory:
//!
//! | File              | Contents                                        |
//! |-------------------|-------------------------------------------------|
//! | `queue_log.csv`   | one row per dispatch decision and its wait      |
//! | `production.csv`  | one row per delivery, keyed by route            |
//! | `demands.csv`     | the demand table with achievement flags         |
//!
//! # Usage
//!
//! ```rust,ignore
//! use rail_output::CsvReportWriter;
//!
//! let mut w = CsvReportWriter::new(Path::new("./output"))?;
//! w.write_model(&model)?;
//! w.finish()?;
//! ```

pub mod csv;
pub mod error;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
