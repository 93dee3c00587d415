//! `vc-output`: metrics and output writers for the vacancy-chain model.
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`row`]       | `StepMetricsRow`, `LevelOccupancyRow`, `StepEventsRow`       |
//! | [`stats`]     | mean / population std-dev / spell length over entity logs    |
//! | [`writer`]    | `OutputWriter` trait                                         |
//! | [`csv`]       | `CsvWriter`: `step_metrics.csv`, `level_occupancy.csv`, `step_events.csv` |
//! | [`observer`]  | `MetricsObserver<W>`: `StepObserver` driving any writer     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use vc_output::{CsvWriter, MetricsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = MetricsObserver::new(writer, 1);
//! model.run(500, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::MetricsObserver;
pub use row::{LevelOccupancyRow, StepEventsRow, StepMetricsRow};
pub use writer::OutputWriter;
