//! The `OutputWriter` trait implemented by output backends.

use crate::{LevelOccupancyRow, OutputResult, StepEventsRow, StepMetricsRow};

/// A sink for per-step rows.
///
/// Errors are returned to the caller; [`MetricsObserver`][crate::MetricsObserver]
/// keeps the first one for [`take_error`][crate::MetricsObserver::take_error].
pub trait OutputWriter {
    fn write_metrics(&mut self, row: &StepMetricsRow) -> OutputResult<()>;

    /// One row per level for the same step.
    fn write_levels(&mut self, rows: &[LevelOccupancyRow]) -> OutputResult<()>;

    fn write_events(&mut self, row: &StepEventsRow) -> OutputResult<()>;

    /// Flush everything written so far.
    ///
    /// May be called more than once; rows written after one call are
    /// flushed by the next.
    fn finish(&mut self) -> OutputResult<()>;
}
