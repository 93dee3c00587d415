//! `MetricsObserver<W>`: bridges `StepObserver` to an `OutputWriter`.

use tracing::warn;
use vc_core::Step;
use vc_sim::{ModelView, StepObserver, StepReport};

use crate::row::StepEventsRow;
use crate::stats::{level_occupancy, step_metrics};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`StepObserver`] that writes metrics, per-level occupancy, and step
/// events to any [`OutputWriter`].
///
/// Metrics and level rows are taken at the top of every `interval`-th step,
/// before the step mutates anything, plus once more for the final state when
/// the run ends.  Event rows are written for every step.
///
/// The writer is flushed at the end of every run, so one observer may be
/// passed to several consecutive `run` calls on the same model; a step shared
/// by one run's end and the next run's start is written once.
///
/// Errors from the writer are stored internally because `StepObserver`
/// methods have no return value.  After `model.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct MetricsObserver<W: OutputWriter> {
    writer:       W,
    interval:     u64,
    last_written: Option<Step>,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> MetricsObserver<W> {
    /// Observer writing snapshots every `interval` steps (0 is treated as 1).
    pub fn new(writer: W, interval: u64) -> Self {
        Self {
            writer,
            interval:     interval.max(1),
            last_written: None,
            last_error:   None,
        }
    }

    /// Take the stored write error (if any) after `model.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn snapshot(&mut self, view: &ModelView<'_>) {
        if self.last_written == Some(view.step()) {
            return;
        }
        self.last_written = Some(view.step());
        let result = self.writer.write_metrics(&step_metrics(view));
        self.store_err(result);
        let result = self.writer.write_levels(&level_occupancy(view));
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> StepObserver for MetricsObserver<W> {
    fn on_step_start(&mut self, step: Step, view: &ModelView<'_>) {
        if step.0.is_multiple_of(self.interval) {
            self.snapshot(view);
        }
    }

    fn on_step_end(&mut self, _step: Step, report: &StepReport) {
        let result = self.writer.write_events(&StepEventsRow::from(report));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _next_step: Step, view: &ModelView<'_>) {
        self.snapshot(view);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
