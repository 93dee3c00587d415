//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `step_metrics.csv`
//! - `level_occupancy.csv`
//! - `step_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{LevelOccupancyRow, OutputResult, StepEventsRow, StepMetricsRow};

/// Writes model output to three CSV files.
pub struct CsvWriter {
    metrics: Writer<File>,
    levels:  Writer<File>,
    events:  Writer<File>,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    ///
    /// `dir` is created if it does not exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut metrics = Writer::from_path(dir.join("step_metrics.csv"))?;
        metrics.write_record([
            "step",
            "occupants",
            "open_slots",
            "archived_occupants",
            "archived_open_slots",
            "occupant_log_mean",
            "occupant_log_std",
            "open_slot_log_mean",
            "open_slot_log_std",
            "occupant_spell_mean",
            "open_slot_spell_mean",
            "occupant_spell_std",
            "open_slot_spell_std",
        ])?;

        let mut levels = Writer::from_path(dir.join("level_occupancy.csv"))?;
        levels.write_record(["step", "level", "open_fraction"])?;

        let mut events = Writer::from_path(dir.join("step_events.csv"))?;
        events.write_record([
            "step",
            "retired_occupants",
            "retired_open_slots",
            "forced_retirements",
            "swaps",
            "withdrawn_vacated",
            "withdrawn_oversubscribed",
        ])?;

        Ok(Self { metrics, levels, events })
    }
}

/// Empty field for a missing statistic.
fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, row: &StepMetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.step.to_string(),
            row.occupants.to_string(),
            row.open_slots.to_string(),
            row.archived_occupants.to_string(),
            row.archived_open_slots.to_string(),
            opt(row.occupant_log_mean),
            opt(row.occupant_log_std),
            opt(row.open_slot_log_mean),
            opt(row.open_slot_log_std),
            opt(row.occupant_spell_mean),
            opt(row.open_slot_spell_mean),
            opt(row.occupant_spell_std),
            opt(row.open_slot_spell_std),
        ])?;
        Ok(())
    }

    fn write_levels(&mut self, rows: &[LevelOccupancyRow]) -> OutputResult<()> {
        for row in rows {
            self.levels.write_record(&[
                row.step.to_string(),
                row.level.to_string(),
                row.open_fraction.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_events(&mut self, row: &StepEventsRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.step.to_string(),
            row.retired_occupants.to_string(),
            row.retired_open_slots.to_string(),
            row.forced_retirements.to_string(),
            row.swaps.to_string(),
            row.withdrawn_vacated.to_string(),
            row.withdrawn_oversubscribed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.metrics.flush()?;
        self.levels.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
