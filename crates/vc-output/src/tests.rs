//! Tests for vc-output.

#[cfg(test)]
mod stats_tests {
    use vc_core::{Level, PositionId};

    use vc_core::{MoveParams, Step};
    use vc_entity::{EntityKind, EntityStore};

    use crate::stats::{mean, mean_spell_length, population_std, spell_means};

    fn p(i: u32) -> Option<PositionId> {
        Some(PositionId::new(Level(0), i))
    }

    #[test]
    fn empty_inputs_give_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std(&[]), None);
        assert_eq!(mean_spell_length(&[]), None);
    }

    #[test]
    fn mean_and_population_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        assert_eq!(population_std(&v), Some(2.0));
        assert_eq!(population_std(&[3.0]), Some(0.0));
    }

    #[test]
    fn spells_are_runs_of_two_or_more() {
        // Runs: 3, 1, 2, 1 → spells 3 and 2.
        let log = [p(0), p(0), p(0), p(1), p(2), p(2), p(3)];
        assert_eq!(mean_spell_length(&log), Some(2.5));
    }

    #[test]
    fn no_repeated_entries_means_no_spell() {
        assert_eq!(mean_spell_length(&[p(0), p(1), p(0)]), None);
        assert_eq!(mean_spell_length(&[p(4)]), None);
    }

    #[test]
    fn exit_entry_ends_a_spell() {
        assert_eq!(mean_spell_length(&[p(1), p(1), None]), Some(2.0));
    }

    #[test]
    fn spell_means_spread_per_kind() {
        let at = |l: u16, i: u32| PositionId::new(Level(l), i);
        let mut store = EntityStore::new(MoveParams::Scalar(0.0), MoveParams::Scalar(1.0));

        // Four steps in one position: a single spell of 4.
        let long = store.spawn(EntityKind::Occupant, at(0, 0), Step::ZERO);
        for _ in 0..3 {
            let e = store.get_mut(long).unwrap();
            e.begin_step();
            e.stay();
        }

        // Two steps in each of two positions: spells 2 and 2.
        let short = store.spawn(EntityKind::Occupant, at(1, 0), Step::ZERO);
        let e = store.get_mut(short).unwrap();
        e.begin_step();
        e.stay();
        e.begin_step();
        e.relocate(at(1, 1));
        e.begin_step();
        e.stay();

        // Moves every step: no spell, so it doesn't count.
        let slot = store.spawn(EntityKind::OpenSlot, at(1, 2), Step::ZERO);
        let e = store.get_mut(slot).unwrap();
        e.begin_step();
        e.relocate(at(1, 3));

        let occ = spell_means(store.iter(), EntityKind::Occupant);
        assert_eq!(occ, [4.0, 2.0]);
        assert_eq!(mean(&occ), Some(3.0));
        assert_eq!(population_std(&occ), Some(1.0));

        let open = spell_means(store.iter(), EntityKind::OpenSlot);
        assert!(open.is_empty());
        assert_eq!(population_std(&open), None);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{LevelOccupancyRow, StepEventsRow, StepMetricsRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn metrics_row(step: u64) -> StepMetricsRow {
        StepMetricsRow {
            step,
            occupants:            7,
            open_slots:           3,
            archived_occupants:   1,
            archived_open_slots:  0,
            occupant_log_mean:    Some(2.5),
            occupant_log_std:     Some(0.5),
            open_slot_log_mean:   Some(1.0),
            open_slot_log_std:    Some(0.0),
            occupant_spell_mean:  Some(2.0),
            open_slot_spell_mean: None,
            occupant_spell_std:   Some(0.5),
            open_slot_spell_std:  None,
        }
    }

    fn read(dir: &TempDir, file: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("step_metrics.csv").exists());
        assert!(dir.path().join("level_occupancy.csv").exists());
        assert!(dir.path().join("step_events.csv").exists());
    }

    #[test]
    fn missing_output_dir_is_created() {
        let dir = tmp();
        let nested = dir.path().join("run").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("step_metrics.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, _) = read(&dir, "level_occupancy.csv");
        assert_eq!(headers, ["step", "level", "open_fraction"]);

        let (headers, _) = read(&dir, "step_metrics.csv");
        assert_eq!(headers.len(), 13);
        assert_eq!(headers[0], "step");
        assert_eq!(headers[10], "open_slot_spell_mean");
        assert_eq!(headers[11], "occupant_spell_std");
        assert_eq!(headers[12], "open_slot_spell_std");

        let (headers, _) = read(&dir, "step_events.csv");
        assert_eq!(headers[4], "swaps");
    }

    #[test]
    fn metrics_row_with_missing_statistic() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_metrics(&metrics_row(4)).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "step_metrics.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "4");  // step
        assert_eq!(&rows[0][1], "7");  // occupants
        assert_eq!(&rows[0][5], "2.5"); // occupant_log_mean
        assert_eq!(&rows[0][10], "");   // open_slot_spell_mean
        assert_eq!(&rows[0][11], "0.5"); // occupant_spell_std
        assert_eq!(&rows[0][12], "");   // open_slot_spell_std
    }

    #[test]
    fn level_and_event_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_levels(&[
            LevelOccupancyRow { step: 2, level: 0, open_fraction: 0.25 },
            LevelOccupancyRow { step: 2, level: 1, open_fraction: 0.5 },
        ])
        .unwrap();
        w.write_events(&StepEventsRow {
            step:                     2,
            retired_occupants:        1,
            retired_open_slots:       0,
            forced_retirements:       0,
            swaps:                    3,
            withdrawn_vacated:        1,
            withdrawn_oversubscribed: 2,
        })
        .unwrap();
        w.finish().unwrap();

        let (_, levels) = read(&dir, "level_occupancy.csv");
        assert_eq!(levels.len(), 2);
        assert_eq!(&levels[1][1], "1");
        assert_eq!(&levels[1][2], "0.5");

        let (_, events) = read(&dir, "step_events.csv");
        assert_eq!(&events[0][4], "3");
        assert_eq!(&events[0][6], "2");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use vc_core::{MobilityConfig, MoveParams, TransitionMatrix};
    use vc_sim::MobilityModelBuilder;

    use crate::row::{LevelOccupancyRow, StepEventsRow, StepMetricsRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, MetricsObserver, OutputError, OutputResult};

    fn config() -> MobilityConfig {
        let mut cfg = MobilityConfig::new(vec![2, 4, 6], TransitionMatrix::cascade(3, 0.2, 0.6, 0.2));
        cfg.seed = 8;
        cfg.initial_open_fraction = 0.5;
        cfg.occupant_retirement = MoveParams::Scalar(0.3);
        cfg
    }

    fn count_rows(dir: &TempDir, file: &str) -> usize {
        csv::Reader::from_path(dir.path().join(file)).unwrap().records().count()
    }

    #[test]
    fn run_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MobilityModelBuilder::new(config()).build().unwrap();
        let mut obs = MetricsObserver::new(CsvWriter::new(dir.path()).unwrap(), 1);
        model.run(5, &mut obs);
        assert!(obs.take_error().is_none());

        // Steps 0..5 at step start plus the final state.
        assert_eq!(count_rows(&dir, "step_metrics.csv"), 6);
        assert_eq!(count_rows(&dir, "level_occupancy.csv"), 6 * 3);
        assert_eq!(count_rows(&dir, "step_events.csv"), 5);
    }

    #[test]
    fn interval_thins_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MobilityModelBuilder::new(config()).build().unwrap();
        let mut obs = MetricsObserver::new(CsvWriter::new(dir.path()).unwrap(), 4);
        model.run(8, &mut obs);
        // Steps 0 and 4, then the final state at step 8.
        assert_eq!(count_rows(&dir, "step_metrics.csv"), 3);
        assert_eq!(count_rows(&dir, "step_events.csv"), 8);
    }

    #[test]
    fn first_metrics_row_matches_initial_population() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MobilityModelBuilder::new(config()).build().unwrap();
        let mut obs = MetricsObserver::new(CsvWriter::new(dir.path()).unwrap(), 1);
        model.run(1, &mut obs);

        let mut rdr = csv::Reader::from_path(dir.path().join("step_metrics.csv")).unwrap();
        let first = rdr.records().next().unwrap().unwrap();
        assert_eq!(&first[0], "0");
        assert_eq!(&first[1], "6"); // 1 + 2 + 3 occupants
        assert_eq!(&first[2], "6");
        assert_eq!(&first[5], "1"); // every log holds its placement only
        assert_eq!(&first[6], "0");
        assert_eq!(&first[9], "");  // no spells yet
        assert_eq!(&first[11], "");
    }

    #[test]
    fn observer_spans_consecutive_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MobilityModelBuilder::new(config()).build().unwrap();
        let mut obs = MetricsObserver::new(CsvWriter::new(dir.path()).unwrap(), 1);
        model.run(3, &mut obs);
        model.run(2, &mut obs);
        assert!(obs.take_error().is_none());

        // Read while the writer is still alive: only explicit flushes count.
        // Snapshots at steps 0..=5, step 3 shared by both runs.
        assert_eq!(count_rows(&dir, "step_metrics.csv"), 6);
        assert_eq!(count_rows(&dir, "step_events.csv"), 5);

        let mut rdr = csv::Reader::from_path(dir.path().join("step_metrics.csv")).unwrap();
        let steps: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(steps, ["0", "1", "2", "3", "4", "5"]);
        drop(obs);
    }

    /// A writer whose every call fails.
    struct Broken {
        calls: usize,
    }

    impl Broken {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("call {}", self.calls))))
        }
    }

    impl OutputWriter for Broken {
        fn write_metrics(&mut self, _row: &StepMetricsRow) -> OutputResult<()> {
            self.fail()
        }
        fn write_levels(&mut self, _rows: &[LevelOccupancyRow]) -> OutputResult<()> {
            self.fail()
        }
        fn write_events(&mut self, _row: &StepEventsRow) -> OutputResult<()> {
            self.fail()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.fail()
        }
    }

    #[test]
    fn only_first_error_is_kept() {
        let mut model = MobilityModelBuilder::new(config()).build().unwrap();
        let mut obs = MetricsObserver::new(Broken { calls: 0 }, 1);
        model.run(2, &mut obs);
        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: call 1");
        assert!(obs.take_error().is_none());
        assert!(obs.into_writer().calls > 1);
    }
}
