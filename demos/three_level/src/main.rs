//! three_level: a small vacancy-chain run.
//!
//! A 10 / 30 / 60 position hierarchy.  Open slots drift down one level at a
//! time and leave from the bottom; top-level occupants retire at a steady
//! rate, opening the vacancies that start each chain.  At step 150 every
//! occupant of the middle level is fired with probability 0.5 to show the
//! shock travelling down.
//!
//! Output lands in `./output/three_level/`.  Set `RUST_LOG=debug` for a
//! per-step trace.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vc_core::{FiringSchedule, Level, MobilityConfig, MoveParams, Step, TransitionMatrix};
use vc_entity::EntityKind;
use vc_output::{CsvWriter, MetricsObserver, OutputWriter};
use vc_sim::{MobilityModelBuilder, ModelView, StepObserver, StepReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const POSITIONS:       [u32; 3] = [10, 30, 60];
const SEED:            u64      = 42;
const STEPS:           u64      = 300;
const OPEN_FRACTION:   f64      = 0.1;
const RETIREMENT:      f64      = 0.05;
const FIRING_STEP:     u64      = 150;
const FIRING_LEVEL:    u16      = 1;
const FIRING_P:        f64      = 0.5;
const REPORT_INTERVAL: u64      = 50;

// ── Observer wrapper to report progress ───────────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:       MetricsObserver<W>,
    swaps:       usize,
    retirements: usize,
    withdrawals: usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: MetricsObserver<W>) -> Self {
        Self { inner, swaps: 0, retirements: 0, withdrawals: 0 }
    }
}

impl<W: OutputWriter> StepObserver for ProgressObserver<W> {
    fn on_step_start(&mut self, step: Step, view: &ModelView<'_>) {
        if step.0 % REPORT_INTERVAL == 0 {
            let fractions: Vec<String> =
                view.open_fractions().iter().map(|f| format!("{f:.2}")).collect();
            info!(
                %step,
                open_slots = view.live_count_of(EntityKind::OpenSlot),
                archived = view.archived_total(),
                open_by_level = %fractions.join(" / "),
                "progress"
            );
        }
        self.inner.on_step_start(step, view);
    }

    fn on_step_end(&mut self, step: Step, report: &StepReport) {
        self.swaps += report.swaps;
        self.retirements += report.retirements();
        self.withdrawals += report.withdrawals();
        self.inner.on_step_end(step, report);
    }

    fn on_run_end(&mut self, next_step: Step, view: &ModelView<'_>) {
        self.inner.on_run_end(next_step, view);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let levels = POSITIONS.len();
    let mut config = MobilityConfig::new(
        POSITIONS.to_vec(),
        TransitionMatrix::cascade(levels, 0.2, 0.6, 0.2),
    );
    config.seed = SEED;
    config.initial_open_fraction = OPEN_FRACTION;
    config.occupant_retirement = MoveParams::Scalar(RETIREMENT);
    config.open_slot_move = MoveParams::PerLevel(vec![0.9, 0.8, 0.7]);
    config.firing_schedule =
        FiringSchedule::new().fire(Step(FIRING_STEP), Level(FIRING_LEVEL), FIRING_P);

    let mut model = MobilityModelBuilder::new(config).build()?;

    let out_dir = Path::new("output/three_level");
    let writer = CsvWriter::new(out_dir)?;
    let mut observer = ProgressObserver::new(MetricsObserver::new(writer, 1));

    let started = Instant::now();
    model.run(STEPS, &mut observer);
    let elapsed = started.elapsed();

    if let Some(e) = observer.inner.take_error() {
        return Err(e.into());
    }

    let view = model.view();
    info!(
        steps = STEPS,
        elapsed_ms = elapsed.as_millis() as u64,
        swaps = observer.swaps,
        retirements = observer.retirements,
        withdrawals = observer.withdrawals,
        archived_occupants = view.archived_count(EntityKind::Occupant),
        archived_open_slots = view.archived_count(EntityKind::OpenSlot),
        output = %out_dir.display(),
        "run complete"
    );
    Ok(())
}
