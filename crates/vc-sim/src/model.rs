//! The `MobilityModel` struct and its step loop.

use tracing::{debug, info};
use vc_behavior::MoveRule;
use vc_core::{MobilityConfig, SimRng, Step};
use vc_entity::{Archive, EntityKind, EntityStore};
use vc_hierarchy::Hierarchy;

use crate::{Coordinator, ModelView, NoopObserver, StepObserver, StepReport, scheduler};

/// A running vacancy-chain model.
///
/// `MobilityModel<R>` owns every position, every live entity, the archive of
/// retirees, and the single RNG.  Each call to [`step`][Self::step] runs the
/// firing, propose and commit phases described in the crate docs.
///
/// Create via [`MobilityModelBuilder`][crate::MobilityModelBuilder].
pub struct MobilityModel<R: MoveRule> {
    pub(crate) config: MobilityConfig,

    /// The next step to execute.
    pub(crate) step: Step,

    pub(crate) rng: SimRng,

    pub(crate) hierarchy: Hierarchy,

    pub(crate) entities: EntityStore,

    pub(crate) archive: Archive,

    /// Cleared at the end of every step.
    pub(crate) coordinator: Coordinator,

    pub(crate) rule: R,
}

impl<R: MoveRule> MobilityModel<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run `steps` steps, then call `observer.on_run_end`.
    pub fn run<O: StepObserver>(&mut self, steps: u64, observer: &mut O) {
        for _ in 0..steps {
            self.step_observed(observer);
        }
        observer.on_run_end(self.step, &self.view());
    }

    /// Execute one step without an observer.
    pub fn step(&mut self) -> StepReport {
        self.step_observed(&mut NoopObserver)
    }

    /// Execute one step, reporting to `observer`.
    ///
    /// # Panics
    ///
    /// If the occupancy bijection between positions and live entities does
    /// not hold after the commit phase.  That can only happen through a bug
    /// in the step protocol or in a [`MoveRule`] that proposes a target it
    /// did not read from the hierarchy.
    pub fn step_observed<O: StepObserver>(&mut self, observer: &mut O) -> StepReport {
        let now = self.step;
        observer.on_step_start(now, &self.view());

        let mut report = StepReport::new(now);
        self.apply_firings(now);

        report.forced_retirements = scheduler::propose_phase(
            now,
            &mut self.entities,
            &self.hierarchy,
            &mut self.coordinator,
            &self.rule,
            &mut self.rng,
        );
        scheduler::commit_phase(
            now,
            &mut self.entities,
            &mut self.hierarchy,
            &mut self.archive,
            &self.coordinator,
            &mut self.rng,
            &mut report,
        );

        self.hierarchy.record_all();
        self.coordinator.reset();
        if let Err(e) = self.hierarchy.check_occupancy(&self.entities) {
            panic!("occupancy broken after {now}: {e}");
        }

        debug!(
            step = %now,
            retirements = report.retirements(),
            forced = report.forced_retirements,
            swaps = report.swaps,
            withdrawn_vacated = report.withdrawn_vacated,
            withdrawn_oversubscribed = report.withdrawn_oversubscribed,
            "step committed"
        );
        observer.on_step_end(now, &report);

        self.step = now.next();
        report
    }

    /// Read-only view of the current state.
    pub fn view(&self) -> ModelView<'_> {
        ModelView::new(self.step, &self.hierarchy, &self.entities, &self.archive)
    }

    /// The next step to execute.
    #[inline]
    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn config(&self) -> &MobilityConfig {
        &self.config
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    // ── Perturbation ──────────────────────────────────────────────────────

    /// Flag occupants named by this step's firing orders.  Each occupant at
    /// an ordered level draws independently, in position order.  Returns how
    /// many distinct occupants were newly flagged.
    pub(crate) fn apply_firings(&mut self, now: Step) -> usize {
        let mut total = 0;
        for firing in self.config.firing_schedule.at(now) {
            let mut marked = 0usize;
            for position in self.hierarchy.level(firing.level) {
                if position.occupant_kind() != EntityKind::Occupant {
                    continue;
                }
                if !self.rng.bernoulli(firing.probability) {
                    continue;
                }
                if let Some(entity) = self.entities.get_mut(position.occupant()) {
                    if !entity.is_pending_retirement() {
                        marked += 1;
                    }
                    entity.mark_for_retirement();
                }
            }
            info!(
                step = %now,
                level = %firing.level,
                probability = firing.probability,
                marked,
                "firing order applied"
            );
            total += marked;
        }
        total
    }
}
