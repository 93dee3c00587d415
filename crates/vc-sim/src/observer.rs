//! Step observer trait, per-step report, and the read-only model view.

use vc_core::{EntityId, Level, PositionId, Step};
use vc_entity::{Archive, Entity, EntityKind, EntityStore};
use vc_hierarchy::{Hierarchy, Position};

// ── StepReport ────────────────────────────────────────────────────────────────

/// What happened during one committed step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,

    pub retired_occupants:  usize,
    pub retired_open_slots: usize,

    /// Retirements that came from a firing order.  Included in the two
    /// counts above.
    pub forced_retirements: usize,

    pub swaps: usize,

    /// Target proposals dropped because the target's holder was retiring.
    pub withdrawn_vacated: usize,

    /// Target proposals dropped because the target was wanted by more than
    /// one entity.
    pub withdrawn_oversubscribed: usize,
}

impl StepReport {
    pub fn new(step: Step) -> Self {
        Self { step, ..Self::default() }
    }

    #[inline]
    pub fn retirements(&self) -> usize {
        self.retired_occupants + self.retired_open_slots
    }

    #[inline]
    pub fn withdrawals(&self) -> usize {
        self.withdrawn_vacated + self.withdrawn_oversubscribed
    }

    pub(crate) fn count_retirement(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Occupant => self.retired_occupants += 1,
            EntityKind::OpenSlot => self.retired_open_slots += 1,
        }
    }
}

// ── ModelView ─────────────────────────────────────────────────────────────────

/// Read-only query surface over a model between steps.
///
/// This is everything statistics and output code gets to see.
pub struct ModelView<'a> {
    step:      Step,
    hierarchy: &'a Hierarchy,
    entities:  &'a EntityStore,
    archive:   &'a Archive,
}

impl<'a> ModelView<'a> {
    pub(crate) fn new(
        step:      Step,
        hierarchy: &'a Hierarchy,
        entities:  &'a EntityStore,
        archive:   &'a Archive,
    ) -> Self {
        Self { step, hierarchy, entities, archive }
    }

    /// The next step to execute.
    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    // ── Live entities ─────────────────────────────────────────────────────

    pub fn live_count(&self) -> usize {
        self.entities.len()
    }

    pub fn live_count_of(&self, kind: EntityKind) -> usize {
        self.entities.count(kind)
    }

    /// Every live entity, ascending id.
    pub fn entities(&self) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter()
    }

    /// `(kind, log length)` for every live entity.
    pub fn log_lengths(&self) -> impl Iterator<Item = (EntityKind, usize)> + 'a {
        self.entities.iter().map(|e| (e.kind(), e.log().len()))
    }

    // ── Archive ───────────────────────────────────────────────────────────

    pub fn archived_count(&self, kind: EntityKind) -> usize {
        self.archive.count(kind)
    }

    pub fn archived_total(&self) -> usize {
        self.archive.len()
    }

    /// Retirees of `kind` archived at `step`.
    pub fn archived_at(&self, kind: EntityKind, step: Step) -> &'a [Entity] {
        self.archive.at(kind, step)
    }

    /// Look up an entity by id, live or retired.
    pub fn resolve(&self, id: EntityId) -> Option<&'a Entity> {
        self.entities.get(id).or_else(|| self.archive.get(id))
    }

    // ── Positions ─────────────────────────────────────────────────────────

    pub fn level_count(&self) -> usize {
        self.hierarchy.level_count()
    }

    pub fn total_positions(&self) -> usize {
        self.hierarchy.len()
    }

    pub fn position(&self, id: PositionId) -> Option<&'a Position> {
        self.hierarchy.get(id)
    }

    /// Share of `level`'s positions held by open slots.
    pub fn open_fraction(&self, level: Level) -> f64 {
        self.hierarchy.open_fraction(level)
    }

    /// `open_fraction` for every level, top first.
    pub fn open_fractions(&self) -> Vec<f64> {
        self.hierarchy
            .levels()
            .map(|(level, _)| self.hierarchy.open_fraction(level))
            .collect()
    }
}

// ── StepObserver ──────────────────────────────────────────────────────────────

/// Callbacks invoked by [`MobilityModel::run`][crate::MobilityModel::run]
/// and [`MobilityModel::step_observed`][crate::MobilityModel::step_observed].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: vacancy printer
///
/// ```rust,ignore
/// struct VacancyPrinter;
///
/// impl StepObserver for VacancyPrinter {
///     fn on_step_start(&mut self, step: Step, view: &ModelView<'_>) {
///         println!("{step}: {} open slots", view.live_count_of(EntityKind::OpenSlot));
///     }
/// }
/// ```
pub trait StepObserver {
    /// Called before any state changes in `step`.
    fn on_step_start(&mut self, _step: Step, _view: &ModelView<'_>) {}

    /// Called once `step` has been committed and checked.
    fn on_step_end(&mut self, _step: Step, _report: &StepReport) {}

    /// Called once after the last step of a run.  `next_step` is the step
    /// that would execute next.
    fn on_run_end(&mut self, _next_step: Step, _view: &ModelView<'_>) {}
}

/// A [`StepObserver`] that does nothing.
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
