//! Plain data row types written by output backends.

use vc_sim::StepReport;

/// Population summary at the top of one step.
///
/// Statistics over an empty population are `None` and written as an empty
/// field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMetricsRow {
    pub step:                u64,
    pub occupants:           u64,
    pub open_slots:          u64,
    pub archived_occupants:  u64,
    pub archived_open_slots: u64,

    /// Mean and population standard deviation of live occupants' log lengths.
    pub occupant_log_mean:  Option<f64>,
    pub occupant_log_std:   Option<f64>,
    pub open_slot_log_mean: Option<f64>,
    pub open_slot_log_std:  Option<f64>,

    /// Mean over live entities of their mean spell length.  Entities
    /// without a spell don't contribute.
    pub occupant_spell_mean:  Option<f64>,
    pub open_slot_spell_mean: Option<f64>,

    /// Population standard deviation of the same per-entity spell means.
    pub occupant_spell_std:  Option<f64>,
    pub open_slot_spell_std: Option<f64>,
}

/// Share of one level's positions held by open slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelOccupancyRow {
    pub step:          u64,
    pub level:         u16,
    pub open_fraction: f64,
}

/// What happened during one committed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEventsRow {
    pub step:                     u64,
    pub retired_occupants:        u64,
    pub retired_open_slots:       u64,
    pub forced_retirements:       u64,
    pub swaps:                    u64,
    pub withdrawn_vacated:        u64,
    pub withdrawn_oversubscribed: u64,
}

impl From<&StepReport> for StepEventsRow {
    fn from(r: &StepReport) -> Self {
        Self {
            step:                     r.step.0,
            retired_occupants:        r.retired_occupants as u64,
            retired_open_slots:       r.retired_open_slots as u64,
            forced_retirements:       r.forced_retirements as u64,
            swaps:                    r.swaps as u64,
            withdrawn_vacated:        r.withdrawn_vacated as u64,
            withdrawn_oversubscribed: r.withdrawn_oversubscribed as u64,
        }
    }
}
