//! Summary statistics over entity logs.
//!
//! All functions return `None` for an empty input instead of a NaN.

use vc_core::{Level, PositionId};
use vc_entity::{Entity, EntityKind};
use vc_sim::ModelView;

use crate::{LevelOccupancyRow, StepMetricsRow};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population (not sample) standard deviation.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Mean length of the spells in `log`.
///
/// A spell is a run of two or more identical consecutive entries, i.e. a
/// stretch of steps spent in one position.  `None` if the log has no spell.
pub fn mean_spell_length(log: &[Option<PositionId>]) -> Option<f64> {
    let mut spells = Vec::new();
    let mut run = 0usize;
    for (i, entry) in log.iter().enumerate() {
        run += 1;
        if log.get(i + 1) != Some(entry) {
            if run > 1 {
                spells.push(run as f64);
            }
            run = 0;
        }
    }
    mean(&spells)
}

/// Mean spell length of every `kind` entity that has a spell, in iteration
/// order.
pub fn spell_means<'e>(entities: impl IntoIterator<Item = &'e Entity>, kind: EntityKind) -> Vec<f64> {
    entities
        .into_iter()
        .filter(|e| e.kind() == kind)
        .filter_map(|e| mean_spell_length(e.log()))
        .collect()
}

/// Build the metrics row for the state `view` shows.
pub fn step_metrics(view: &ModelView<'_>) -> StepMetricsRow {
    let mut log_lens: [Vec<f64>; 2] = [Vec::new(), Vec::new()];
    for (kind, len) in view.log_lengths() {
        log_lens[slot(kind)].push(len as f64);
    }
    let [occ_lens, open_lens] = &log_lens;
    let occ_spells = &spell_means(view.entities(), EntityKind::Occupant);
    let open_spells = &spell_means(view.entities(), EntityKind::OpenSlot);

    StepMetricsRow {
        step:                 view.step().0,
        occupants:            view.live_count_of(EntityKind::Occupant) as u64,
        open_slots:           view.live_count_of(EntityKind::OpenSlot) as u64,
        archived_occupants:   view.archived_count(EntityKind::Occupant) as u64,
        archived_open_slots:  view.archived_count(EntityKind::OpenSlot) as u64,
        occupant_log_mean:    mean(occ_lens),
        occupant_log_std:     population_std(occ_lens),
        open_slot_log_mean:   mean(open_lens),
        open_slot_log_std:    population_std(open_lens),
        occupant_spell_mean:  mean(occ_spells),
        open_slot_spell_mean: mean(open_spells),
        occupant_spell_std:   population_std(occ_spells),
        open_slot_spell_std:  population_std(open_spells),
    }
}

/// One [`LevelOccupancyRow`] per level, top first.
pub fn level_occupancy(view: &ModelView<'_>) -> Vec<LevelOccupancyRow> {
    (0..view.level_count())
        .map(|l| {
            let level = Level(l as u16);
            LevelOccupancyRow {
                step:          view.step().0,
                level:         level.0,
                open_fraction: view.open_fraction(level),
            }
        })
        .collect()
}

#[inline]
fn slot(kind: EntityKind) -> usize {
    match kind {
        EntityKind::Occupant => 0,
        EntityKind::OpenSlot => 1,
    }
}
