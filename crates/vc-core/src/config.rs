//! Model configuration.
//!
//! Built by the application (or deserialised with the `serde` feature) and
//! handed to `MobilityModelBuilder`, which calls [`MobilityConfig::validate`]
//! before anything is allocated.

use std::collections::BTreeMap;

use crate::{ConfigError, CoreResult, Level, Step};

/// Tolerance for transition rows summing to one.
pub const NORMALISATION_TOLERANCE: f64 = 1e-6;

// ── MoveParams ────────────────────────────────────────────────────────────────

/// A move or retirement probability: one value for the whole hierarchy, or
/// one value per level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveParams {
    Scalar(f64),
    PerLevel(Vec<f64>),
}

impl MoveParams {
    /// Probability that applies at `level`.
    ///
    /// A per-level vector is validated against the level count at
    /// construction; a level past its end reads as 0.
    #[inline]
    pub fn at(&self, level: Level) -> f64 {
        match self {
            MoveParams::Scalar(p) => *p,
            MoveParams::PerLevel(v) => v.get(level.index()).copied().unwrap_or(0.0),
        }
    }

    fn validate(&self, what: &'static str, levels: usize) -> CoreResult<()> {
        match self {
            MoveParams::Scalar(p) => check_probability(what, *p),
            MoveParams::PerLevel(v) => {
                if v.len() != levels {
                    return Err(ConfigError::LengthMismatch { what, expected: levels, got: v.len() });
                }
                v.iter().try_for_each(|&p| check_probability(what, p))
            }
        }
    }
}

// ── RetirementScope ───────────────────────────────────────────────────────────

/// Where occupants are allowed to draw for retirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetirementScope {
    /// Only occupants of `Level::TOP` may retire.
    #[default]
    TopLevelOnly,
    /// Every level; combine with `MoveParams::PerLevel` for level-dependent
    /// rates.
    AllLevels,
}

impl RetirementScope {
    #[inline]
    pub fn permits(self, level: Level) -> bool {
        match self {
            RetirementScope::TopLevelOnly => level == Level::TOP,
            RetirementScope::AllLevels => true,
        }
    }
}

// ── TransitionMatrix ──────────────────────────────────────────────────────────

/// Destination probabilities for open slots.
///
/// Row `l` is the distribution over destinations for an open slot currently at
/// level `l`: entries `0..levels` are hierarchy levels and the final entry is
/// "exit the system".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionMatrix {
    rows: Vec<Vec<f64>>,
}

impl TransitionMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Stay-in-level / move-down-one / exit rows.
    ///
    /// At the bottom level there is nowhere further down, so the `down` mass
    /// is folded into `exit`.
    pub fn cascade(levels: usize, lateral: f64, down: f64, exit: f64) -> Self {
        let rows = (0..levels)
            .map(|l| {
                let mut row = vec![0.0; levels + 1];
                row[l] = lateral;
                if l + 1 < levels {
                    row[l + 1] = down;
                    row[levels] = exit;
                } else {
                    row[levels] = down + exit;
                }
                row
            })
            .collect();
        Self { rows }
    }

    /// Destination distribution for an open slot at `level`.
    #[inline]
    pub fn row(&self, level: Level) -> &[f64] {
        &self.rows[level.index()]
    }

    /// Number of rows (equals the level count once validated).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the "exit" column.
    #[inline]
    pub fn exit_index(&self) -> usize {
        self.rows.len()
    }

    fn validate(&self, levels: usize) -> CoreResult<()> {
        if self.rows.len() != levels {
            return Err(ConfigError::LengthMismatch {
                what:     "transition matrix",
                expected: levels,
                got:      self.rows.len(),
            });
        }
        for (l, row) in self.rows.iter().enumerate() {
            if row.len() != levels + 1 {
                return Err(ConfigError::LengthMismatch {
                    what:     "transition row",
                    expected: levels + 1,
                    got:      row.len(),
                });
            }
            row.iter().try_for_each(|&p| check_probability("transition", p))?;
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > NORMALISATION_TOLERANCE {
                return Err(ConfigError::NotNormalised { level: Level(l as u16), sum });
            }
        }
        Ok(())
    }
}

// ── Firing schedule ───────────────────────────────────────────────────────────

/// One firing order: every occupant at `level` is force-retired with
/// `probability`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Firing {
    pub level:       Level,
    pub probability: f64,
}

/// Scheduled perturbations, keyed by the step at which they fire.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiringSchedule {
    orders: BTreeMap<Step, Vec<Firing>>,
}

impl FiringSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a firing order at `step`.
    pub fn fire(mut self, step: Step, level: Level, probability: f64) -> Self {
        self.orders.entry(step).or_default().push(Firing { level, probability });
        self
    }

    /// Orders scheduled for `step` (empty if none).
    pub fn at(&self, step: Step) -> &[Firing] {
        self.orders.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn validate(&self, levels: usize) -> CoreResult<()> {
        for (&step, firings) in &self.orders {
            for firing in firings {
                if firing.level.index() >= levels {
                    return Err(ConfigError::UnknownLevel { step, level: firing.level });
                }
                check_probability("firing", firing.probability)?;
            }
        }
        Ok(())
    }
}

// ── MobilityConfig ────────────────────────────────────────────────────────────

/// Everything needed to construct a `MobilityModel`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobilityConfig {
    /// Number of positions at each level, top level first.
    pub positions_per_level: Vec<u32>,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Fraction of every level's positions that start as open slots.
    /// Applied per level and rounded down.
    pub initial_open_fraction: f64,

    /// Occupant retirement probability.
    pub occupant_retirement: MoveParams,

    /// Levels at which occupants may retire.
    pub retirement_scope: RetirementScope,

    /// Probability that an open slot attempts a move at all in a step.
    pub open_slot_move: MoveParams,

    /// Open-slot destination distribution per level.
    pub transitions: TransitionMatrix,

    /// Scheduled forced retirements.
    pub firing_schedule: FiringSchedule,
}

impl MobilityConfig {
    /// A configuration with the classic vacancy-chain defaults: open slots
    /// always try to move, only top-level occupants retire, and the
    /// transition matrix is left for the caller to supply.
    pub fn new(positions_per_level: Vec<u32>, transitions: TransitionMatrix) -> Self {
        Self {
            positions_per_level,
            seed: 0,
            initial_open_fraction: 0.0,
            occupant_retirement: MoveParams::Scalar(0.0),
            retirement_scope: RetirementScope::TopLevelOnly,
            open_slot_move: MoveParams::Scalar(1.0),
            transitions,
            firing_schedule: FiringSchedule::new(),
        }
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        self.positions_per_level.len()
    }

    /// Total number of positions across all levels.
    pub fn total_positions(&self) -> usize {
        self.positions_per_level.iter().map(|&n| n as usize).sum()
    }

    /// Check every invariant the model relies on.
    pub fn validate(&self) -> CoreResult<()> {
        let levels = self.level_count();
        if levels == 0 {
            return Err(ConfigError::EmptyHierarchy);
        }
        if levels > u16::MAX as usize {
            return Err(ConfigError::LengthMismatch {
                what:     "positions_per_level",
                expected: u16::MAX as usize,
                got:      levels,
            });
        }
        if let Some(l) = self.positions_per_level.iter().position(|&n| n == 0) {
            return Err(ConfigError::EmptyLevel(Level(l as u16)));
        }
        check_probability("initial open fraction", self.initial_open_fraction)?;
        self.occupant_retirement.validate("occupant retirement", levels)?;
        self.open_slot_move.validate("open slot move", levels)?;
        self.transitions.validate(levels)?;
        self.firing_schedule.validate(levels)
    }
}

fn check_probability(what: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { what, value })
    }
}
