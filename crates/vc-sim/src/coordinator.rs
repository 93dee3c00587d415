//! `Coordinator`: the only state shared between entities within a step.

use rustc_hash::{FxHashMap, FxHashSet};
use vc_core::PositionId;
use vc_entity::Proposal;

/// Per-step record of what entities asked for.
///
/// Written only during the propose phase and read only during the commit
/// phase; [`reset`][Self::reset] runs at the end of every step.
#[derive(Default, Debug)]
pub struct Coordinator {
    /// Positions whose holder proposed to retire this step.
    vacated: FxHashSet<PositionId>,
    /// Multiset of proposed targets, as counts.
    desired: FxHashMap<PositionId, u32>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the proposal of the entity currently at `at`.
    pub fn register(&mut self, at: PositionId, proposal: Proposal) {
        match proposal {
            Proposal::Stay => {}
            Proposal::Retire => {
                self.vacated.insert(at);
            }
            Proposal::Target(target) => {
                *self.desired.entry(target).or_insert(0) += 1;
            }
        }
    }

    #[inline]
    pub fn is_vacated(&self, position: PositionId) -> bool {
        self.vacated.contains(&position)
    }

    /// How many entities proposed `position` as a target this step.
    #[inline]
    pub fn demand(&self, position: PositionId) -> u32 {
        self.desired.get(&position).copied().unwrap_or(0)
    }

    /// More than one entity wants `position`.
    #[inline]
    pub fn is_oversubscribed(&self, position: PositionId) -> bool {
        self.demand(position) > 1
    }

    /// Targets with demand of two or more.
    pub fn oversubscribed(&self) -> impl Iterator<Item = PositionId> + '_ {
        self.desired.iter().filter(|&(_, &n)| n > 1).map(|(&p, _)| p)
    }

    pub fn vacated_count(&self) -> usize {
        self.vacated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vacated.is_empty() && self.desired.is_empty()
    }

    pub fn reset(&mut self) {
        self.vacated.clear();
        self.desired.clear();
    }
}
