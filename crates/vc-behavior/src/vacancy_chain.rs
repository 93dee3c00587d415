//! `VacancyChainRule`: the move rule of the vacancy-chain model.
//!
//! | Kind       | Per-step decision                                                   |
//! |------------|---------------------------------------------------------------------|
//! | `Occupant` | If the level permits retirement: Bernoulli(retirement p) → `Retire` |
//! | `OpenSlot` | Bernoulli(move p); then draw a destination level from the row of    |
//! |            | the transition matrix.  Exit column → `Retire`; otherwise target a  |
//! |            | uniformly chosen occupant at that level, or stay if there is none.  |
//!
//! Open slots never target other open slots and occupants never target
//! anything, so an entity can't end up targeting its own position.

use vc_core::{Level, MobilityConfig, PositionId, RetirementScope, SimRng, TransitionMatrix};
use vc_entity::{Entity, EntityKind, Proposal};
use vc_hierarchy::Hierarchy;

use crate::{MoveRule, ProposeContext};

#[derive(Clone, Debug)]
pub struct VacancyChainRule {
    retirement_scope: RetirementScope,
    transitions:      TransitionMatrix,
}

impl VacancyChainRule {
    pub fn new(retirement_scope: RetirementScope, transitions: TransitionMatrix) -> Self {
        Self { retirement_scope, transitions }
    }

    /// The rule described by an already-validated configuration.
    pub fn from_config(config: &MobilityConfig) -> Self {
        Self::new(config.retirement_scope, config.transitions.clone())
    }

    #[inline]
    pub fn transitions(&self) -> &TransitionMatrix {
        &self.transitions
    }

    fn propose_occupant(&self, entity: &Entity, at: PositionId, rng: &mut SimRng) -> Proposal {
        if self.retirement_scope.permits(at.level) && rng.bernoulli(entity.params().at(at.level)) {
            Proposal::Retire
        } else {
            Proposal::Stay
        }
    }

    fn propose_open_slot(
        &self,
        entity:    &Entity,
        at:        PositionId,
        hierarchy: &Hierarchy,
        rng:       &mut SimRng,
    ) -> Proposal {
        if !rng.bernoulli(entity.params().at(at.level)) {
            return Proposal::Stay;
        }
        let destination = rng.draw_index(self.transitions.row(at.level));
        if destination == self.transitions.exit_index() {
            return Proposal::Retire;
        }
        match pick_dissimilar(hierarchy, Level(destination as u16), entity.kind(), rng) {
            Some(target) => Proposal::Target(target),
            None => Proposal::Stay,
        }
    }
}

impl MoveRule for VacancyChainRule {
    fn propose(&self, entity: &Entity, ctx: &ProposeContext<'_>, rng: &mut SimRng) -> Proposal {
        let Some(at) = entity.position() else {
            panic!("live entity {} has no position", entity.id());
        };
        match entity.kind() {
            EntityKind::Occupant => self.propose_occupant(entity, at, rng),
            EntityKind::OpenSlot => self.propose_open_slot(entity, at, ctx.hierarchy, rng),
        }
    }
}

/// Shuffle the positions of `level` and return the first one held by an
/// entity of a kind other than `kind`.
fn pick_dissimilar(
    hierarchy: &Hierarchy,
    level:     Level,
    kind:      EntityKind,
    rng:       &mut SimRng,
) -> Option<PositionId> {
    let mut candidates: Vec<PositionId> = hierarchy.level(level).iter().map(|p| p.id()).collect();
    rng.shuffle(&mut candidates);
    candidates
        .into_iter()
        .find(|&id| hierarchy.position(id).occupant_kind() != kind)
}
