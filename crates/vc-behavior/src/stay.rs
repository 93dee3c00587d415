//! A rule under which nobody ever moves.

use vc_core::SimRng;
use vc_entity::{Entity, Proposal};

use crate::{MoveRule, ProposeContext};

/// A [`MoveRule`] that always proposes [`Proposal::Stay`].
///
/// Forced retirements from a firing schedule still happen under this rule;
/// they bypass it in the scheduler.
pub struct StayRule;

impl MoveRule for StayRule {
    fn propose(
        &self,
        _entity: &Entity,
        _ctx:    &ProposeContext<'_>,
        _rng:    &mut SimRng,
    ) -> Proposal {
        Proposal::Stay
    }
}
