//! The `MoveRule` trait: the propose-phase extension point.

use vc_core::SimRng;
use vc_entity::{Entity, Proposal};

use crate::ProposeContext;

/// Pluggable move selection.
///
/// Called once per live entity per step, before any position changes.  The
/// returned [`Proposal`] is all the rule contributes; it must not depend on
/// which other entities have already proposed this step.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysRetireAtBottom { bottom: Level }
///
/// impl MoveRule for AlwaysRetireAtBottom {
///     fn propose(&self, entity: &Entity, _ctx: &ProposeContext<'_>, _rng: &mut SimRng) -> Proposal {
///         match entity.position() {
///             Some(p) if p.level == self.bottom => Proposal::Retire,
///             _ => Proposal::Stay,
///         }
///     }
/// }
/// ```
pub trait MoveRule: Send + Sync + 'static {
    fn propose(
        &self,
        entity: &Entity,
        ctx:    &ProposeContext<'_>,
        rng:    &mut SimRng,
    ) -> Proposal;
}
