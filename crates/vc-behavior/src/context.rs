//! Read-only state passed to every [`MoveRule`][crate::MoveRule] call.

use vc_core::Step;
use vc_hierarchy::Hierarchy;

/// Snapshot of the hierarchy as committed at the end of the previous step.
///
/// Built once per propose phase and shared by every entity.  The scheduler
/// holds no mutable borrow of the hierarchy while a `ProposeContext` is live.
pub struct ProposeContext<'a> {
    /// Step being proposed for.
    pub step: Step,

    pub hierarchy: &'a Hierarchy,
}

impl<'a> ProposeContext<'a> {
    #[inline]
    pub fn new(step: Step, hierarchy: &'a Hierarchy) -> Self {
        Self { step, hierarchy }
    }
}
