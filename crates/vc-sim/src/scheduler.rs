//! The two phases of a step.
//!
//! ```text
//! propose:  for id in shuffle(live ids):
//!             begin_step; proposal = forced retire | rule.propose
//!             coordinator.register(position, proposal)
//! commit:   for id in shuffle(live ids at phase start):
//!             Stay                        → log current position
//!             Retire                      → spawn opposite kind in place, archive
//!             Target(t), t vacated        → withdraw (stay)
//!             Target(t), demand(t) ≥ 2    → withdraw (stay)
//!             Target(t)                   → swap with t's current holder
//! ```
//!
//! The propose phase reads the hierarchy only through a shared borrow, so
//! every decision sees the state committed at the end of the previous step.
//! Entities spawned during the commit phase are not in its snapshot and join
//! from the next step.

use tracing::trace;
use vc_behavior::{MoveRule, ProposeContext};
use vc_core::{EntityId, PositionId, SimRng, Step};
use vc_entity::{Archive, Entity, EntityKind, EntityStore, Proposal};
use vc_hierarchy::{Hierarchy, Occupancy};

use crate::{Coordinator, StepReport};

// ── Propose ───────────────────────────────────────────────────────────────────

/// Collect a proposal from every live entity.  Returns the number of forced
/// retirements consumed.
pub(crate) fn propose_phase<R: MoveRule>(
    step:        Step,
    store:       &mut EntityStore,
    hierarchy:   &Hierarchy,
    coordinator: &mut Coordinator,
    rule:        &R,
    rng:         &mut SimRng,
) -> usize {
    let mut order = store.ids();
    rng.shuffle(&mut order);

    let ctx = ProposeContext::new(step, hierarchy);
    let mut forced = 0;
    for id in order {
        let entity = live_mut(store, id);
        entity.begin_step();
        let proposal = if entity.take_pending_retirement() {
            forced += 1;
            Proposal::Retire
        } else {
            rule.propose(entity, &ctx, rng)
        };
        entity.set_proposal(proposal);
        coordinator.register(placed(entity), proposal);
    }
    forced
}

// ── Commit ────────────────────────────────────────────────────────────────────

/// Resolve every proposal registered in `coordinator`.
pub(crate) fn commit_phase(
    step:        Step,
    store:       &mut EntityStore,
    hierarchy:   &mut Hierarchy,
    archive:     &mut Archive,
    coordinator: &Coordinator,
    rng:         &mut SimRng,
    report:      &mut StepReport,
) {
    let mut order = store.ids();
    rng.shuffle(&mut order);

    for id in order {
        match live(store, id).proposal() {
            Proposal::Stay => live_mut(store, id).stay(),

            Proposal::Retire => {
                let kind = retire(step, id, store, hierarchy, archive);
                report.count_retirement(kind);
            }

            Proposal::Target(target) if coordinator.is_vacated(target) => {
                trace!(entity = %id, %target, "withdrawn: target is being vacated");
                report.withdrawn_vacated += 1;
                live_mut(store, id).stay();
            }

            Proposal::Target(target) if coordinator.is_oversubscribed(target) => {
                trace!(
                    entity = %id,
                    %target,
                    demand = coordinator.demand(target),
                    "withdrawn: target is oversubscribed"
                );
                report.withdrawn_oversubscribed += 1;
                live_mut(store, id).stay();
            }

            Proposal::Target(target) => {
                if swap(id, target, store, hierarchy) {
                    report.swaps += 1;
                } else {
                    live_mut(store, id).stay();
                }
            }
        }
    }
}

// ── Primitives ────────────────────────────────────────────────────────────────

/// Retire `id`: a new entity of the opposite kind takes its position, and
/// the retiree moves to the archive under `step`.  Returns the retiree's kind.
pub(crate) fn retire(
    step:      Step,
    id:        EntityId,
    store:     &mut EntityStore,
    hierarchy: &mut Hierarchy,
    archive:   &mut Archive,
) -> EntityKind {
    let (kind, at) = {
        let e = live(store, id);
        (e.kind(), placed(e))
    };
    let heir_kind = kind.opposite();
    let heir = store.spawn(heir_kind, at, step.next());
    hierarchy.set_occupancy(at, Occupancy::new(heir, heir_kind));

    let Some(mut retiree) = store.remove(id) else {
        panic!("{id} vanished from the live set while retiring");
    };
    retiree.exit();
    archive.insert(step, retiree);
    kind
}

/// Exchange the positions of `id` and whoever currently holds `target`.
///
/// Returns `false` without touching anything if `id` already holds
/// `target`.
pub(crate) fn swap(
    id:        EntityId,
    target:    PositionId,
    store:     &mut EntityStore,
    hierarchy: &mut Hierarchy,
) -> bool {
    let origin = placed(live(store, id));
    let partner = hierarchy.position(target).occupant();
    if partner == id {
        return false;
    }
    hierarchy.swap(origin, target);
    live_mut(store, id).relocate(target);
    live_mut(store, partner).relocate(origin);
    true
}

// ── Lookup helpers ────────────────────────────────────────────────────────────

fn live(store: &EntityStore, id: EntityId) -> &Entity {
    match store.get(id) {
        Some(e) => e,
        None => panic!("{id} is referenced but not live"),
    }
}

fn live_mut(store: &mut EntityStore, id: EntityId) -> &mut Entity {
    match store.get_mut(id) {
        Some(e) => e,
        None => panic!("{id} is referenced but not live"),
    }
}

fn placed(entity: &Entity) -> PositionId {
    match entity.position() {
        Some(p) => p,
        None => panic!("live entity {} has no position", entity.id()),
    }
}
