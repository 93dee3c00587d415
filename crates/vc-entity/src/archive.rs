//! Retired entities, kept for historical queries.

use std::collections::BTreeMap;

use vc_core::{EntityId, Step};

use crate::{Entity, EntityKind};

/// Store of retired entities keyed by `(kind, retirement step)`.
///
/// Every retiree of a bucket is kept.  A secondary index resolves an
/// `EntityId` to its bucket so ids held by observers stay resolvable.
#[derive(Default)]
pub struct Archive {
    buckets: BTreeMap<(EntityKind, Step), Vec<Entity>>,
    index:   BTreeMap<EntityId, (EntityKind, Step)>,
    counts:  [usize; 2],
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive `entity` under the step in which it retired.
    pub fn insert(&mut self, step: Step, entity: Entity) {
        let key = (entity.kind(), step);
        self.index.insert(entity.id(), key);
        self.counts[slot(entity.kind())] += 1;
        self.buckets.entry(key).or_default().push(entity);
    }

    /// Retirees of `kind` archived at `step`.
    pub fn at(&self, kind: EntityKind, step: Step) -> &[Entity] {
        self.buckets.get(&(kind, step)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total retirees of `kind` across all steps.
    #[inline]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts[slot(kind)]
    }

    pub fn len(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a retired entity by id.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let key = self.index.get(&id)?;
        self.buckets.get(key)?.iter().find(|e| e.id() == id)
    }

    /// Step at which `id` retired, if it has.
    pub fn retired_at(&self, id: EntityId) -> Option<Step> {
        self.index.get(&id).map(|&(_, step)| step)
    }

    /// All retirees of `kind`, in step order.
    pub fn iter_kind(&self, kind: EntityKind) -> impl Iterator<Item = (Step, &Entity)> + '_ {
        self.buckets
            .iter()
            .filter(move |((k, _), _)| *k == kind)
            .flat_map(|(&(_, step), v)| v.iter().map(move |e| (step, e)))
    }
}

#[inline]
fn slot(kind: EntityKind) -> usize {
    match kind {
        EntityKind::Occupant => 0,
        EntityKind::OpenSlot => 1,
    }
}
