//! `EntityStore`: the live-entity arena.
//!
//! Entities are keyed by a never-reused `EntityId` in a `BTreeMap`, so
//! iterating the live set is deterministic (ascending id) and the scheduler's
//! seeded shuffles replay exactly for a fixed seed.

use std::collections::BTreeMap;

use vc_core::{EntityId, MoveParams, PositionId, Step};

use crate::{Entity, EntityKind};

/// Arena of live entities plus the move parameters handed to newborns.
pub struct EntityStore {
    live:    BTreeMap<EntityId, Entity>,
    next_id: u32,

    occupant_params:  MoveParams,
    open_slot_params: MoveParams,
}

impl EntityStore {
    /// An empty store.  `occupant_params` and `open_slot_params` are given to
    /// every entity spawned of the respective kind.
    pub fn new(occupant_params: MoveParams, open_slot_params: MoveParams) -> Self {
        Self {
            live: BTreeMap::new(),
            next_id: 0,
            occupant_params,
            open_slot_params,
        }
    }

    /// Create a live entity of `kind` at `position` and return its id.
    ///
    /// `first_step` is the first step in which it takes part in the protocol:
    /// `Step::ZERO` for the initial population, the following step for an
    /// entity born during a commit phase.
    pub fn spawn(&mut self, kind: EntityKind, position: PositionId, first_step: Step) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let params = match kind {
            EntityKind::Occupant => self.occupant_params.clone(),
            EntityKind::OpenSlot => self.open_slot_params.clone(),
        };
        self.live.insert(id, Entity::new(id, kind, position, params, first_step));
        id
    }

    /// Remove a live entity (retirement).  The caller is responsible for
    /// putting it in the archive.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.live.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.live.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.live.get_mut(&id)
    }

    #[inline]
    /// Snapshot of live ids in ascending order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.live.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.live.values()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of live entities of `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.live.values().filter(|e| e.kind() == kind).count()
    }

    /// Total ids handed out so far (live and retired).
    pub fn allocated(&self) -> usize {
        self.next_id as usize
    }
}
