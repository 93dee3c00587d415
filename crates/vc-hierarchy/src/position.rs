//! A single position and its occupant log.

use vc_core::{EntityId, PositionId};
use vc_entity::EntityKind;

/// Who currently holds a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Occupancy {
    pub entity: EntityId,
    pub kind:   EntityKind,
}

impl Occupancy {
    #[inline]
    pub fn new(entity: EntityId, kind: EntityKind) -> Self {
        Self { entity, kind }
    }
}

/// A fixed slot in the hierarchy.
///
/// `log` holds the occupant at placement time followed by one entry per
/// completed step.
#[derive(Clone, Debug)]
pub struct Position {
    id:        PositionId,
    occupancy: Occupancy,
    log:       Vec<EntityId>,
}

impl Position {
    pub fn new(id: PositionId, occupancy: Occupancy) -> Self {
        Self { id, occupancy, log: vec![occupancy.entity] }
    }

    #[inline]
    pub fn id(&self) -> PositionId {
        self.id
    }

    #[inline]
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    #[inline]
    pub fn occupant(&self) -> EntityId {
        self.occupancy.entity
    }

    #[inline]
    pub fn occupant_kind(&self) -> EntityKind {
        self.occupancy.kind
    }

    #[inline]
    pub fn log(&self) -> &[EntityId] {
        &self.log
    }

    /// Hand the position to a new occupant.  Does not touch the log.
    #[inline]
    pub fn set_occupancy(&mut self, occupancy: Occupancy) {
        self.occupancy = occupancy;
    }

    /// Append the current occupant to the log (end of step).
    #[inline]
    pub fn record(&mut self) {
        self.log.push(self.occupancy.entity);
    }
}
