use vc_core::{EntityId, PositionId};
use thiserror::Error;

/// Broken position/entity back-references.  Only produced by
/// [`Hierarchy::check_occupancy`][crate::Hierarchy::check_occupancy]; any of
/// these means the step protocol has been corrupted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("position {position} records occupant {recorded} which is not live")]
    OccupantNotLive {
        position: PositionId,
        recorded: EntityId,
    },

    #[error("position {position} records occupant {recorded} but that entity is at {actual:?}")]
    BackReference {
        position: PositionId,
        recorded: EntityId,
        actual:   Option<PositionId>,
    },

    #[error("position {position} records the wrong kind for {entity}")]
    KindMismatch {
        position: PositionId,
        entity:   EntityId,
    },

    #[error("{live} live entities for {positions} positions")]
    PopulationMismatch {
        positions: usize,
        live:      usize,
    },
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
