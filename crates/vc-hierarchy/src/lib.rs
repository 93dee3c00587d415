//! `vc-hierarchy`: the fixed grid of positions.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`position`]   | `Position`, `Occupancy`: one slot and its occupant log       |
//! | [`hierarchy`]  | `Hierarchy`: `Vec<Vec<Position>>` indexed by level then index |
//! | [`error`]      | `HierarchyError`, `HierarchyResult<T>`                        |
//!
//! # Occupancy model
//!
//! A position always holds exactly one entity.  The position stores the
//! occupant's id together with its kind, so the move rule can look for
//! dissimilar-kind targets without touching the entity arena.  The scheduler
//! keeps the two sides consistent; [`Hierarchy::check_occupancy`] verifies
//! the back-references against the live [`EntityStore`][vc_entity::EntityStore].

pub mod error;
pub mod hierarchy;
pub mod position;

#[cfg(test)]
mod tests;

pub use error::{HierarchyError, HierarchyResult};
pub use hierarchy::Hierarchy;
pub use position::{Occupancy, Position};
