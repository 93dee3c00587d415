//! `vc-entity`: the mobile units of the model and where they are kept.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`entity`]   | `Entity`, `EntityKind`, `Proposal`                           |
//! | [`store`]    | `EntityStore`: arena of live entities, id allocation        |
//! | [`archive`]  | `Archive`: retired entities keyed by `(kind, step)`         |
//!
//! Retirement moves an `Entity` out of the store and into the archive; it is
//! never dropped, so its id and final log stay readable for the whole run.

pub mod archive;
pub mod entity;
pub mod store;


pub use archive::Archive;
pub use entity::{Entity, EntityKind, Proposal};
pub use store::EntityStore;
