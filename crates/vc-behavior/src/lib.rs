//! `vc-behavior`: how entities decide what to propose each step.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                 |
//! |--------------------|----------------------------------------------------------|
//! | [`context`]        | `ProposeContext<'a>`: read-only state for the propose phase |
//! | [`rule`]           | `MoveRule` trait                                         |
//! | [`vacancy_chain`]  | `VacancyChainRule`: retirement and open-slot migration  |
//! | [`stay`]           | `StayRule`: never proposes anything                     |
//!
//! # Design notes
//!
//! A rule only returns a [`Proposal`][vc_entity::Proposal].  Registering it
//! with the per-step coordinator and acting on it are the scheduler's job
//! (vc-sim), so a rule never mutates shared state and can't observe any
//! other entity's decision for the current step.

pub mod context;
pub mod rule;
pub mod stay;
pub mod vacancy_chain;


pub use context::ProposeContext;
pub use rule::MoveRule;
pub use stay::StayRule;
pub use vacancy_chain::VacancyChainRule;
