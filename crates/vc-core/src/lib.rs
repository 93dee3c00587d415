//! `vc-core`: foundational types for the vacancy-chain mobility model.
//!
//! This crate is a dependency of every other `vc-*` crate.  It has no `vc-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `Level`, `PositionId`                         |
//! | [`step`]        | `Step` counter                                            |
//! | [`rng`]         | `SimRng`, inverse-CDF and Bernoulli draws                 |
//! | [`config`]      | `MobilityConfig`, `MoveParams`, `TransitionMatrix`, …     |
//! | [`error`]       | `ConfigError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and config types.    |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    Firing, FiringSchedule, MobilityConfig, MoveParams, RetirementScope, TransitionMatrix,
};
pub use error::{ConfigError, CoreResult};
pub use ids::{EntityId, Level, PositionId};
pub use rng::{SimRng, inverse_cdf};
pub use step::Step;
