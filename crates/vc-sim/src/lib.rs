//! `vc-sim`: the step driver of the vacancy-chain mobility model.
//!
//! # Two-phase step
//!
//! ```text
//! step s:
//!   ① observer.on_step_start(s, view)   state as committed at end of s-1
//!   ② Firings   occupants at each ordered level draw Bernoulli(p) and are
//!               flagged for forced retirement.
//!   ③ Propose   shuffled live ids; each entity (or its forced flag) yields
//!               a Proposal, registered in the Coordinator.
//!   ④ Commit    shuffled snapshot of the same ids; stay / retire /
//!               withdraw / swap.
//!   ⑤ Logs      every position appends its current occupant.
//!   ⑥ Reset     Coordinator cleared; occupancy bijection checked.
//!   ⑦ observer.on_step_end(s, report)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vc_core::{MobilityConfig, TransitionMatrix};
//! use vc_sim::{MobilityModelBuilder, NoopObserver};
//!
//! let mut config = MobilityConfig::new(vec![4, 8, 16], TransitionMatrix::cascade(3, 0.2, 0.6, 0.2));
//! config.initial_open_fraction = 0.1;
//! let mut model = MobilityModelBuilder::new(config).seed(42).build()?;
//! model.run(100, &mut NoopObserver);
//! ```

pub mod builder;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod observer;
pub(crate) mod scheduler;


pub use builder::MobilityModelBuilder;
pub use coordinator::Coordinator;
pub use error::{SimError, SimResult};
pub use model::MobilityModel;
pub use observer::{ModelView, NoopObserver, StepObserver, StepReport};
