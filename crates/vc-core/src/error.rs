//! Configuration error type.
//!
//! Sub-crates define their own error enums and wrap `ConfigError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{Level, Step};

/// Construction-time validation failure.  A model is never built from a
/// configuration that produced one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("hierarchy has no levels")]
    EmptyHierarchy,

    #[error("{0} has no positions")]
    EmptyLevel(Level),

    #[error("{what} has {got} entries, expected {expected}")]
    LengthMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("{what} probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange {
        what:  &'static str,
        value: f64,
    },

    #[error("transition row for {level} sums to {sum}, expected 1")]
    NotNormalised {
        level: Level,
        sum:   f64,
    },

    #[error("firing at {step} names {level}, which does not exist")]
    UnknownLevel {
        step:  Step,
        level: Level,
    },
}

/// Shorthand result type for configuration checks.
pub type CoreResult<T> = Result<T, ConfigError>;
