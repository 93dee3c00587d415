use thiserror::Error;
use vc_core::ConfigError;
use vc_hierarchy::HierarchyError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid model configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("initial population is inconsistent: {0}")]
    Population(#[from] HierarchyError),
}

pub type SimResult<T> = Result<T, SimError>;
