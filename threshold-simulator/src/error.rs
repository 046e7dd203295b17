use moonquake_common::Real;
use thiserror::Error;

pub type SimulationResult<T> = Result<T, SimulationError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Trial count must be at least 1, got {0}")]
    InvalidTrialCount(usize),
    #[error("Standard deviation of the {name} distribution must be non-negative, got {sd}")]
    InvalidDistribution { name: &'static str, sd: Real },
}
