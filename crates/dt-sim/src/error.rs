//! Error type for `dt-sim`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch { expected: usize, got: usize, what: &'static str },

    #[error(
        "plan has {got_positions} positions and {got_repulsion} repulsion flags, expected {expected} controllers"
    )]
    PlanLengthMismatch { expected: usize, got_positions: usize, got_repulsion: usize },

    #[error(transparent)]
    Core(#[from] dt_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
