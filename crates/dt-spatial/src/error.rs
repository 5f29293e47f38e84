//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `dt-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("agent count mismatch: expected {expected}, got {got}")]
    AgentCountMismatch { expected: usize, got: usize },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
