//! `dt-agent` error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("expected {expected} {what}, got {got}")]
    CountMismatch { expected: usize, got: usize, what: &'static str },
}

pub type AgentResult<T> = Result<T, AgentError>;
