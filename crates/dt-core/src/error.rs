//! Core error type.
//!
//! Sub-crates define their own error enums (`AgentError`, `SpatialError`,
//! `ScheduleError`, `PlanError`, `SimError`, `OutputError`) and convert into
//! or out of `CoreError` via `From` impls rather than re-exporting it as a
//! catch-all; `CoreError` itself stays scoped to configuration and geometry
//! faults that originate in this crate.

use thiserror::Error;

use crate::AgentId;

/// Error type for `dt-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("degenerate polygon: fewer than 3 vertices")]
    DegeneratePolygon,
}

/// Shorthand result type for `dt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
