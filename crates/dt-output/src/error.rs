//! Error type for `dt-output`.

use thiserror::Error;

/// Errors a [`crate::JobStore`] implementation can report back to the
/// observer. Wraps the concrete store's error as a trait object since this
/// crate has no opinion on what backs the store (HTTP client, database
/// driver, in-memory cache, …).
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("job store sync failed: {0}")]
    Sync(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type OutputResult<T> = Result<T, OutputError>;
