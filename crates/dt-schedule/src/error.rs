use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("job configuration error: {0}")]
    Config(String),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
