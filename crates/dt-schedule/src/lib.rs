//! `dt-schedule` — job records, target regions, status lifecycle, and the
//! activation queue.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|-----------------------------------------------------------|
//! | [`job`]        | `Target`, `JobId`, `JobStatus`, `MaintainUntil`, `Job`  |
//! | [`activation`] | `ActivationQueue` — scheduled-job activation index      |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.      |

pub mod activation;
pub mod error;
pub mod job;


pub use activation::ActivationQueue;
pub use error::{ScheduleError, ScheduleResult};
pub use job::{Job, JobId, JobStatus, MaintainUntil, Target};
