//! `dt-output` — the external-facing read view of a running simulation:
//! a per-tick [`Snapshot`] and the [`JobStore`] persistence hook the loop
//! driver's job-lifecycle transitions feed into (§6, §7).
//!
//! This crate owns no transport and no persistent store itself — both are
//! out of scope for the core (§1). [`SimOutputObserver`] is the seam: it
//! implements `dt_sim::SimObserver`, builds a `Snapshot` every tick, and
//! calls into whatever `JobStore` the embedder supplies.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dt_output::{NoopJobStore, SimOutputObserver};
//!
//! let tick_duration_secs = config.microsteps_per_tick as f64 * config.dt as f64;
//! let mut obs = SimOutputObserver::new(NoopJobStore, config.start_unix_secs, tick_duration_secs, obstacles, 20);
//! sim.run(&mut obs).unwrap();
//! if let Some(snap) = obs.latest() {
//!     println!("{snap}");
//! }
//! ```

pub mod error;
pub mod observer;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use snapshot::{CohesionDebug, Snapshot};
pub use store::{JobStore, NoopJobStore};
