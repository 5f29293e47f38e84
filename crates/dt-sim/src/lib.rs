//! `dt-sim` — world physics and the job-lifecycle tick loop for the
//! shepherding simulation engine.
//!
//! # Outer tick loop (§4.10)
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Promote   — drain the activation queue for jobs due at `now`.
//!   ② Goal      — update every job's status against current flock positions.
//!   ③ Activate  — the first `running` job (in order) becomes `is_active`;
//!                 step ② next tick retires it once its goal is met.
//!   ④ Microstep — call ShepherdPolicy::plan then World::step, K times.
//!   ⑤ Snapshot  — report flock/controller/job state to the observer.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs close-neighbor repulsion (§4.4) on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dt_behavior::ShepherdPolicy;
//! use dt_core::{SimConfig, WorldConfig};
//! use dt_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, world_config, agent_positions, drone_positions, policy)
//!     .jobs(vec![job])
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

/// A small floor on vector lengths used across `World`'s physics terms, to
/// avoid division by (near) zero.
pub(crate) const EPS: f32 = 1e-6;

pub mod builder;
pub mod driver;
pub mod error;
pub mod observer;
pub mod world;


pub use builder::SimBuilder;
pub use driver::Sim;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use world::World;
