//! `dt-core` — foundational types for the shepherding simulation engine.
//!
//! This crate is a dependency of every other `dt-*` crate.  It intentionally
//! has no `dt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ControllerId`                             |
//! | [`geo`]         | `Vec2`, polygon/rectangle geometry kernels            |
//! | [`config`]      | `WorldConfig`, `BoundaryMode`, `Obstacle`             |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` — the single seeded generator owned by `World` |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BoundaryMode, Obstacle, WorldConfig, WorldRect};
pub use error::{CoreError, CoreResult};
pub use geo::{ClosestPoint, Polygon, Rect, Vec2};
pub use ids::{AgentId, ControllerId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
