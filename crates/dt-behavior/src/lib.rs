//! `dt-behavior` — the herding planning policy and its tick-level output.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|---------------------------------------------------------|
//! | [`plan`]   | `Plan`, `PlanDebug` — the policy's per-tick output      |
//! | [`policy`] | `ShepherdPolicy` — candidate scoring and drone↔sheep assignment |
//! | [`error`]  | `BehaviorError`, `BehaviorResult<T>`                    |
//!
//! # Design notes
//!
//! Unlike the donor framework's per-agent `BehaviorModel` trait (one
//! `replan` call per woken agent, resolved into per-agent `Intent`s), this
//! domain has a single exclusive decision-maker: at most one job is active
//! at a time, and `ShepherdPolicy::plan` produces one tagged-union `Plan`
//! for all controllers at once. There is no per-agent behavior hook to
//! implement, so there is no `BehaviorModel`-equivalent trait here — sheep
//! motion is pure physics, computed in `dt-sim::World::step`, not planned.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.      |

pub mod error;
pub mod plan;
pub mod policy;

#[cfg(test)]
mod tests;

pub use error::{BehaviorError, BehaviorResult};
pub use plan::{Plan, PlanDebug};
pub use policy::ShepherdPolicy;
