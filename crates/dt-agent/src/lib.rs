//! `dt-agent` — Structure-of-Arrays storage for flock and controller state.
//!
//! # Crate layout
//!
//! | Module      | Contents                                            |
//! |-------------|------------------------------------------------------|
//! | [`store`]   | `FlockStore`, `ControllerStore` (SoA arrays)          |
//! | [`builder`] | `FlockStoreBuilder`, `ControllerStoreBuilder`         |
//! | [`error`]   | `AgentError`, `AgentResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types. |

pub mod builder;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::{ControllerStoreBuilder, FlockStoreBuilder};
pub use error::{AgentError, AgentResult};
pub use store::{ControllerStore, FlockStore};
