//! `dt-spatial` — neighbor queries, keep-out enforcement, and boundary
//! handling for the flock.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|---------------------------------------------------------|
//! | [`neighbor`] | `NeighborIndex` — cached kNN / radius queries (§4.2)    |
//! | [`keepout`]  | Polygon/rectangle keep-out enforcement, initial sanitation (§4.5, §4.6) |
//! | [`boundary`] | `none`/`wrap`/`reflect` world-rectangle handling (§4.7) |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.      |

pub mod boundary;
pub mod error;
pub mod keepout;
pub mod neighbor;


pub use error::{SpatialError, SpatialResult};
pub use neighbor::NeighborIndex;
