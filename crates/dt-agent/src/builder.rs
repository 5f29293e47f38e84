//! Fluent builders for [`FlockStore`] and [`ControllerStore`].
//!
//! # Usage
//!
//! ```rust
//! use dt_agent::{ControllerStoreBuilder, FlockStoreBuilder};
//! use dt_core::Vec2;
//!
//! let mut flock = FlockStoreBuilder::new(200).build();
//! flock.positions[0] = Vec2::new(1.0, 2.0);
//!
//! let controllers = ControllerStoreBuilder::new(4).build();
//! assert_eq!(controllers.count, 4);
//! ```

use crate::store::{ControllerStore, FlockStore};

/// Fluent builder for [`FlockStore`].
///
/// All arrays are pre-allocated at construction time so later field writes
/// (from a scenario loader, etc.) are simple indexed assignments, not
/// pushes.
pub struct FlockStoreBuilder {
    count: usize,
}

impl FlockStoreBuilder {
    /// Create a builder for `count` agents.
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Construct the `FlockStore`. All arrays start at their zero/default
    /// value; callers write actual initial state directly to the returned
    /// store's `pub` fields.
    pub fn build(self) -> FlockStore {
        FlockStore::new(self.count)
    }
}

/// Fluent builder for [`ControllerStore`].
pub struct ControllerStoreBuilder {
    count: usize,
}

impl ControllerStoreBuilder {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn build(self) -> ControllerStore {
        ControllerStore::new(self.count)
    }
}
