//! Unit tests for dt-agent.

#[cfg(test)]
mod flock_builder {
    use crate::FlockStoreBuilder;
    use dt_core::Vec2;

    #[test]
    fn correct_count() {
        let store = FlockStoreBuilder::new(500).build();
        assert_eq!(store.count, 500);
        assert_eq!(store.positions.len(), 500);
        assert_eq!(store.velocities.len(), 500);
        assert_eq!(store.flock.len(), 500);
        assert_eq!(store.nb_idx.len(), 500);
    }

    #[test]
    fn zero_agents() {
        let store = FlockStoreBuilder::new(0).build();
        assert!(store.is_empty());
    }

    #[test]
    fn fields_start_zeroed() {
        let store = FlockStoreBuilder::new(3).build();
        for p in &store.positions {
            assert_eq!(*p, Vec2::ZERO);
        }
        for f in &store.flock {
            assert_eq!(*f, 0.0);
        }
        for nb in &store.nb_idx {
            assert!(nb.is_empty());
        }
    }

    #[test]
    fn writable_after_build() {
        let mut store = FlockStoreBuilder::new(2).build();
        store.positions[0] = Vec2::new(1.0, 2.0);
        store.flock[1] = 0.5;
        assert_eq!(store.positions[0], Vec2::new(1.0, 2.0));
        assert_eq!(store.flock[1], 0.5);
    }
}

#[cfg(test)]
mod controller_builder {
    use crate::ControllerStoreBuilder;

    #[test]
    fn correct_count() {
        let store = ControllerStoreBuilder::new(4).build();
        assert_eq!(store.count, 4);
        assert_eq!(store.positions.len(), 4);
        assert!(store.apply_repulsion.iter().all(|&a| !a));
    }

    #[test]
    fn zero_controllers() {
        let store = ControllerStoreBuilder::new(0).build();
        assert!(store.is_empty());
    }
}

#[cfg(test)]
mod store {
    use crate::FlockStoreBuilder;
    use dt_core::{AgentId, Vec2};

    #[test]
    fn agent_ids_iterator() {
        let store = FlockStoreBuilder::new(5).build();
        let ids: Vec<AgentId> = store.agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2), AgentId(3), AgentId(4)]);
    }

    #[test]
    fn center_of_mass_empty() {
        let store = FlockStoreBuilder::new(0).build();
        assert_eq!(store.center_of_mass(), Vec2::ZERO);
    }

    #[test]
    fn center_of_mass_averages_positions() {
        let mut store = FlockStoreBuilder::new(2).build();
        store.positions[0] = Vec2::new(0.0, 0.0);
        store.positions[1] = Vec2::new(4.0, 6.0);
        let g = store.center_of_mass();
        assert!((g.x - 2.0).abs() < 1e-6);
        assert!((g.y - 3.0).abs() < 1e-6);
    }
}
