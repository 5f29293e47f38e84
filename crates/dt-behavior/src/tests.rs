//! Unit tests for dt-behavior.

use dt_agent::{ControllerStoreBuilder, FlockStoreBuilder};
use dt_core::Vec2;
use dt_schedule::{Job, JobStatus, Target};

use crate::{Plan, ShepherdPolicy};

fn default_policy() -> ShepherdPolicy {
    ShepherdPolicy {
        fn_radius: 5.0,
        umax: 2.0,
        too_close: 1.0,
        collect_standoff: 3.0,
        conditionally_apply_repulsion: true,
    }
}

fn active_job(target: Target) -> Job {
    let mut job = Job::new(Some(target), 1, None, 0.0);
    job.status = JobStatus::Running;
    job.is_active = true;
    job
}

#[cfg(test)]
mod job_selection {
    use super::*;

    #[test]
    fn no_active_jobs_is_do_nothing() {
        let flock = FlockStoreBuilder::new(3).build();
        let controllers = ControllerStoreBuilder::new(1).build();
        let plan = default_policy().plan(&flock, &controllers, &[], 0.05);
        assert_eq!(plan, Plan::DoNothing);
    }

    #[test]
    fn satisfied_active_job_is_do_nothing() {
        let mut flock = FlockStoreBuilder::new(2).build();
        flock.positions = vec![Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)];
        let controllers = ControllerStoreBuilder::new(1).build();
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(10.0) });
        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        assert_eq!(plan, Plan::DoNothing);
    }

    #[test]
    fn unsatisfied_active_job_produces_drone_positions() {
        let mut flock = FlockStoreBuilder::new(2).build();
        flock.positions = vec![Vec2::new(50.0, 0.0), Vec2::new(52.0, 0.0)];
        let controllers = ControllerStoreBuilder::new(1).build();
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });
        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        assert!(matches!(plan, Plan::DronePositions { .. }));
    }

    #[test]
    fn inactive_job_is_ignored() {
        let mut flock = FlockStoreBuilder::new(1).build();
        flock.positions = vec![Vec2::new(50.0, 0.0)];
        let controllers = ControllerStoreBuilder::new(1).build();
        let mut job = Job::new(Some(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) }), 1, None, 0.0);
        job.status = JobStatus::Pending; // not active
        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        assert_eq!(plan, Plan::DoNothing);
    }
}

#[cfg(test)]
mod assignment {
    use super::*;

    #[test]
    fn single_drone_targets_farthest_weighted_sheep() {
        // Two sheep well outside the goal; one drone should pick exactly one.
        let mut flock = FlockStoreBuilder::new(2).build();
        flock.positions = vec![Vec2::new(20.0, 0.0), Vec2::new(-20.0, 0.0)];
        let mut controllers = ControllerStoreBuilder::new(1).build();
        controllers.positions = vec![Vec2::new(0.0, 5.0)];
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        let Plan::DronePositions { target_sheep_indices, positions, .. } = plan else {
            panic!("expected DronePositions");
        };
        assert_eq!(target_sheep_indices.len(), 1);
        assert!(target_sheep_indices[0].is_some());
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn more_drones_than_sheep_leaves_some_unassigned() {
        let mut flock = FlockStoreBuilder::new(1).build();
        flock.positions = vec![Vec2::new(20.0, 0.0)];
        let mut controllers = ControllerStoreBuilder::new(2).build();
        controllers.positions = vec![Vec2::new(0.0, 5.0), Vec2::new(0.0, -5.0)];
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        let Plan::DronePositions { target_sheep_indices, .. } = plan else {
            panic!("expected DronePositions");
        };
        let assigned = target_sheep_indices.iter().filter(|t| t.is_some()).count();
        assert_eq!(assigned, 1);
    }

    #[test]
    fn assignment_is_injective() {
        let mut flock = FlockStoreBuilder::new(4).build();
        flock.positions = vec![
            Vec2::new(20.0, 0.0),
            Vec2::new(-20.0, 0.0),
            Vec2::new(0.0, 20.0),
            Vec2::new(0.0, -20.0),
        ];
        let mut controllers = ControllerStoreBuilder::new(3).build();
        controllers.positions = vec![Vec2::new(25.0, 0.0), Vec2::new(-25.0, 0.0), Vec2::new(0.0, 25.0)];
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        let Plan::DronePositions { target_sheep_indices, .. } = plan else {
            panic!("expected DronePositions");
        };
        let assigned: Vec<usize> =
            target_sheep_indices.iter().filter_map(|t| *t).collect();
        let unique: std::collections::HashSet<usize> = assigned.iter().cloned().collect();
        assert_eq!(assigned.len(), unique.len(), "no two drones share a sheep");
    }

    #[test]
    fn unassigned_drone_holds_position() {
        let mut flock = FlockStoreBuilder::new(1).build();
        flock.positions = vec![Vec2::new(20.0, 0.0)];
        let mut controllers = ControllerStoreBuilder::new(2).build();
        controllers.positions = vec![Vec2::new(0.0, 5.0), Vec2::new(7.0, 7.0)];
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        let Plan::DronePositions { target_sheep_indices, positions, .. } = plan else {
            panic!("expected DronePositions");
        };
        let unassigned_idx = target_sheep_indices.iter().position(|t| t.is_none()).unwrap();
        assert_eq!(positions[unassigned_idx], controllers.positions[unassigned_idx]);
    }
}

#[cfg(test)]
mod motion_bounds {
    use super::*;

    #[test]
    fn drone_step_never_exceeds_umax_dt() {
        let mut flock = FlockStoreBuilder::new(1).build();
        flock.positions = vec![Vec2::new(100.0, 0.0)];
        let mut controllers = ControllerStoreBuilder::new(1).build();
        controllers.positions = vec![Vec2::new(0.0, 0.0)];
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let policy = default_policy();
        let dt = 0.05;
        let plan = policy.plan(&flock, &controllers, &[job], dt);
        let Plan::DronePositions { positions, .. } = plan else {
            panic!("expected DronePositions");
        };
        let step = (positions[0] - controllers.positions[0]).length();
        assert!(step <= policy.umax * dt + 1e-4);
    }

    #[test]
    fn safety_stop_holds_drone_near_sheep() {
        let mut flock = FlockStoreBuilder::new(1).build();
        flock.positions = vec![Vec2::new(100.0, 0.0)];
        let mut controllers = ControllerStoreBuilder::new(1).build();
        // Drone already sits well within `too_close` of the sheep.
        controllers.positions = vec![Vec2::new(100.2, 0.0)];
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let mut policy = default_policy();
        policy.too_close = 5.0;
        policy.conditionally_apply_repulsion = false; // always applying repulsion
        let plan = policy.plan(&flock, &controllers, &[job], 0.05);
        let Plan::DronePositions { positions, .. } = plan else {
            panic!("expected DronePositions");
        };
        assert_eq!(positions[0], controllers.positions[0]);
    }
}

#[cfg(test)]
mod repulsion_gating {
    use super::*;

    #[test]
    fn unconditional_mode_always_applies() {
        let mut flock = FlockStoreBuilder::new(1).build();
        flock.positions = vec![Vec2::new(50.0, 0.0)];
        let mut controllers = ControllerStoreBuilder::new(1).build();
        controllers.positions = vec![Vec2::new(0.0, 100.0)]; // far from its waypoint
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let mut policy = default_policy();
        policy.conditionally_apply_repulsion = false;
        let plan = policy.plan(&flock, &controllers, &[job], 0.05);
        let Plan::DronePositions { apply_repulsion, .. } = plan else {
            panic!("expected DronePositions");
        };
        assert!(apply_repulsion.iter().all(|&b| b));
    }

    #[test]
    fn conditional_mode_withholds_when_far_from_waypoint() {
        let mut flock = FlockStoreBuilder::new(1).build();
        flock.positions = vec![Vec2::new(50.0, 0.0)];
        let mut controllers = ControllerStoreBuilder::new(1).build();
        controllers.positions = vec![Vec2::new(0.0, 500.0)]; // very far
        let job = active_job(Target::Circle { center: Vec2::ZERO, radius: Some(5.0) });

        let plan = default_policy().plan(&flock, &controllers, &[job], 0.05);
        let Plan::DronePositions { apply_repulsion, .. } = plan else {
            panic!("expected DronePositions");
        };
        assert!(!apply_repulsion[0]);
    }
}
