//! Integration tests for dt-output.

use std::cell::RefCell;
use std::rc::Rc;

use dt_agent::{ControllerStoreBuilder, FlockStoreBuilder};
use dt_behavior::{Plan, PlanDebug};
use dt_core::{Tick, Vec2};
use dt_schedule::{Job, JobStatus, Target};

use crate::store::{JobStore, NoopJobStore};
use crate::{OutputResult, SimOutputObserver};

/// A `JobStore` that records every synced job's (id, status) pair, for
/// assertions, shared via `Rc<RefCell<_>>` so tests can inspect it after
/// handing ownership to the observer.
#[derive(Clone, Default)]
struct RecordingStore {
    synced: Rc<RefCell<Vec<(dt_schedule::JobId, JobStatus)>>>,
}

impl JobStore for RecordingStore {
    fn sync_job(&mut self, job: &Job) -> OutputResult<()> {
        self.synced.borrow_mut().push((job.id, job.status));
        Ok(())
    }
}

struct FailingStore;
impl JobStore for FailingStore {
    fn sync_job(&mut self, _job: &Job) -> OutputResult<()> {
        Err(crate::OutputError::Sync("db unreachable".into()))
    }
}

fn test_job(status: JobStatus) -> Job {
    let mut job = Job::new(Some(Target::Circle { center: Vec2::ZERO, radius: Some(1.0) }), 1, None, 0.0);
    job.status = status;
    job
}

mod snapshot_contents {
    use super::*;

    #[test]
    fn on_snapshot_copies_flock_and_controller_state() {
        let mut flock = FlockStoreBuilder::new(2).build();
        flock.positions = vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        flock.velocities = vec![Vec2::new(0.5, 0.0), Vec2::new(0.0, 0.5)];
        let mut controllers = ControllerStoreBuilder::new(1).build();
        controllers.positions = vec![Vec2::new(9.0, 9.0)];
        controllers.apply_repulsion = vec![true];

        let mut obs = SimOutputObserver::new(NoopJobStore, 0, 20.0, Vec::new(), 10);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(5), &flock, &controllers, &[], &Plan::DoNothing);

        let snap = obs.latest().expect("snapshot recorded");
        assert_eq!(snap.tick, 5);
        assert_eq!(snap.agent_positions, flock.positions);
        assert_eq!(snap.agent_velocities, flock.velocities);
        assert_eq!(snap.controller_positions, controllers.positions);
        assert_eq!(snap.controller_apply_repulsion, controllers.apply_repulsion);
        assert!(snap.cohesion_debug.is_none());
        assert!(snap.target_sheep_indices.is_empty());
    }

    #[test]
    fn drone_positions_plan_populates_cohesion_debug() {
        let flock = FlockStoreBuilder::new(1).build();
        let controllers = ControllerStoreBuilder::new(1).build();
        let plan = Plan::DronePositions {
            positions: vec![Vec2::ZERO],
            apply_repulsion: vec![false],
            target_sheep_indices: vec![Some(0)],
            debug: PlanDebug { gcm: Vec2::new(1.0, 1.0), radius: 7.5 },
        };

        let mut obs = SimOutputObserver::new(NoopJobStore, 0, 20.0, Vec::new(), 10);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(0), &flock, &controllers, &[], &plan);

        let snap = obs.latest().unwrap();
        assert_eq!(snap.target_sheep_indices, vec![Some(0)]);
        let debug = snap.cohesion_debug.unwrap();
        assert_eq!(debug.gcm, Vec2::new(1.0, 1.0));
        assert_eq!(debug.radius, 7.5);
    }

    #[test]
    fn paused_bit_is_stamped_from_embedder() {
        let flock = FlockStoreBuilder::new(0).build();
        let controllers = ControllerStoreBuilder::new(0).build();
        let mut obs = SimOutputObserver::new(NoopJobStore, 0, 20.0, Vec::new(), 10);
        obs.set_paused(true);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(0), &flock, &controllers, &[], &Plan::DoNothing);
        assert!(obs.latest().unwrap().paused);
    }

    #[test]
    fn display_includes_tick_and_active_job() {
        let flock = FlockStoreBuilder::new(0).build();
        let controllers = ControllerStoreBuilder::new(0).build();
        let mut job = test_job(JobStatus::Running);
        job.is_active = true;
        let mut obs = SimOutputObserver::new(NoopJobStore, 0, 20.0, Vec::new(), 10);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(3), &flock, &controllers, &[job.clone()], &Plan::DoNothing);
        let text = obs.latest().unwrap().to_string();
        assert!(text.contains("tick 3"));
        assert!(text.contains(&job.id.to_string()));
    }
}

mod job_sync {
    use super::*;

    #[test]
    fn every_job_syncs_on_first_observation() {
        let flock = FlockStoreBuilder::new(0).build();
        let controllers = ControllerStoreBuilder::new(0).build();
        let store = RecordingStore::default();
        let synced = Rc::clone(&store.synced);
        let mut obs = SimOutputObserver::new(store, 0, 20.0, Vec::new(), 10);

        let job = test_job(JobStatus::Scheduled);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(0), &flock, &controllers, &[job.clone()], &Plan::DoNothing);

        assert_eq!(synced.borrow().len(), 1);
        assert_eq!(synced.borrow()[0], (job.id, JobStatus::Scheduled));
    }

    #[test]
    fn sync_fires_again_only_on_status_change() {
        let flock = FlockStoreBuilder::new(0).build();
        let controllers = ControllerStoreBuilder::new(0).build();
        let store = RecordingStore::default();
        let synced = Rc::clone(&store.synced);
        let mut obs = SimOutputObserver::new(store, 0, 20.0, Vec::new(), 100);

        let mut job = test_job(JobStatus::Running);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(1), &flock, &controllers, &[job.clone()], &Plan::DoNothing);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(2), &flock, &controllers, &[job.clone()], &Plan::DoNothing);
        assert_eq!(synced.borrow().len(), 1, "no transition on tick 2, no periodic tick hit yet");

        job.status = JobStatus::Completed;
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(3), &flock, &controllers, &[job.clone()], &Plan::DoNothing);
        assert_eq!(synced.borrow().len(), 2, "status transition forces a sync");
    }

    #[test]
    fn running_job_resyncs_periodically() {
        let flock = FlockStoreBuilder::new(0).build();
        let controllers = ControllerStoreBuilder::new(0).build();
        let store = RecordingStore::default();
        let synced = Rc::clone(&store.synced);
        let mut obs = SimOutputObserver::new(store, 0, 20.0, Vec::new(), 5);

        let job = test_job(JobStatus::Running);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(0), &flock, &controllers, &[job.clone()], &Plan::DoNothing);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(3), &flock, &controllers, &[job.clone()], &Plan::DoNothing);
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(5), &flock, &controllers, &[job.clone()], &Plan::DoNothing);

        // Synced at tick 0 (first observation) and tick 5 (periodic, 5 % 5 == 0).
        assert_eq!(synced.borrow().len(), 2);
    }

    #[test]
    fn store_failure_is_logged_not_propagated() {
        let flock = FlockStoreBuilder::new(0).build();
        let controllers = ControllerStoreBuilder::new(0).build();
        let mut obs = SimOutputObserver::new(FailingStore, 0, 20.0, Vec::new(), 10);
        let job = test_job(JobStatus::Running);
        // Must not panic even though every sync fails.
        dt_sim::SimObserver::on_snapshot(&mut obs, Tick(0), &flock, &controllers, &[job], &Plan::DoNothing);
        assert!(obs.latest().is_some());
    }
}
