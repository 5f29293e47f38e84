//! Simulation observer trait for progress reporting and data collection.

use dt_agent::{ControllerStore, FlockStore};
use dt_behavior::Plan;
use dt_core::Tick;
use dt_schedule::Job;

/// Callbacks invoked by [`crate::Sim::run`] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each outer tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each outer tick, after its microsteps and job
    /// lifecycle update have run.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once per outer tick with read-only access to the flock,
    /// controller, and job state plus the last microstep's plan, so output
    /// writers can record a snapshot without the sim needing to know about
    /// any specific output format.
    fn on_snapshot(
        &mut self,
        _tick: Tick,
        _flock: &FlockStore,
        _controllers: &ControllerStore,
        _jobs: &[Job],
        _plan: &Plan,
    ) {
    }

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing. Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
