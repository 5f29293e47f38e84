//! Simulation time model: an outer tick counter driving the loop driver, and
//! the per-tick inner-microstep cadence that amplifies simulation rate
//! without increasing external update frequency (§4.10).
//!
//! # Design
//!
//! `World::step` advances one *inner microstep* by `dt` seconds of simulated
//! physics. The loop driver calls it `K` (≈15) times per *outer tick*, so an
//! outer cadence of ~20 Hz yields an effective simulation rate of ~300 Hz
//! while external consumers only observe state at the outer rate.
//!
//! `Tick` counts outer ticks; it carries no wall-clock unit baked in — how
//! long an outer tick takes in real time is purely a function of the driver
//! loop's sleep cadence, not of this type.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An outer-loop tick counter, advanced once per `K`-microstep batch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between outer-tick counts and elapsed simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// Simulated seconds represented by one outer tick: `microsteps_per_tick * dt`.
    pub tick_duration_secs: f64,
    /// The current outer tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_unix_secs`, with an outer tick
    /// representing `tick_duration_secs` of simulated time.
    pub fn new(start_unix_secs: i64, tick_duration_secs: f64) -> Self {
        Self { start_unix_secs, tick_duration_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one outer tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs
    }

    /// Current Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> f64 {
        self.start_unix_secs as f64 + self.elapsed_secs()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s elapsed)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation cadence configuration.
///
/// Typically loaded from a TOML/JSON config by the embedding application and
/// passed to the loop driver.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Inner physics step, in simulated seconds (`World`'s `dt`).
    pub dt: f32,

    /// Inner microsteps per outer tick (`K` in §4.10). Default 15.
    pub microsteps_per_tick: u32,

    /// Target outer-tick cadence in Hz (for the driver's fixed-rate sleep).
    /// Default 20.0.
    pub outer_hz: f32,

    /// Master RNG seed. The same seed always produces identical results.
    pub seed: u64,

    /// Optional cap on total outer ticks (`None` runs until externally
    /// stopped, e.g. an interactive session with no fixed horizon).
    pub total_ticks: Option<u64>,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound), if a
    /// horizon was configured.
    #[inline]
    pub fn end_tick(&self) -> Option<Tick> {
        self.total_ticks.map(Tick)
    }

    /// Construct a `SimClock` pre-configured for this run: one outer tick
    /// spans `microsteps_per_tick * dt` simulated seconds.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.microsteps_per_tick as f64 * self.dt as f64)
    }
}
