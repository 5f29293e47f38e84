//! The single deterministic RNG owned by `World` (§9: "a single seeded
//! generator lives inside World, not one per agent").
//!
//! # Determinism strategy
//!
//! `World` holds exactly one `SimRng`, seeded from the run's configured
//! seed. Every stochastic step (grazing decay roll, heading noise, tempered
//! noise in the flocking rule) draws from this one generator in a fixed,
//! per-tick agent-index order, so a run is reproducible end to end from its
//! seed alone. `SimRng::child` exists for the rare case a subsystem needs an
//! independently-seeded-but-still-deterministic stream (e.g. a parallel
//! worker) derived from the root seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geo::Vec2;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level deterministic RNG.
///
/// Not `Sync`; a parallel consumer must derive its own `SimRng` via
/// [`SimRng::child`] rather than share this one across threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — useful for
    /// seeding per-thread RNGs deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A single standard-normal sample via the Box-Muller transform.
    ///
    /// Avoids pulling in `rand_distr` for one call site; the donor crate has
    /// no normal-distribution need, this domain's noise terms do.
    pub fn gen_standard_normal(&mut self) -> f32 {
        let u1: f32 = self.0.gen_range(f32::EPSILON..1.0);
        let u2: f32 = self.0.r#gen();
        (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
    }

    /// `𝒩(0, I)` sampled independently per axis, matching the grazing and
    /// flocking rules' `0.2 * 𝒩(0, I)` / tempered-noise terms (§4.3a, §4.3b).
    pub fn gen_gaussian_vec2(&mut self) -> Vec2 {
        Vec2::new(self.gen_standard_normal(), self.gen_standard_normal())
    }
}
