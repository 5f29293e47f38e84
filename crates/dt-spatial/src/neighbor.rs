//! Cached k-nearest-neighbor index over the flock (§4.2).
//!
//! Not a spatial tree: every agent moves every tick, so a general-purpose
//! R-tree would need a near-total rebuild each frame. Instead this is a
//! brute-force O(N) distance scan per query, amortized by retaining each
//! agent's last-computed neighbor list between ticks and only recomputing
//! the subset of agents that actually need it.

use dt_agent::FlockStore;
use dt_core::AgentId;

/// Below this flock size, caching overhead (bookkeeping, partial refreshes)
/// isn't worth it — every tick just rescans everyone.
const CACHE_THRESHOLD: usize = 512;

/// Fraction of the flock swept by the round-robin refresh slab each tick
/// when most agents are stationary.
const SLAB_FRACTION_QUIET: usize = 12;
/// Smaller slab fraction used when many agents already triggered a
/// motion-based refresh this tick, to keep total per-tick work bounded.
const SLAB_FRACTION_BUSY: usize = 16;

pub struct NeighborIndex {
    /// Whether the temporal cache is active (`N >= 512`); below that, every
    /// tick recomputes every agent's neighbor list from scratch.
    caching: bool,
    /// Round-robin cursor into `0..N` for the forced-refresh slab.
    cursor: usize,
}

impl NeighborIndex {
    pub fn new(n_agents: usize) -> Self {
        Self { caching: n_agents >= CACHE_THRESHOLD, cursor: 0 }
    }

    /// Refresh the neighbor cache ahead of this tick's queries (§4.2).
    ///
    /// Without caching, every agent's `nb_idx` is recomputed fresh. With
    /// caching, only agents that moved more than `eps_move` since their last
    /// refresh plus a round-robin slab are recomputed; everyone else keeps
    /// last tick's list, which callers read as-is via [`Self::knn`] /
    /// [`Self::within`].
    pub fn refresh(&mut self, flock: &mut FlockStore, k_nn: usize, ra: f32) {
        let n = flock.count;
        if n == 0 {
            return;
        }

        if !self.caching {
            for i in 0..n {
                let nb = Self::scan_knn(flock, i, k_nn, f32::INFINITY);
                flock.nb_idx[i] = nb;
                flock.prev_positions[i] = flock.positions[i];
            }
            return;
        }

        let eps_move = (1e-6_f32).max(0.4 * ra);
        let eps_move_sq = eps_move * eps_move;

        let moved: Vec<usize> = (0..n)
            .filter(|&i| (flock.positions[i] - flock.prev_positions[i]).length_sq() > eps_move_sq)
            .collect();

        let slab_fraction =
            if moved.len() * SLAB_FRACTION_BUSY >= n { SLAB_FRACTION_BUSY } else { SLAB_FRACTION_QUIET };
        let slab_size = (n / slab_fraction).max(1);

        let mut to_refresh: Vec<usize> = moved;
        for offset in 0..slab_size {
            to_refresh.push((self.cursor + offset) % n);
        }
        self.cursor = (self.cursor + slab_size) % n;
        to_refresh.sort_unstable();
        to_refresh.dedup();

        for i in to_refresh {
            flock.nb_idx[i] = Self::scan_knn(flock, i, k_nn, f32::INFINITY);
            flock.prev_positions[i] = flock.positions[i];
        }
    }

    /// The `k` nearest neighbors of `agent`, closest first, from the cache
    /// (whatever its current freshness — the forced-refresh slab bounds
    /// staleness to at most `SLAB_FRACTION_QUIET` ticks).
    pub fn knn(&self, flock: &FlockStore, agent: AgentId, k: usize) -> &[AgentId] {
        let cached = &flock.nb_idx[agent.index()];
        &cached[..cached.len().min(k)]
    }

    /// Neighbors within `r` of `agent`, capped at `k` (closest first). Falls
    /// back to a full scan: the cached list is built against `k_nn`, which
    /// may be smaller than what a larger radius query needs.
    pub fn within(&self, flock: &FlockStore, agent: AgentId, r: f32, k: usize) -> Vec<AgentId> {
        Self::scan_knn(flock, agent.index(), k, r)
    }

    /// Brute-force scan: all agents within `max_dist` of `flock.positions[i]`
    /// (excluding `i`), closest first, truncated to `k`.
    fn scan_knn(flock: &FlockStore, i: usize, k: usize, max_dist: f32) -> Vec<AgentId> {
        let p = flock.positions[i];
        let max_dist_sq = if max_dist.is_finite() { max_dist * max_dist } else { f32::INFINITY };
        let mut candidates: Vec<(f32, usize)> = (0..flock.count)
            .filter(|&j| j != i)
            .filter_map(|j| {
                let d_sq = (flock.positions[j] - p).length_sq();
                (d_sq <= max_dist_sq).then_some((d_sq, j))
            })
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        candidates.truncate(k);
        candidates.into_iter().map(|(_, j)| AgentId(j as u32)).collect()
    }
}
