//! Parallel random-restart search.
//!
//! Model
//! - `rounds` times, fork `workers` annealers on scoped threads, all borrowing
//!   the same immutable `Problem`; join them, then fold their solutions into
//!   the incumbent. The incumbent is only touched after the join, so no lock
//!   is needed.
//! - A replacement must have strictly fewer dislikes; ties keep the earlier
//!   solution (lower round, then lower worker index).
//!
//! Determinism
//! - Worker `(round, w)` seeds its own `StdRng` from `WorkerToken { seed,
//!   index: round * workers + w }`, so a master seed replays the whole search
//!   regardless of thread scheduling.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::anneal::{AnnealCfg, Annealer};
use crate::problem::Problem;
use crate::score::Solution;

/// Search configuration: restart rounds, parallel workers, annealer preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchCfg {
    pub workers: usize,
    pub rounds: usize,
    /// Master seed; per-worker generators are derived from it.
    pub seed: u64,
    pub anneal: AnnealCfg,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            workers: 8,
            rounds: 20,
            seed: 0,
            anneal: AnnealCfg::restart(),
        }
    }
}

impl SearchCfg {
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("workers must be at least 1".into());
        }
        if self.rounds == 0 {
            return Err("rounds must be at least 1".into());
        }
        self.anneal.validate()
    }
}

/// Seed derivation token: a master seed plus a worker index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerToken {
    pub seed: u64,
    pub index: u64,
}

impl WorkerToken {
    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Run the restart search and return the lowest-dislikes solution, or `None`
/// if every run was exhausted.
pub fn search(problem: &Problem, cfg: &SearchCfg) -> Option<Solution> {
    let mut best: Option<Solution> = None;

    for round in 0..cfg.rounds {
        let results: Vec<Option<Solution>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..cfg.workers)
                .map(|w| {
                    let token = WorkerToken {
                        seed: cfg.seed,
                        index: (round * cfg.workers + w) as u64,
                    };
                    let anneal = cfg.anneal;
                    scope.spawn(move || {
                        let mut annealer = Annealer::new(anneal, token.to_std_rng());
                        annealer.run(problem);
                        annealer.into_solution()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        for (worker, found) in results.into_iter().enumerate() {
            let Some(s) = found else {
                tracing::debug!(round, worker, "worker exhausted");
                continue;
            };
            tracing::debug!(round, worker, dislikes = s.dislikes, "worker solved");
            if best.as_ref().map_or(true, |b| s.dislikes < b.dislikes) {
                tracing::info!(round, worker, dislikes = s.dislikes, "new best solution");
                best = Some(s);
            }
        }
    }

    best
}
