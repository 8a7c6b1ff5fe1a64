//! Force-directed annealing of a figure into the hole.
//!
//! Purpose
//! - Relax a continuous pose under edge tension, boundary correction, and
//!   random exploration, requantizing to the lattice after every step until
//!   the quantized pose is valid.
//!
//! Randomness
//! - Every `Annealer` owns its generator. Given the same seed, configuration
//!   and problem, a run replays the same trajectory and outcome.
//!
//! Code cross-refs: `force::compute_force`, `runner::Annealer`,
//! `crate::search::search` (parallel restarts).

mod cfg;
mod force;
mod runner;

pub use cfg::AnnealCfg;
pub use force::{compute_force, new_wind, update_forces, Force};
pub use runner::{Annealer, Frame, NoopObserver, Observer};

use rand::{rngs::StdRng, SeedableRng};

use crate::problem::Problem;
use crate::score::Solution;

/// One seeded run with an observer; logs the outcome.
pub fn anneal_once(
    problem: &Problem,
    cfg: AnnealCfg,
    seed: u64,
    observer: &mut dyn Observer,
) -> Option<Solution> {
    let mut annealer = Annealer::new(cfg, StdRng::seed_from_u64(seed));
    annealer.run_observed(problem, observer);
    let used = cfg.budget - annealer.budget();
    match annealer.into_solution() {
        Some(s) => {
            tracing::info!(seed, iterations = used, dislikes = s.dislikes, "anneal solved");
            Some(s)
        }
        None => {
            tracing::info!(seed, iterations = used, "anneal exhausted");
            None
        }
    }
}
