//! Single-run relaxation loop.
//!
//! States: initializing → relaxing (repeats) → solved | exhausted.
//! - Initializing: draw the wind, drop every vertex on a random hole vertex,
//!   compute forces.
//! - Relaxing: one iteration per budget unit. Stuck vertices teleport to a
//!   random hole vertex, the rest move by `nudge_factor * net`; everything is
//!   requantized, forces are recomputed, and the quantized pose is tested.
//! - Solved stores a `Solution`; exhausted leaves `solution` empty.

use rand::Rng;

use super::cfg::AnnealCfg;
use super::force::{new_wind, update_forces, Force};
use crate::geom::{Edge, Point, Vec2, VecExt};
use crate::problem::Problem;
use crate::score::{dislikes, is_pose_valid, Solution};

/// Snapshot handed to an `Observer` after initialization and each iteration.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// 0 for the initial layout, then 1, 2, ...
    pub iteration: u64,
    pub hole: &'a [Point],
    pub qpose: &'a [Point],
    pub pose: &'a [Vec2],
    pub edges: &'a [Edge],
    pub forces: &'a [Force],
}

/// Synchronous inspection hook. The call may block (e.g. waiting for user
/// input); it cannot influence the run.
pub trait Observer {
    fn on_frame(&mut self, frame: &Frame<'_>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    #[inline]
    fn on_frame(&mut self, _frame: &Frame<'_>) {}
}

/// Per-run state, owned by exactly one thread.
#[derive(Debug)]
pub struct Annealer<R> {
    cfg: AnnealCfg,
    budget: u64,
    wind: Vec2,
    rng: R,
    solution: Option<Solution>,
}

impl<R: Rng> Annealer<R> {
    pub fn new(cfg: AnnealCfg, rng: R) -> Self {
        Self {
            budget: cfg.budget,
            cfg,
            wind: Vec2::zeros(),
            rng,
            solution: None,
        }
    }

    /// Remaining iterations.
    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn wind(&self) -> Vec2 {
        self.wind
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    pub fn into_solution(self) -> Option<Solution> {
        self.solution
    }

    pub fn run(&mut self, problem: &Problem) -> Option<&Solution> {
        self.run_observed(problem, &mut NoopObserver)
    }

    /// Relax until a valid pose is found or the budget runs out.
    pub fn run_observed(
        &mut self,
        problem: &Problem,
        observer: &mut dyn Observer,
    ) -> Option<&Solution> {
        let n = problem.verts.len();
        self.wind = new_wind(&self.cfg, &mut self.rng);

        let mut pose: Vec<Vec2> = Vec::with_capacity(n);
        let mut qpose: Vec<Point> = Vec::with_capacity(n);
        for _ in 0..n {
            let rp = self.random_hole_vertex(problem);
            pose.push(rp.to_vec2());
            qpose.push(rp);
        }

        let mut forces = vec![Force::default(); n];
        self.refresh(problem, &pose, &qpose, &mut forces);
        observer.on_frame(&Frame {
            iteration: 0,
            hole: &problem.hole,
            qpose: &qpose,
            pose: &pose,
            edges: &problem.edges,
            forces: &forces,
        });

        let mut iteration = 0u64;
        while self.budget > 0 {
            self.budget -= 1;
            iteration += 1;
            // A zero period keeps the initial wind for the whole run.
            if self.budget.checked_rem(self.cfg.wind_period) == Some(0) {
                self.wind = new_wind(&self.cfg, &mut self.rng);
            }

            self.displace(problem, &mut pose, &mut qpose, &forces);
            self.refresh(problem, &pose, &qpose, &mut forces);
            observer.on_frame(&Frame {
                iteration,
                hole: &problem.hole,
                qpose: &qpose,
                pose: &pose,
                edges: &problem.edges,
                forces: &forces,
            });

            if is_pose_valid(problem, &qpose) {
                let dislikes = dislikes(problem, &qpose);
                self.solution = Some(Solution {
                    dislikes,
                    assigned: qpose,
                });
                break;
            }
        }
        self.solution.as_ref()
    }

    /// Move every vertex one step under `forces` and requantize.
    ///
    /// A vertex is stuck when its force is contested but nearly cancels
    /// (`total > stuck_ratio * |net|` and `|net| < stuck_net`); it teleports
    /// to a random hole vertex. Every other vertex moves by
    /// `nudge_factor * net`.
    pub fn displace(
        &mut self,
        problem: &Problem,
        pose: &mut [Vec2],
        qpose: &mut [Point],
        forces: &[Force],
    ) {
        for ((v, q), force) in pose.iter_mut().zip(qpose.iter_mut()).zip(forces) {
            let net_mag = force.net.mag();
            if force.total > self.cfg.stuck_ratio * net_mag && net_mag < self.cfg.stuck_net {
                *v = self.random_hole_vertex(problem).to_vec2();
            } else {
                *v += force.net * self.cfg.nudge_factor;
            }
            *q = v.quantize();
        }
    }

    fn random_hole_vertex(&mut self, problem: &Problem) -> Point {
        problem.hole[self.rng.gen_range(0..problem.hole.len())]
    }

    fn refresh(&mut self, problem: &Problem, pose: &[Vec2], qpose: &[Point], forces: &mut [Force]) {
        update_forces(problem, pose, qpose, self.wind, &self.cfg, &mut self.rng, forces);
    }
}
