//! Curated surface for the CLI and experiment drivers.
//!
//! Important
//! - This is not a stable API. It groups the entry points a driver needs:
//!   build a `Problem`, run one annealer or the restart search, and check or
//!   score a pose.

// Geometry
pub use crate::geom::{
    bounding_box, point_in_polygon, segment_intersects_hole, segments_intersect, Edge, Point, Vec2,
    VecExt,
};
// Problem model
pub use crate::problem::{Connection, Problem, ProblemError};
// Validity and scoring
pub use crate::score::{check_pose, dislikes, is_pose_valid, Solution, Violation};
// Annealing and search
pub use crate::anneal::{anneal_once, AnnealCfg, Annealer, Force, Frame, NoopObserver, Observer};
pub use crate::search::{search, SearchCfg, WorkerToken};

/// Stretch `|new/old - 1|` of every edge under `pose`, aligned with `edges`.
///
/// Pre: `pose.len() == problem.verts.len()`.
pub fn edge_stretches(problem: &Problem, pose: &[Point]) -> Vec<f64> {
    problem
        .edges
        .iter()
        .zip(&problem.original_distances)
        .map(|(e, &old)| (crate::geom::sqd(pose[e.s], pose[e.e]) as f64 / old - 1.0).abs())
        .collect()
}
