//! Pose validity and the dislikes metric.

use std::fmt;

use crate::geom::{segment_intersects_hole, sqd, Point};
use crate::problem::Problem;

/// A valid pose with its score. Produced only by a successful annealing run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub dislikes: u64,
    /// One lattice point per figure vertex, aligned with `Problem::verts`.
    pub assigned: Vec<Point>,
}

/// First reason a pose fails validation.
#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    LengthMismatch { expected: usize, got: usize },
    PointOutsideHole { vertex: usize, point: Point },
    EdgeCrossesHole { edge: usize },
    /// `stretch` is `|new/old - 1|`, which reached or exceeded `ep`.
    EdgeStretched { edge: usize, stretch: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, got } => {
                write!(f, "pose has {got} vertices, figure has {expected}")
            }
            Self::PointOutsideHole { vertex, point } => {
                write!(f, "vertex {vertex} at ({}, {}) is outside the hole", point.x, point.y)
            }
            Self::EdgeCrossesHole { edge } => write!(f, "edge {edge} crosses the hole boundary"),
            Self::EdgeStretched { edge, stretch } => {
                write!(f, "edge {edge} stretched by {stretch:.6}")
            }
        }
    }
}

/// Check a pose against the three validity conditions, reporting the first
/// failure: membership of every vertex, then per edge a proper boundary
/// crossing followed by the stretch tolerance (strict `< ep`).
pub fn check_pose(problem: &Problem, pose: &[Point]) -> Result<(), Violation> {
    if pose.len() != problem.verts.len() {
        return Err(Violation::LengthMismatch {
            expected: problem.verts.len(),
            got: pose.len(),
        });
    }
    if let Some((vertex, &point)) = pose.iter().enumerate().find(|(_, p)| !problem.contains(**p)) {
        return Err(Violation::PointOutsideHole { vertex, point });
    }
    for (k, (e, &old_d)) in problem
        .edges
        .iter()
        .zip(&problem.original_distances)
        .enumerate()
    {
        let (p1, p2) = (pose[e.s], pose[e.e]);
        if segment_intersects_hole(&problem.hole, p1, p2) {
            return Err(Violation::EdgeCrossesHole { edge: k });
        }
        let stretch = (sqd(p1, p2) as f64 / old_d - 1.0).abs();
        if stretch >= problem.ep {
            return Err(Violation::EdgeStretched { edge: k, stretch });
        }
    }
    Ok(())
}

#[inline]
pub fn is_pose_valid(problem: &Problem, pose: &[Point]) -> bool {
    check_pose(problem, pose).is_ok()
}

/// Sum over hole vertices of the squared distance to the nearest pose vertex.
///
/// An empty pose has no nearest vertex; it scores `u64::MAX` per hole vertex
/// (saturating), which no valid pose can reach.
pub fn dislikes(problem: &Problem, pose: &[Point]) -> u64 {
    problem
        .hole
        .iter()
        .map(|&h| pose.iter().map(|&v| sqd(h, v)).min().unwrap_or(u64::MAX))
        .fold(0u64, u64::saturating_add)
}
