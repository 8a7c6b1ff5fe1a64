//! Immutable puzzle instance derived once from raw figure/hole/epsilon data.
//!
//! Purpose
//! - Precompute everything the annealer queries in its hot loop: rest lengths,
//!   the lattice points inside the hole (as a list and as a set), per-vertex
//!   adjacency, the hole centroid and bounding box.
//!
//! Invariants (checked at construction)
//! - The hole and the figure both have at least one vertex.
//! - Edge indices are valid into `verts`, and no edge has zero rest length.
//! - `connections` is symmetric with `edges`: each edge adds one entry to each
//!   endpoint.
//! - `valid_points` is exactly the set of box points passing `point_in_polygon`.
//! - `points_in_hole` is non-empty, so `center` is well defined.
//!
//! The struct is never mutated after `Problem::new`, which is what lets the
//! search share it across worker threads by plain reference.

use std::collections::HashSet;
use std::fmt;

use crate::geom::{bounding_box, find_all_points_in_hole, sqd, Edge, Point};

/// Construction failures. Everything else the core reports is a normal outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProblemError {
    /// The hole has no vertices.
    EmptyHole,
    /// The figure has no vertices; an empty pose would be trivially valid.
    EmptyFigure,
    /// The hole encloses no lattice point, so no pose can exist.
    NoPointsInHole,
    /// An edge refers to a vertex index past the end of the figure.
    EdgeOutOfRange { edge: usize, index: usize, verts: usize },
    /// An edge has zero rest length; its stretch ratio is undefined.
    DegenerateEdge { edge: usize },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHole => write!(f, "hole polygon has no vertices"),
            Self::EmptyFigure => write!(f, "figure has no vertices"),
            Self::NoPointsInHole => write!(f, "hole polygon contains no lattice points"),
            Self::EdgeOutOfRange { edge, index, verts } => write!(
                f,
                "edge {edge} references vertex {index} but the figure has {verts} vertices"
            ),
            Self::DegenerateEdge { edge } => write!(f, "edge {edge} has zero rest length"),
        }
    }
}

impl std::error::Error for ProblemError {}

/// One adjacency entry: the other endpoint and the edge's rest squared length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub other: usize,
    pub distance: f64,
}

#[derive(Clone, Debug)]
pub struct Problem {
    /// Rest positions of the figure; indices are referenced by `edges`.
    pub verts: Vec<Point>,
    /// Hole boundary with an implicit closing edge.
    pub hole: Vec<Point>,
    pub edges: Vec<Edge>,
    /// Tolerance numerator; `ep = epsilon / 1_000_000`.
    pub epsilon: u32,
    pub ep: f64,
    /// Rest squared length per edge, aligned with `edges`.
    pub original_distances: Vec<f64>,
    /// Every lattice point inside (or on the included boundary of) the hole.
    pub points_in_hole: Vec<Point>,
    pub valid_points: HashSet<Point>,
    /// Per-vertex adjacency derived from `edges`.
    pub connections: Vec<Vec<Connection>>,
    /// Truncated mean of `points_in_hole`.
    pub center: Point,
    pub min: Point,
    pub max: Point,
}

impl Problem {
    pub fn new(
        verts: Vec<Point>,
        edges: Vec<Edge>,
        hole: Vec<Point>,
        epsilon: u32,
    ) -> Result<Self, ProblemError> {
        let (min, max) = bounding_box(&hole).ok_or(ProblemError::EmptyHole)?;
        if verts.is_empty() {
            return Err(ProblemError::EmptyFigure);
        }

        let mut original_distances = Vec::with_capacity(edges.len());
        for (k, e) in edges.iter().enumerate() {
            for index in [e.s, e.e] {
                if index >= verts.len() {
                    return Err(ProblemError::EdgeOutOfRange {
                        edge: k,
                        index,
                        verts: verts.len(),
                    });
                }
            }
            let d = sqd(verts[e.s], verts[e.e]);
            if d == 0 {
                return Err(ProblemError::DegenerateEdge { edge: k });
            }
            original_distances.push(d as f64);
        }

        let points_in_hole = find_all_points_in_hole(min, max, &hole);
        if points_in_hole.is_empty() {
            return Err(ProblemError::NoPointsInHole);
        }
        let valid_points: HashSet<Point> = points_in_hole.iter().copied().collect();

        let mut connections = vec![Vec::new(); verts.len()];
        for (e, &distance) in edges.iter().zip(&original_distances) {
            connections[e.s].push(Connection { other: e.e, distance });
            connections[e.e].push(Connection { other: e.s, distance });
        }

        let center = centroid(&points_in_hole);

        Ok(Self {
            verts,
            hole,
            edges,
            epsilon,
            ep: f64::from(epsilon) / 1_000_000.0,
            original_distances,
            points_in_hole,
            valid_points,
            connections,
            center,
            min,
            max,
        })
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.valid_points.contains(&p)
    }
}

/// Truncated mean; callers guarantee `points` is non-empty.
fn centroid(points: &[Point]) -> Point {
    let n = points.len() as i64;
    let (sx, sy) = points.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p.x), sy + i64::from(p.y))
    });
    // The mean of i16 values is itself within i16 range.
    Point::new((sx / n) as i16, (sy / n) as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{find_all_points_in_hole_naive, point_in_polygon};

    fn square(side: i16) -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(side, 0),
            Point::new(side, side),
            Point::new(0, side),
        ]
    }

    fn triangle_figure() -> (Vec<Point>, Vec<Edge>) {
        (
            vec![Point::new(0, 0), Point::new(3, 0), Point::new(0, 4)],
            vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)],
        )
    }

    #[test]
    fn builds_derived_fields() {
        let (verts, edges) = triangle_figure();
        let p = Problem::new(verts, edges, square(10), 150_000).unwrap();
        assert!((p.ep - 0.15).abs() < 1e-12);
        assert_eq!(p.original_distances, vec![9.0, 25.0, 16.0]);
        assert_eq!((p.min, p.max), (Point::new(0, 0), Point::new(10, 10)));
        assert_eq!(p.points_in_hole.len(), 100);
        assert_eq!(p.valid_points.len(), 100);
        // Interior is x in 1..=10, y in 0..=9; means 5.5 and 4.5 truncated.
        assert!(p.contains(Point::new(10, 0)));
        assert!(!p.contains(Point::new(0, 5)));
        assert_eq!(p.center, Point::new(5, 4));
    }

    #[test]
    fn connections_are_symmetric_with_edges() {
        let (verts, edges) = triangle_figure();
        let p = Problem::new(verts, edges, square(10), 0).unwrap();
        let total: usize = p.connections.iter().map(Vec::len).sum();
        assert_eq!(total, 2 * p.edges.len());
        for (k, e) in p.edges.iter().enumerate() {
            let d = p.original_distances[k];
            assert!(p.connections[e.s].contains(&Connection { other: e.e, distance: d }));
            assert!(p.connections[e.e].contains(&Connection { other: e.s, distance: d }));
        }
    }

    #[test]
    fn valid_points_match_predicate() {
        let hole = vec![
            Point::new(0, 0),
            Point::new(8, 0),
            Point::new(8, 8),
            Point::new(4, 3),
            Point::new(0, 8),
        ];
        let p = Problem::new(vec![Point::new(1, 1)], vec![], hole.clone(), 0).unwrap();
        for x in p.min.x..=p.max.x {
            for y in p.min.y..=p.max.y {
                let q = Point::new(x, y);
                assert_eq!(p.contains(q), point_in_polygon(q, &hole));
            }
        }
        let naive: HashSet<Point> = find_all_points_in_hole_naive(p.min, p.max, &hole)
            .into_iter()
            .collect();
        assert_eq!(p.valid_points, naive);
    }

    #[test]
    fn rejects_bad_input() {
        let (verts, edges) = triangle_figure();
        assert_eq!(
            Problem::new(verts.clone(), edges.clone(), vec![], 0).unwrap_err(),
            ProblemError::EmptyHole
        );
        assert_eq!(
            Problem::new(vec![], vec![], square(4), 0).unwrap_err(),
            ProblemError::EmptyFigure
        );
        // A flat hole has no interior lattice points.
        let flat = vec![Point::new(0, 0), Point::new(5, 0)];
        assert_eq!(
            Problem::new(verts.clone(), edges, flat, 0).unwrap_err(),
            ProblemError::NoPointsInHole
        );
        assert_eq!(
            Problem::new(verts.clone(), vec![Edge::new(0, 7)], square(4), 0).unwrap_err(),
            ProblemError::EdgeOutOfRange {
                edge: 0,
                index: 7,
                verts: 3
            }
        );
        let twin = vec![Point::new(1, 1), Point::new(1, 1)];
        assert_eq!(
            Problem::new(twin, vec![Edge::new(0, 1)], square(4), 0).unwrap_err(),
            ProblemError::DegenerateEdge { edge: 0 }
        );
    }

    #[test]
    fn error_messages() {
        let e = ProblemError::EdgeOutOfRange {
            edge: 2,
            index: 9,
            verts: 4,
        };
        assert_eq!(
            e.to_string(),
            "edge 2 references vertex 9 but the figure has 4 vertices"
        );
    }
}
