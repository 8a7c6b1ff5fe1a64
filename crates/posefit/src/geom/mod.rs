//! Lattice geometry kernel (pure functions, no state).
//!
//! Purpose
//! - Provide the value types shared by every layer (`Point`, `Vec2`, `Edge`)
//!   and the predicates that decide feasibility on the integer lattice.
//!
//! Conventions
//! - Polygons are ordered vertex lists with an implicit closing edge
//!   (last → first). Orientation (CW/CCW) does not matter.
//! - Boundary handling follows the even-odd ray cast exactly: a lattice point
//!   on the boundary may land on either side. Segment crossings are proper
//!   only; touching the boundary is never a crossing.
//!
//! Code cross-refs: `predicates::{point_in_polygon, segments_intersect}`,
//! `lattice::find_all_points_in_hole`.

mod lattice;
mod predicates;
mod types;

pub use lattice::{bounding_box, find_all_points_in_hole, find_all_points_in_hole_naive};
pub use predicates::{
    orientation, point_in_polygon, segment_intersects_hole, segments_intersect, Orientation,
};
pub use types::{sqd, Edge, Point, Vec2, VecExt};
