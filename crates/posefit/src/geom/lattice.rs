//! Bounding boxes and lattice enumeration of the hole interior.

use super::predicates::{point_in_polygon, row_crossings};
use super::types::Point;

/// Axis-aligned bounding box `(min, max)` of a point list; `None` if empty.
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Every lattice point in `[min, max]` that passes `point_in_polygon`.
///
/// Row-wise scan conversion: the intercepts of one row are computed once and
/// swept left to right, flipping parity as the sweep passes each one. Output
/// is row-major (y outer, x inner) and equals `find_all_points_in_hole_naive`.
pub fn find_all_points_in_hole(min: Point, max: Point, hole: &[Point]) -> Vec<Point> {
    let mut points = Vec::new();
    let mut crossings: Vec<f64> = Vec::with_capacity(hole.len());
    for y in min.y..=max.y {
        crossings.clear();
        crossings.extend(row_crossings(hole, y));
        if crossings.is_empty() {
            continue;
        }
        crossings.sort_by(f64::total_cmp);
        // `passed` counts intercepts strictly left of x.
        let mut passed = 0;
        for x in min.x..=max.x {
            let px = f64::from(x);
            while passed < crossings.len() && crossings[passed] < px {
                passed += 1;
            }
            if passed % 2 == 1 {
                points.push(Point::new(x, y));
            }
        }
    }
    points
}

/// Reference enumeration: test every lattice point of the box independently.
pub fn find_all_points_in_hole_naive(min: Point, max: Point, hole: &[Point]) -> Vec<Point> {
    let mut points = Vec::new();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let p = Point::new(x, y);
            if point_in_polygon(p, hole) {
                points.push(p);
            }
        }
    }
    points
}
