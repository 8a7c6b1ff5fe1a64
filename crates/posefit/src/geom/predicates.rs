//! Point-in-polygon and proper segment crossing on the lattice.

use super::types::Point;

/// Iterate the x-intercepts of every polygon edge whose y-span straddles `y`.
///
/// An edge `v0 → v1` straddles when `v0.y <= y < v1.y` or `v1.y <= y < v0.y`,
/// so horizontal edges never contribute. Shared by the single-point test and
/// the row scan in `lattice` so both see bit-identical intercepts.
pub(super) fn row_crossings(poly: &[Point], y: i16) -> impl Iterator<Item = f64> + '_ {
    let n = poly.len();
    (0..n).filter_map(move |i| {
        let v0 = poly[i];
        let v1 = poly[(i + 1) % n];
        let straddles = (v0.y <= y && v1.y > y) || (v1.y <= y && v0.y > y);
        if !straddles {
            return None;
        }
        let (x0, y0) = (f64::from(v0.x), f64::from(v0.y));
        let (x1, y1) = (f64::from(v1.x), f64::from(v1.y));
        Some((x1 - x0) * (f64::from(y) - y0) / (y1 - y0) + x0)
    })
}

/// Even-odd ray cast: each straddling edge whose intercept lies strictly to
/// the left of `p` toggles the inside flag.
///
/// Right and bottom boundary points are inside, left and top are outside.
pub fn point_in_polygon(p: Point, poly: &[Point]) -> bool {
    let px = f64::from(p.x);
    row_crossings(poly, p.y).filter(|&cross| cross < px).count() % 2 == 1
}

/// Side of `c` relative to the directed line `a → b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
    Colinear,
}

/// Twice the signed area of triangle `(a, b, c)`.
#[inline]
fn area2(a: Point, b: Point, c: Point) -> i64 {
    let (ax, ay) = (i64::from(a.x), i64::from(a.y));
    let (bx, by) = (i64::from(b.x), i64::from(b.y));
    let (cx, cy) = (i64::from(c.x), i64::from(c.y));
    (bx - ax) * (cy - ay) - (cx - ax) * (by - ay)
}

#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    match area2(a, b, c) {
        x if x > 0 => Orientation::Left,
        x if x < 0 => Orientation::Right,
        _ => Orientation::Colinear,
    }
}

/// Proper crossing of segments `p1p2` and `p3p4`.
///
/// Any colinear orientation (an endpoint on the other segment's line) counts
/// as no intersection: touching the boundary is allowed.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let o1 = orientation(p1, p2, p3);
    let o2 = orientation(p1, p2, p4);
    let o3 = orientation(p3, p4, p1);
    let o4 = orientation(p3, p4, p2);
    if [o1, o2, o3, o4].contains(&Orientation::Colinear) {
        return false;
    }
    o1 != o2 && o3 != o4
}

/// True if `p1p2` properly crosses any boundary edge of `hole` (wrap-around).
pub fn segment_intersects_hole(hole: &[Point], p1: Point, p2: Point) -> bool {
    let n = hole.len();
    (0..n).any(|i| segments_intersect(p1, p2, hole[i], hole[(i + 1) % n]))
}
