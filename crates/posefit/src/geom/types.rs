//! Value types: lattice points, continuous vectors, and figure edges.

use nalgebra::Vector2;

/// Continuous 2D position or force.
pub type Vec2 = Vector2<f64>;

/// Integer lattice coordinate. Puzzle coordinates fit in 16 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i16, i16)> for Point {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// Squared Euclidean distance between two lattice points.
///
/// Computed in 64 bits: a 16-bit span squared overflows `i32`.
#[inline]
pub fn sqd(a: Point, b: Point) -> u64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    (dx * dx + dy * dy) as u64
}

/// Figure edge as an ordered pair of vertex indices (undirected geometrically).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub s: usize,
    pub e: usize,
}

impl Edge {
    #[inline]
    pub const fn new(s: usize, e: usize) -> Self {
        Self { s, e }
    }
}

/// Lattice-aware helpers on `Vec2`.
pub trait VecExt {
    /// Euclidean length.
    fn mag(&self) -> f64;
    /// Unit vector in the same direction; the zero vector maps to zero.
    fn norm_or_zero(&self) -> Self;
    /// Nearest lattice point, rounding half away from zero per axis.
    /// Out-of-range components saturate at the `i16` bounds.
    fn quantize(&self) -> Point;
    /// Keep the direction, replace the magnitude `m` with `sqrt(m)`.
    fn cronch(&self) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn mag(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    fn norm_or_zero(&self) -> Self {
        let m = self.mag();
        if m == 0.0 {
            return Vec2::zeros();
        }
        self / m
    }

    #[inline]
    fn quantize(&self) -> Point {
        // `f64::round` rounds half away from zero; `as` saturates.
        Point::new(self.x.round() as i16, self.y.round() as i16)
    }

    #[inline]
    fn cronch(&self) -> Self {
        self.norm_or_zero() * self.mag().sqrt()
    }
}
