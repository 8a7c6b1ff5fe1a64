//! Per-vertex force model.
//!
//! Contributions for vertex `i` (continuous `v1`, quantized `p1`):
//! - the shared wind bias;
//! - per connection, edge tension `direction * stretch` with a dead zone of
//!   `|stretch| < ep`, plus uniform jitter, plus a larger wiggle when the
//!   quantized edge crosses the hole boundary;
//! - a strong pull toward the hole center when `p1` is outside the hole.
//!
//! The net vector is cronched before it is returned. `total` sums unsigned
//! contribution magnitudes so the annealer can tell "settled" from "contested".

use rand::Rng;

use super::cfg::AnnealCfg;
use crate::geom::{point_in_polygon, segment_intersects_hole, sqd, Point, Vec2, VecExt};
use crate::problem::Problem;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Force {
    pub net: Vec2,
    pub total: f64,
}

/// Uniform draw from `scale * {-half, ..., half - 1}`, per axis.
#[inline]
fn centered<R: Rng>(rng: &mut R, half: i32, scale: f64) -> Vec2 {
    let x = rng.gen_range(-half..half);
    let y = rng.gen_range(-half..half);
    Vec2::new(f64::from(x) * scale, f64::from(y) * scale)
}

/// Fresh wind bias.
pub fn new_wind<R: Rng>(cfg: &AnnealCfg, rng: &mut R) -> Vec2 {
    centered(rng, 5, cfg.wind_scale)
}

pub fn compute_force<R: Rng>(
    problem: &Problem,
    pose: &[Vec2],
    qpose: &[Point],
    wind: Vec2,
    cfg: &AnnealCfg,
    rng: &mut R,
    vid: usize,
) -> Force {
    let mut force = Force {
        net: wind,
        total: wind.mag(),
    };
    let v1 = pose[vid];
    let p1 = qpose[vid];

    for con in &problem.connections[vid] {
        let v2 = pose[con.other];
        let p2 = qpose[con.other];

        let mut stretch = sqd(p1, p2) as f64 / con.distance - 1.0;
        if stretch.abs() < problem.ep {
            stretch = 0.0;
        }

        let mut direction = v2 - v1;
        if direction == Vec2::zeros() {
            // Coincident endpoints: aim at a hole vertex picked by the neighbour.
            let h = problem.hole[con.other % problem.hole.len()];
            direction = h.to_vec2() - v1;
        }
        force.net += direction.norm_or_zero() * stretch;
        force.total += stretch.abs();

        force.net += centered(rng, 50, cfg.jitter_scale);

        if segment_intersects_hole(&problem.hole, p1, p2) {
            force.net += centered(rng, 50, cfg.wiggle_scale);
        }
    }

    if !point_in_polygon(p1, &problem.hole) {
        let to_center = problem.center.to_vec2() - v1;
        force.net += to_center * cfg.outside_pull;
        force.total += to_center.mag();
    }

    force.net = force.net.cronch();
    force
}

/// Recompute every vertex force in index order (the draw order is part of the
/// reproducible trajectory).
pub fn update_forces<R: Rng>(
    problem: &Problem,
    pose: &[Vec2],
    qpose: &[Point],
    wind: Vec2,
    cfg: &AnnealCfg,
    rng: &mut R,
    forces: &mut [Force],
) {
    for (vid, f) in forces.iter_mut().enumerate() {
        *f = compute_force(problem, pose, qpose, wind, cfg, rng, vid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Edge;
    use rand::{rngs::StdRng, SeedableRng};

    fn quiet() -> AnnealCfg {
        AnnealCfg {
            jitter_scale: 0.0,
            wiggle_scale: 0.0,
            ..AnnealCfg::default()
        }
    }

    fn square_hole() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(20, 0),
            Point::new(20, 20),
            Point::new(0, 20),
        ]
    }

    fn two_vertex_problem(epsilon: u32) -> Problem {
        // Rest length² 4.
        let verts = vec![Point::new(5, 5), Point::new(7, 5)];
        Problem::new(verts, vec![Edge::new(0, 1)], square_hole(), epsilon).unwrap()
    }

    fn qpose(pose: &[Vec2]) -> Vec<Point> {
        pose.iter().map(VecExt::quantize).collect()
    }

    #[test]
    fn settled_edge_only_feels_wind() {
        let p = two_vertex_problem(1000);
        let pose = vec![Vec2::new(5.0, 5.0), Vec2::new(7.0, 5.0)];
        let q = qpose(&pose);
        let mut rng = StdRng::seed_from_u64(1);
        let f = compute_force(&p, &pose, &q, Vec2::new(0.4, 0.0), &quiet(), &mut rng, 0);
        assert!((f.net - Vec2::new(0.4f64.sqrt(), 0.0)).norm() < 1e-12);
        assert!((f.total - 0.4).abs() < 1e-12);
    }

    #[test]
    fn stretched_edge_pulls_endpoints_together() {
        let p = two_vertex_problem(1000);
        // Length² 16 vs rest 4: stretch 3.
        let pose = vec![Vec2::new(5.0, 5.0), Vec2::new(9.0, 5.0)];
        let q = qpose(&pose);
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = quiet();
        let f0 = compute_force(&p, &pose, &q, Vec2::zeros(), &cfg, &mut rng, 0);
        let f1 = compute_force(&p, &pose, &q, Vec2::zeros(), &cfg, &mut rng, 1);
        assert!((f0.net - Vec2::new(3f64.sqrt(), 0.0)).norm() < 1e-12);
        assert!((f1.net + Vec2::new(3f64.sqrt(), 0.0)).norm() < 1e-12);
        assert!((f0.total - 3.0).abs() < 1e-12);
    }

    #[test]
    fn compressed_edge_pushes_apart_and_counts_magnitude() {
        let p = two_vertex_problem(1000);
        // Length² 1 vs rest 4: stretch -0.75.
        let pose = vec![Vec2::new(5.0, 5.0), Vec2::new(6.0, 5.0)];
        let q = qpose(&pose);
        let mut rng = StdRng::seed_from_u64(1);
        let f = compute_force(&p, &pose, &q, Vec2::zeros(), &quiet(), &mut rng, 0);
        assert!(f.net.x < 0.0);
        assert!((f.total - 0.75).abs() < 1e-12);
    }

    #[test]
    fn coincident_endpoints_fall_back_to_hole_vertex() {
        let p = two_vertex_problem(1000);
        let pose = vec![Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)];
        let q = qpose(&pose);
        let mut rng = StdRng::seed_from_u64(1);
        // Vertex 0's neighbour is 1, so it aims at hole[1] = (20, 0); stretch -1.
        let f = compute_force(&p, &pose, &q, Vec2::zeros(), &quiet(), &mut rng, 0);
        let toward = (Vec2::new(20.0, 0.0) - pose[0]).norm_or_zero();
        assert!((f.net + toward).norm() < 1e-12);
        assert!(f.net.x < 0.0 && f.net.y > 0.0);
    }

    #[test]
    fn outside_vertex_is_pulled_to_center() {
        let p = two_vertex_problem(1000);
        let pose = vec![Vec2::new(30.0, 5.0), Vec2::new(32.0, 5.0)];
        let q = qpose(&pose);
        let mut rng = StdRng::seed_from_u64(1);
        let f = compute_force(&p, &pose, &q, Vec2::zeros(), &quiet(), &mut rng, 0);
        let to_center = p.center.to_vec2() - pose[0];
        assert!(f.net.x < 0.0);
        assert!((f.total - to_center.mag()).abs() < 1e-9);
        // Cronched: |net| = sqrt(10 * |to_center|).
        assert!((f.net.mag() - (10.0 * to_center.mag()).sqrt()).abs() < 1e-9);
    }

    /// U-shaped hole with a notch over x in 2..4, y in 2..6.
    fn u_hole() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(6, 0),
            Point::new(6, 6),
            Point::new(4, 6),
            Point::new(4, 2),
            Point::new(2, 2),
            Point::new(2, 6),
            Point::new(0, 6),
        ]
    }

    fn net_with_wiggle(verts: &[Point], wiggle_scale: f64, seed: u64) -> Vec2 {
        let p = Problem::new(verts.to_vec(), vec![Edge::new(0, 1)], u_hole(), 1000).unwrap();
        let pose: Vec<Vec2> = verts.iter().map(|v| v.to_vec2()).collect();
        let cfg = AnnealCfg {
            wiggle_scale,
            ..quiet()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        compute_force(&p, &pose, &p.verts, Vec2::zeros(), &cfg, &mut rng, 0).net
    }

    #[test]
    fn crossing_edge_wiggles() {
        // Both endpoints in the prongs; the edge cuts across the notch.
        let across = [Point::new(1, 4), Point::new(5, 4)];
        let moved = (0..8)
            .filter(|&seed| net_with_wiggle(&across, 0.1, seed) != net_with_wiggle(&across, 0.0, seed))
            .count();
        assert!(moved > 0);
        for seed in 0..8 {
            // Raw wiggle is at most 5 per axis before cronch.
            assert!(net_with_wiggle(&across, 0.1, seed).mag() <= (5.0f64 * 2f64.sqrt()).sqrt() + 1e-12);
        }

        // Same length along the base: no crossing, the wiggle scale is irrelevant.
        let along = [Point::new(1, 1), Point::new(5, 1)];
        for seed in 0..8 {
            assert_eq!(net_with_wiggle(&along, 0.1, seed), net_with_wiggle(&along, 0.0, seed));
        }
    }

    #[test]
    fn jitter_is_bounded_and_seeded() {
        let p = two_vertex_problem(1000);
        let pose = vec![Vec2::new(5.0, 5.0), Vec2::new(7.0, 5.0)];
        let q = qpose(&pose);
        let cfg = AnnealCfg::default();
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let fa = compute_force(&p, &pose, &q, Vec2::zeros(), &cfg, &mut a, 0);
        let fb = compute_force(&p, &pose, &q, Vec2::zeros(), &cfg, &mut b, 0);
        assert_eq!(fa, fb);
        // Raw jitter is at most 0.5 per axis, so the cronched net stays under ~0.85.
        assert!(fa.net.mag() <= (0.5f64 * 2f64.sqrt()).sqrt() + 1e-12);
        assert_eq!(fa.total, 0.0);
    }

    #[test]
    fn wind_draws_stay_in_range() {
        let cfg = AnnealCfg::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let w = new_wind(&cfg, &mut rng);
            assert!((-0.5..=0.4 + 1e-12).contains(&w.x));
            assert!((-0.5..=0.4 + 1e-12).contains(&w.y));
        }
    }
}
