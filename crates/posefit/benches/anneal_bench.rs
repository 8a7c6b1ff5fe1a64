//! Criterion benchmarks for the lattice predicates and a short annealing run.
//! Hole sizes: regular-ish star polygons with 8..64 vertices, radius 40.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use posefit::anneal::{AnnealCfg, Annealer};
use posefit::geom::{find_all_points_in_hole, find_all_points_in_hole_naive, point_in_polygon};
use posefit::{Edge, Point, Problem};
use rand::{rngs::StdRng, SeedableRng};

/// Star-shaped hole: alternating outer/inner radius around (50, 50).
fn star_hole(n: usize) -> Vec<Point> {
    (0..n)
        .map(|k| {
            let theta = k as f64 * std::f64::consts::TAU / n as f64;
            let r = if k % 2 == 0 { 40.0 } else { 25.0 };
            Point::new(
                (50.0 + r * theta.cos()).round() as i16,
                (50.0 + r * theta.sin()).round() as i16,
            )
        })
        .collect()
}

fn bench_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice");
    for &n in &[8usize, 16, 32, 64] {
        let hole = star_hole(n);
        let min = Point::new(10, 10);
        let max = Point::new(90, 90);
        group.bench_with_input(BenchmarkId::new("point_in_polygon", n), &hole, |b, h| {
            b.iter(|| point_in_polygon(Point::new(50, 50), h))
        });
        group.bench_with_input(BenchmarkId::new("enumerate_scan", n), &hole, |b, h| {
            b.iter(|| find_all_points_in_hole(min, max, h))
        });
        group.bench_with_input(BenchmarkId::new("enumerate_naive", n), &hole, |b, h| {
            b.iter(|| find_all_points_in_hole_naive(min, max, h))
        });
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let verts = vec![
        Point::new(0, 0),
        Point::new(10, 0),
        Point::new(10, 10),
        Point::new(0, 10),
    ];
    let edges = vec![
        Edge::new(0, 1),
        Edge::new(1, 2),
        Edge::new(2, 3),
        Edge::new(3, 0),
        Edge::new(0, 2),
    ];
    let problem = Problem::new(verts, edges, star_hole(16), 50_000).unwrap();
    let cfg = AnnealCfg::restart().with_budget(2_000);
    c.bench_function("anneal_2k_iterations", |b| {
        b.iter(|| {
            let mut a = Annealer::new(cfg, StdRng::seed_from_u64(7));
            a.run(&problem).is_some()
        })
    });
}

criterion_group!(benches, bench_lattice, bench_anneal);
criterion_main!(benches);
