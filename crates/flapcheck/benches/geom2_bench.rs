//! Criterion benchmarks for the polygon kernel and geometric flap-position mode.
//! Focus sizes: n in {4, 12, 48, 192} vertices.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p flapcheck

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use flapcheck::api::{
    draw_polygon_radial, point_in_polygon, point_to_polygon_distance, polygon_area,
    polygons_overlap, validate_flap_position, DefectLocation, FlapArea, FlapDrawing, Point,
    PositionCfg, PositionMode, RadialCfg, ReplayToken, VertexCount,
};

fn outline(n: usize, seed: u64, radius: f64) -> Vec<Point> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        base_radius: radius,
        ..Default::default()
    };
    draw_polygon_radial(cfg, ReplayToken { seed, index: 0 })
}

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom2");
    for &n in &[4usize, 12, 48, 192] {
        group.bench_with_input(BenchmarkId::new("polygon_area", n), &n, |b, &n| {
            b.iter_batched(
                || outline(n, 41, 80.0),
                |p| {
                    let _a = polygon_area(&p);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("point_queries", n), &n, |b, &n| {
            let poly = outline(n, 42, 80.0);
            let probe = Point::new(530.0, 470.0);
            b.iter(|| {
                let _in = point_in_polygon(probe, &poly);
                let _d = point_to_polygon_distance(probe, &poly);
            })
        });

        group.bench_with_input(BenchmarkId::new("polygons_overlap", n), &n, |b, &n| {
            b.iter_batched(
                || (outline(n, 43, 80.0), outline(n, 44, 40.0)),
                |(a, b2)| {
                    let _o = polygons_overlap(&a, &b2);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("flap_position");
    let defect = DefectLocation {
        center_x: 500.0,
        center_y: 500.0,
        width: 90.0,
        height: 70.0,
        points: None,
    };
    for &grid in &[8usize, 24, 64] {
        let cfg = PositionCfg {
            mode: PositionMode::Geometric,
            coverage_grid: grid,
        };
        group.bench_with_input(BenchmarkId::new("geometric", grid), &grid, |b, _| {
            let drawing = FlapDrawing {
                flap_areas: vec![FlapArea {
                    points: outline(24, 45, 70.0),
                    ..Default::default()
                }],
                ..Default::default()
            };
            b.iter(|| {
                let _m = validate_flap_position(Some(&drawing), Some(&defect), &[], &[], &cfg);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kernel, bench_position);
criterion_main!(benches);
