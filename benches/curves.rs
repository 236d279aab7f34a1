//! Benchmarks for centerline interpolation and pipe outlines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pipeshape::{interpolate, pipe_boundary, CatmullRom2, Point2};

/// Generates a zig-zag of control points like a hand-drawn branch.
fn generate_control_points(num_points: usize) -> Vec<Point2<f64>> {
    (0..num_points)
        .map(|i| {
            let x = i as f64 * 120.0;
            let y = if i % 2 == 0 { 0.0 } else { 80.0 };
            Point2::new(x, y)
        })
        .collect()
}

fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");

    for samples in [70, 500, 5000] {
        let points = generate_control_points(8);
        group.throughput(Throughput::Elements(samples as u64));

        group.bench_with_input(BenchmarkId::new("samples", samples), &points, |b, pts| {
            b.iter(|| interpolate(black_box(pts), black_box(samples), black_box(0.5)))
        });
    }

    group.finish();
}

fn bench_catmull_rom_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("catmull_rom_eval");

    for tension in [0.0, 0.5, 1.0] {
        let spline = CatmullRom2::try_new(&generate_control_points(8), tension).unwrap();
        let (start, end) = spline.domain();

        group.bench_with_input(BenchmarkId::new("tension", tension), &spline, |b, s| {
            b.iter(|| {
                for i in 0..1000 {
                    let t = start + (end - start) * i as f64 / 1000.0;
                    let _ = s.eval(black_box(t));
                }
            })
        });
    }

    group.finish();
}

fn bench_pipe_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipe_boundary");

    for samples in [70, 500, 5000] {
        let centerline = interpolate(&generate_control_points(8), samples, 0.5);
        group.throughput(Throughput::Elements(samples as u64));

        group.bench_with_input(
            BenchmarkId::new("samples", samples),
            &centerline,
            |b, line| b.iter(|| pipe_boundary(black_box(line), black_box(40.0))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_interpolate,
    bench_catmull_rom_eval,
    bench_pipe_boundary
);
criterion_main!(benches);
