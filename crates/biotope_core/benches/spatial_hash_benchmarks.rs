use biotope_core::spatial_hash::SpatialHash;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn grid_positions(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let x = (i % 100) as f64 * 10.0;
            let y = (i / 100) as f64 * 7.0;
            (x, y)
        })
        .collect()
}

fn bench_spatial_hash_build(c: &mut Criterion) {
    let positions = grid_positions(1000);

    c.bench_function("spatial_hash_build_1000", |b| {
        b.iter(|| {
            let mut spatial = SpatialHash::new(20.0, 1000, 700);
            spatial.build(&positions);
            black_box(spatial)
        })
    });
}

fn bench_spatial_hash_query_vision(c: &mut Criterion) {
    let positions = grid_positions(1000);
    let mut spatial = SpatialHash::new(20.0, 1000, 700);
    spatial.build(&positions);

    c.bench_function("spatial_hash_query_150_radius", |b| {
        let mut results = Vec::new();
        b.iter(|| {
            results.clear();
            spatial.query_into(500.0, 350.0, 150.0, &mut results);
            black_box(results.len())
        })
    });
}

fn bench_spatial_hash_count_nearby(c: &mut Criterion) {
    let positions = grid_positions(1000);
    let mut spatial = SpatialHash::new(20.0, 1000, 700);
    spatial.build(&positions);

    c.bench_function("spatial_hash_count_120_radius", |b| {
        b.iter(|| black_box(spatial.count_nearby(500.0, 350.0, 120.0)))
    });
}

criterion_group!(
    benches,
    bench_spatial_hash_build,
    bench_spatial_hash_query_vision,
    bench_spatial_hash_count_nearby
);
criterion_main!(benches);
