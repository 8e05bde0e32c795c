use biotope_lib::model::config::AppConfig;
use biotope_lib::model::world::World;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_config(population: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.seed = Some(42);
    config.world.deterministic = true;
    config.world.initial_population = population;
    config.world.max_population = population * 2;
    config.telemetry.enabled = false;
    config
}

fn bench_world_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_update");
    for population in [100usize, 500] {
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, &population| {
                let mut world = match World::new(bench_config(population)) {
                    Ok(w) => w,
                    Err(e) => panic!("world setup failed: {e}"),
                };
                b.iter(|| {
                    if world.get_population_count() == 0 {
                        world.reset();
                    }
                    black_box(world.update().ok());
                })
            },
        );
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let world = match World::new(bench_config(300)) {
        Ok(w) => w,
        Err(e) => panic!("world setup failed: {e}"),
    };
    c.bench_function("world_snapshot_300", |b| b.iter(|| black_box(world.snapshot())));
}

criterion_group!(benches, bench_world_update, bench_snapshot);
criterion_main!(benches);
