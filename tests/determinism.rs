mod common;

use biotope_lib::model::config::AppConfig;
use biotope_lib::model::world::World;

fn seeded_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.seed = Some(seed);
    config.world.deterministic = true;
    config.world.initial_population = 50;
    config.telemetry.enabled = false;
    config
}

#[test]
fn test_determinism_consistency() {
    let mut world1 = World::new(seeded_config(12345)).unwrap();
    let mut world2 = World::new(seeded_config(12345)).unwrap();

    for tick in 0..100 {
        let e1 = world1.update().unwrap();
        let e2 = world2.update().unwrap();
        assert_eq!(e1.len(), e2.len(), "Event counts diverged at tick {}", tick);
    }

    assert_eq!(world1.get_all_lifeforms(), world2.get_all_lifeforms());
    assert_eq!(world1.get_all_plants(), world2.get_all_plants());
    assert_eq!(world1.pop_stats, world2.pop_stats);
    assert_eq!(world1.lineage_registry.len(), world2.lineage_registry.len());
    let ids1: Vec<_> = world1.lineage_registry.iter().map(|r| r.id.clone()).collect();
    let ids2: Vec<_> = world2.lineage_registry.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids1, ids2);
}

#[test]
fn test_different_seeds_diverge() {
    let world1 = World::new(seeded_config(1)).unwrap();
    let world2 = World::new(seeded_config(2)).unwrap();
    assert_ne!(world1.get_all_lifeforms(), world2.get_all_lifeforms());
}

#[test]
fn test_reset_replays_the_same_run() {
    let mut world = World::new(seeded_config(77)).unwrap();
    for _ in 0..30 {
        world.update().unwrap();
    }
    let first = world.get_all_lifeforms();

    world.reset();
    assert_eq!(world.tick, 0);
    for _ in 0..30 {
        world.update().unwrap();
    }
    assert_eq!(world.get_all_lifeforms(), first);
}
