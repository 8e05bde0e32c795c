mod common;

use biotope_lib::model::history::LiveEvent;
use biotope_lib::model::lineage_registry::LineageRegistry;
use biotope_lib::model::state::{LineageId, TraitVector};
use common::{LifeformBuilder, WorldBuilder};

fn divergent_world() -> biotope_lib::model::world::World {
    let a = LifeformBuilder::new().at(100.0, 100.0).build();
    let b = LifeformBuilder::new().at(101.0, 100.0).build();
    WorldBuilder::new()
        .with_config(|c| {
            c.evolution.mutation_rate = 1.0;
            c.evolution.dna_change_threshold = -1.0;
            c.evolution.color_change_threshold = -1.0;
        })
        .with_lineage(TraitVector::default())
        .with_lifeform(a)
        .with_lifeform(b)
        .build()
}

#[test]
fn test_divergent_child_founds_lineage() {
    let mut world = divergent_world();
    let events = world.update().expect("Update failed");

    let founded = events
        .iter()
        .find_map(|e| match e {
            LiveEvent::LineageFounded { lineage, parent, .. } => Some((lineage, parent)),
            _ => None,
        })
        .expect("lineage founded");
    assert_eq!(founded.0.as_str(), "0-1");
    assert_eq!(*founded.1, LineageId::root(0));

    assert_eq!(world.lineage_registry.len(), 2);
    assert_eq!(world.metrics.counter("lineages_founded"), 1);

    let record = world.lineage_registry.get(&LineageId::from("0-1")).unwrap();
    assert_eq!(record.parent, Some(LineageId::root(0)));
    assert_eq!(record.current_population, 1);
    assert!(!record.mutations.is_empty());

    let child_lineage = events.iter().find_map(|e| match e {
        LiveEvent::Birth { lineage, .. } => Some(lineage.clone()),
        _ => None,
    });
    assert_eq!(child_lineage, Some(LineageId::from("0-1")));
}

#[test]
fn test_child_joining_other_lineage_adopts_its_traits() {
    let sibling = TraitVector {
        vision: 150,
        attack_power: 70,
        defence_power: 30,
        ..TraitVector::default()
    };
    let a = LifeformBuilder::new().at(100.0, 100.0).build();
    let b = LifeformBuilder::new().at(101.0, 100.0).build();
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.evolution.mutation_rate = 1.0;
            // Never stays in the parent lineage, always matches the next one.
            c.evolution.dna_change_threshold = -1.0;
            c.evolution.color_change_threshold = 1e9;
        })
        .with_lineage(TraitVector::default())
        .with_lineage(sibling)
        .with_lifeform(a)
        .with_lifeform(b)
        .build();
    let events = world.update().expect("Update failed");

    let child_id = events
        .iter()
        .find_map(|e| match e {
            LiveEvent::Birth { id, lineage, .. } => {
                assert_eq!(*lineage, LineageId::root(1));
                Some(*id)
            }
            _ => None,
        })
        .expect("child born");
    let child = world.get_lifeform(child_id).unwrap();
    assert_eq!(child.genome.lineage, LineageId::root(1));
    assert_eq!(child.genome.traits, sibling);
    assert_eq!(world.lineage_registry.len(), 2);
}

#[test]
fn test_registry_survives_save_and_load() {
    let mut world = divergent_world();
    world.update().expect("Update failed");

    let dir = std::env::temp_dir().join(format!("biotope-lineage-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("lineages.json");
    world.lineage_registry.save(&path).unwrap();

    let loaded = LineageRegistry::load(&path).unwrap();
    assert_eq!(loaded.len(), world.lineage_registry.len());
    let child = loaded.get(&LineageId::from("0-1")).unwrap();
    assert_eq!(child.parent, Some(LineageId::root(0)));
    assert!(loaded.contains(&LineageId::root(0)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_lineage_counts_follow_population() {
    let mut world = WorldBuilder::new()
        .with_seed(5)
        .with_config(|c| c.world.initial_population = 60)
        .build();

    for _ in 0..50 {
        world.update().expect("Update failed");
    }
    let living: usize = world
        .lineage_registry
        .iter()
        .map(|r| r.current_population)
        .sum();
    assert_population!(world, living);
    for (lineage, count) in &world.pop_stats.lineage_counts {
        let record = world.lineage_registry.get(lineage).unwrap();
        assert_eq!(record.current_population, *count);
        assert!(!record.is_extinct);
    }
}
