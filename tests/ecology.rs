mod common;

use biotope_lib::model::state::{PlantVariant, TraitVector};
use common::{LifeformBuilder, WorldBuilder};

#[test]
fn test_hungry_lifeform_eats_nearby_plant() {
    let eater = LifeformBuilder::new().at(100.0, 100.0).hunger(300.0).build();
    let id = eater.identity.id;

    let mut world = WorldBuilder::new()
        .with_lineage(TraitVector::default())
        .with_lifeform(eater)
        .with_plant(105.0, 100.0, 100.0)
        .build();
    world.update().expect("Update failed");

    // 300 + 1 hunger this tick - 60 satiation
    assert_hunger_eq!(world, id, 241.0);
    let plants = world.get_all_plants();
    assert_eq!(plants.len(), 1);
    // 100 - 12 bite + 0.1 regrowth
    assert!((plants[0].resource - 88.1).abs() < 1e-9, "resource {}", plants[0].resource);
    assert!(plants[0].side < plants[0].base_side);
}

#[test]
fn test_spore_plant_sharpens_vision() {
    let eater = LifeformBuilder::new().at(100.0, 100.0).hunger(300.0).build();
    let id = eater.identity.id;
    let vision = eater.genome.traits.vision;

    let mut world = WorldBuilder::new()
        .with_lineage(TraitVector::default())
        .with_lifeform(eater)
        .with_plant_variant(105.0, 100.0, 100.0, PlantVariant::Spore)
        .build();
    world.update().expect("Update failed");

    assert_hunger_eq!(world, id, 241.0);
    assert_eq!(world.get_lifeform(id).unwrap().genome.traits.vision, vision + 1);
    // 100 - 12 bite + 0.1 * 0.8 regrowth
    let plant = &world.get_all_plants()[0];
    assert_eq!(plant.variant, PlantVariant::Spore);
    assert!((plant.resource - 88.08).abs() < 1e-9, "resource {}", plant.resource);
}

#[test]
fn test_sated_lifeform_ignores_plants() {
    let eater = LifeformBuilder::new().at(100.0, 100.0).hunger(100.0).build();
    let id = eater.identity.id;

    let mut world = WorldBuilder::new()
        .with_lineage(TraitVector::default())
        .with_lifeform(eater)
        .with_plant(105.0, 100.0, 50.0)
        .build();
    world.update().expect("Update failed");

    assert_eq!(world.get_lifeform(id).unwrap().targets.plant, None);
    assert!((world.get_all_plants()[0].resource - 50.1).abs() < 1e-9);
}

#[test]
fn test_depleted_plant_is_not_eaten() {
    let eater = LifeformBuilder::new().at(100.0, 100.0).hunger(300.0).build();
    let id = eater.identity.id;

    let mut world = WorldBuilder::new()
        .with_lineage(TraitVector::default())
        .with_lifeform(eater)
        .with_plant(105.0, 100.0, 0.5)
        .build();
    world.update().expect("Update failed");

    assert_hunger_eq!(world, id, 301.0);
    assert!((world.get_all_plants()[0].resource - 0.6).abs() < 1e-9);
}

#[test]
fn test_pheromone_trails_fade() {
    let walker = LifeformBuilder::new().at(300.0, 300.0).build();
    let mut world = WorldBuilder::new()
        .with_lineage(TraitVector::default())
        .with_lifeform(walker)
        .build();

    world.update().expect("Update failed");
    assert_eq!(world.pheromones.len(), 1);
    assert_eq!(world.pheromones.trails[0].strength, 100.0);

    for _ in 0..49 {
        world.update().expect("Update failed");
    }
    // One deposit per tick, each lasting ten decay steps.
    assert_eq!(world.pheromones.len(), 10);
    assert!(world
        .pheromones
        .trails
        .iter()
        .all(|t| t.strength > 0.0 && t.strength <= 100.0));
}

#[test]
fn test_vegetation_stays_within_bounds() {
    let mut world = WorldBuilder::new()
        .with_seed(9)
        .with_config(|c| {
            c.world.initial_population = 40;
            c.vegetation.initial_count = 30;
            c.vegetation.spawn_chance = 0.5;
        })
        .build();

    for _ in 0..200 {
        world.update().expect("Update failed");
        let plants = world.get_all_plants();
        assert!(plants.len() <= world.config.vegetation.max_count);
        for p in plants {
            assert!(p.resource >= 0.0 && p.resource <= world.config.vegetation.max_resource);
            assert!(p.side > 0.0 && p.side <= p.base_side);
        }
    }
}
