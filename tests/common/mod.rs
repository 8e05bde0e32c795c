pub mod macros;

use biotope_lib::model::config::AppConfig;
use biotope_lib::model::lifecycle;
use biotope_lib::model::state::{Lifeform, LineageId, PlantVariant, TraitVector, Vegetation};
use biotope_lib::model::systems::metabolism;
use biotope_lib::model::world::World;
use biotope_lib::model::VegetationLogic;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Builds a world with no random population: only what the test adds.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    lineages: Vec<TraitVector>,
    lifeforms: Vec<Lifeform>,
    plants: Vec<(f64, f64, f64, PlantVariant)>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_population = 0;
        config.world.seed = Some(42);
        config.vegetation.initial_count = 0;
        config.vegetation.spawn_chance = 0.0;
        config.telemetry.enabled = false;
        Self {
            config,
            lineages: Vec::new(),
            lifeforms: Vec::new(),
            plants: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Registers a founding lineage. The n-th call creates lineage `"n"`.
    pub fn with_lineage(mut self, traits: TraitVector) -> Self {
        self.lineages.push(traits);
        self
    }

    pub fn with_lifeform(mut self, lifeform: Lifeform) -> Self {
        self.lifeforms.push(lifeform);
        self
    }

    pub fn with_plant(mut self, x: f64, y: f64, resource: f64) -> Self {
        self.with_plant_variant(x, y, resource, PlantVariant::Normal)
    }

    pub fn with_plant_variant(
        mut self,
        x: f64,
        y: f64,
        resource: f64,
        variant: PlantVariant,
    ) -> Self {
        self.plants.push((x, y, resource, variant));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for traits in self.lineages {
            world.lineage_registry.register_root(traits, 0);
        }
        for lf in self.lifeforms {
            world.spawn_lifeform(lf);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for (x, y, resource, variant) in self.plants {
            let mut plant =
                Vegetation::sprout_variant_with_rng(x, y, 12.0, 100.0, variant, &mut rng);
            plant.resource = resource;
            world.ecs.spawn((plant,));
        }
        world
    }
}

/// A mature, healthy, well-fed lifeform of lineage `"0"` with default traits.
#[allow(dead_code)]
pub struct LifeformBuilder {
    id: Option<Uuid>,
    x: f64,
    y: f64,
    lineage: LineageId,
    traits: TraitVector,
    age: u64,
    health: Option<f64>,
    hunger: f64,
    cooldown: u32,
    wounded: f64,
    leader: bool,
    partner: Option<Uuid>,
    enemy: Option<Uuid>,
}

#[allow(dead_code)]
impl LifeformBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            x: 100.0,
            y: 100.0,
            lineage: LineageId::root(0),
            traits: TraitVector::default(),
            age: 200,
            health: None,
            hunger: 10.0,
            cooldown: 0,
            wounded: 0.0,
            leader: false,
            partner: None,
            enemy: None,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn lineage(mut self, index: usize) -> Self {
        self.lineage = LineageId::root(index);
        self
    }

    pub fn traits(mut self, traits: TraitVector) -> Self {
        self.traits = traits;
        self
    }

    pub fn age(mut self, age: u64) -> Self {
        self.age = age;
        self
    }

    pub fn health(mut self, health: f64) -> Self {
        self.health = Some(health);
        self
    }

    pub fn hunger(mut self, hunger: f64) -> Self {
        self.hunger = hunger;
        self
    }

    pub fn cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn wounded(mut self, wounded: f64) -> Self {
        self.wounded = wounded;
        self
    }

    pub fn leader(mut self) -> Self {
        self.leader = true;
        self
    }

    pub fn partner(mut self, id: Uuid) -> Self {
        self.partner = Some(id);
        self
    }

    pub fn enemy(mut self, id: Uuid) -> Self {
        self.enemy = Some(id);
        self
    }

    pub fn build(self) -> Lifeform {
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        let mut rng = ChaCha8Rng::seed_from_u64(id.as_u128() as u64);
        let mut lf = lifecycle::create_lifeform_with_rng(
            self.x,
            self.y,
            self.lineage,
            self.traits,
            0,
            &mut rng,
        );
        lf.identity.id = id;
        let (w, h) = metabolism::grown_dimensions(&self.traits, self.age);
        lf.body.width = w;
        lf.body.height = h;
        lf.vitals.age = self.age;
        lf.vitals.hunger = self.hunger;
        lf.vitals.cooldown = self.cooldown;
        lf.vitals.wounded = self.wounded;
        if let Some(health) = self.health {
            lf.vitals.health_now = health;
        }
        lf.social.is_leader = self.leader;
        lf.targets.partner = self.partner;
        lf.targets.enemy = self.enemy;
        lf
    }
}
