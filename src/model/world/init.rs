use crate::model::config::{AppConfig, Barrier};
use crate::model::history::{HistoryLogger, PopulationStats};
use crate::model::lifecycle;
use crate::model::lineage_registry::LineageRegistry;
use crate::model::math;
use crate::model::metrics::Metrics;
use crate::model::pheromone::PheromoneField;
use crate::model::spatial_hash::SpatialHash;
use crate::model::world::{World, SPATIAL_CELL_SIZE};
use crate::model::vegetation::pick_variant;
use crate::model::VegetationLogic;
use biotope_data::{Lifeform, LineageId, Vegetation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use uuid::Uuid;

const PLACEMENT_ATTEMPTS: usize = 32;

fn world_rng(config: &AppConfig) -> ChaCha8Rng {
    match config.world.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn blocked(barrier: Option<&Barrier>, x: f64, y: f64, w: f64, h: f64) -> bool {
    barrier.is_some_and(|b| math::rects_overlap((x - w / 2.0, y - h / 2.0, w, h), b.rect()))
}

/// Random point inside the world whose `w`x`h` footprint clears the barrier.
fn open_point<R: Rng>(config: &AppConfig, w: f64, h: f64, rng: &mut R) -> (f64, f64) {
    let max_x = (f64::from(config.world.width) - 1.0).max(1.0);
    let max_y = (f64::from(config.world.height) - 1.0).max(1.0);
    let mut point = (max_x / 2.0, max_y / 2.0);
    for _ in 0..PLACEMENT_ATTEMPTS {
        point = (rng.gen_range(0.0..=max_x), rng.gen_range(0.0..=max_y));
        if !blocked(config.world.barrier.as_ref(), point.0, point.1, w, h) {
            break;
        }
    }
    point
}

/// Random point within `radius` of a center, kept inside the world and off
/// the barrier. Falls back to anywhere open when the cluster is walled in.
fn clustered_point<R: Rng>(
    config: &AppConfig,
    center: (f64, f64),
    radius: f64,
    w: f64,
    h: f64,
    rng: &mut R,
) -> (f64, f64) {
    let max_x = f64::from(config.world.width);
    let max_y = f64::from(config.world.height);
    for _ in 0..PLACEMENT_ATTEMPTS {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let r = radius * rng.gen::<f64>().sqrt();
        let x = (center.0 + r * angle.cos()).clamp(0.0, max_x);
        let y = (center.1 + r * angle.sin()).clamp(0.0, max_y);
        if !blocked(config.world.barrier.as_ref(), x, y, w, h) {
            return (x, y);
        }
    }
    open_point(config, w, h, rng)
}

impl World {
    pub fn new_at(config: AppConfig, log_dir: &str) -> anyhow::Result<Self> {
        config.validate()?;
        let logger = if config.telemetry.enabled {
            HistoryLogger::new_at(log_dir)?
        } else {
            HistoryLogger::new_dummy()
        };
        let width = config.world.width;
        let height = config.world.height;

        let mut world = Self {
            width,
            height,
            tick: 0,
            ecs: hecs::World::new(),
            logger,
            spatial_hash: SpatialHash::new(SPATIAL_CELL_SIZE, width, height),
            plant_hash: SpatialHash::new(SPATIAL_CELL_SIZE, width, height),
            pop_stats: PopulationStats::default(),
            lineage_registry: LineageRegistry::new(),
            pheromones: PheromoneField::new(
                config.vegetation.pheromone_strength,
                config.vegetation.pheromone_decay,
            ),
            carcasses: Vec::new(),
            death_ages: VecDeque::new(),
            rng: world_rng(&config),
            config,
            log_dir: log_dir.to_string(),
            metrics: Metrics::new(),
            lifeform_snapshots: Vec::new(),
            plant_snapshots: Vec::new(),
            interaction_buffer: Vec::new(),
            pending_births: Vec::new(),
            pending_trails: Vec::new(),
            was_populated: false,
        };
        world.populate();

        tracing::info!(
            width = width,
            height = height,
            lifeforms = world.get_population_count(),
            plants = world.get_plant_count(),
            lineages = world.lineage_registry.len(),
            "World created"
        );
        Ok(world)
    }

    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let log_dir = config.telemetry.log_dir.clone();
        Self::new_at(config, &log_dir)
    }

    /// Discards every lifeform, plant, lineage and decoration and seeds a
    /// fresh population. The telemetry sink is kept.
    pub fn reset(&mut self) {
        self.ecs.clear();
        self.tick = 0;
        self.lineage_registry.clear();
        self.pheromones.clear();
        self.carcasses.clear();
        self.death_ages.clear();
        self.pop_stats = PopulationStats::default();
        self.metrics.reset();
        self.rng = world_rng(&self.config);
        self.lifeform_snapshots.clear();
        self.plant_snapshots.clear();
        self.interaction_buffer.clear();
        self.pending_births.clear();
        self.pending_trails.clear();
        self.populate();
        tracing::info!(
            lifeforms = self.get_population_count(),
            lineages = self.lineage_registry.len(),
            "World reset"
        );
    }

    /// Seeds the founding lineages, their clustered members and the plants.
    /// Every seeded lineage gets at least one founder.
    fn populate(&mut self) {
        let count = self.config.world.initial_population;
        let lineages = if count > 0 {
            self.lineage_registry.seed_random_lineages(
                self.config.world.initial_lineages.clamp(1, count),
                &self.config.traits,
                0,
                &mut self.rng,
            )
        } else {
            Vec::new()
        };

        let max_x = f64::from(self.width);
        let max_y = f64::from(self.height);
        let centers: Vec<(f64, f64)> = lineages
            .iter()
            .map(|_| (self.rng.gen_range(0.0..=max_x), self.rng.gen_range(0.0..=max_y)))
            .collect();

        let mut founders = Vec::with_capacity(count);
        for i in 0..count {
            let slot = i % lineages.len();
            let lineage = lineages[slot].clone();
            let Some(traits) = self.lineage_registry.canonical(&lineage).copied() else {
                continue;
            };
            let (x, y) = clustered_point(
                &self.config,
                centers[slot],
                self.config.world.spawn_cluster_radius,
                f64::from(traits.width),
                f64::from(traits.height),
                &mut self.rng,
            );
            let mut lf = lifecycle::create_lifeform_with_rng(x, y, lineage, traits, 0, &mut self.rng);
            lf.social.is_leader = self.rng.gen_bool(self.config.world.leader_chance);
            founders.push(lf);
        }
        for lf in founders {
            self.spawn_lifeform(lf);
        }

        for _ in 0..self.config.vegetation.initial_count {
            self.spawn_plant();
        }
        self.was_populated = self.get_population_count() > 0;
    }

    /// Inserts a lifeform and counts it toward its lineage.
    pub fn spawn_lifeform(&mut self, lf: Lifeform) -> hecs::Entity {
        self.lineage_registry.record_birth(&lf.genome.lineage);
        self.was_populated = true;
        self.ecs.spawn((
            lf.identity,
            lf.position,
            lf.heading,
            lf.genome,
            lf.body,
            lf.vitals,
            lf.social,
            lf.targets,
        ))
    }

    /// Injects one new founder-generation lifeform of a random known lineage
    /// at a random open position. Registers a fresh lineage when none exist.
    pub fn spawn_one(&mut self) -> Uuid {
        let lineage = if self.lineage_registry.is_empty() {
            let traits = lifecycle::random_traits(&self.config.traits, &mut self.rng);
            self.lineage_registry.register_root(traits, self.tick)
        } else {
            let pick = self.rng.gen_range(0..self.lineage_registry.len());
            self.lineage_registry
                .iter()
                .nth(pick)
                .map(|r| r.id.clone())
                .unwrap_or_else(|| LineageId::root(0))
        };
        let traits = match self.lineage_registry.canonical(&lineage) {
            Some(t) => *t,
            None => lifecycle::random_traits(&self.config.traits, &mut self.rng),
        };
        let (x, y) = open_point(
            &self.config,
            f64::from(traits.width),
            f64::from(traits.height),
            &mut self.rng,
        );
        let mut lf = lifecycle::create_lifeform_with_rng(x, y, lineage, traits, 0, &mut self.rng);
        lf.social.is_leader = self.rng.gen_bool(self.config.world.leader_chance);
        let id = lf.identity.id;
        self.spawn_lifeform(lf);
        tracing::debug!(id = %id, "Lifeform injected");
        id
    }

    /// Sprouts a full plant at a random open position.
    pub fn spawn_plant(&mut self) -> Uuid {
        let side = self.config.vegetation.side;
        let (x, y) = open_point(&self.config, side, side, &mut self.rng);
        let variant = pick_variant(&self.config.vegetation.variant_weights, &mut self.rng);
        let plant = Vegetation::sprout_variant_with_rng(
            x,
            y,
            side,
            self.config.vegetation.max_resource,
            variant,
            &mut self.rng,
        );
        let id = plant.id;
        self.ecs.spawn((plant,));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(seed);
        config.telemetry.enabled = false;
        config
    }

    #[test]
    fn test_initial_population_and_plants() {
        let world = World::new(quiet_config(7)).unwrap();
        assert_eq!(world.get_population_count(), 100);
        assert_eq!(world.get_plant_count(), 100);
        assert_eq!(world.lineage_registry.len(), 10);
        let per_lineage: usize = world
            .lineage_registry
            .iter()
            .map(|r| r.current_population)
            .sum();
        assert_eq!(per_lineage, 100);
    }

    #[test]
    fn test_small_population_seeds_only_founded_lineages() {
        let mut config = quiet_config(7);
        config.world.initial_population = 3;
        config.world.initial_lineages = 10;
        let world = World::new(config).unwrap();
        assert_eq!(world.lineage_registry.len(), 3);
        assert!(world
            .lineage_registry
            .iter()
            .all(|r| r.current_population == 1));
    }

    #[test]
    fn test_spawn_avoids_barrier() {
        let world = World::new(quiet_config(11)).unwrap();
        let barrier = world.config.world.barrier.unwrap();
        for lf in world.get_all_lifeforms() {
            assert!(
                !blocked(
                    Some(&barrier),
                    lf.position.x,
                    lf.position.y,
                    f64::from(lf.genome.traits.width),
                    f64::from(lf.genome.traits.height)
                ),
                "lifeform spawned inside the barrier at {:?}",
                lf.position
            );
        }
    }

    #[test]
    fn test_spawn_one_uses_known_lineage() {
        let mut world = World::new(quiet_config(3)).unwrap();
        let id = world.spawn_one();
        assert_eq!(world.get_population_count(), 101);
        let lf = world
            .get_all_lifeforms()
            .into_iter()
            .find(|l| l.identity.id == id)
            .unwrap();
        assert!(world.lineage_registry.contains(&lf.genome.lineage));
    }

    #[test]
    fn test_spawn_one_into_empty_world() {
        let mut config = quiet_config(3);
        config.world.initial_population = 0;
        let mut world = World::new(config).unwrap();
        assert!(world.lineage_registry.is_empty());
        world.spawn_one();
        assert_eq!(world.get_population_count(), 1);
        assert_eq!(world.lineage_registry.len(), 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut world = World::new(quiet_config(5)).unwrap();
        let before: Vec<_> = world.get_all_lifeforms();
        for _ in 0..5 {
            world.update().unwrap();
        }
        world.reset();
        assert_eq!(world.tick, 0);
        assert_eq!(world.get_all_lifeforms(), before);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = quiet_config(1);
        config.world.max_population = 10;
        assert!(World::new(config).is_err());
    }
}
