//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section has defaults, so a partial file only
//! overrides what it names.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1000
//! height = 700
//! initial_population = 100
//! max_population = 150
//! seed = 42
//! deterministic = true
//!
//! [evolution]
//! mutation_rate = 0.05
//! dna_change_threshold = 0.1
//! ```

use crate::error::{BiotopeError, Result};
use biotope_data::TraitField;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static obstacle that lifeforms bounce off.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Barrier {
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }
}

/// World dimensions, population bounds and seeding.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub initial_population: usize,
    /// Hard cap enforced at reproduction time.
    pub max_population: usize,
    pub initial_lineages: usize,
    /// Lifeforms of one founding lineage spawn within this radius of a shared center.
    pub spawn_cluster_radius: f64,
    pub barrier: Option<Barrier>,
    pub leader_chance: f64,
    pub seed: Option<u64>,
    pub deterministic: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            initial_population: 100,
            max_population: 150,
            initial_lineages: 10,
            spawn_cluster_radius: 80.0,
            barrier: Some(Barrier {
                x: 450.0,
                y: 250.0,
                width: 100.0,
                height: 200.0,
            }),
            leader_chance: 0.1,
            seed: None,
            deterministic: false,
        }
    }
}

/// Mutation and lineage divergence parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Per-field probability that a child's trait mutates.
    pub mutation_rate: f64,
    /// Mean fractional trait deviation above which a child may found a lineage.
    pub dna_change_threshold: f64,
    /// Fractional color deviation above which a child may found a lineage.
    pub color_change_threshold: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.05,
            dna_change_threshold: 0.1,
            color_change_threshold: 0.1,
        }
    }
}

/// Costs and gating of sexual reproduction.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReproductionConfig {
    pub cooldown: u32,
    pub hunger_cost: f64,
    pub energy_cost: f64,
    pub health_cost: f64,
    pub partner_min_health: f64,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            cooldown: 80,
            hunger_cost: 50.0,
            energy_cost: 20.0,
            health_cost: 5.0,
            partner_min_health: 50.0,
        }
    }
}

/// Valid range, founding range and mutation step of one heritable field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TraitBounds {
    pub min: u32,
    pub max: u32,
    pub initial_min: u32,
    pub initial_max: u32,
    pub mutation_delta: u32,
}

impl TraitBounds {
    const fn new(min: u32, max: u32, initial: (u32, u32), mutation_delta: u32) -> Self {
        Self {
            min,
            max,
            initial_min: initial.0,
            initial_max: initial.1,
            mutation_delta,
        }
    }

    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TraitConfig {
    pub width: TraitBounds,
    pub height: TraitBounds,
    pub health: TraitBounds,
    pub maturity: TraitBounds,
    pub vision: TraitBounds,
    pub defence_power: TraitBounds,
    pub attack_power: TraitBounds,
    pub energy: TraitBounds,
    pub longevity: TraitBounds,
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            width: TraitBounds::new(2, 10, (2, 10), 2),
            height: TraitBounds::new(2, 10, (2, 10), 2),
            health: TraitBounds::new(1, 10_000, (1, 200), 25),
            maturity: TraitBounds::new(50, 150, (50, 150), 40),
            vision: TraitBounds::new(10, 300, (10, 290), 6),
            defence_power: TraitBounds::new(1, 100, (20, 85), 20),
            attack_power: TraitBounds::new(1, 100, (5, 95), 20),
            energy: TraitBounds::new(1, 150, (78, 110), 6),
            longevity: TraitBounds::new(1, 100_000, (900, 5200), 120),
        }
    }
}

impl TraitConfig {
    pub fn bounds(&self, field: TraitField) -> &TraitBounds {
        match field {
            TraitField::Width => &self.width,
            TraitField::Height => &self.height,
            TraitField::Health => &self.health,
            TraitField::Maturity => &self.maturity,
            TraitField::Vision => &self.vision,
            TraitField::DefencePower => &self.defence_power,
            TraitField::AttackPower => &self.attack_power,
            TraitField::Energy => &self.energy,
            TraitField::Longevity => &self.longevity,
        }
    }
}

/// Decision thresholds, contact rules and group detection.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BehaviorConfig {
    pub contact_radius: f64,
    pub forage_hunger: f64,
    pub hunt_hunger: f64,
    pub reproduce_hunger: f64,
    pub mob_hunger: f64,
    /// Fraction of own defence subtracted from an enemy's melee damage.
    pub defence_absorption: f64,
    pub follow_range: f64,
    pub drift_chance: f64,
    pub search_turn_chance: f64,
    pub plant_bite: f64,
    pub plant_heal: f64,
    pub plant_energy: f64,
    pub plant_satiation: f64,
    pub hunt_satiation: f64,
    pub base_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub group_min_neighbors: usize,
    pub group_max_radius: f64,
    pub group_cohesion: f64,
    pub group_persistence: u32,
    pub group_maturity_ratio: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            contact_radius: 3.0,
            forage_hunger: 250.0,
            hunt_hunger: 500.0,
            reproduce_hunger: 500.0,
            mob_hunger: 250.0,
            defence_absorption: 0.2,
            follow_range: 30.0,
            drift_chance: 0.05,
            search_turn_chance: 0.25,
            plant_bite: 12.0,
            plant_heal: 30.0,
            plant_energy: 20.0,
            plant_satiation: 60.0,
            hunt_satiation: 40.0,
            base_speed: 6.0,
            min_speed: 1.0,
            max_speed: 10.0,
            group_min_neighbors: 3,
            group_max_radius: 120.0,
            group_cohesion: 0.35,
            group_persistence: 45,
            group_maturity_ratio: 0.6,
        }
    }
}

/// Per-tick aging and health decay.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub hunger_rate: f64,
    pub energy_recovery: f64,
    pub wound_heal: f64,
    pub longevity_decay: f64,
    pub extreme_age: u64,
    pub extreme_age_decay: f64,
    pub hunger_penalty_threshold: f64,
    pub hunger_penalty: f64,
    pub extreme_hunger_threshold: f64,
    pub extreme_hunger_penalty: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 1.0,
            energy_recovery: 0.5,
            wound_heal: 1.0,
            longevity_decay: 0.5,
            extreme_age: 10_000,
            extreme_age_decay: 50.0,
            hunger_penalty_threshold: 500.0,
            hunger_penalty: 0.1,
            extreme_hunger_threshold: 1000.0,
            extreme_hunger_penalty: 1.0,
        }
    }
}

/// Plants, pheromone trails and carcasses.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VegetationConfig {
    pub initial_count: usize,
    pub max_count: usize,
    pub side: f64,
    pub regrowth: f64,
    pub max_resource: f64,
    pub spawn_chance: f64,
    /// Sprouting odds for normal, radiant, spore and fortified plants.
    pub variant_weights: [f64; 4],
    pub pheromone_strength: f64,
    pub pheromone_decay: f64,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            initial_count: 100,
            max_count: 150,
            side: 12.0,
            regrowth: 0.1,
            max_resource: 100.0,
            spawn_chance: 0.02,
            variant_weights: [0.65, 0.15, 0.12, 0.08],
            pheromone_strength: 100.0,
            pheromone_decay: 10.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    /// A movement sample is emitted for each lifeform every this many ticks. 0 disables.
    pub movement_sample_interval: u64,
    pub log_dir: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            movement_sample_interval: 30,
            log_dir: "logs".to_string(),
        }
    }
}

/// Top-level configuration, one field per `config.toml` section.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub evolution: EvolutionConfig,
    pub reproduction: ReproductionConfig,
    pub traits: TraitConfig,
    pub behavior: BehaviorConfig,
    pub metabolism: MetabolismConfig,
    pub vegetation: VegetationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Loads and validates a TOML config file. A missing file yields defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        if w.width == 0 || w.height == 0 {
            return Err(BiotopeError::config("world dimensions must be non-zero"));
        }
        if w.max_population < w.initial_population {
            return Err(BiotopeError::config(format!(
                "max_population {} is below initial_population {}",
                w.max_population, w.initial_population
            )));
        }
        if w.initial_population > 0 && w.initial_lineages == 0 {
            return Err(BiotopeError::config(
                "initial_lineages must be at least 1 when lifeforms are spawned",
            ));
        }
        for (name, p) in [
            ("world.leader_chance", w.leader_chance),
            ("evolution.mutation_rate", self.evolution.mutation_rate),
            ("behavior.drift_chance", self.behavior.drift_chance),
            ("behavior.search_turn_chance", self.behavior.search_turn_chance),
            ("vegetation.spawn_chance", self.vegetation.spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(BiotopeError::config(format!(
                    "{name} must be a probability, got {p}"
                )));
            }
        }
        for field in TraitField::ALL {
            let b = self.traits.bounds(field);
            if b.min > b.max || b.initial_min > b.initial_max {
                return Err(BiotopeError::config(format!(
                    "trait {} has an inverted range",
                    field.name()
                )));
            }
            if b.initial_min < b.min || b.initial_max > b.max {
                return Err(BiotopeError::config(format!(
                    "trait {} founding range lies outside its valid range",
                    field.name()
                )));
            }
        }
        if self.behavior.min_speed > self.behavior.max_speed {
            return Err(BiotopeError::config("behavior.min_speed exceeds max_speed"));
        }
        if self.vegetation.max_count < self.vegetation.initial_count {
            return Err(BiotopeError::config(
                "vegetation.max_count is below initial_count",
            ));
        }
        if self
            .vegetation
            .variant_weights
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(BiotopeError::config(
                "vegetation.variant_weights must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let toml_str = r#"
            [world]
            initial_population = 20
            seed = 7

            [evolution]
            mutation_rate = 0.0
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.world.initial_population, 20);
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.world.max_population, 150);
        assert_eq!(config.evolution.mutation_rate, 0.0);
        assert_eq!(config.reproduction.cooldown, 80);
    }

    #[test]
    fn test_validate_rejects_cap_below_initial() {
        let mut config = AppConfig::default();
        config.world.max_population = 10;
        assert!(matches!(config.validate(), Err(BiotopeError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let mut config = AppConfig::default();
        config.evolution.mutation_rate = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_trait_range() {
        let mut config = AppConfig::default();
        config.traits.vision.min = 400;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_variant_weight() {
        let mut config = AppConfig::default();
        config.vegetation.variant_weights = [1.0, -0.5, 0.0, 0.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_from("definitely/not/here.toml").unwrap();
        assert_eq!(config.world.width, 1000);
    }

    #[test]
    fn test_trait_bounds_clamp() {
        let b = TraitConfig::default().attack_power;
        assert_eq!(b.clamp(-5), 1);
        assert_eq!(b.clamp(250), 100);
        assert_eq!(b.clamp(42), 42);
    }
}
