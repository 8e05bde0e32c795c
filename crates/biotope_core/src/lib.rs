//! # Biotope Core
//!
//! The simulation logic of Biotope, an artificial-life simulation where
//! lifeforms with heritable traits compete for food, fight, form groups and
//! reproduce with mutation, splitting the population into lineages.
//!
//! This crate contains everything that does not own the world:
//! - Trait mixing, mutation and lineage classification
//! - Perception, behavior selection, combat and feeding
//! - Metabolism and derived stats
//! - Vegetation, pheromone trails and carcasses
//! - Spatial indexing, telemetry and metrics
//!
//! ## Determinism
//!
//! Every function that needs randomness takes an explicit `Rng`. The world
//! orchestrator seeds one ChaCha8 stream per lifeform per tick, so results do
//! not depend on thread scheduling.
//!
//! ## Example
//!
//! ```
//! use biotope_core::config::AppConfig;
//! use biotope_core::lineage_registry::LineageRegistry;
//! use biotope_core::systems::reproduction;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = AppConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut registry = LineageRegistry::new();
//! let founder = registry.seed_random_lineages(1, &config.traits, 0, &mut rng)[0].clone();
//! let traits = registry.get(&founder).unwrap().traits;
//! let child = reproduction::mix(&traits, &traits, 0.0, &config.traits, &mut rng);
//! assert_eq!(child.traits, traits);
//! ```

/// Carcass decomposition
pub mod carcass;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for configuration and telemetry I/O
pub mod error;
/// Telemetry logging of live events
pub mod history;
/// Deferred commands produced by parallel passes
pub mod interaction;
/// Lifeform creation and trait randomization
pub mod lifecycle;
/// Lineage registry and classifier
pub mod lineage_registry;
/// Geometry helpers
pub mod math;
/// Performance metrics collection and logging
pub mod metrics;
/// Pheromone trails left by moving lifeforms
pub mod pheromone;
/// Read-only snapshots for parallel passes and presentation layers
pub mod snapshot;
/// Spatial hashing for proximity queries
pub mod spatial_hash;
/// Per-tick lifeform systems (perception, behavior, metabolism, reproduction)
pub mod systems;
/// Vegetation growth and consumption
pub mod vegetation;

pub use carcass::CarcassLogic;
pub use error::{BiotopeError, Result};
pub use metrics::{init_logging, Metrics};
pub use vegetation::{PlantVariantLogic, VegetationLogic};
