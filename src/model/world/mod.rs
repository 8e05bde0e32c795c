use crate::model::config::AppConfig;
use crate::model::history::{HistoryLogger, PopulationStats};
use crate::model::lineage_registry::LineageRegistry;
use crate::model::metrics::Metrics;
use crate::model::pheromone::PheromoneField;
use crate::model::snapshot::{InternalLifeformSnapshot, InternalPlantSnapshot};
use crate::model::spatial_hash::SpatialHash;
use biotope_core::interaction::InteractionCommand;
use biotope_data::{Carcass, Lifeform, Rgb};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

pub mod finalize;
pub mod init;
pub mod state;
pub mod update;

pub use state::LifeformComponents;

/// Cell size of the lifeform and plant spatial indexes.
pub const SPATIAL_CELL_SIZE: f64 = 50.0;

/// The simulated world: every lifeform and plant, the lineage registry and
/// the decorative layers, advanced one tick at a time by [`World::update`].
///
/// Lifeforms live in the ECS as one entity per lifeform with the components
/// of [`biotope_data::Lifeform`]; plants are entities with a single
/// [`biotope_data::Vegetation`] component.
pub struct World {
    pub width: u16,
    pub height: u16,
    pub tick: u64,
    pub ecs: hecs::World,
    pub logger: HistoryLogger,
    pub spatial_hash: SpatialHash,
    pub plant_hash: SpatialHash,
    pub pop_stats: PopulationStats,
    pub lineage_registry: LineageRegistry,
    pub pheromones: PheromoneField,
    pub carcasses: Vec<Carcass>,
    /// Ages at death of the most recent deaths, oldest first.
    pub death_ages: VecDeque<u64>,
    pub config: AppConfig,
    pub log_dir: String,
    pub metrics: Metrics,
    pub rng: ChaCha8Rng,

    pub lifeform_snapshots: Vec<InternalLifeformSnapshot>,
    pub plant_snapshots: Vec<InternalPlantSnapshot>,
    pub interaction_buffer: Vec<InteractionCommand>,
    pub pending_births: Vec<Lifeform>,
    pub pending_trails: Vec<(f64, f64, Rgb)>,
    /// Whether the previous tick ended with a living population.
    pub was_populated: bool,
}

/// Seed of a lifeform's private random stream for one tick.
pub(crate) fn lifeform_seed(id: uuid::Uuid, tick: u64, world_seed: u64) -> u64 {
    let u = id.as_u128();
    let mut seed = tick
        .wrapping_add(world_seed)
        .wrapping_mul(0x517CC1B727220A95);
    seed ^= (u >> 64) as u64;
    seed = seed.wrapping_mul(0x517CC1B727220A95);
    seed ^= u as u64;
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_lifeform_seed_varies_by_tick_and_id() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        assert_eq!(lifeform_seed(a, 5, 42), lifeform_seed(a, 5, 42));
        assert_ne!(lifeform_seed(a, 5, 42), lifeform_seed(a, 6, 42));
        assert_ne!(lifeform_seed(a, 5, 42), lifeform_seed(b, 5, 42));
        assert_ne!(lifeform_seed(a, 5, 42), lifeform_seed(a, 5, 43));
    }
}
