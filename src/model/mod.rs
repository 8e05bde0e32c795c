pub use biotope_core::{CarcassLogic, PlantVariantLogic, VegetationLogic};
pub mod carcass {
    pub use biotope_core::carcass::*;
}
pub mod config {
    pub use biotope_core::config::*;
}
pub mod spatial_hash {
    pub use biotope_core::spatial_hash::*;
}
pub mod lifecycle {
    pub use biotope_core::lifecycle::*;
}
pub mod math {
    pub use biotope_core::math::*;
}
pub mod snapshot {
    pub use biotope_core::snapshot::*;
}
pub mod interaction {
    pub use biotope_core::interaction::*;
}
pub mod lineage_registry {
    pub use biotope_core::lineage_registry::*;
}
pub mod history {
    pub use biotope_core::history::*;
    pub use biotope_data::{PopulationStats, TraitAverages};
}
pub mod metrics {
    pub use biotope_core::metrics::*;
}
pub mod pheromone {
    pub use biotope_core::pheromone::*;
}
pub mod vegetation {
    pub use biotope_core::vegetation::*;
}
pub mod systems {
    pub use biotope_core::systems::*;
}

pub mod world;

pub mod state {
    pub use biotope_data::*;
}
