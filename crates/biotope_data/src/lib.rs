//! Plain data structures shared by the Biotope simulation crates.
//!
//! Everything here is serializable state with no simulation logic attached.
//! Behaviour lives in `biotope_core` and the world orchestrator.

pub mod data;

pub use data::environment::{
    Carcass, DecompositionStage, PheromoneTrail, PlantVariant, Vegetation,
};
pub use data::history::{LiveEvent, PopulationStats, TraitAverages};
pub use data::lifeform::{
    Behavior, Body, Genome, Heading, Identity, Lifeform, Position, Social, Targets, Vitals,
};
pub use data::traits::{LineageId, Rgb, TraitField, TraitVector};
