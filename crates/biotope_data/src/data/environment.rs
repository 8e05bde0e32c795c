use super::traits::Rgb;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stationary food source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vegetation {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    /// Footprint side length at full resource.
    pub base_side: f64,
    /// Current footprint side length, derived from the resource level.
    pub side: f64,
    pub resource: f64,
    #[serde(default)]
    pub variant: PlantVariant,
}

/// Plant kinds, each with its own resource profile and feeding boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantVariant {
    #[default]
    Normal,
    Radiant,
    Spore,
    Fortified,
}

impl PlantVariant {
    pub const ALL: [PlantVariant; 4] = [
        PlantVariant::Normal,
        PlantVariant::Radiant,
        PlantVariant::Spore,
        PlantVariant::Fortified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantVariant::Normal => "normal",
            PlantVariant::Radiant => "radiant",
            PlantVariant::Spore => "spore",
            PlantVariant::Fortified => "fortified",
        }
    }
}

/// A fading scent mark left behind by a moving lifeform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PheromoneTrail {
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecompositionStage {
    Fresh,
    Decaying,
    Remains,
    Gone,
}

impl DecompositionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecompositionStage::Fresh => "fresh",
            DecompositionStage::Decaying => "decaying",
            DecompositionStage::Remains => "remains",
            DecompositionStage::Gone => "gone",
        }
    }
}

/// What is left of a lifeform after death.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carcass {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    pub initial_resource: f64,
    pub resource: f64,
    pub decay_rate: f64,
    pub stage: DecompositionStage,
}
