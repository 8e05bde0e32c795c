use crate::pheromone::PheromoneField;
use biotope_data::{Carcass, LineageId, PlantVariant, PopulationStats, Rgb, Vegetation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frozen per-tick view of a lifeform, shared read-only by the parallel passes.
#[derive(Clone, Debug)]
pub struct InternalLifeformSnapshot {
    pub id: Uuid,
    pub lineage: LineageId,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub vision: f64,
    pub health_now: f64,
    pub attack_now: f64,
    pub defence_now: f64,
    pub is_mature: bool,
    pub is_leader: bool,
    pub has_follow: bool,
    pub in_group: bool,
    pub age: u64,
    pub maturity: u32,
}

/// Frozen per-tick view of a plant.
#[derive(Clone, Debug)]
pub struct InternalPlantSnapshot {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub resource: f64,
}

/// What a presentation layer needs to draw one lifeform.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LifeformView {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub color: Rgb,
    pub attack_now: f64,
    pub defence_now: f64,
    pub lineage: LineageId,
    pub is_leader: bool,
    pub alive: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlantView {
    pub x: f64,
    pub y: f64,
    pub side: f64,
    pub resource: f64,
    pub variant: PlantVariant,
}

impl From<&Vegetation> for PlantView {
    fn from(v: &Vegetation) -> Self {
        Self {
            x: v.x,
            y: v.y,
            side: v.side,
            resource: v.resource,
            variant: v.variant,
        }
    }
}

/// Read-only state of the whole world after a tick.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: u16,
    pub height: u16,
    pub lifeforms: Vec<LifeformView>,
    pub plants: Vec<PlantView>,
    pub pheromones: PheromoneField,
    pub carcasses: Vec<Carcass>,
    pub stats: PopulationStats,
}
