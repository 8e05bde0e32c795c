use super::lifeform::Behavior;
use super::traits::LineageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single telemetry record. Serialized one per line with a monotonic `tick`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum LiveEvent {
    Movement {
        id: Uuid,
        behavior: Behavior,
        vx: f64,
        vy: f64,
        speed: f64,
        effort: f64,
        energy_ratio: f64,
        threat_distance: Option<f64>,
        prey_distance: Option<f64>,
        has_food_target: bool,
        tick: u64,
        timestamp: String,
    },
    ThreatDetected {
        id: Uuid,
        threat_id: Uuid,
        distance: f64,
        tick: u64,
        timestamp: String,
    },
    PreyAcquired {
        id: Uuid,
        prey_id: Uuid,
        distance: f64,
        tick: u64,
        timestamp: String,
    },
    BehaviorActivity {
        id: Uuid,
        from: Behavior,
        to: Behavior,
        tick: u64,
        timestamp: String,
    },
    CarcassTransition {
        id: Uuid,
        from: String,
        to: String,
        resource: f64,
        tick: u64,
        timestamp: String,
    },
    Birth {
        id: Uuid,
        parents: (Uuid, Uuid),
        lineage: LineageId,
        gen: u32,
        tick: u64,
        timestamp: String,
    },
    Death {
        id: Uuid,
        lineage: LineageId,
        age: u64,
        tick: u64,
        timestamp: String,
        #[serde(default)]
        cause: String,
    },
    LineageFounded {
        lineage: LineageId,
        parent: LineageId,
        dna_change: f64,
        color_change: f64,
        tick: u64,
        timestamp: String,
    },
    Extinction {
        population: usize,
        tick: u64,
        timestamp: String,
    },
}

impl LiveEvent {
    pub fn tick(&self) -> u64 {
        match self {
            LiveEvent::Movement { tick, .. }
            | LiveEvent::ThreatDetected { tick, .. }
            | LiveEvent::PreyAcquired { tick, .. }
            | LiveEvent::BehaviorActivity { tick, .. }
            | LiveEvent::CarcassTransition { tick, .. }
            | LiveEvent::Birth { tick, .. }
            | LiveEvent::Death { tick, .. }
            | LiveEvent::LineageFounded { tick, .. }
            | LiveEvent::Extinction { tick, .. } => *tick,
        }
    }
}

/// Per-lineage means of the attributes shown in lineage summaries.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TraitAverages {
    pub health: f64,
    pub vision: f64,
    pub attack_now: f64,
    pub defence_now: f64,
    pub speed: f64,
    pub maturity: f64,
    pub size: f64,
}

/// Aggregate population statistics, recomputed once per tick.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PopulationStats {
    pub population: usize,
    pub plant_count: usize,
    pub lineage_count: usize,
    pub lineage_counts: BTreeMap<LineageId, usize>,
    pub lineage_averages: BTreeMap<LineageId, TraitAverages>,
    pub death_age_avg: f64,
    pub avg_health: f64,
    pub avg_vision: f64,
    pub avg_generation: f64,
    pub avg_hunger: f64,
    pub avg_size: f64,
    pub avg_age: f64,
    pub avg_maturity: f64,
    pub avg_speed: f64,
    pub avg_cooldown: f64,
}
