use super::traits::{LineageId, TraitVector};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identification of a lifeform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub parents: Option<(Uuid, Uuid)>,
    pub generation: u32,
}

/// World position of a lifeform's center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Movement direction. Not normalized: speed scales it independently.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading {
    pub dx: f64,
    pub dy: f64,
}

impl Heading {
    /// Direction in degrees, for presentation.
    pub fn angle(&self) -> f64 {
        self.dy.atan2(self.dx).to_degrees()
    }
}

/// Heritable state: the lineage and the traits the lifeform was born with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub lineage: LineageId,
    pub traits: TraitVector,
}

/// Current physical extent and derived speed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Body {
    pub fn size(&self) -> f64 {
        self.width * self.height
    }
}

/// Per-tick metabolic state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health_now: f64,
    pub energy_now: f64,
    pub hunger: f64,
    pub wounded: f64,
    pub age: u64,
    pub cooldown: u32,
    pub attack_now: f64,
    pub defence_now: f64,
}

/// What a lifeform did on its last decision pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Flee,
    Mob,
    Hunt,
    Reproduce,
    Forage,
    Search,
    Follow,
    Drift,
    #[default]
    Idle,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Flee => "flee",
            Behavior::Mob => "mob",
            Behavior::Hunt => "hunt",
            Behavior::Reproduce => "reproduce",
            Behavior::Forage => "forage",
            Behavior::Search => "search",
            Behavior::Follow => "follow",
            Behavior::Drift => "drift",
            Behavior::Idle => "idle",
        }
    }
}

/// Group and leadership state.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Social {
    pub is_leader: bool,
    pub in_group: bool,
    pub group_timer: u32,
    pub group_strength: f64,
    pub searching: bool,
    pub behavior: Behavior,
}

/// Remembered targets. Weak references resolved by id every tick; a failed
/// lookup means the target is gone.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Targets {
    pub enemy: Option<Uuid>,
    pub prey: Option<Uuid>,
    pub partner: Option<Uuid>,
    pub plant: Option<Uuid>,
    pub follow: Option<Uuid>,
}

impl Targets {
    pub fn is_empty(&self) -> bool {
        self.enemy.is_none() && self.prey.is_none() && self.partner.is_none() && self.plant.is_none()
    }
}

/// A complete lifeform, as spawned into or read out of the ECS world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lifeform {
    #[serde(flatten)]
    pub identity: Identity,
    pub position: Position,
    pub heading: Heading,
    pub genome: Genome,
    pub body: Body,
    pub vitals: Vitals,
    pub social: Social,
    pub targets: Targets,
}

impl Lifeform {
    pub fn is_mature(&self) -> bool {
        self.vitals.age >= u64::from(self.genome.traits.maturity)
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.health_now > 0.0
    }
}
