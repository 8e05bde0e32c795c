use serde::{Deserialize, Serialize};
use std::fmt;

/// 24-bit color of a lineage or pheromone trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sum of the three channels, used as the denominator of color deviation.
    pub fn channel_sum(&self) -> u32 {
        u32::from(self.r) + u32::from(self.g) + u32::from(self.b)
    }

    /// Sum of per-channel absolute differences.
    pub fn channel_distance(&self, other: &Rgb) -> u32 {
        u32::from(self.r.abs_diff(other.r))
            + u32::from(self.g.abs_diff(other.g))
            + u32::from(self.b.abs_diff(other.b))
    }
}

/// Opaque lineage identifier.
///
/// Founding lineages are numbered (`"0"`, `"1"`, ...). Descendant lineages
/// append a per-parent counter to the parent id (`"3-1"`, `"3-1-4"`), so the
/// id alone encodes ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineageId(pub String);

impl LineageId {
    pub fn root(index: usize) -> Self {
        Self(index.to_string())
    }

    pub fn child(&self, suffix: u32) -> Self {
        Self(format!("{}-{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of ancestors encoded in the id.
    pub fn depth(&self) -> usize {
        self.0.matches('-').count()
    }
}

impl fmt::Display for LineageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The scalar (non-color) heritable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitField {
    Width,
    Height,
    Health,
    Maturity,
    Vision,
    DefencePower,
    AttackPower,
    Energy,
    Longevity,
}

impl TraitField {
    pub const ALL: [TraitField; 9] = [
        TraitField::Width,
        TraitField::Height,
        TraitField::Health,
        TraitField::Maturity,
        TraitField::Vision,
        TraitField::DefencePower,
        TraitField::AttackPower,
        TraitField::Energy,
        TraitField::Longevity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraitField::Width => "width",
            TraitField::Height => "height",
            TraitField::Health => "health",
            TraitField::Maturity => "maturity",
            TraitField::Vision => "vision",
            TraitField::DefencePower => "defence_power",
            TraitField::AttackPower => "attack_power",
            TraitField::Energy => "energy",
            TraitField::Longevity => "longevity",
        }
    }
}

/// Heritable trait vector of a lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitVector {
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
    pub health: u32,
    pub maturity: u32,
    pub vision: u32,
    pub defence_power: u32,
    pub attack_power: u32,
    pub energy: u32,
    pub longevity: u32,
}

impl Default for TraitVector {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            color: Rgb::new(120, 120, 120),
            health: 100,
            maturity: 100,
            vision: 100,
            defence_power: 50,
            attack_power: 50,
            energy: 100,
            longevity: 3000,
        }
    }
}

impl TraitVector {
    pub fn get(&self, field: TraitField) -> u32 {
        match field {
            TraitField::Width => self.width,
            TraitField::Height => self.height,
            TraitField::Health => self.health,
            TraitField::Maturity => self.maturity,
            TraitField::Vision => self.vision,
            TraitField::DefencePower => self.defence_power,
            TraitField::AttackPower => self.attack_power,
            TraitField::Energy => self.energy,
            TraitField::Longevity => self.longevity,
        }
    }

    pub fn set(&mut self, field: TraitField, value: u32) {
        match field {
            TraitField::Width => self.width = value,
            TraitField::Height => self.height = value,
            TraitField::Health => self.health = value,
            TraitField::Maturity => self.maturity = value,
            TraitField::Vision => self.vision = value,
            TraitField::DefencePower => self.defence_power = value,
            TraitField::AttackPower => self.attack_power = value,
            TraitField::Energy => self.energy = value,
            TraitField::Longevity => self.longevity = value,
        }
    }

    /// Full-grown body area.
    pub fn base_size(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}
