//! Pheromone trails left by moving lifeforms.
//!
//! Trails are presentation state only: no decision reads them.

use biotope_data::{PheromoneTrail, Rgb};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PheromoneField {
    pub trails: Vec<PheromoneTrail>,
    pub deposit_strength: f64,
    /// Strength removed from every trail per tick.
    pub decay: f64,
}

impl PheromoneField {
    pub fn new(deposit_strength: f64, decay: f64) -> Self {
        Self {
            trails: Vec::new(),
            deposit_strength,
            decay,
        }
    }

    pub fn deposit(&mut self, x: f64, y: f64, color: Rgb) {
        self.trails.push(PheromoneTrail {
            x,
            y,
            color,
            strength: self.deposit_strength,
        });
    }

    /// Weakens every trail and purges those that reached zero.
    pub fn decay(&mut self) {
        let decay = self.decay;
        for trail in &mut self.trails {
            trail.strength -= decay;
        }
        self.trails.retain(|t| t.strength > 0.0);
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn clear(&mut self) {
        self.trails.clear();
    }
}
