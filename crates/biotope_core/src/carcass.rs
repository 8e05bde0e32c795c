//! Carcass decomposition.

use biotope_data::{Carcass, DecompositionStage, Rgb};
use uuid::Uuid;

/// Resource level at or below which a carcass disappears.
pub const DEPLETED_RESOURCE: f64 = 0.25;

pub trait CarcassLogic {
    fn from_remains(id: Uuid, x: f64, y: f64, color: Rgb, base_size: f64) -> Self;
    /// Decays one tick. Returns `(from, to)` when the stage changed.
    fn decompose(&mut self) -> Option<(DecompositionStage, DecompositionStage)>;
    fn is_gone(&self) -> bool;
}

pub fn stage_for(resource: f64, initial: f64) -> DecompositionStage {
    if resource <= DEPLETED_RESOURCE {
        return DecompositionStage::Gone;
    }
    let ratio = resource / initial.max(f64::EPSILON);
    if ratio > 2.0 / 3.0 {
        DecompositionStage::Fresh
    } else if ratio > 1.0 / 3.0 {
        DecompositionStage::Decaying
    } else {
        DecompositionStage::Remains
    }
}

impl CarcassLogic for Carcass {
    fn from_remains(id: Uuid, x: f64, y: f64, color: Rgb, base_size: f64) -> Self {
        let resource = base_size.max(5.0);
        Self {
            id,
            x,
            y,
            color,
            initial_resource: resource,
            resource,
            decay_rate: (resource * 0.0005).max(0.05),
            stage: DecompositionStage::Fresh,
        }
    }

    fn decompose(&mut self) -> Option<(DecompositionStage, DecompositionStage)> {
        self.resource = (self.resource - self.decay_rate).max(0.0);
        let next = stage_for(self.resource, self.initial_resource);
        if next != self.stage {
            let previous = self.stage;
            self.stage = next;
            Some((previous, next))
        } else {
            None
        }
    }

    fn is_gone(&self) -> bool {
        self.stage == DecompositionStage::Gone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carcass_walks_through_every_stage() {
        let mut c = Carcass::from_remains(Uuid::nil(), 0.0, 0.0, Rgb::default(), 20.0);
        let mut transitions = Vec::new();
        for _ in 0..1000 {
            if let Some(t) = c.decompose() {
                transitions.push(t);
            }
            if c.is_gone() {
                break;
            }
        }
        assert_eq!(
            transitions,
            vec![
                (DecompositionStage::Fresh, DecompositionStage::Decaying),
                (DecompositionStage::Decaying, DecompositionStage::Remains),
                (DecompositionStage::Remains, DecompositionStage::Gone),
            ]
        );
    }

    #[test]
    fn test_small_bodies_get_minimum_nutrition() {
        let c = Carcass::from_remains(Uuid::nil(), 0.0, 0.0, Rgb::default(), 4.0);
        assert_eq!(c.resource, 5.0);
        assert_eq!(c.decay_rate, 0.05);
    }
}
