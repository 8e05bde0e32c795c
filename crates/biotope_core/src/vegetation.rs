//! Vegetation growth and consumption.

use biotope_data::{PlantVariant, Vegetation};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use uuid::Uuid;

/// Resource profile of a plant kind. All kinds share the configured maximum.
pub trait PlantVariantLogic {
    /// Stock at sprouting.
    fn initial_resource(&self, max: f64) -> f64;
    /// Multiplier on the configured regrowth step.
    fn regrowth_factor(&self) -> f64;
}

impl PlantVariantLogic for PlantVariant {
    fn initial_resource(&self, max: f64) -> f64 {
        max * match self {
            PlantVariant::Normal => 1.0,
            PlantVariant::Radiant => 0.7,
            PlantVariant::Spore => 0.55,
            PlantVariant::Fortified => 0.8,
        }
    }

    fn regrowth_factor(&self) -> f64 {
        match self {
            PlantVariant::Normal => 1.0,
            PlantVariant::Radiant => 0.5,
            PlantVariant::Spore => 0.8,
            PlantVariant::Fortified => 0.6,
        }
    }
}

/// Draws a variant with `weights` in [`PlantVariant::ALL`] order. Falls back to
/// normal when no weight is positive.
pub fn pick_variant<R: Rng>(weights: &[f64; 4], rng: &mut R) -> PlantVariant {
    match WeightedIndex::new(weights) {
        Ok(dist) => PlantVariant::ALL[dist.sample(rng)],
        Err(_) => PlantVariant::Normal,
    }
}

/// Behaviour of a stationary food source.
pub trait VegetationLogic {
    /// A full normal plant.
    fn sprout_with_rng<R: Rng>(x: f64, y: f64, side: f64, max_resource: f64, rng: &mut R)
        -> Self;
    fn sprout_variant_with_rng<R: Rng>(
        x: f64,
        y: f64,
        side: f64,
        max_resource: f64,
        variant: PlantVariant,
        rng: &mut R,
    ) -> Self;
    /// Adds `step` resource, capped at `max`.
    fn regrow(&mut self, step: f64, max: f64);
    /// Removes up to `amount` resource, floored at zero. Returns what was removed.
    fn decrement(&mut self, amount: f64) -> f64;
    /// Recomputes the footprint from the resource level.
    fn resize(&mut self, max: f64);
    fn has_resource(&self) -> bool;
}

impl VegetationLogic for Vegetation {
    fn sprout_with_rng<R: Rng>(
        x: f64,
        y: f64,
        side: f64,
        max_resource: f64,
        rng: &mut R,
    ) -> Self {
        Self::sprout_variant_with_rng(x, y, side, max_resource, PlantVariant::Normal, rng)
    }

    fn sprout_variant_with_rng<R: Rng>(
        x: f64,
        y: f64,
        side: f64,
        max_resource: f64,
        variant: PlantVariant,
        rng: &mut R,
    ) -> Self {
        Self {
            id: Uuid::from_u128(rng.gen()),
            x,
            y,
            base_side: side,
            side,
            resource: variant.initial_resource(max_resource),
            variant,
        }
    }

    fn regrow(&mut self, step: f64, max: f64) {
        self.resource = (self.resource + step).clamp(0.0, max);
    }

    fn decrement(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.resource);
        self.resource = (self.resource - taken).max(0.0);
        taken
    }

    fn resize(&mut self, max: f64) {
        let factor = (self.resource / max.max(1.0)).max(0.1);
        self.side = (self.base_side * factor.sqrt()).max(3.0_f64.min(self.base_side));
    }

    fn has_resource(&self) -> bool {
        self.resource > 1.0
    }
}
