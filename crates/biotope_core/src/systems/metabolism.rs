//! Derived stats, aging and growth.

use crate::config::{BehaviorConfig, MetabolismConfig, TraitConfig};
use biotope_data::{Body, Genome, PlantVariant, TraitVector, Vitals};

/// Current body dimensions: juveniles scale linearly with age up to maturity.
pub fn grown_dimensions(traits: &TraitVector, age: u64) -> (f64, f64) {
    let w = f64::from(traits.width);
    let h = f64::from(traits.height);
    if traits.maturity == 0 || age >= u64::from(traits.maturity) {
        return (w, h);
    }
    let factor = (age as f64 / f64::from(traits.maturity)).max(0.1);
    (w * factor, h * factor)
}

pub fn speed_for(
    traits: &TraitVector,
    body: &Body,
    vitals: &Vitals,
    avg_maturity: f64,
    config: &BehaviorConfig,
) -> f64 {
    let mut speed = config.base_speed
        - vitals.hunger / 500.0
        - vitals.age as f64 / 1000.0
        - body.size() / 250.0
        - vitals.wounded / 20.0
        + vitals.health_now / 200.0
        + f64::from(traits.energy) / 100.0;

    if vitals.age < u64::from(traits.maturity) && avg_maturity > 0.0 {
        speed *= (f64::from(traits.maturity) / avg_maturity) / 10.0;
    }
    speed.clamp(config.min_speed, config.max_speed)
}

fn age_factor(traits: &TraitVector, age: u64) -> f64 {
    let longevity = u64::from(traits.longevity);
    if age > longevity {
        // Saturates to zero long before the exponent overflows i32.
        let excess = (age - longevity).min(10_000) as i32;
        0.9_f64.powi(excess)
    } else {
        1.0
    }
}

/// Attack or defence derived from a base trait value.
pub fn power_for(base: u32, body: &Body, vitals: &Vitals, traits: &TraitVector) -> f64 {
    let base = f64::from(base);
    let mut power = base * (vitals.energy_now / 100.0);
    power -= base * (vitals.wounded / 100.0);
    power += (body.size() - 50.0) * 0.8;
    power -= vitals.hunger * 0.1;
    power *= age_factor(traits, vitals.age);
    power.clamp(1.0, 100.0)
}

/// Recomputes speed, attack and defence for this tick.
pub fn derive_stats(
    genome: &Genome,
    body: &mut Body,
    vitals: &mut Vitals,
    avg_maturity: f64,
    config: &BehaviorConfig,
) {
    let traits = &genome.traits;
    body.speed = speed_for(traits, body, vitals, avg_maturity, config);
    vitals.attack_now = power_for(traits.attack_power, body, vitals, traits);
    vitals.defence_now = power_for(traits.defence_power, body, vitals, traits);
}

/// One tick of aging: hunger, energy recovery, wound healing, health decay,
/// cooldown and growth.
pub fn progression(genome: &Genome, body: &mut Body, vitals: &mut Vitals, config: &MetabolismConfig) {
    let traits = &genome.traits;
    vitals.hunger += config.hunger_rate;
    vitals.age += 1;
    vitals.energy_now += config.energy_recovery;
    vitals.wounded = (vitals.wounded - config.wound_heal).max(0.0);
    vitals.cooldown = vitals.cooldown.saturating_sub(1);

    if vitals.age > u64::from(traits.longevity) {
        vitals.health_now -= config.longevity_decay;
    }
    if vitals.age > config.extreme_age {
        vitals.health_now -= config.extreme_age_decay;
    }
    if vitals.hunger > config.hunger_penalty_threshold {
        vitals.health_now -= config.hunger_penalty;
    }
    if vitals.hunger > config.extreme_hunger_threshold {
        vitals.health_now -= config.extreme_hunger_penalty;
    }

    vitals.energy_now = vitals.energy_now.clamp(1.0, f64::from(traits.energy).max(1.0));
    vitals.health_now = vitals.health_now.min(f64::from(traits.health));

    let (w, h) = grown_dimensions(traits, vitals.age);
    body.width = w;
    body.height = h;
}

/// Adds `amount` health, capped at the base health trait.
pub fn heal(vitals: &mut Vitals, traits: &TraitVector, amount: f64) {
    vitals.health_now = (vitals.health_now + amount).min(f64::from(traits.health));
}

/// Adds `amount` energy, capped at the base energy trait.
pub fn restore_energy(vitals: &mut Vitals, traits: &TraitVector, amount: f64) {
    vitals.energy_now = (vitals.energy_now + amount).min(f64::from(traits.energy));
}

pub fn satiate(vitals: &mut Vitals, amount: f64) {
    vitals.hunger = (vitals.hunger - amount).max(0.0);
}

/// The non-satiating part of a plant bite. Spore plants sharpen vision and
/// fortified plants harden defence, one point per bite up to the trait bound.
pub fn apply_plant_effect(
    variant: PlantVariant,
    genome: &mut Genome,
    vitals: &mut Vitals,
    config: &BehaviorConfig,
    bounds: &TraitConfig,
) {
    let traits = &mut genome.traits;
    match variant {
        PlantVariant::Normal => {
            heal(vitals, traits, config.plant_heal);
            restore_energy(vitals, traits, config.plant_energy);
        }
        PlantVariant::Radiant => {
            heal(vitals, traits, config.plant_heal * 2.0);
            restore_energy(vitals, traits, config.plant_energy * 2.0);
        }
        PlantVariant::Spore => {
            restore_energy(vitals, traits, config.plant_energy * 1.25);
            traits.vision = (traits.vision + 1).min(bounds.vision.max);
        }
        PlantVariant::Fortified => {
            heal(vitals, traits, config.plant_heal * 1.2);
            traits.defence_power = (traits.defence_power + 1).min(bounds.defence_power.max);
        }
    }
}
