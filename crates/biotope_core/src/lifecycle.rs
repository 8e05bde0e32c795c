use crate::config::{TraitBounds, TraitConfig};
use crate::systems::metabolism;
use biotope_data::{
    Body, Genome, Heading, Identity, Lifeform, LineageId, Position, Rgb, Social, Targets,
    TraitField, TraitVector, Vitals,
};
use rand::Rng;
use uuid::Uuid;

fn sample<R: Rng>(bounds: &TraitBounds, rng: &mut R) -> u32 {
    rng.gen_range(bounds.initial_min..=bounds.initial_max)
}

pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    Rgb::new(rng.gen(), rng.gen(), rng.gen())
}

/// Random founding traits drawn from each field's founding range.
pub fn random_traits<R: Rng>(config: &TraitConfig, rng: &mut R) -> TraitVector {
    let mut traits = TraitVector {
        color: random_color(rng),
        ..TraitVector::default()
    };
    for field in TraitField::ALL {
        traits.set(field, sample(config.bounds(field), rng));
    }
    traits
}

/// Random heading with each component in [-1, 1].
pub fn random_heading<R: Rng>(rng: &mut R) -> Heading {
    Heading {
        dx: rng.gen_range(-1.0..=1.0),
        dy: rng.gen_range(-1.0..=1.0),
    }
}

/// Creates a newborn at age zero with full health and energy.
pub fn create_lifeform_with_rng<R: Rng>(
    x: f64,
    y: f64,
    lineage: LineageId,
    traits: TraitVector,
    generation: u32,
    rng: &mut R,
) -> Lifeform {
    let (width, height) = metabolism::grown_dimensions(&traits, 0);
    Lifeform {
        identity: Identity {
            id: Uuid::from_u128(rng.gen()),
            parents: None,
            generation,
        },
        position: Position { x, y },
        heading: random_heading(rng),
        genome: Genome { lineage, traits },
        body: Body {
            width,
            height,
            speed: 1.0,
        },
        vitals: Vitals {
            health_now: f64::from(traits.health),
            energy_now: f64::from(traits.energy),
            hunger: 0.0,
            wounded: 0.0,
            age: 0,
            cooldown: 0,
            attack_now: f64::from(traits.attack_power),
            defence_now: f64::from(traits.defence_power),
        },
        social: Social::default(),
        targets: Targets::default(),
    }
}
