//! Trait inheritance: averaging, mutation, clamping and lineage assignment.

use crate::config::{EvolutionConfig, TraitConfig};
use crate::lifecycle;
use crate::lineage_registry::{BirthContext, LineageAssignment, LineageRegistry};
use biotope_data::{LineageId, Rgb, TraitField, TraitVector};
use rand::Rng;

/// A child's traits and the names of the fields that mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildTraits {
    pub traits: TraitVector,
    pub mutations: Vec<String>,
}

/// Element-wise average of two parents, rounding down.
pub fn average(a: &TraitVector, b: &TraitVector) -> TraitVector {
    let mut child = TraitVector {
        color: Rgb::new(
            ((u16::from(a.color.r) + u16::from(b.color.r)) / 2) as u8,
            ((u16::from(a.color.g) + u16::from(b.color.g)) / 2) as u8,
            ((u16::from(a.color.b) + u16::from(b.color.b)) / 2) as u8,
        ),
        ..*a
    };
    for field in TraitField::ALL {
        let mean = (u64::from(a.get(field)) + u64::from(b.get(field))) / 2;
        child.set(field, mean as u32);
    }
    child
}

/// Rolls each field independently; a hit adds a delta within the field's
/// mutation range. A color hit replaces the whole color.
pub fn mutate<R: Rng>(
    traits: &mut TraitVector,
    rate: f64,
    config: &TraitConfig,
    rng: &mut R,
) -> Vec<String> {
    let mut mutated = Vec::new();
    if rate <= 0.0 {
        return mutated;
    }
    for field in TraitField::ALL {
        if rng.gen::<f64>() < rate {
            let delta = i64::from(config.bounds(field).mutation_delta);
            let shift = rng.gen_range(-delta..=delta);
            let value = i64::from(traits.get(field)) + shift;
            traits.set(field, config.bounds(field).clamp(value));
            mutated.push(field.name().to_string());
        }
    }
    if rng.gen::<f64>() < rate {
        traits.color = lifecycle::random_color(rng);
        mutated.push("color".to_string());
    }
    mutated
}

/// Forces every field into its valid range.
pub fn clamp_traits(traits: &mut TraitVector, config: &TraitConfig) {
    for field in TraitField::ALL {
        let value = i64::from(traits.get(field));
        traits.set(field, config.bounds(field).clamp(value));
    }
}

/// Average, mutate and clamp: the full inheritance step for one child.
pub fn mix<R: Rng>(
    a: &TraitVector,
    b: &TraitVector,
    rate: f64,
    config: &TraitConfig,
    rng: &mut R,
) -> ChildTraits {
    let mut traits = average(a, b);
    let mutations = mutate(&mut traits, rate, config, rng);
    clamp_traits(&mut traits, config);
    ChildTraits { traits, mutations }
}

/// Places a child in a lineage. An unmutated child stays in the first
/// parent's lineage without consulting the registry.
pub fn assign_lineage(
    registry: &mut LineageRegistry,
    child: &ChildTraits,
    parent_lineage: &LineageId,
    evolution: &EvolutionConfig,
    birth: BirthContext,
) -> LineageAssignment {
    if child.mutations.is_empty() {
        return LineageAssignment::Inherited(parent_lineage.clone());
    }
    registry.classify_or_create(
        &child.traits,
        parent_lineage,
        evolution.dna_change_threshold,
        evolution.color_change_threshold,
        birth,
    )
}
