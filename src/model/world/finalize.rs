use crate::model::config::MetabolismConfig;
use crate::model::history::timestamp;
use crate::model::systems::stats::{self, StatsContext};
use crate::model::world::World;
use crate::model::{CarcassLogic, PlantVariantLogic, VegetationLogic};
use biotope_data::{
    Body, Carcass, Genome, Heading, Identity, LiveEvent, Position, Social, Targets, TraitVector,
    Vegetation, Vitals,
};
use rand::Rng;

/// Why a lifeform died, judged from its state at death.
pub fn death_cause(vitals: &Vitals, traits: &TraitVector, config: &MetabolismConfig) -> &'static str {
    if vitals.wounded > 0.0 {
        "predation"
    } else if vitals.hunger > config.hunger_penalty_threshold {
        "starvation"
    } else if vitals.age > u64::from(traits.longevity) {
        "old_age"
    } else {
        "exhaustion"
    }
}

impl World {
    pub fn finalize_tick(&mut self, events: &mut Vec<LiveEvent>) -> anyhow::Result<()> {
        let tick = self.tick;

        self.process_deaths(tick, events);
        self.process_births();
        self.finalize_vegetation();
        self.finalize_decorations(tick, events);
        self.finalize_stats(tick, events);

        if let Err(e) = self.logger.log_events(events) {
            tracing::warn!(error = %e, tick = tick, "Failed to write telemetry");
            return Err(e.into());
        }
        Ok(())
    }

    /// Removes every lifeform at or below zero health, leaving a carcass.
    pub fn process_deaths(&mut self, tick: u64, events: &mut Vec<LiveEvent>) {
        let mut dead: Vec<_> = self
            .ecs
            .query::<(&Identity, &Vitals)>()
            .iter()
            .filter(|(_h, (_, vitals))| vitals.health_now <= 0.0)
            .map(|(h, (ident, _))| (h, ident.id))
            .collect();
        dead.sort_by_key(|d| d.1);

        let mut deaths = 0;
        for (handle, id) in dead {
            let removed = self.ecs.remove::<(
                Identity,
                Position,
                Heading,
                Genome,
                Body,
                Vitals,
                Social,
                Targets,
            )>(handle);
            match removed {
                Ok((identity, position, _, genome, _, vitals, _, _)) => {
                    let cause = death_cause(&vitals, &genome.traits, &self.config.metabolism);
                    self.lineage_registry.record_death(&genome.lineage);
                    stats::record_death_age(&mut self.death_ages, vitals.age);
                    self.carcasses.push(Carcass::from_remains(
                        identity.id,
                        position.x,
                        position.y,
                        genome.traits.color,
                        genome.traits.base_size(),
                    ));

                    events.push(LiveEvent::Death {
                        id: identity.id,
                        lineage: genome.lineage,
                        age: vitals.age,
                        tick,
                        timestamp: timestamp(),
                        cause: cause.to_string(),
                    });
                    deaths += 1;
                }
                Err(e) => tracing::warn!(
                    id = %id,
                    error = %e,
                    "Dead lifeform is missing components, despawning without a death record"
                ),
            }
            if let Err(e) = self.ecs.despawn(handle) {
                tracing::warn!(id = %id, error = %e, "Failed to despawn dead lifeform");
            }
        }
        self.metrics.add("deaths", deaths);
    }

    /// Adds the children born this tick. Their lineages were already
    /// credited when they were conceived.
    pub fn process_births(&mut self) {
        let babies = std::mem::take(&mut self.pending_births);
        self.ecs.spawn_batch(babies.into_iter().map(|baby| {
            (
                baby.identity,
                baby.position,
                baby.heading,
                baby.genome,
                baby.body,
                baby.vitals,
                baby.social,
                baby.targets,
            )
        }));
    }

    /// Regrows every plant and occasionally sprouts a new one.
    pub fn finalize_vegetation(&mut self) {
        let cfg = &self.config.vegetation;
        for (_h, plant) in self.ecs.query_mut::<&mut Vegetation>() {
            plant.regrow(cfg.regrowth * plant.variant.regrowth_factor(), cfg.max_resource);
            plant.resize(cfg.max_resource);
        }

        let (max_count, chance) = (cfg.max_count, cfg.spawn_chance);
        if self.get_plant_count() < max_count && self.rng.gen_bool(chance) {
            self.spawn_plant();
        }
    }

    /// Fades pheromone trails, lays this tick's trails and decomposes carcasses.
    pub fn finalize_decorations(&mut self, tick: u64, events: &mut Vec<LiveEvent>) {
        self.pheromones.decay();
        for (x, y, color) in self.pending_trails.drain(..) {
            self.pheromones.deposit(x, y, color);
        }

        for carcass in &mut self.carcasses {
            if let Some((from, to)) = carcass.decompose() {
                events.push(LiveEvent::CarcassTransition {
                    id: carcass.id,
                    from: from.as_str().to_string(),
                    to: to.as_str().to_string(),
                    resource: carcass.resource,
                    tick,
                    timestamp: timestamp(),
                });
            }
        }
        self.carcasses.retain(|c| !c.is_gone());
    }

    pub fn finalize_stats(&mut self, tick: u64, events: &mut Vec<LiveEvent>) {
        let lifeforms = self.get_all_lifeforms();
        let plant_count = self.get_plant_count();
        stats::update_population_stats(StatsContext {
            stats: &mut self.pop_stats,
            lifeforms: &lifeforms,
            plant_count,
            death_ages: &self.death_ages,
        });

        let population = lifeforms.len();
        if population == 0 && self.was_populated {
            tracing::info!(tick = tick, "Population extinct");
            events.push(LiveEvent::Extinction {
                population,
                tick,
                timestamp: timestamp(),
            });
        }
        self.was_populated = population > 0;
    }
}
