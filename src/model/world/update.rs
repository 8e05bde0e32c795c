use crate::model::history::timestamp;
use crate::model::interaction::InteractionCommand;
use crate::model::lifecycle;
use crate::model::lineage_registry::{BirthContext, LineageAssignment};
use crate::model::systems::behavior::{self, Agent, BehaviorOutcome};
use crate::model::systems::{metabolism, perception, reproduction, social, SystemContext};
use crate::model::world::{lifeform_seed, LifeformComponents, World};
use crate::model::VegetationLogic;
use biotope_data::{Genome, Identity, LiveEvent, Position, Vegetation, Vitals};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

impl World {
    /// Advances the simulation by one tick.
    ///
    /// Sub-steps, in order:
    /// - index lifeforms and plants and freeze their snapshots
    /// - per lifeform, in parallel: group check, perception, derived stats,
    ///   behavior with movement and contact, metabolism
    /// - apply damage, feeding and reproduction commands in lifeform order
    /// - remove the dead, add the newborn, grow plants, fade trails and
    ///   carcasses, recompute statistics
    ///
    /// # Returns
    /// The live events of this tick. Fails only when telemetry cannot be written.
    pub fn update(&mut self) -> anyhow::Result<Vec<LiveEvent>> {
        let started = Instant::now();
        self.tick += 1;
        let world_seed = self.config.world.seed.unwrap_or(0);

        if self.config.world.deterministic {
            let seed = world_seed.wrapping_add(self.tick).wrapping_add(0x5EED);
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }

        let (handles, id_map) = self.build_tick_indices();
        let (plant_handles, plant_map) = self.build_plant_indices();
        self.capture_lifeform_snapshots_with_handles(&handles);
        self.capture_plant_snapshots_with_handles(&plant_handles);
        self.pass_spatial_indexing();

        let outcomes = self.pass_lifeforms(&id_map, &plant_map, world_seed);

        let mut events = Vec::new();
        let mut commands = std::mem::take(&mut self.interaction_buffer);
        commands.clear();
        for outcome in outcomes {
            commands.extend(outcome.commands);
            events.extend(outcome.events);
            if let Some(trail) = outcome.trail {
                self.pending_trails.push(trail);
            }
        }

        self.execute_interactions(&commands, &handles, &plant_handles, &mut events);
        self.interaction_buffer = commands;

        self.finalize_tick(&mut events)?;

        self.metrics.record_tick(
            started.elapsed(),
            self.pop_stats.population,
            self.pop_stats.plant_count,
        );
        Ok(events)
    }

    fn build_tick_indices(&mut self) -> (Vec<hecs::Entity>, HashMap<Uuid, usize>) {
        let mut data: Vec<_> = self
            .ecs
            .query::<&Identity>()
            .iter()
            .map(|(h, i)| (h, i.id))
            .collect();
        data.sort_by_key(|d| d.1);

        let mut handles = Vec::with_capacity(data.len());
        let mut id_to_idx = HashMap::new();

        for (idx, (handle, id)) in data.into_iter().enumerate() {
            id_to_idx.insert(id, idx);
            handles.push(handle);
        }

        (handles, id_to_idx)
    }

    fn pass_spatial_indexing(&mut self) {
        let positions: Vec<(f64, f64)> = self
            .lifeform_snapshots
            .iter()
            .map(|s| (s.x, s.y))
            .collect();
        self.spatial_hash.build(&positions);

        let plant_positions: Vec<(f64, f64)> =
            self.plant_snapshots.iter().map(|p| (p.x, p.y)).collect();
        self.plant_hash.build(&plant_positions);
    }

    /// Runs every lifeform's decision for this tick against the frozen
    /// snapshots. Each lifeform mutates only its own components.
    fn pass_lifeforms(
        &mut self,
        id_map: &HashMap<Uuid, usize>,
        plant_map: &HashMap<Uuid, usize>,
        world_seed: u64,
    ) -> Vec<BehaviorOutcome> {
        let tick = self.tick;
        let avg_maturity = if self.lifeform_snapshots.is_empty() {
            0.0
        } else {
            self.lifeform_snapshots
                .iter()
                .map(|s| f64::from(s.maturity))
                .sum::<f64>()
                / self.lifeform_snapshots.len() as f64
        };

        let ctx = SystemContext {
            config: &self.config,
            tick,
            snapshots: &self.lifeform_snapshots,
            plants: &self.plant_snapshots,
            spatial_hash: &self.spatial_hash,
            plant_hash: &self.plant_hash,
            id_map,
            plant_map,
            avg_maturity,
        };

        let mut query = self.ecs.query::<LifeformComponents>();
        let mut lifeform_data: Vec<_> = query.iter().collect();
        lifeform_data.sort_by_key(|(_h, (ident, ..))| ident.id);

        let outcomes = lifeform_data
            .par_iter_mut()
            .map(
                |(_h, (identity, position, heading, genome, body, vitals, social_state, targets))| {
                    let Some(&idx) = ctx.id_map.get(&identity.id) else {
                        return BehaviorOutcome::default();
                    };
                    let mut rng =
                        ChaCha8Rng::seed_from_u64(lifeform_seed(identity.id, tick, world_seed));

                    social::check_group(&ctx, idx, social_state);
                    let perceived = perception::update_targets(&ctx, idx, vitals, targets);
                    metabolism::derive_stats(
                        genome,
                        body,
                        vitals,
                        ctx.avg_maturity,
                        &ctx.config.behavior,
                    );

                    let outcome = {
                        let mut agent = Agent {
                            id: identity.id,
                            position: &mut **position,
                            heading: &mut **heading,
                            genome: &**genome,
                            body: &**body,
                            vitals: &mut **vitals,
                            social: &mut **social_state,
                            targets: &**targets,
                        };
                        behavior::act(&ctx, idx, &mut agent, &perceived, &mut rng)
                    };

                    metabolism::progression(genome, body, vitals, &ctx.config.metabolism);
                    outcome
                },
            )
            .collect();
        outcomes
    }

    /// Applies the commands of the parallel pass in lifeform order.
    fn execute_interactions(
        &mut self,
        commands: &[InteractionCommand],
        handles: &[hecs::Entity],
        plant_handles: &[hecs::Entity],
        events: &mut Vec<LiveEvent>,
    ) {
        for cmd in commands {
            match *cmd {
                InteractionCommand::Damage {
                    target_idx,
                    attacker_idx: _,
                    amount,
                } => {
                    let Some(&target) = handles.get(target_idx) else {
                        continue;
                    };
                    if let Ok(mut vitals) = self.ecs.get::<&mut Vitals>(target) {
                        if vitals.health_now > 0.0 {
                            vitals.health_now -= amount;
                            vitals.wounded += amount;
                        }
                    }
                }
                InteractionCommand::EatPlant {
                    plant_idx,
                    eater_idx,
                } => {
                    let (Some(&plant), Some(&eater)) =
                        (plant_handles.get(plant_idx), handles.get(eater_idx))
                    else {
                        continue;
                    };
                    self.apply_feeding(plant, eater);
                }
                InteractionCommand::Reproduce {
                    parent_idx,
                    partner_idx,
                } => {
                    let (Some(&parent), Some(&partner)) =
                        (handles.get(parent_idx), handles.get(partner_idx))
                    else {
                        continue;
                    };
                    if let Some(mut evs) = self.apply_reproduction(parent, partner) {
                        events.append(&mut evs);
                    }
                }
            }
        }
    }

    fn apply_feeding(&mut self, plant: hecs::Entity, eater: hecs::Entity) {
        let cfg = &self.config.behavior;
        let variant = match self.ecs.get::<&mut Vegetation>(plant) {
            Ok(mut veg) if veg.has_resource() => {
                veg.decrement(cfg.plant_bite);
                veg.variant
            }
            _ => return,
        };
        if let Ok((genome, vitals)) = self
            .ecs
            .query_one_mut::<(&mut Genome, &mut Vitals)>(eater)
        {
            metabolism::apply_plant_effect(variant, genome, vitals, cfg, &self.config.traits);
            metabolism::satiate(vitals, cfg.plant_satiation);
        }
    }

    /// Produces one child of `parent` and `partner` if both are alive, the
    /// initiator is off cooldown and the population is below the cap.
    /// Returns `None` when the attempt was skipped; nothing is paid then.
    fn apply_reproduction(
        &mut self,
        parent: hecs::Entity,
        partner: hecs::Entity,
    ) -> Option<Vec<LiveEvent>> {
        let tick = self.tick;
        let (a_id, a_pos, a_genome, a_gen) = {
            let (ident, pos, genome, vitals) = self
                .ecs
                .query_one_mut::<(&Identity, &Position, &Genome, &Vitals)>(parent)
                .ok()?;
            if vitals.health_now <= 0.0 || vitals.cooldown > 0 {
                return None;
            }
            (ident.id, *pos, genome.clone(), ident.generation)
        };
        let (b_id, b_genome, b_gen) = {
            let (ident, genome, vitals) = self
                .ecs
                .query_one_mut::<(&Identity, &Genome, &Vitals)>(partner)
                .ok()?;
            if vitals.health_now <= 0.0 {
                return None;
            }
            (ident.id, genome.clone(), ident.generation)
        };

        let population = self.get_population_count() + self.pending_births.len();
        if population >= self.config.world.max_population {
            tracing::debug!(
                parent = %a_id,
                partner = %b_id,
                population = population,
                "Reproduction skipped at population cap"
            );
            self.metrics.increment_counter("reproduction_skipped");
            return None;
        }

        let child = reproduction::mix(
            &a_genome.traits,
            &b_genome.traits,
            self.config.evolution.mutation_rate,
            &self.config.traits,
            &mut self.rng,
        );
        let assignment = reproduction::assign_lineage(
            &mut self.lineage_registry,
            &child,
            &a_genome.lineage,
            &self.config.evolution,
            BirthContext {
                parents: Some((a_id, b_id)),
                mutations: child.mutations.clone(),
                tick,
            },
        );

        let mut events = Vec::new();
        if let LineageAssignment::Founded {
            id,
            parent,
            deviation,
        } = &assignment
        {
            self.metrics.increment_counter("lineages_founded");
            events.push(LiveEvent::LineageFounded {
                lineage: id.clone(),
                parent: parent.clone(),
                dna_change: deviation.avg,
                color_change: deviation.color,
                tick,
                timestamp: timestamp(),
            });
        }

        // A child folded into another lineage takes on that lineage's canonical traits.
        let traits = match &assignment {
            LineageAssignment::Joined(id) => self
                .lineage_registry
                .canonical(id)
                .copied()
                .unwrap_or(child.traits),
            _ => child.traits,
        };
        let lineage = assignment.lineage().clone();
        let generation = a_gen.max(b_gen) + 1;
        let mut baby = lifecycle::create_lifeform_with_rng(
            a_pos.x,
            a_pos.y,
            lineage.clone(),
            traits,
            generation,
            &mut self.rng,
        );
        baby.identity.parents = Some((a_id, b_id));
        baby.vitals.cooldown = self.config.reproduction.cooldown;
        baby.social.is_leader = self.rng.gen_bool(self.config.world.leader_chance);

        let cost = &self.config.reproduction;
        for handle in [parent, partner] {
            if let Ok(vitals) = self.ecs.query_one_mut::<&mut Vitals>(handle) {
                vitals.hunger += cost.hunger_cost;
                vitals.energy_now = (vitals.energy_now - cost.energy_cost).max(1.0);
                vitals.health_now = (vitals.health_now - cost.health_cost).max(1.0);
                vitals.cooldown = cost.cooldown;
            }
        }

        self.lineage_registry.record_birth(&lineage);
        self.metrics.increment_counter("births");
        events.push(LiveEvent::Birth {
            id: baby.identity.id,
            parents: (a_id, b_id),
            lineage,
            gen: generation,
            tick,
            timestamp: timestamp(),
        });
        self.pending_births.push(baby);
        Some(events)
    }
}
