//! Behavior selection, movement and contact resolution.
//!
//! Behaviors are tried in a fixed priority order and the first whose
//! conditions hold is taken:
//!
//! 1. flee from an enemy, or mob it when in a group
//! 2. hunt prey
//! 3. approach a reproduction partner
//! 4. forage a plant
//! 5. search or follow when nothing is targeted
//! 6. drift
//!
//! After moving, a lifeform within contact range of its target fights, bites,
//! eats or mates. Effects on anything other than the acting lifeform are
//! returned as commands.

use crate::config::BehaviorConfig;
use crate::history::timestamp;
use crate::interaction::InteractionCommand;
use crate::lifecycle;
use crate::math;
use crate::systems::metabolism;
use crate::systems::perception::PerceptionOutcome;
use crate::systems::SystemContext;
use biotope_data::{
    Behavior, Body, Genome, Heading, LiveEvent, Position, Rgb, Social, Targets, Vitals,
};
use rand::Rng;
use uuid::Uuid;

/// Mutable view of the acting lifeform's components.
pub struct Agent<'a> {
    pub id: Uuid,
    pub position: &'a mut Position,
    pub heading: &'a mut Heading,
    pub genome: &'a Genome,
    pub body: &'a Body,
    pub vitals: &'a mut Vitals,
    pub social: &'a mut Social,
    pub targets: &'a Targets,
}

impl Agent<'_> {
    fn is_mature(&self) -> bool {
        self.vitals.age >= u64::from(self.genome.traits.maturity)
    }
}

#[derive(Debug, Default)]
pub struct BehaviorOutcome {
    pub commands: Vec<InteractionCommand>,
    pub events: Vec<LiveEvent>,
    /// Pheromone deposit at the position reached this tick.
    pub trail: Option<(f64, f64, Rgb)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Goal {
    Toward(f64, f64),
    Away(f64, f64),
    Wander,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Contact {
    Enemy(usize),
    Prey(usize),
    Partner(usize),
    Plant(usize),
}

struct Decision {
    behavior: Behavior,
    goal: Goal,
    contact: Option<(Contact, f64, f64)>,
}

impl Decision {
    fn wander(behavior: Behavior) -> Self {
        Self {
            behavior,
            goal: Goal::Wander,
            contact: None,
        }
    }
}

fn decide<R: Rng>(ctx: &SystemContext, agent: &mut Agent, rng: &mut R) -> Decision {
    let cfg = &ctx.config.behavior;
    let hunger = agent.vitals.hunger;
    let mature = agent.is_mature();
    let targets = agent.targets;

    let enemy = targets.enemy.and_then(|id| ctx.lifeform(&id));
    let prey = targets.prey.and_then(|id| ctx.lifeform(&id));
    let partner = targets.partner.and_then(|id| ctx.lifeform(&id));
    let plant = targets.plant.and_then(|id| ctx.plant(&id));

    if !targets.is_empty() {
        agent.social.searching = false;
    }

    if let Some((idx, e)) = enemy {
        let (behavior, goal) = if agent.social.in_group {
            (Behavior::Mob, Goal::Toward(e.x, e.y))
        } else {
            (Behavior::Flee, Goal::Away(e.x, e.y))
        };
        return Decision {
            behavior,
            goal,
            contact: Some((Contact::Enemy(idx), e.x, e.y)),
        };
    }

    if let Some((idx, p)) = prey {
        if partner.is_none() && hunger > cfg.hunt_hunger && mature {
            return Decision {
                behavior: Behavior::Hunt,
                goal: Goal::Toward(p.x, p.y),
                contact: Some((Contact::Prey(idx), p.x, p.y)),
            };
        }
    }

    if let Some((idx, p)) = partner {
        if agent.vitals.cooldown == 0 && hunger < cfg.reproduce_hunger && mature {
            return Decision {
                behavior: Behavior::Reproduce,
                goal: Goal::Toward(p.x, p.y),
                contact: Some((Contact::Partner(idx), p.x, p.y)),
            };
        }
    }

    if let Some((idx, p)) = plant {
        if hunger > cfg.forage_hunger && partner.is_none() && p.resource > 1.0 {
            return Decision {
                behavior: Behavior::Forage,
                goal: Goal::Toward(p.x, p.y),
                contact: Some((Contact::Plant(idx), p.x, p.y)),
            };
        }
    }

    if targets.is_empty() {
        if !agent.social.searching {
            *agent.heading = lifecycle::random_heading(rng);
            agent.social.searching = true;
            return Decision::wander(Behavior::Search);
        }
        if !agent.social.is_leader {
            if let Some((_, leader)) = targets.follow.and_then(|id| ctx.lifeform(&id)) {
                let d = math::distance(agent.position.x, agent.position.y, leader.x, leader.y);
                let goal = if d > cfg.follow_range {
                    Goal::Toward(leader.x, leader.y)
                } else {
                    Goal::Away(leader.x, leader.y)
                };
                return Decision {
                    behavior: Behavior::Follow,
                    goal,
                    contact: None,
                };
            }
        }
        if rng.gen::<f64>() < cfg.search_turn_chance {
            *agent.heading = lifecycle::random_heading(rng);
        }
        return Decision::wander(Behavior::Search);
    }

    if rng.gen::<f64>() < cfg.drift_chance {
        *agent.heading = lifecycle::random_heading(rng);
    }
    Decision::wander(Behavior::Drift)
}

/// Turns toward or away from the goal and returns the step length.
fn steer(agent: &mut Agent, goal: Goal) -> f64 {
    let speed = agent.body.speed;
    let (x, y) = (agent.position.x, agent.position.y);
    match goal {
        Goal::Toward(tx, ty) => {
            let (dx, dy) = math::direction_to(x, y, tx, ty);
            if dx != 0.0 || dy != 0.0 {
                agent.heading.dx = dx;
                agent.heading.dy = dy;
            }
            speed.min(math::distance(x, y, tx, ty))
        }
        Goal::Away(tx, ty) => {
            let (dx, dy) = math::direction_to(tx, ty, x, y);
            if dx != 0.0 || dy != 0.0 {
                agent.heading.dx = dx;
                agent.heading.dy = dy;
            }
            speed
        }
        Goal::Wander => speed,
    }
}

/// Moves one step along the heading, bouncing off the barrier and the world
/// edges. Returns the displacement.
fn advance(ctx: &SystemContext, agent: &mut Agent, step: f64) -> (f64, f64) {
    let width = f64::from(ctx.config.world.width);
    let height = f64::from(ctx.config.world.height);
    let (px, py) = (agent.position.x, agent.position.y);
    let mut nx = px + agent.heading.dx * step;
    let mut ny = py + agent.heading.dy * step;

    if let Some(barrier) = &ctx.config.world.barrier {
        let (w, h) = (agent.body.width, agent.body.height);
        if math::rects_overlap((nx - w / 2.0, ny - h / 2.0, w, h), barrier.rect()) {
            agent.heading.dx = -agent.heading.dx;
            agent.heading.dy = -agent.heading.dy;
            return (0.0, 0.0);
        }
    }

    if nx < 0.0 {
        nx = 0.0;
        agent.heading.dx = agent.heading.dx.abs();
    } else if nx > width {
        nx = width;
        agent.heading.dx = -agent.heading.dx.abs();
    }
    if ny < 0.0 {
        ny = 0.0;
        agent.heading.dy = agent.heading.dy.abs();
    } else if ny > height {
        ny = height;
        agent.heading.dy = -agent.heading.dy.abs();
    }

    agent.position.x = nx;
    agent.position.y = ny;
    (nx - px, ny - py)
}

fn take_damage(vitals: &mut Vitals, amount: f64) {
    vitals.health_now -= amount;
    vitals.wounded += amount;
}

fn resolve_contact(
    ctx: &SystemContext,
    self_idx: usize,
    agent: &mut Agent,
    contact: Contact,
    commands: &mut Vec<InteractionCommand>,
) {
    let cfg: &BehaviorConfig = &ctx.config.behavior;
    let traits = &agent.genome.traits;
    match contact {
        Contact::Enemy(idx) => {
            let enemy = &ctx.snapshots[idx];
            if agent.social.in_group && agent.vitals.hunger > cfg.mob_hunger {
                let amount = agent.vitals.attack_now;
                commands.push(InteractionCommand::Damage {
                    target_idx: idx,
                    attacker_idx: self_idx,
                    amount,
                });
                metabolism::heal(agent.vitals, traits, amount);
            } else {
                let damage = (enemy.attack_now
                    - cfg.defence_absorption * agent.vitals.defence_now)
                    .max(0.0);
                take_damage(agent.vitals, damage);
            }
        }
        Contact::Prey(idx) => {
            let prey = &ctx.snapshots[idx];
            if prey.in_group {
                let damage = (prey.attack_now * prey.defence_now
                    / agent.vitals.attack_now.max(1.0))
                .clamp(1.0, 100.0);
                take_damage(agent.vitals, damage);
            } else {
                let amount = agent.vitals.attack_now;
                metabolism::heal(agent.vitals, traits, amount);
                commands.push(InteractionCommand::Damage {
                    target_idx: idx,
                    attacker_idx: self_idx,
                    amount,
                });
                metabolism::satiate(agent.vitals, cfg.hunt_satiation);
            }
        }
        Contact::Partner(idx) => commands.push(InteractionCommand::Reproduce {
            parent_idx: self_idx,
            partner_idx: idx,
        }),
        Contact::Plant(idx) => commands.push(InteractionCommand::EatPlant {
            plant_idx: idx,
            eater_idx: self_idx,
        }),
    }
}

/// Runs one decision for the lifeform at `self_idx`: choose a behavior, move,
/// resolve contact, and report what happened.
pub fn act<R: Rng>(
    ctx: &SystemContext,
    self_idx: usize,
    agent: &mut Agent,
    perceived: &PerceptionOutcome,
    rng: &mut R,
) -> BehaviorOutcome {
    let mut out = BehaviorOutcome::default();
    let tick = ctx.tick;

    if let Some((threat_id, distance)) = perceived.threat_acquired {
        out.events.push(LiveEvent::ThreatDetected {
            id: agent.id,
            threat_id,
            distance,
            tick,
            timestamp: timestamp(),
        });
    }
    if let Some((prey_id, distance)) = perceived.prey_acquired {
        out.events.push(LiveEvent::PreyAcquired {
            id: agent.id,
            prey_id,
            distance,
            tick,
            timestamp: timestamp(),
        });
    }

    let decision = decide(ctx, agent, rng);
    let step = steer(agent, decision.goal);
    let (vx, vy) = advance(ctx, agent, step);

    if let Some((contact, tx, ty)) = decision.contact {
        let d = math::distance(agent.position.x, agent.position.y, tx, ty);
        if d < ctx.config.behavior.contact_radius {
            resolve_contact(ctx, self_idx, agent, contact, &mut out.commands);
        }
    }

    out.trail = Some((agent.position.x, agent.position.y, agent.genome.traits.color));

    let previous = agent.social.behavior;
    if previous != decision.behavior {
        out.events.push(LiveEvent::BehaviorActivity {
            id: agent.id,
            from: previous,
            to: decision.behavior,
            tick,
            timestamp: timestamp(),
        });
    }
    agent.social.behavior = decision.behavior;

    let interval = ctx.config.telemetry.movement_sample_interval;
    if interval > 0 && tick % interval == 0 {
        out.events.push(movement_sample(ctx, agent, vx, vy));
    }

    out
}

fn movement_sample(ctx: &SystemContext, agent: &Agent, vx: f64, vy: f64) -> LiveEvent {
    let me = (agent.position.x, agent.position.y);
    let distance_to = |id: Option<Uuid>| {
        id.and_then(|id| ctx.lifeform(&id))
            .map(|(_, s)| math::distance(me.0, me.1, s.x, s.y))
    };
    let max_speed = ctx.config.behavior.max_speed.max(math::EPSILON);
    let max_energy = f64::from(agent.genome.traits.energy).max(1.0);
    LiveEvent::Movement {
        id: agent.id,
        behavior: agent.social.behavior,
        vx,
        vy,
        speed: agent.body.speed,
        effort: (vx * vx + vy * vy).sqrt() / max_speed,
        energy_ratio: agent.vitals.energy_now / max_energy,
        threat_distance: distance_to(agent.targets.enemy),
        prey_distance: distance_to(agent.targets.prey),
        has_food_target: agent.targets.plant.is_some() || agent.targets.prey.is_some(),
        tick: ctx.tick,
        timestamp: timestamp(),
    }
}
