//! Target selection under a vision radius.

use crate::math;
use crate::snapshot::InternalLifeformSnapshot;
use crate::systems::SystemContext;
use biotope_data::{Targets, Vitals};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Enemy,
    Prey,
    Partner,
    Follow,
}

/// How `me` sees `other`. The checks form a chain: the first that matches wins.
pub fn classify(
    me: &InternalLifeformSnapshot,
    other: &InternalLifeformSnapshot,
    partner_min_health: f64,
) -> Option<TargetKind> {
    let kin = other.lineage == me.lineage;
    if !kin && other.size > me.size {
        Some(TargetKind::Enemy)
    } else if !kin {
        Some(TargetKind::Prey)
    } else if me.is_mature && other.is_mature && other.health_now > partner_min_health {
        Some(TargetKind::Partner)
    } else if !me.is_leader && (other.is_leader || other.has_follow) {
        Some(TargetKind::Follow)
    } else {
        None
    }
}

/// Newly acquired threats and prey, for telemetry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PerceptionOutcome {
    pub threat_acquired: Option<(Uuid, f64)>,
    pub prey_acquired: Option<(Uuid, f64)>,
}

struct Best {
    id: Option<Uuid>,
    dist_sq: f64,
}

impl Best {
    /// Seeds the scan with a remembered target, provided it still classifies as `kind`.
    fn remembered(
        ctx: &SystemContext,
        me: &InternalLifeformSnapshot,
        id: Option<Uuid>,
        kind: TargetKind,
    ) -> Self {
        let partner_min_health = ctx.config.reproduction.partner_min_health;
        let still_same = id
            .and_then(|id| ctx.lifeform(&id))
            .filter(|(_, s)| classify(me, s, partner_min_health) == Some(kind));
        match still_same {
            Some((_, s)) => Self {
                id,
                dist_sq: math::distance_sq(me.x, me.y, s.x, s.y),
            },
            None => Self {
                id: None,
                dist_sq: f64::INFINITY,
            },
        }
    }

    fn offer(&mut self, id: Uuid, dist_sq: f64) {
        if dist_sq < self.dist_sq {
            self.id = Some(id);
            self.dist_sq = dist_sq;
        }
    }
}

/// Refreshes the remembered targets of the lifeform at `self_idx`.
///
/// A remembered target is replaced only by a strictly closer candidate of the
/// same kind, and is forgotten once it no longer classifies as that kind. After the scan, targets that died, weakened to 1 health (or 1
/// resource for plants), left vision range or vanished are dropped.
pub fn update_targets(
    ctx: &SystemContext,
    self_idx: usize,
    vitals: &Vitals,
    targets: &mut Targets,
) -> PerceptionOutcome {
    let me = &ctx.snapshots[self_idx];
    let vision = me.vision.max(0.0);
    let vision_sq = vision * vision;
    let partner_min_health = ctx.config.reproduction.partner_min_health;

    let previous_enemy = targets.enemy;
    let previous_prey = targets.prey;

    let mut enemy = Best::remembered(ctx, me, targets.enemy, TargetKind::Enemy);
    let mut prey = Best::remembered(ctx, me, targets.prey, TargetKind::Prey);
    let mut partner = Best::remembered(ctx, me, targets.partner, TargetKind::Partner);
    let mut follow = Best::remembered(ctx, me, targets.follow, TargetKind::Follow);

    let mut candidates = Vec::new();
    ctx.spatial_hash.query_into(me.x, me.y, vision, &mut candidates);
    for idx in candidates {
        if idx == self_idx {
            continue;
        }
        let other = &ctx.snapshots[idx];
        if other.health_now <= 0.0 {
            continue;
        }
        let d_sq = math::distance_sq(me.x, me.y, other.x, other.y);
        if d_sq > vision_sq {
            continue;
        }
        match classify(me, other, partner_min_health) {
            Some(TargetKind::Enemy) => enemy.offer(other.id, d_sq),
            Some(TargetKind::Prey) => prey.offer(other.id, d_sq),
            Some(TargetKind::Partner) => partner.offer(other.id, d_sq),
            Some(TargetKind::Follow) => follow.offer(other.id, d_sq),
            None => {}
        }
    }

    targets.enemy = enemy.id;
    targets.prey = prey.id;
    targets.partner = partner.id;
    targets.follow = follow.id;

    if vitals.hunger > ctx.config.behavior.forage_hunger {
        let mut plant = match targets.plant.and_then(|id| ctx.plant(&id)) {
            Some((_, p)) => Best {
                id: targets.plant,
                dist_sq: math::distance_sq(me.x, me.y, p.x, p.y),
            },
            None => Best {
                id: None,
                dist_sq: f64::INFINITY,
            },
        };
        let mut nearby = Vec::new();
        ctx.plant_hash.query_into(me.x, me.y, vision, &mut nearby);
        for idx in nearby {
            let p = &ctx.plants[idx];
            if p.resource <= 1.0 {
                continue;
            }
            let d_sq = math::distance_sq(me.x, me.y, p.x, p.y);
            if d_sq <= vision_sq {
                plant.offer(p.id, d_sq);
            }
        }
        targets.plant = plant.id;
    }

    invalidate_stale(ctx, me, targets);

    let mut outcome = PerceptionOutcome::default();
    if let Some(id) = targets.enemy {
        if targets.enemy != previous_enemy {
            outcome.threat_acquired = ctx
                .lifeform(&id)
                .map(|(_, s)| (id, math::distance(me.x, me.y, s.x, s.y)));
        }
    }
    if let Some(id) = targets.prey {
        if targets.prey != previous_prey {
            outcome.prey_acquired = ctx
                .lifeform(&id)
                .map(|(_, s)| (id, math::distance(me.x, me.y, s.x, s.y)));
        }
    }
    outcome
}

fn lifeform_still_valid(
    ctx: &SystemContext,
    me: &InternalLifeformSnapshot,
    id: Option<Uuid>,
) -> Option<Uuid> {
    let id = id?;
    let (_, s) = ctx.lifeform(&id)?;
    if s.health_now <= 1.0 || math::distance(me.x, me.y, s.x, s.y) > me.vision {
        return None;
    }
    Some(id)
}

/// Drops every target that is gone, too weak or out of sight.
pub fn invalidate_stale(ctx: &SystemContext, me: &InternalLifeformSnapshot, targets: &mut Targets) {
    targets.enemy = lifeform_still_valid(ctx, me, targets.enemy);
    targets.prey = lifeform_still_valid(ctx, me, targets.prey);
    targets.partner = lifeform_still_valid(ctx, me, targets.partner);
    targets.follow = lifeform_still_valid(ctx, me, targets.follow);
    targets.plant = targets.plant.and_then(|id| {
        let (_, p) = ctx.plant(&id)?;
        if p.resource <= 1.0 || math::distance(me.x, me.y, p.x, p.y) > me.vision {
            None
        } else {
            Some(id)
        }
    });
}
