//! Group membership detection.

use crate::math;
use crate::systems::SystemContext;
use biotope_data::Social;

/// Updates group membership for the lifeform at `self_idx`.
///
/// A group needs enough mature kin within range, packed tightly enough.
/// Membership outlives the formation that produced it by a fixed number of
/// ticks.
pub fn check_group(ctx: &SystemContext, self_idx: usize, social: &mut Social) {
    let cfg = &ctx.config.behavior;
    let me = &ctx.snapshots[self_idx];
    let radius = me.vision.min(cfg.group_max_radius);

    let mut neighbors = 0usize;
    let mut total_distance = 0.0;

    if radius > 0.0 {
        let radius_sq = radius * radius;
        ctx.spatial_hash.query_callback(me.x, me.y, radius, |idx| {
            if idx == self_idx {
                return;
            }
            let other = &ctx.snapshots[idx];
            if other.lineage != me.lineage || other.health_now <= 0.0 {
                return;
            }
            if (other.age as f64) < f64::from(other.maturity) * cfg.group_maturity_ratio {
                return;
            }
            let d_sq = math::distance_sq(me.x, me.y, other.x, other.y);
            if d_sq <= radius_sq {
                neighbors += 1;
                total_distance += d_sq.sqrt();
            }
        });
    }

    let mut cohesion = 0.0;
    let qualified = if neighbors >= cfg.group_min_neighbors && radius > 0.0 {
        cohesion = (1.0 - (total_distance / neighbors as f64) / radius).max(0.0);
        cohesion >= cfg.group_cohesion
    } else {
        false
    };

    if qualified {
        social.in_group = true;
        social.group_timer = cfg.group_persistence;
        social.group_strength = cohesion;
    } else if social.group_timer > 0 {
        social.group_timer -= 1;
        social.in_group = true;
    } else {
        social.in_group = false;
        social.group_strength = 0.0;
    }
}
