//! Per-tick lifeform systems.
//!
//! Every system reads the frozen snapshots in [`SystemContext`] and mutates
//! only the components of the lifeform it is called for. Effects on other
//! lifeforms are returned as [`InteractionCommand`](crate::interaction::InteractionCommand)s.

pub mod behavior;
pub mod metabolism;
pub mod perception;
pub mod reproduction;
pub mod social;
pub mod stats;

use crate::config::AppConfig;
use crate::snapshot::{InternalLifeformSnapshot, InternalPlantSnapshot};
use crate::spatial_hash::SpatialHash;
use std::collections::HashMap;
use uuid::Uuid;

pub struct SystemContext<'a> {
    pub config: &'a AppConfig,
    pub tick: u64,
    pub snapshots: &'a [InternalLifeformSnapshot],
    pub plants: &'a [InternalPlantSnapshot],
    pub spatial_hash: &'a SpatialHash,
    pub plant_hash: &'a SpatialHash,
    pub id_map: &'a HashMap<Uuid, usize>,
    pub plant_map: &'a HashMap<Uuid, usize>,
    pub avg_maturity: f64,
}

impl<'a> SystemContext<'a> {
    pub fn lifeform(&self, id: &Uuid) -> Option<(usize, &'a InternalLifeformSnapshot)> {
        self.id_map.get(id).map(|&i| (i, &self.snapshots[i]))
    }

    pub fn plant(&self, id: &Uuid) -> Option<(usize, &'a InternalPlantSnapshot)> {
        self.plant_map.get(id).map(|&i| (i, &self.plants[i]))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::SystemContext;
    use crate::config::AppConfig;
    use crate::snapshot::{InternalLifeformSnapshot, InternalPlantSnapshot};
    use crate::spatial_hash::SpatialHash;
    use biotope_data::LineageId;
    use std::collections::HashMap;
    use uuid::Uuid;

    /// A mature, healthy 5x5 lifeform with vision 100.
    pub fn snapshot(x: f64, y: f64, lineage: &str) -> InternalLifeformSnapshot {
        InternalLifeformSnapshot {
            id: Uuid::nil(),
            lineage: LineageId::from(lineage),
            x,
            y,
            size: 25.0,
            vision: 100.0,
            health_now: 100.0,
            attack_now: 50.0,
            defence_now: 50.0,
            is_mature: true,
            is_leader: false,
            has_follow: false,
            in_group: false,
            age: 500,
            maturity: 100,
        }
    }

    pub fn plant(x: f64, y: f64, resource: f64) -> InternalPlantSnapshot {
        InternalPlantSnapshot {
            id: Uuid::nil(),
            x,
            y,
            resource,
        }
    }

    /// Owns everything a `SystemContext` borrows. Ids are assigned in
    /// insertion order so index order matches id order.
    #[derive(Default)]
    pub struct Scene {
        pub config: AppConfig,
        pub tick: u64,
        pub snapshots: Vec<InternalLifeformSnapshot>,
        pub plants: Vec<InternalPlantSnapshot>,
        spatial_hash: SpatialHash,
        plant_hash: SpatialHash,
        id_map: HashMap<Uuid, usize>,
        plant_map: HashMap<Uuid, usize>,
    }

    impl Scene {
        pub fn add(&mut self, mut s: InternalLifeformSnapshot) -> Uuid {
            s.id = Uuid::from_u128(self.snapshots.len() as u128 + 1);
            let id = s.id;
            self.snapshots.push(s);
            id
        }

        pub fn add_plant(&mut self, mut p: InternalPlantSnapshot) -> Uuid {
            p.id = Uuid::from_u128(0x1000 + self.plants.len() as u128);
            let id = p.id;
            self.plants.push(p);
            id
        }

        pub fn ctx(&mut self) -> SystemContext<'_> {
            let (w, h) = (self.config.world.width, self.config.world.height);
            self.spatial_hash = SpatialHash::new(20.0, w, h);
            let positions: Vec<_> = self.snapshots.iter().map(|s| (s.x, s.y)).collect();
            self.spatial_hash.build(&positions);
            self.plant_hash = SpatialHash::new(20.0, w, h);
            let plant_positions: Vec<_> = self.plants.iter().map(|p| (p.x, p.y)).collect();
            self.plant_hash.build(&plant_positions);
            self.id_map = self
                .snapshots
                .iter()
                .enumerate()
                .map(|(i, s)| (s.id, i))
                .collect();
            self.plant_map = self
                .plants
                .iter()
                .enumerate()
                .map(|(i, p)| (p.id, i))
                .collect();
            let avg_maturity = if self.snapshots.is_empty() {
                0.0
            } else {
                self.snapshots.iter().map(|s| f64::from(s.maturity)).sum::<f64>()
                    / self.snapshots.len() as f64
            };
            SystemContext {
                config: &self.config,
                tick: self.tick,
                snapshots: &self.snapshots,
                plants: &self.plants,
                spatial_hash: &self.spatial_hash,
                plant_hash: &self.plant_hash,
                id_map: &self.id_map,
                plant_map: &self.plant_map,
                avg_maturity,
            }
        }
    }
}
