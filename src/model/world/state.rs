use crate::model::snapshot::{
    InternalLifeformSnapshot, InternalPlantSnapshot, LifeformView, PlantView, WorldSnapshot,
};
use crate::model::world::World;
use biotope_data::{
    Body, Genome, Heading, Identity, Lifeform, Position, Social, Targets, Vegetation, Vitals,
};
use std::collections::HashMap;
use uuid::Uuid;

pub type LifeformComponents<'a> = (
    &'a Identity,
    &'a mut Position,
    &'a mut Heading,
    &'a Genome,
    &'a mut Body,
    &'a mut Vitals,
    &'a mut Social,
    &'a mut Targets,
);

type LifeformRefs<'a> = (
    &'a Identity,
    &'a Position,
    &'a Heading,
    &'a Genome,
    &'a Body,
    &'a Vitals,
    &'a Social,
    &'a Targets,
);

impl World {
    pub fn capture_lifeform_snapshots_with_handles(&mut self, handles: &[hecs::Entity]) {
        self.lifeform_snapshots.clear();
        for &handle in handles {
            if let Ok(mut query) = self.ecs.query_one::<LifeformRefs>(handle) {
                if let Some((identity, position, _heading, genome, body, vitals, social, targets)) =
                    query.get()
                {
                    self.lifeform_snapshots.push(InternalLifeformSnapshot {
                        id: identity.id,
                        lineage: genome.lineage.clone(),
                        x: position.x,
                        y: position.y,
                        size: body.size(),
                        vision: f64::from(genome.traits.vision),
                        health_now: vitals.health_now,
                        attack_now: vitals.attack_now,
                        defence_now: vitals.defence_now,
                        is_mature: vitals.age >= u64::from(genome.traits.maturity),
                        is_leader: social.is_leader,
                        has_follow: targets.follow.is_some(),
                        in_group: social.in_group,
                        age: vitals.age,
                        maturity: genome.traits.maturity,
                    });
                }
            }
        }
    }

    pub fn capture_plant_snapshots_with_handles(&mut self, handles: &[hecs::Entity]) {
        self.plant_snapshots.clear();
        for &handle in handles {
            if let Ok(plant) = self.ecs.get::<&Vegetation>(handle) {
                self.plant_snapshots.push(InternalPlantSnapshot {
                    id: plant.id,
                    x: plant.x,
                    y: plant.y,
                    resource: plant.resource,
                });
            }
        }
    }
}

impl World {
    /// Returns the current number of lifeforms in the simulation.
    pub fn get_population_count(&self) -> usize {
        self.ecs.query::<&Identity>().iter().count()
    }

    /// Returns the current number of plants in the simulation.
    pub fn get_plant_count(&self) -> usize {
        self.ecs.query::<&Vegetation>().iter().count()
    }

    /// Lifeform handles ordered by lifeform id.
    pub fn get_sorted_handles(&self) -> Vec<hecs::Entity> {
        let mut data: Vec<_> = self
            .ecs
            .query::<&Identity>()
            .iter()
            .map(|(h, i)| (h, i.id))
            .collect();
        data.sort_by_key(|d| d.1);
        data.into_iter().map(|d| d.0).collect()
    }

    /// Plant handles ordered by plant id.
    pub fn get_sorted_plant_handles(&self) -> Vec<hecs::Entity> {
        let mut data: Vec<_> = self
            .ecs
            .query::<&Vegetation>()
            .iter()
            .map(|(h, v)| (h, v.id))
            .collect();
        data.sort_by_key(|d| d.1);
        data.into_iter().map(|d| d.0).collect()
    }

    /// Plant handles in id order and the id to index map over them.
    pub(crate) fn build_plant_indices(&self) -> (Vec<hecs::Entity>, HashMap<Uuid, usize>) {
        let mut data: Vec<_> = self
            .ecs
            .query::<&Vegetation>()
            .iter()
            .map(|(h, v)| (h, v.id))
            .collect();
        data.sort_by_key(|d| d.1);

        let mut handles = Vec::with_capacity(data.len());
        let mut id_to_idx = HashMap::with_capacity(data.len());
        for (idx, (handle, id)) in data.into_iter().enumerate() {
            id_to_idx.insert(id, idx);
            handles.push(handle);
        }
        (handles, id_to_idx)
    }

    fn lifeform_at(&self, handle: hecs::Entity) -> Option<Lifeform> {
        let mut query = self.ecs.query_one::<LifeformRefs>(handle).ok()?;
        let (identity, position, heading, genome, body, vitals, social, targets) = query.get()?;
        Some(Lifeform {
            identity: identity.clone(),
            position: *position,
            heading: *heading,
            genome: genome.clone(),
            body: body.clone(),
            vitals: vitals.clone(),
            social: social.clone(),
            targets: targets.clone(),
        })
    }

    /// Every lifeform, cloned out of the ECS in id order.
    pub fn get_all_lifeforms(&self) -> Vec<Lifeform> {
        self.get_sorted_handles()
            .into_iter()
            .filter_map(|h| self.lifeform_at(h))
            .collect()
    }

    pub fn get_lifeform(&self, id: Uuid) -> Option<Lifeform> {
        let handle = self
            .ecs
            .query::<&Identity>()
            .iter()
            .find(|(_, i)| i.id == id)
            .map(|(h, _)| h)?;
        self.lifeform_at(handle)
    }

    /// Every plant in id order.
    pub fn get_all_plants(&self) -> Vec<Vegetation> {
        self.get_sorted_plant_handles()
            .into_iter()
            .filter_map(|h| self.ecs.get::<&Vegetation>(h).ok().map(|v| (*v).clone()))
            .collect()
    }

    /// Read-only view of the world for a presentation layer.
    pub fn snapshot(&self) -> WorldSnapshot {
        let lifeforms = self
            .get_all_lifeforms()
            .iter()
            .map(|lf| LifeformView {
                id: lf.identity.id,
                x: lf.position.x,
                y: lf.position.y,
                width: lf.body.width,
                height: lf.body.height,
                angle: lf.heading.angle(),
                color: lf.genome.traits.color,
                attack_now: lf.vitals.attack_now,
                defence_now: lf.vitals.defence_now,
                lineage: lf.genome.lineage.clone(),
                is_leader: lf.social.is_leader,
                alive: lf.is_alive(),
            })
            .collect();
        let plants = self.get_all_plants().iter().map(PlantView::from).collect();

        WorldSnapshot {
            tick: self.tick,
            width: self.width,
            height: self.height,
            lifeforms,
            plants,
            pheromones: self.pheromones.clone(),
            carcasses: self.carcasses.clone(),
            stats: self.pop_stats.clone(),
        }
    }
}
