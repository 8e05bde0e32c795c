use biotope_data::{Lifeform, LineageId, PopulationStats, TraitAverages};
use std::collections::{BTreeMap, VecDeque};

/// Number of recent death ages kept for the running average.
pub const DEATH_AGE_WINDOW: usize = 1000;

pub struct StatsContext<'a> {
    pub stats: &'a mut PopulationStats,
    pub lifeforms: &'a [Lifeform],
    pub plant_count: usize,
    pub death_ages: &'a VecDeque<u64>,
}

#[derive(Default)]
struct Sums {
    count: usize,
    health: f64,
    vision: f64,
    attack_now: f64,
    defence_now: f64,
    speed: f64,
    maturity: f64,
    size: f64,
}

impl Sums {
    fn add(&mut self, lf: &Lifeform) {
        self.count += 1;
        self.health += lf.vitals.health_now;
        self.vision += f64::from(lf.genome.traits.vision);
        self.attack_now += lf.vitals.attack_now;
        self.defence_now += lf.vitals.defence_now;
        self.speed += lf.body.speed;
        self.maturity += f64::from(lf.genome.traits.maturity);
        self.size += lf.body.size();
    }

    fn averages(&self) -> TraitAverages {
        let n = self.count.max(1) as f64;
        TraitAverages {
            health: self.health / n,
            vision: self.vision / n,
            attack_now: self.attack_now / n,
            defence_now: self.defence_now / n,
            speed: self.speed / n,
            maturity: self.maturity / n,
            size: self.size / n,
        }
    }
}

fn mean<I: Iterator<Item = f64>>(values: I, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

pub fn update_population_stats(ctx: StatsContext) {
    let lifeforms = ctx.lifeforms;
    let n = lifeforms.len();
    let stats = ctx.stats;

    stats.population = n;
    stats.plant_count = ctx.plant_count;
    stats.death_age_avg = mean(ctx.death_ages.iter().map(|&a| a as f64), ctx.death_ages.len());

    let mut per_lineage: BTreeMap<LineageId, Sums> = BTreeMap::new();
    for lf in lifeforms {
        per_lineage
            .entry(lf.genome.lineage.clone())
            .or_default()
            .add(lf);
    }
    stats.lineage_count = per_lineage.len();
    stats.lineage_counts = per_lineage
        .iter()
        .map(|(id, s)| (id.clone(), s.count))
        .collect();
    stats.lineage_averages = per_lineage
        .iter()
        .map(|(id, s)| (id.clone(), s.averages()))
        .collect();

    stats.avg_health = mean(lifeforms.iter().map(|l| l.vitals.health_now), n);
    stats.avg_vision = mean(lifeforms.iter().map(|l| f64::from(l.genome.traits.vision)), n);
    stats.avg_generation = mean(lifeforms.iter().map(|l| f64::from(l.identity.generation)), n);
    stats.avg_hunger = mean(lifeforms.iter().map(|l| l.vitals.hunger), n);
    stats.avg_size = mean(lifeforms.iter().map(|l| l.body.size()), n);
    stats.avg_age = mean(lifeforms.iter().map(|l| l.vitals.age as f64), n);
    stats.avg_maturity = mean(lifeforms.iter().map(|l| f64::from(l.genome.traits.maturity)), n);
    stats.avg_speed = mean(lifeforms.iter().map(|l| l.body.speed), n);
    stats.avg_cooldown = mean(lifeforms.iter().map(|l| f64::from(l.vitals.cooldown)), n);
}

/// Pushes a death age, evicting the oldest once the window is full.
pub fn record_death_age(window: &mut VecDeque<u64>, age: u64) {
    window.push_back(age);
    if window.len() > DEATH_AGE_WINDOW {
        window.pop_front();
    }
}
