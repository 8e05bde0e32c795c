use crate::config::TraitConfig;
use crate::lifecycle;
use biotope_data::{LineageId, TraitField, TraitVector};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use uuid::Uuid;

/// Fractional distance of a trait vector from a reference vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Deviation {
    /// Mean of the nine per-field ratios and the color ratio.
    pub avg: f64,
    /// Summed channel distance over the reference's summed channels.
    pub color: f64,
}

fn ratio(value: u32, reference: u32) -> f64 {
    if reference == 0 {
        if value == 0 {
            0.0
        } else {
            1.0
        }
    } else {
        f64::from(value.abs_diff(reference)) / f64::from(reference)
    }
}

pub fn deviation(traits: &TraitVector, reference: &TraitVector) -> Deviation {
    let color = {
        let sum = reference.color.channel_sum();
        let dist = traits.color.channel_distance(&reference.color);
        ratio_from_parts(dist, sum)
    };
    let scalar: f64 = TraitField::ALL
        .iter()
        .map(|f| ratio(traits.get(*f), reference.get(*f)))
        .sum();
    Deviation {
        avg: (scalar + color) / (TraitField::ALL.len() + 1) as f64,
        color,
    }
}

fn ratio_from_parts(distance: u32, reference_sum: u32) -> f64 {
    if reference_sum == 0 {
        if distance == 0 {
            0.0
        } else {
            1.0
        }
    } else {
        f64::from(distance) / f64::from(reference_sum)
    }
}

/// Birth details recorded when a child founds a lineage.
#[derive(Debug, Clone, Default)]
pub struct BirthContext {
    pub parents: Option<(Uuid, Uuid)>,
    pub mutations: Vec<String>,
    pub tick: u64,
}

/// Outcome of lineage classification for a newborn.
#[derive(Debug, Clone, PartialEq)]
pub enum LineageAssignment {
    /// Close enough to the parent lineage to stay in it.
    Inherited(LineageId),
    /// Diverged from the parent but matches another known lineage.
    Joined(LineageId),
    /// Diverged from every known lineage; a new one was registered.
    Founded {
        id: LineageId,
        parent: LineageId,
        deviation: Deviation,
    },
}

impl LineageAssignment {
    pub fn lineage(&self) -> &LineageId {
        match self {
            LineageAssignment::Inherited(id) | LineageAssignment::Joined(id) => id,
            LineageAssignment::Founded { id, .. } => id,
        }
    }
}

/// A lineage: its canonical traits, where it came from, and how it fares.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LineageRecord {
    pub id: LineageId,
    pub traits: TraitVector,
    pub parent: Option<LineageId>,
    pub parent_agents: Option<(Uuid, Uuid)>,
    pub dna_change: f64,
    pub color_change: f64,
    pub mutations: Vec<String>,
    pub founded_tick: u64,
    pub total_produced: usize,
    pub current_population: usize,
    pub peak_population: usize,
    pub is_extinct: bool,
    /// Suffix counter for lineages minted from this one.
    pub children_minted: u32,
}

impl LineageRecord {
    fn new(id: LineageId, traits: TraitVector, tick: u64) -> Self {
        Self {
            id,
            traits,
            parent: None,
            parent_agents: None,
            dna_change: 0.0,
            color_change: 0.0,
            mutations: Vec::new(),
            founded_tick: tick,
            total_produced: 0,
            current_population: 0,
            peak_population: 0,
            is_extinct: false,
            children_minted: 0,
        }
    }
}

/// Every lineage that has ever existed, in founding order. Lineages are
/// never removed.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LineageRegistry {
    records: Vec<LineageRecord>,
    #[serde(skip)]
    index: HashMap<LineageId, usize>,
}

impl LineageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineageRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &LineageId) -> Option<&LineageRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &LineageId) -> bool {
        self.index.contains_key(id)
    }

    pub fn canonical(&self, id: &LineageId) -> Option<&TraitVector> {
        self.get(id).map(|r| &r.traits)
    }

    fn insert(&mut self, record: LineageRecord) {
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
    }

    /// Registers a founding lineage with a root id (`"0"`, `"1"`, ...).
    pub fn register_root(&mut self, traits: TraitVector, tick: u64) -> LineageId {
        let id = LineageId::root(self.records.len());
        self.insert(LineageRecord::new(id.clone(), traits, tick));
        id
    }

    /// Registers `count` founding lineages with random traits.
    pub fn seed_random_lineages<R: Rng>(
        &mut self,
        count: usize,
        traits: &TraitConfig,
        tick: u64,
        rng: &mut R,
    ) -> Vec<LineageId> {
        (0..count)
            .map(|_| self.register_root(lifecycle::random_traits(traits, rng), tick))
            .collect()
    }

    /// Decides which lineage a newborn belongs to.
    ///
    /// A child within both thresholds of its parent lineage's canonical traits
    /// stays in it. Otherwise lineages are scanned in founding order, skipping
    /// the parent's, and the first one whose mean deviation OR color deviation
    /// from the child is below its threshold is reused. If none matches, a new
    /// lineage `"{parent}-{n}"` is registered with the child's traits.
    pub fn classify_or_create(
        &mut self,
        child: &TraitVector,
        parent: &LineageId,
        dna_threshold: f64,
        color_threshold: f64,
        birth: BirthContext,
    ) -> LineageAssignment {
        let Some(&parent_idx) = self.index.get(parent) else {
            tracing::warn!(lineage = %parent, "Parent lineage missing from registry");
            let id = self.register_root(*child, birth.tick);
            return LineageAssignment::Founded {
                id,
                parent: parent.clone(),
                deviation: Deviation::default(),
            };
        };

        let from_parent = deviation(child, &self.records[parent_idx].traits);
        if from_parent.avg <= dna_threshold && from_parent.color <= color_threshold {
            return LineageAssignment::Inherited(parent.clone());
        }

        for record in &self.records {
            if record.id == *parent {
                continue;
            }
            let d = deviation(child, &record.traits);
            if d.avg < dna_threshold || d.color < color_threshold {
                return LineageAssignment::Joined(record.id.clone());
            }
        }

        let parent_record = &mut self.records[parent_idx];
        parent_record.children_minted += 1;
        let id = parent.child(parent_record.children_minted);
        let mut record = LineageRecord::new(id.clone(), *child, birth.tick);
        record.parent = Some(parent.clone());
        record.parent_agents = birth.parents;
        record.dna_change = from_parent.avg;
        record.color_change = from_parent.color;
        record.mutations = birth.mutations;
        self.insert(record);

        tracing::info!(
            lineage = %id,
            parent = %parent,
            dna_change = from_parent.avg,
            color_change = from_parent.color,
            "New lineage founded"
        );

        LineageAssignment::Founded {
            id,
            parent: parent.clone(),
            deviation: from_parent,
        }
    }

    pub fn record_birth(&mut self, id: &LineageId) {
        if let Some(&i) = self.index.get(id) {
            let entry = &mut self.records[i];
            entry.total_produced += 1;
            entry.current_population += 1;
            entry.peak_population = entry.peak_population.max(entry.current_population);
            entry.is_extinct = false;
        }
    }

    pub fn record_death(&mut self, id: &LineageId) {
        if let Some(&i) = self.index.get(id) {
            let record = &mut self.records[i];
            record.current_population = record.current_population.saturating_sub(1);
            if record.current_population == 0 {
                record.is_extinct = true;
            }
        }
    }

    pub fn get_top_lineages(&self, count: usize) -> Vec<&LineageRecord> {
        let mut list: Vec<_> = self.records.iter().collect();
        list.sort_by(|a, b| b.total_produced.cmp(&a.total_produced));
        list.into_iter().take(count).collect()
    }

    pub fn living_lineages(&self) -> usize {
        self.records.iter().filter(|r| r.current_population > 0).count()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::new());
        }
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut registry: Self = serde_json::from_reader(reader)?;
        registry.rebuild_index();
        Ok(registry)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
    }
}
