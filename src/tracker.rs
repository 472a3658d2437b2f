use crate::population::{is_segregating, Mutation, PopulationView, SampleRecorder};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Identity of a tracked variant: origin generation, position, effect size.
///
/// Floats are compared by their bit patterns. Two variants are the same key
/// only if all three fields are bit-identical, so `0.0` and `-0.0` are
/// distinct positions and values that differ in the last ulp never merge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VariantKey {
    pub origin_generation: u32,
    pub position: f64,
    pub effect_size: f64,
}

impl VariantKey {
    pub fn new(origin_generation: u32, position: f64, effect_size: f64) -> Self {
        Self {
            origin_generation,
            position,
            effect_size,
        }
    }
}

impl From<&Mutation> for VariantKey {
    fn from(m: &Mutation) -> Self {
        Self::new(m.origin_generation, m.position, m.effect_size)
    }
}

impl PartialEq for VariantKey {
    fn eq(&self, other: &Self) -> bool {
        self.origin_generation == other.origin_generation
            && self.position.to_bits() == other.position.to_bits()
            && self.effect_size.to_bits() == other.effect_size.to_bits()
    }
}

impl Eq for VariantKey {}

impl Hash for VariantKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin_generation.hash(state);
        self.position.to_bits().hash(state);
        self.effect_size.to_bits().hash(state);
    }
}

impl Ord for VariantKey {
    // total_cmp is Equal exactly when the bit patterns match,
    // which keeps this consistent with Eq.
    fn cmp(&self, other: &Self) -> Ordering {
        self.origin_generation
            .cmp(&other.origin_generation)
            .then_with(|| self.position.total_cmp(&other.position))
            .then_with(|| self.effect_size.total_cmp(&other.effect_size))
    }
}

impl PartialOrd for VariantKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Copy counts of one variant, one entry per recorded generation
/// in which it was segregating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    counts: Vec<u32>,
}

impl Trajectory {
    fn starting_at(count: u32) -> Self {
        Self {
            counts: vec![count],
        }
    }

    fn add(&mut self, count: u32) {
        self.counts.push(count);
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn last(&self) -> Option<u32> {
        self.counts.last().copied()
    }
}

impl From<Trajectory> for Vec<u32> {
    fn from(t: Trajectory) -> Self {
        t.counts
    }
}

pub type Trajectories = BTreeMap<VariantKey, Trajectory>;

/// Callback invoked by a simulation engine once per generation.
pub trait GenerationCallback<P: PopulationView> {
    fn on_generation(&mut self, pop: &P, recorder: &mut SampleRecorder);
}

/// Accumulates the copy count trajectories of all segregating variants
/// once the burn-in period is over.
#[derive(Clone, Debug)]
pub struct TrajectoryTracker {
    burnin_time: u32,
    trajectories: Trajectories,
    last_generation: Option<u32>,
}

impl TrajectoryTracker {
    pub fn new(burnin_time: u32) -> Self {
        Self {
            burnin_time,
            trajectories: Trajectories::new(),
            last_generation: None,
        }
    }

    pub fn burnin_time(&self) -> u32 {
        self.burnin_time
    }

    /// Appends the counts of all segregating variants in `pop`.
    /// Generations before the burn-in time are ignored.
    pub fn record<P: PopulationView>(&mut self, pop: &P) {
        let generation = pop.generation();
        if generation < self.burnin_time {
            return;
        }

        match self.last_generation {
            None => debug!("Recording trajectories from generation {}", generation),
            Some(last) if generation <= last => warn!(
                "Generation {} recorded after generation {}",
                generation, last
            ),
            Some(_) => {}
        }
        self.last_generation = Some(generation);

        let n = pop.diploid_size();
        let mut num_new = 0;
        let mut num_extended = 0;
        for (mutation, &count) in pop.mutations().iter().zip(pop.counts()) {
            if !is_segregating(count, n) {
                continue;
            }
            match self.trajectories.entry(VariantKey::from(mutation)) {
                Entry::Vacant(e) => {
                    e.insert(Trajectory::starting_at(count));
                    num_new += 1;
                }
                Entry::Occupied(mut e) => {
                    e.get_mut().add(count);
                    num_extended += 1;
                }
            }
        }
        debug!(
            "generation {}: {} new, {} extended, {} tracked",
            generation,
            num_new,
            num_extended,
            self.trajectories.len()
        );
    }

    /// Copy of the trajectories accumulated so far.
    pub fn trajectories(&self) -> Trajectories {
        self.trajectories.clone()
    }

    pub fn into_trajectories(self) -> Trajectories {
        self.trajectories
    }

    pub fn get(&self, key: &VariantKey) -> Option<&Trajectory> {
        self.trajectories.get(key)
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }
}

impl<P: PopulationView> GenerationCallback<P> for TrajectoryTracker {
    fn on_generation(&mut self, pop: &P, _recorder: &mut SampleRecorder) {
        self.record(pop);
    }
}
