use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Identity of a mutation as carried by the simulation engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub origin_generation: u32,
    pub position: f64,
    pub effect_size: f64,
}

impl Mutation {
    pub fn new(origin_generation: u32, position: f64, effect_size: f64) -> Self {
        Self {
            origin_generation,
            position,
            effect_size,
        }
    }
}

/// Read-only view of a diploid population at one generation.
///
/// `mutations()` and `counts()` are parallel: the `i`th count is the number
/// of copies of the `i`th mutation. Implementors are owned by the engine and
/// only lent out for the duration of one callback.
pub trait PopulationView {
    fn generation(&self) -> u32;
    /// Number of diploid individuals (`N`).
    fn diploid_size(&self) -> u32;
    fn mutations(&self) -> &[Mutation];
    fn counts(&self) -> &[u32];
}

/// True if a mutation with `count` copies is neither lost nor fixed
/// in a population of `n` diploids.
pub fn is_segregating(count: u32, n: u32) -> bool {
    count > 0 && u64::from(count) < 2 * u64::from(n)
}

/// Owned population state for a single generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiploidSnapshot {
    pub generation: u32,
    pub n: u32,
    pub mutations: Vec<Mutation>,
    pub counts: Vec<u32>,
}

impl DiploidSnapshot {
    pub fn new(generation: u32, n: u32, mutations: Vec<Mutation>, counts: Vec<u32>) -> Self {
        Self {
            generation,
            n,
            mutations,
            counts,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.mutations.len() != self.counts.len() {
            return Err(Error::SnapshotLength {
                generation: self.generation,
                mutations: self.mutations.len(),
                counts: self.counts.len(),
            });
        }
        Ok(())
    }
}

impl PopulationView for DiploidSnapshot {
    fn generation(&self) -> u32 {
        self.generation
    }

    fn diploid_size(&self) -> u32 {
        self.n
    }

    fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    fn counts(&self) -> &[u32] {
        &self.counts
    }
}

/// Engine handle for individuals to be sampled at the current generation.
/// Handed to every callback alongside the population.
#[derive(Clone, Debug, Default)]
pub struct SampleRecorder {
    samples: Vec<usize>,
}

impl SampleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, samples: &[usize]) {
        self.samples.clear();
        self.samples.extend_from_slice(samples);
    }

    pub fn samples(&self) -> &[usize] {
        &self.samples
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
