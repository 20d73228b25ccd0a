//! Population store and chromosome seeding.
//!
//! The store holds two equally sized buffers: the *current* generation,
//! read by selection and crossover, and the *staged* generation being built.
//! [`PopulationStore::commit`] promotes the staged buffer at generation end.
//!
//! Seeded chromosomes are drawn from one LFSR word per individual: bit `j` of
//! individual `i` reads word positions starting at `(j + i) mod 32`.
//! Injected chromosomes draw a fresh word for every 32 bits.

use super::lfsr::{bit_at, Lfsr};
use super::types::{Chromosome, Individual};

/// Bit distribution used to seed one individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStrategy {
    /// One word bit per chromosome bit (~50% packed).
    Uniform,
    /// AND of three adjacent word bits (~12.5% packed).
    Sparse,
    /// OR of two adjacent word bits (~75% packed).
    Dense,
}

impl SeedStrategy {
    /// Strategy for slot `index`: first third uniform, middle third sparse,
    /// final third dense.
    pub fn for_slot(index: usize, population_size: usize) -> Self {
        if index < population_size / 3 {
            SeedStrategy::Uniform
        } else if index < 2 * population_size / 3 {
            SeedStrategy::Sparse
        } else {
            SeedStrategy::Dense
        }
    }

    #[inline]
    fn draw(self, word: u32, pos: usize) -> bool {
        match self {
            SeedStrategy::Uniform => bit_at(word, pos),
            SeedStrategy::Sparse => {
                bit_at(word, pos) && bit_at(word, pos + 1) && bit_at(word, pos + 2)
            }
            SeedStrategy::Dense => bit_at(word, pos) || bit_at(word, pos + 1),
        }
    }
}

/// Draws a chromosome for slot `index`, advancing `rng` once.
pub fn random_chromosome(
    strategy: SeedStrategy,
    len: usize,
    index: usize,
    rng: &mut Lfsr,
) -> Chromosome {
    let word = rng.step();
    Chromosome::from_bits((0..len).map(|j| strategy.draw(word, j + index)).collect())
}

/// Builds the stratified initial population. Fitness is left at 0.
pub fn initialize(population_size: usize, len: usize, rng: &mut Lfsr) -> Vec<Individual> {
    (0..population_size)
        .map(|i| {
            let strategy = SeedStrategy::for_slot(i, population_size);
            Individual::new(random_chromosome(strategy, len, i, rng))
        })
        .collect()
}

/// Draws a chromosome from fresh words: bit `j` is bit `j mod 32` of the
/// `j / 32`-th word, so `ceil(len / 32)` steps per chromosome.
pub fn fresh_chromosome(len: usize, rng: &mut Lfsr) -> Chromosome {
    let words: Vec<u32> = (0..len.div_ceil(32)).map(|_| rng.step()).collect();
    Chromosome::from_bits((0..len).map(|j| bit_at(words[j / 32], j)).collect())
}

/// Overwrites the trailing `count` individuals with fresh random
/// chromosomes.
pub fn inject_diversity(population: &mut [Individual], count: usize, rng: &mut Lfsr) {
    let n = population.len();
    assert!(count <= n, "injection exceeds population: {count} > {n}");
    for ind in population[n - count..].iter_mut() {
        let len = ind.chromosome.len();
        *ind = Individual::new(fresh_chromosome(len, rng));
    }
}

/// Current and staged generations.
#[derive(Debug, Clone)]
pub struct PopulationStore {
    current: Vec<Individual>,
    staged: Vec<Individual>,
}

impl PopulationStore {
    pub fn new(initial: Vec<Individual>) -> Self {
        Self {
            staged: initial.clone(),
            current: initial,
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn current(&self) -> &[Individual] {
        &self.current
    }

    pub fn staged(&self) -> &[Individual] {
        &self.staged
    }

    pub(crate) fn current_mut(&mut self) -> &mut [Individual] {
        &mut self.current
    }

    /// Borrows the current generation for reading alongside the staged
    /// buffer for writing.
    pub(crate) fn split(&mut self) -> (&[Individual], &mut [Individual]) {
        (&self.current, &mut self.staged)
    }

    pub(crate) fn staged_mut(&mut self) -> &mut [Individual] {
        &mut self.staged
    }

    /// Promotes the staged generation to current.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.staged);
    }
}
