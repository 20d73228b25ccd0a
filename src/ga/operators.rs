//! Bitstring crossover and mutation operators.
//!
//! # Crossover
//!
//! [`segment_crossover`] splits the chromosome at its quarter points and
//! alternates donors per segment. For 128 bits:
//!
//! | Segment | child1 | child2 |
//! |---|---|---|
//! | `[0, 32)` | parent1 | parent2 |
//! | `[32, 64)` | parent2 | parent1 |
//! | `[64, 96)` | parent1 | parent2 |
//! | `[96, 128)` | parent2 | parent1 |
//!
//! It is gated by the OR of bits 0 and 1 of one LFSR word (~75% rate).
//!
//! # Mutation
//!
//! Every bit draws one LFSR word and flips when the word matches the
//! pattern of the current [`MutationTier`]; longer stagnation selects a
//! looser pattern and therefore more flips.

use super::lfsr::{bit_at, Lfsr};
use super::selection::tournament;
use super::types::{Chromosome, Individual};

/// Word positions examined by the mutation patterns.
const MUTATION_POSITIONS: [usize; 4] = [3, 7, 13, 29];

// ============================================================================
// Crossover
// ============================================================================

/// Whether crossover fires for the next pair: bit 0 OR bit 1 of a fresh word.
#[inline]
pub fn crossover_gate(rng: &mut Lfsr) -> bool {
    let word = rng.step();
    bit_at(word, 0) || bit_at(word, 1)
}

/// Segment boundaries at the quarter points of `len`.
#[inline]
fn quarter_points(len: usize) -> [usize; 3] {
    [len / 4, len / 2, 3 * len / 4]
}

/// Fixed four-segment alternating crossover.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn segment_crossover(parent1: &Chromosome, parent2: &Chromosome) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let [q1, q2, q3] = quarter_points(n);
    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();
    for range in [q1..q2, q3..n] {
        child1.bits_mut()[range.clone()].copy_from_slice(&parent2.bits()[range.clone()]);
        child2.bits_mut()[range.clone()].copy_from_slice(&parent1.bits()[range]);
    }
    (child1, child2)
}

/// Fills every non-elite staged slot with offspring of tournament parents.
///
/// Slots are processed in pairs from `elite_size`; when the last pair is
/// incomplete only the first child is written. Without crossover the
/// children are verbatim copies of the parents.
pub fn breed(
    current: &[Individual],
    staged: &mut [Individual],
    elite_size: usize,
    tournament_size: usize,
    rng: &mut Lfsr,
) {
    let n = staged.len();
    for slot in (elite_size..n).step_by(2) {
        let p1 = &current[tournament(current, tournament_size, rng)];
        let p2 = &current[tournament(current, tournament_size, rng)];

        let (child1, child2) = if crossover_gate(rng) {
            let (c1, c2) = segment_crossover(&p1.chromosome, &p2.chromosome);
            (Individual::new(c1), Individual::new(c2))
        } else {
            (p1.clone(), p2.clone())
        };

        staged[slot] = child1;
        if slot + 1 < n {
            staged[slot + 1] = child2;
        }
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutation pressure, chosen from the stagnation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTier {
    /// Stagnation ≤ 10: bits 3, 7, 13 set and bit 29 clear (~1/16).
    Low,
    /// Stagnation in (10, 20]: bits 3, 7, 13 set (~1/8).
    Medium,
    /// Stagnation > 20: bits 3 and 7 set (~1/4).
    High,
}

impl MutationTier {
    pub fn for_stagnation(stagnation: usize) -> Self {
        if stagnation > 20 {
            MutationTier::High
        } else if stagnation > 10 {
            MutationTier::Medium
        } else {
            MutationTier::Low
        }
    }

    /// Whether `word` triggers a flip at this tier.
    #[inline]
    pub fn fires(self, word: u32) -> bool {
        let [a, b, c, d] = MUTATION_POSITIONS.map(|pos| bit_at(word, pos));
        match self {
            MutationTier::High => a && b,
            MutationTier::Medium => a && b && c,
            MutationTier::Low => a && b && c && !d,
        }
    }
}

/// Flips bits of `chromosome` per `tier`, one LFSR word per bit.
///
/// Returns the number of flipped bits.
pub fn mutate(chromosome: &mut Chromosome, tier: MutationTier, rng: &mut Lfsr) -> usize {
    let mut flips = 0;
    for i in 0..chromosome.len() {
        if tier.fires(rng.step()) {
            chromosome.flip(i);
            flips += 1;
        }
    }
    flips
}

/// Mutates every individual of `population`. Returns the total flip count.
///
/// Individuals with at least one flipped bit have their cached fitness
/// reset to 0 until the next evaluation.
pub fn mutate_population(
    population: &mut [Individual],
    tier: MutationTier,
    rng: &mut Lfsr,
) -> usize {
    let mut total = 0;
    for ind in population.iter_mut() {
        let flips = mutate(&mut ind.chromosome, tier, rng);
        if flips > 0 {
            ind.fitness = 0;
        }
        total += flips;
    }
    total
}

// ============================================================================
// Tests
// ============================================================================
