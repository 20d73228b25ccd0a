//! Selection strategies for the GA.
//!
//! - **Elitism** (truncation): the top `elite_size` individuals are copied
//!   unchanged into the first staged slots.
//! - **Tournament**: parents for crossover are the best of `k` candidates
//!   drawn from the LFSR.
//!
//! All strategies assume **maximization** (higher fitness = better). Ties go
//! to the lowest index for elitism and to the earliest draw for tournaments.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::lfsr::Lfsr;
use super::types::Individual;

/// Indices of the `elite_size` fittest individuals, best first.
///
/// Each pass scans the whole population for the fittest individual not
/// already chosen, so equal-fitness duplicates at distinct indices may all
/// be selected but no index is selected twice.
///
/// # Panics
/// Panics if `elite_size` exceeds the population size.
pub fn elite_indices(population: &[Individual], elite_size: usize) -> Vec<usize> {
    assert!(
        elite_size <= population.len(),
        "elite_size {elite_size} exceeds population {}",
        population.len()
    );

    let mut chosen: Vec<usize> = Vec::with_capacity(elite_size);
    for _ in 0..elite_size {
        let mut best: Option<usize> = None;
        for (i, ind) in population.iter().enumerate() {
            if chosen.contains(&i) {
                continue;
            }
            match best {
                Some(b) if population[b].fitness() >= ind.fitness() => {}
                _ => best = Some(i),
            }
        }
        chosen.push(best.expect("population has an unchosen individual"));
    }
    chosen
}

/// Copies the elites of `current` into the first slots of `staged`.
///
/// Returns the chosen indices of `current`.
pub fn preserve_elites(
    current: &[Individual],
    staged: &mut [Individual],
    elite_size: usize,
) -> Vec<usize> {
    let elites = elite_indices(current, elite_size);
    for (slot, &idx) in elites.iter().enumerate() {
        staged[slot] = current[idx].clone();
    }
    elites
}

/// Candidate index for draw number `draw`.
///
/// Each draw advances the LFSR once and takes a 16-bit window of the new
/// word, shifted by three bits per draw, modulo the population size.
#[inline]
fn tournament_candidate(rng: &mut Lfsr, draw: usize, n: usize) -> usize {
    let word = rng.step();
    let shift = (3 * draw) % 16;
    ((word >> shift) & 0xFFFF) as usize % n
}

/// Tournament selection: draw `k` candidates, return the fittest.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament(population: &[Individual], k: usize, rng: &mut Lfsr) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = tournament_candidate(rng, 0, n);
    for draw in 1..k {
        let idx = tournament_candidate(rng, draw, n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}
