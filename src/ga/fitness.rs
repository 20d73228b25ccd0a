//! Knapsack fitness evaluation.
//!
//! Feasible chromosomes score their total value. Overweight chromosomes
//! are penalized in two tiers:
//!
//! | Overage `w - C` | Fitness |
//! |---|---|
//! | `0` (feasible) | `value` |
//! | `1..=200` | `value - 2·(w - C)`, clamped at 0 |
//! | `> 200` | `value >> 2` |

use super::types::{Chromosome, Fitness, Individual, Item};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Overage beyond which the quarter-value penalty applies.
pub const HARSH_PENALTY_OVERAGE: u32 = 200;

/// Sums `(total_value, total_weight)` over packed items.
pub fn totals(chromosome: &Chromosome, items: &[Item]) -> (u32, u32) {
    debug_assert_eq!(
        chromosome.len(),
        items.len(),
        "chromosome length must match item count"
    );
    chromosome
        .bits()
        .iter()
        .zip(items)
        .filter(|(&packed, _)| packed)
        .fold((0, 0), |(v, w), (_, item)| {
            (v + u32::from(item.value), w + u32::from(item.weight))
        })
}

/// Scores a chromosome against `items` and `capacity`.
///
/// Total value is assumed to fit [`Fitness`]; the runner rejects instances
/// where it would not.
pub fn evaluate(chromosome: &Chromosome, items: &[Item], capacity: u32) -> Fitness {
    let (value, weight) = totals(chromosome, items);
    let score = if weight <= capacity {
        value
    } else {
        let overage = weight - capacity;
        if overage > HARSH_PENALTY_OVERAGE {
            value >> 2
        } else {
            value.saturating_sub(2 * overage)
        }
    };
    Fitness::try_from(score).unwrap_or(Fitness::MAX)
}

/// Recomputes the cached fitness of every individual.
pub(crate) fn evaluate_population(
    population: &mut [Individual],
    items: &[Item],
    capacity: u32,
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            ind.fitness = evaluate(&ind.chromosome, items, capacity);
        });
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for ind in population.iter_mut() {
        ind.fitness = evaluate(&ind.chromosome, items, capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items() -> Vec<Item> {
        vec![
            Item::new(100, 50),
            Item::new(60, 150),
            Item::new(40, 51),
            Item::new(30, 1),
        ]
    }

    #[test]
    fn test_empty_chromosome_scores_zero() {
        assert_eq!(evaluate(&Chromosome::empty(4), &items(), 0), 0);
    }

    #[test]
    fn test_feasible_scores_total_value() {
        let c = Chromosome::with_items(4, &[0, 2]);
        // weight 101
        assert_eq!(evaluate(&c, &items(), 101), 140);
        assert_eq!(evaluate(&c, &items(), 500), 140);
    }

    #[test]
    fn test_penalty_boundary() {
        // weight 50 + 150 + 1 = 201, value 190
        let c = Chromosome::with_items(4, &[0, 1, 3]);
        assert_eq!(totals(&c, &items()), (190, 201));

        // overage 200: linear penalty exceeds the value
        assert_eq!(evaluate(&c, &items(), 1), 0);
        // overage 1: linear penalty
        assert_eq!(evaluate(&c, &items(), 200), 188);
        // overage 200 with enough value to stay positive
        let rich = vec![Item::new(1000, 250)];
        let all = Chromosome::with_items(1, &[0]);
        assert_eq!(evaluate(&all, &rich, 50), 1000 - 400);
        // overage 201: quarter value
        assert_eq!(evaluate(&all, &rich, 49), 1000 >> 2);
    }

    #[test]
    fn test_linear_penalty_clamps_at_zero() {
        let small = vec![Item::new(10, 100)];
        let all = Chromosome::with_items(1, &[0]);
        // value 10 - 2 * 50 would be negative
        assert_eq!(evaluate(&all, &small, 50), 0);
    }

    #[test]
    fn test_evaluate_population_updates_cache() {
        let mut pop = vec![
            Individual::new(Chromosome::with_items(4, &[0])),
            Individual::new(Chromosome::with_items(4, &[3])),
        ];
        evaluate_population(&mut pop, &items(), 100, false);
        assert_eq!(pop[0].fitness(), 100);
        assert_eq!(pop[1].fitness(), 30);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "chromosome length must match item count")]
    fn test_totals_rejects_length_mismatch() {
        totals(&Chromosome::empty(3), &items());
    }

    proptest! {
        #[test]
        fn prop_feasible_equals_total_value(
            pairs in prop::collection::vec((0u16..100, 0u16..100), 1..64),
            mask in prop::collection::vec(any::<bool>(), 64),
        ) {
            let items: Vec<Item> = pairs.iter().map(|&p| p.into()).collect();
            let c = Chromosome::from_bits(mask[..items.len()].to_vec());
            let (value, weight) = totals(&c, &items);
            prop_assert_eq!(u32::from(evaluate(&c, &items, weight)), value);
        }

        #[test]
        fn prop_penalty_tiers(
            pairs in prop::collection::vec((0u16..500, 1u16..100), 1..64),
            overage in 1u32..400,
        ) {
            let items: Vec<Item> = pairs.iter().map(|&p| p.into()).collect();
            let c = Chromosome::from_bits(vec![true; items.len()]);
            let (value, weight) = totals(&c, &items);
            prop_assume!(weight >= overage);
            let fitness = u32::from(evaluate(&c, &items, weight - overage));
            if overage > HARSH_PENALTY_OVERAGE {
                prop_assert_eq!(fitness, value >> 2);
            } else {
                prop_assert_eq!(fitness, value.saturating_sub(2 * overage));
            }
        }

        #[test]
        fn prop_never_exceeds_total_value(
            pairs in prop::collection::vec((0u16..100, 0u16..100), 1..64),
            capacity in 0u32..2000,
        ) {
            let items: Vec<Item> = pairs.iter().map(|&p| p.into()).collect();
            let c = Chromosome::from_bits(vec![true; items.len()]);
            let (value, _) = totals(&c, &items);
            prop_assert!(u32::from(evaluate(&c, &items, capacity)) <= value);
        }
    }
}
