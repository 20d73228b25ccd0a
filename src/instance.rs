//! Knapsack problem instances.
//!
//! [`KnapsackInstance::lcg`] reproduces the fixed benchmark data set: item
//! values and weights drawn from a 31-bit linear congruential generator.

use crate::ga::{GaConfig, GaError, GaRunner, Item, RunResult};

/// LCG multiplier.
const LCG_A: u32 = 1_103_515_245;
/// LCG increment.
const LCG_C: u32 = 12_345;
/// Keeps the low 31 bits.
const LCG_MASK: u32 = 0x7fff_ffff;

/// Items plus capacity for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackInstance {
    pub items: Vec<Item>,
    pub capacity: u32,
}

impl KnapsackInstance {
    pub fn new(items: Vec<Item>, capacity: u32) -> Self {
        Self { items, capacity }
    }

    /// Generates `n` items from `seed`.
    ///
    /// The LCG state advances before each draw:
    /// `value = 10 + s % 91`, then `weight = 5 + s % 46`.
    ///
    /// ```
    /// use u_knapsack::KnapsackInstance;
    ///
    /// let inst = KnapsackInstance::lcg(128, 42, 1373);
    /// assert_eq!(inst.items.len(), 128);
    /// assert!(inst.items.iter().all(|it| (10..=100).contains(&it.value)));
    /// assert!(inst.items.iter().all(|it| (5..=50).contains(&it.weight)));
    /// ```
    pub fn lcg(n: usize, seed: u32, capacity: u32) -> Self {
        let mut state = seed;
        let mut next = || {
            state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C) & LCG_MASK;
            state
        };
        let items = (0..n)
            .map(|_| {
                // both remainders are below 100
                let value = 10 + (next() % 91) as u16;
                let weight = 5 + (next() % 46) as u16;
                Item::new(value, weight)
            })
            .collect();
        Self { items, capacity }
    }

    /// The reference benchmark: 128 items from seed 42, capacity 1373.
    pub fn benchmark() -> Self {
        Self::lcg(128, 42, 1373)
    }

    pub fn total_value(&self) -> u32 {
        self.items.iter().map(|it| u32::from(it.value)).sum()
    }

    pub fn total_weight(&self) -> u32 {
        self.items.iter().map(|it| u32::from(it.weight)).sum()
    }

    /// Runs the GA on this instance.
    pub fn solve(&self, config: &GaConfig) -> Result<RunResult, GaError> {
        GaRunner::run(config, &self.items, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcg_first_items() {
        let inst = KnapsackInstance::lcg(2, 42, 0);
        // s1 = (42 * 1103515245 + 12345) & 0x7fffffff = 1250496027
        // s2 = 1116302264, s3 = 1000676753, s4 = 1668674806
        assert_eq!(inst.items[0], Item::new(63, 29));
        assert_eq!(inst.items[1], Item::new(86, 17));
    }

    #[test]
    fn test_lcg_is_deterministic() {
        assert_eq!(KnapsackInstance::lcg(64, 7, 100), KnapsackInstance::lcg(64, 7, 100));
        assert_ne!(KnapsackInstance::lcg(64, 7, 100), KnapsackInstance::lcg(64, 8, 100));
    }

    #[test]
    fn test_benchmark_fits_fitness_range() {
        let inst = KnapsackInstance::benchmark();
        assert_eq!(inst.total_value(), 7028);
        assert_eq!(inst.total_weight(), 3388);
        assert!(inst.total_weight() > inst.capacity);
    }
}
