//! Core data types for the knapsack GA.
//!
//! - [`Item`]: a (value, weight) pair, read-only for a run
//! - [`Chromosome`]: item-inclusion bitstring
//! - [`Individual`]: a chromosome with its cached fitness

use std::fmt;

/// Fitness score: penalized total value. Higher is better.
pub type Fitness = u16;

/// A knapsack item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Value gained when the item is packed.
    pub value: u16,
    /// Weight consumed when the item is packed.
    pub weight: u16,
}

impl Item {
    pub fn new(value: u16, weight: u16) -> Self {
        Self { value, weight }
    }
}

impl From<(u16, u16)> for Item {
    fn from((value, weight): (u16, u16)) -> Self {
        Self { value, weight }
    }
}

/// Fixed-length bitstring; bit `i` set means item `i` is packed.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// An all-clear chromosome of `len` bits.
    pub fn empty(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Builds a chromosome of `len` bits with the listed indices set.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn with_items(len: usize, packed: &[usize]) -> Self {
        let mut chromosome = Self::empty(len);
        for &i in packed {
            chromosome.bits[i] = true;
        }
        chromosome
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of packed items.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Indices of packed items, ascending.
    pub fn packed_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    #[inline]
    pub(crate) fn flip(&mut self, i: usize) {
        self.bits[i] = !self.bits[i];
    }

    pub(crate) fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }
}

impl fmt::Debug for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chromosome({self})")
    }
}

/// Renders bit 0 first, as `0`/`1` characters.
impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A chromosome together with its cached fitness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    pub(crate) chromosome: Chromosome,
    pub(crate) fitness: Fitness,
}

impl Individual {
    /// Wraps an unevaluated chromosome (fitness 0).
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: 0,
        }
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    pub fn fitness(&self) -> Fitness {
        self.fitness
    }
}
