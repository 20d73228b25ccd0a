//! Genetic algorithm engine for the 0/1 knapsack problem.
//!
//! A single fixed-size population evolves under a deterministic LFSR. Every
//! generation runs the same phase sequence:
//!
//! 1. **Elitism**: the top `elite_size` individuals are staged unchanged
//! 2. **Crossover**: remaining slots get offspring of tournament parents
//! 3. **Mutation**: stagnation-tiered bit flips, plus diversity injection
//!    under severe stagnation
//! 4. **Evaluation**: rescore, update the best-ever record, check termination
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters with builder and validation
//! - [`GaRunner`]: Phase state machine executing a run
//! - [`RunResult`]: Best chromosome, fitness and run statistics
//! - [`Lfsr`]: The only entropy source
//!
//! # Submodules
//!
//! - [`fitness`]: Two-tier penalized knapsack scoring
//! - [`operators`]: Segment crossover and adaptive mutation
//! - [`population`]: Stratified seeding, diversity injection, generation buffers
//! - [`selection`]: Elitism and tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod error;
pub mod fitness;
mod lfsr;
pub mod operators;
pub mod population;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use error::{ConfigError, GaError, InputError};
pub use lfsr::{bit_at, Lfsr, ZERO_SEED_STATE};
pub use runner::{
    GaRunner, GenerationStats, MutationRate, Phase, RunContext, RunResult, INJECTION_RELIEF,
    INJECTION_STAGNATION, RATE_GROWTH_STAGNATION,
};
pub use types::{Chromosome, Fitness, Individual, Item};
