//! Deterministic genetic-algorithm engine for the 0/1 knapsack problem.
//!
//! Given items with integer values and weights and a capacity, the engine
//! searches for the item subset (a bitstring chromosome) of maximum value
//! that fits, using bounded generations of population-based search.
//!
//! - **GA engine** ([`ga`]): stratified initialization, penalized fitness,
//!   elitism plus tournament selection, four-segment crossover, adaptive
//!   mutation with diversity injection, stagnation-aware termination.
//! - **Instances** ([`instance`]): problem data, including the LCG-generated
//!   128-item benchmark.
//!
//! # Reproducibility
//!
//! All randomness comes from one 32-bit LFSR threaded through every
//! operator. Identical seed, configuration and instance yield a
//! bit-identical [`ga::RunResult`].
//!
//! ```
//! use u_knapsack::{ga::GaConfig, KnapsackInstance};
//!
//! let instance = KnapsackInstance::lcg(32, 42, 400);
//! let config = GaConfig::configure(40, 32, 50, 5, 42).unwrap();
//! let a = instance.solve(&config).unwrap();
//! let b = instance.solve(&config).unwrap();
//! assert_eq!(a, b);
//! ```

pub mod ga;
pub mod instance;

pub use instance::KnapsackInstance;
