//! GA evolutionary loop execution.
//!
//! [`GaRunner`] is a phase state machine:
//!
//! ```text
//! Idle → InitPop → Evaluate → Selection → Crossover → Mutation
//!                                ↑                        ↓
//!                            CheckTerm ←──────────── UpdateBest
//!                                ↓
//!                            Finished → Idle
//! ```
//!
//! Each [`GaRunner::step`] executes exactly one phase over the whole
//! population. All run state (generation, stagnation, mutation rate, LFSR)
//! lives in one [`RunContext`] owned by the runner, so a run is a pure
//! function of its configuration and instance.

use super::config::GaConfig;
use super::error::{GaError, InputError};
use super::fitness::evaluate_population;
use super::lfsr::Lfsr;
use super::operators::{breed, mutate_population, MutationTier};
use super::population::{initialize, inject_diversity, PopulationStore};
use super::selection::preserve_elites;
use super::types::{Chromosome, Fitness, Individual, Item};
use tracing::{debug, info, instrument};

/// Stagnation above which diversity injection fires.
pub const INJECTION_STAGNATION: usize = 30;

/// Stagnation relief applied after a diversity injection.
pub const INJECTION_RELIEF: usize = 10;

/// Stagnation above which the mutation rate grows instead of resetting.
pub const RATE_GROWTH_STAGNATION: usize = 5;

/// Adaptive mutation rate in Q16 fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationRate(u32);

impl MutationRate {
    /// Fixed-point scale (1.0).
    pub const ONE: u32 = 1 << 16;
    /// ≈ 0.008, loaded at run start.
    pub const INITIAL: Self = Self(524);
    /// ≈ 0.0064 (0.008 × 0.8), restored while the run is improving.
    pub const BASELINE: Self = Self(419);
    /// ≈ 0.15.
    pub const CAP: Self = Self(9830);

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::ONE)
    }

    /// Grows by 1/16 (capped) under stagnation, otherwise resets to the
    /// baseline.
    pub fn adapt(self, stagnation: usize) -> Self {
        if stagnation > RATE_GROWTH_STAGNATION {
            Self((self.0 + (self.0 >> 4)).min(Self::CAP.0))
        } else {
            Self::BASELINE
        }
    }
}

/// Process-wide state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Zero-based index of the generation in progress.
    pub generation: usize,
    /// Generations since the last best-fitness improvement.
    pub stagnation: usize,
    pub mutation_rate: MutationRate,
    pub rng: Lfsr,
}

impl RunContext {
    fn new(seed: u32) -> Self {
        Self {
            generation: 0,
            stagnation: 0,
            mutation_rate: MutationRate::INITIAL,
            rng: Lfsr::new(seed),
        }
    }
}

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    InitPop,
    Evaluate,
    Selection,
    Crossover,
    Mutation,
    UpdateBest,
    CheckTerm,
    Finished,
}

/// Snapshot reported at each generation boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: Fitness,
    pub stagnation: usize,
    pub mutation_rate: f64,
}

/// Final output of a completed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Best chromosome seen during the run.
    pub best_chromosome: Chromosome,

    /// Fitness of `best_chromosome`.
    pub best_fitness: Fitness,

    /// Number of generations executed (at most `max_generations`).
    pub generations_run: usize,

    /// Whether the run stopped because stagnation exceeded the limit.
    pub stagnated: bool,

    /// Best-ever fitness after each evaluation pass, starting with the
    /// initial population.
    pub best_fitness_history: Vec<Fitness>,

    /// Mutation rate in effect when the run finished.
    pub final_mutation_rate: f64,
}

/// Executes the GA for one knapsack instance.
///
/// # Usage
///
/// ```
/// use u_knapsack::ga::{GaConfig, GaRunner, Item};
///
/// let items: Vec<Item> = (0..16).map(|i| Item::new(10 + i, 5 + i)).collect();
/// let config = GaConfig::configure(20, 16, 30, 3, 7).unwrap();
/// let result = GaRunner::run(&config, &items, 60).unwrap();
/// assert!(result.generations_run <= 30);
/// ```
#[derive(Debug, Clone)]
pub struct GaRunner {
    config: GaConfig,
    items: Vec<Item>,
    capacity: u32,
    phase: Phase,
    ctx: RunContext,
    store: PopulationStore,
    best: Individual,
    history: Vec<Fitness>,
    last_stats: Option<GenerationStats>,
    result: Option<RunResult>,
}

impl GaRunner {
    /// Runs the GA to completion.
    pub fn run(config: &GaConfig, items: &[Item], capacity: u32) -> Result<RunResult, GaError> {
        Self::run_with_progress(config, items, capacity, |_| {})
    }

    /// Runs the GA, calling `progress` once per generation boundary.
    ///
    /// The callback only observes a copy of the run statistics; it has no
    /// way to influence the trajectory.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            seed = config.seed,
            population_size = config.population_size,
            chromosome_length = config.chromosome_length,
        )
    )]
    pub fn run_with_progress<F>(
        config: &GaConfig,
        items: &[Item],
        capacity: u32,
        mut progress: F,
    ) -> Result<RunResult, GaError>
    where
        F: FnMut(&GenerationStats),
    {
        let mut runner = Self::new(config.clone(), items, capacity)?;
        Ok(runner.run_to_completion(&mut progress))
    }

    /// Validates `config` and the instance, returning an idle runner.
    pub fn new(config: GaConfig, items: &[Item], capacity: u32) -> Result<Self, GaError> {
        config.validate()?;
        validate_instance(&config, items, capacity)?;

        let best = Individual::new(Chromosome::empty(config.chromosome_length));
        Ok(Self {
            ctx: RunContext::new(config.seed),
            items: items.to_vec(),
            capacity,
            phase: Phase::Idle,
            store: PopulationStore::new(Vec::new()),
            best,
            history: Vec::with_capacity(config.max_generations.saturating_add(1).min(1024)),
            last_stats: None,
            result: None,
            config,
        })
    }

    /// Steps through a full run starting from the current phase and
    /// returns the result once `Finished` is reached.
    pub fn run_to_completion<F>(&mut self, mut progress: F) -> RunResult
    where
        F: FnMut(&GenerationStats),
    {
        if self.phase == Phase::Finished {
            self.step();
        }
        loop {
            let executed = self.phase;
            let next = self.step();
            if executed == Phase::CheckTerm {
                if let Some(stats) = &self.last_stats {
                    progress(stats);
                }
            }
            if next == Phase::Finished {
                break;
            }
        }
        self.result
            .clone()
            .expect("finished run has a frozen result")
    }

    /// Executes the current phase and returns the next one.
    pub fn step(&mut self) -> Phase {
        let phase = self.phase;
        self.phase = match phase {
            Phase::Idle => {
                self.reset();
                Phase::InitPop
            }
            Phase::InitPop => {
                let population = initialize(
                    self.config.population_size,
                    self.config.chromosome_length,
                    &mut self.ctx.rng,
                );
                self.store = PopulationStore::new(population);
                Phase::Evaluate
            }
            Phase::Evaluate => {
                self.evaluate_and_track();
                Phase::Selection
            }
            Phase::Selection => {
                let (current, staged) = self.store.split();
                preserve_elites(current, staged, self.config.elite_size);
                Phase::Crossover
            }
            Phase::Crossover => {
                let (current, staged) = self.store.split();
                breed(
                    current,
                    staged,
                    self.config.elite_size,
                    self.config.tournament_size,
                    &mut self.ctx.rng,
                );
                Phase::Mutation
            }
            Phase::Mutation => {
                self.mutate_staged();
                self.store.commit();
                Phase::UpdateBest
            }
            Phase::UpdateBest => {
                self.evaluate_and_track();
                Phase::CheckTerm
            }
            Phase::CheckTerm => self.check_termination(),
            Phase::Finished => Phase::Idle,
        };
        self.phase
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    /// The current generation.
    pub fn population(&self) -> &[Individual] {
        self.store.current()
    }

    /// The generation being built.
    pub fn staged(&self) -> &[Individual] {
        self.store.staged()
    }

    /// Best-ever individual so far.
    pub fn best(&self) -> &Individual {
        &self.best
    }

    /// Statistics of the last completed generation.
    pub fn stats(&self) -> Option<&GenerationStats> {
        self.last_stats.as_ref()
    }

    /// Frozen output of the last finished run.
    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    fn reset(&mut self) {
        self.ctx = RunContext::new(self.config.seed);
        self.best = Individual::new(Chromosome::empty(self.config.chromosome_length));
        self.history.clear();
        self.last_stats = None;
        self.result = None;
    }

    /// Rescores the current generation, then folds it into the best-ever
    /// record in index order.
    fn evaluate_and_track(&mut self) {
        evaluate_population(
            self.store.current_mut(),
            &self.items,
            self.capacity,
            self.config.parallel,
        );

        let mut improved = false;
        for ind in self.store.current() {
            if ind.fitness() > self.best.fitness() {
                self.best = ind.clone();
                improved = true;
            }
        }
        if improved {
            self.ctx.stagnation = 0;
        } else {
            self.ctx.stagnation += 1;
        }
        self.history.push(self.best.fitness());
    }

    fn mutate_staged(&mut self) {
        let tier = MutationTier::for_stagnation(self.ctx.stagnation);
        let flips = mutate_population(self.store.staged_mut(), tier, &mut self.ctx.rng);

        let count = self.config.injection_size;
        if count > 0 && self.ctx.stagnation > INJECTION_STAGNATION {
            inject_diversity(self.store.staged_mut(), count, &mut self.ctx.rng);
            self.ctx.stagnation -= INJECTION_RELIEF;
            debug!(
                generation = self.ctx.generation,
                injected = count,
                stagnation = self.ctx.stagnation,
                "diversity injection"
            );
        }
        tracing::trace!(generation = self.ctx.generation, ?tier, flips, "mutation");
    }

    fn check_termination(&mut self) -> Phase {
        let stats = GenerationStats {
            generation: self.ctx.generation,
            best_fitness: self.best.fitness(),
            stagnation: self.ctx.stagnation,
            mutation_rate: self.ctx.mutation_rate.as_f64(),
        };
        self.last_stats = Some(stats);
        debug!(
            generation = stats.generation,
            best_fitness = stats.best_fitness,
            stagnation = stats.stagnation,
            mutation_rate = stats.mutation_rate,
            "generation complete"
        );

        let exhausted = self.ctx.generation + 1 >= self.config.max_generations;
        let stagnated = self.ctx.stagnation > self.config.stagnation_limit;
        if exhausted || stagnated {
            let result = RunResult {
                best_chromosome: self.best.chromosome().clone(),
                best_fitness: self.best.fitness(),
                generations_run: self.ctx.generation + 1,
                stagnated,
                best_fitness_history: self.history.clone(),
                final_mutation_rate: self.ctx.mutation_rate.as_f64(),
            };
            info!(
                best_fitness = result.best_fitness,
                generations_run = result.generations_run,
                stagnated,
                "run finished"
            );
            self.result = Some(result);
            return Phase::Finished;
        }

        self.ctx.generation += 1;
        self.ctx.mutation_rate = self.ctx.mutation_rate.adapt(self.ctx.stagnation);
        Phase::Selection
    }
}

fn validate_instance(config: &GaConfig, items: &[Item], capacity: u32) -> Result<(), InputError> {
    if items.len() != config.chromosome_length {
        return Err(InputError::ItemCountMismatch {
            items: items.len(),
            chromosome_length: config.chromosome_length,
        });
    }
    if capacity > u32::from(u16::MAX) {
        return Err(InputError::CapacityOutOfRange(capacity));
    }
    let total_value: u32 = items.iter().map(|item| u32::from(item.value)).sum();
    if total_value > u32::from(Fitness::MAX) {
        return Err(InputError::ValueOverflow(total_value));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
