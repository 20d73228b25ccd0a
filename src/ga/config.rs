//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::error::{ConfigError, GaError};

/// Configuration for the knapsack GA.
///
/// # Defaults
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 150);
/// assert_eq!(config.chromosome_length, 128);
/// assert_eq!(config.max_generations, 300);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_chromosome_length(32)
///     .with_tournament_size(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Bits per chromosome; must equal the number of items of a run.
    pub chromosome_length: usize,

    /// Upper bound on generations executed.
    pub max_generations: usize,

    /// Candidates drawn per tournament.
    pub tournament_size: usize,

    /// Individuals carried over unchanged by truncation selection.
    pub elite_size: usize,

    /// Trailing individuals replaced by random chromosomes under severe
    /// stagnation. Zero disables diversity injection together with its
    /// stagnation relief.
    pub injection_size: usize,

    /// The run stops early once stagnation exceeds this many generations.
    pub stagnation_limit: usize,

    /// Whether to score individuals in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// LFSR seed. The whole trajectory is a function of this value.
    pub seed: u32,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 150,
            chromosome_length: 128,
            max_generations: 300,
            tournament_size: 5,
            elite_size: 4,
            injection_size: 15,
            stagnation_limit: 50,
            parallel: false,
            seed: 42,
        }
    }
}

impl GaConfig {
    /// Builds and validates a configuration from the core run parameters.
    ///
    /// Elite size, stagnation limit and parallelism keep their defaults.
    /// The injection size is reduced when the population leaves fewer
    /// non-elite slots than the default.
    pub fn configure(
        population_size: usize,
        chromosome_length: usize,
        max_generations: usize,
        tournament_size: usize,
        seed: u32,
    ) -> Result<Self, GaError> {
        let defaults = Self::default();
        let config = Self {
            population_size,
            chromosome_length,
            max_generations,
            tournament_size,
            injection_size: defaults
                .injection_size
                .min(population_size.saturating_sub(defaults.elite_size)),
            seed,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_chromosome_length(mut self, n: usize) -> Self {
        self.chromosome_length = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the diversity injection size (0 to disable).
    pub fn with_injection_size(mut self, n: usize) -> Self {
        self.injection_size = n;
        self
    }

    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size).into());
        }
        if self.chromosome_length == 0 {
            return Err(ConfigError::EmptyChromosome.into());
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations.into());
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournament.into());
        }
        if self.elite_size >= self.population_size {
            return Err(ConfigError::EliteTooLarge {
                elite_size: self.elite_size,
                population_size: self.population_size,
            }
            .into());
        }
        let available = self.population_size - self.elite_size;
        if self.injection_size > available {
            return Err(ConfigError::InjectionTooLarge {
                injection_size: self.injection_size,
                available,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 150);
        assert_eq!(config.chromosome_length, 128);
        assert_eq!(config.max_generations, 300);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.elite_size, 4);
        assert_eq!(config.injection_size, 15);
        assert_eq!(config.stagnation_limit, 50);
        assert!(!config.parallel);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(40)
            .with_chromosome_length(16)
            .with_max_generations(20)
            .with_tournament_size(3)
            .with_elite_size(2)
            .with_injection_size(0)
            .with_stagnation_limit(10)
            .with_parallel(true)
            .with_seed(9);

        assert_eq!(config.population_size, 40);
        assert_eq!(config.chromosome_length, 16);
        assert_eq!(config.max_generations, 20);
        assert_eq!(config.tournament_size, 3);
        assert_eq!(config.elite_size, 2);
        assert_eq!(config.injection_size, 0);
        assert_eq!(config.stagnation_limit, 10);
        assert!(config.parallel);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_configure_ok() {
        let config = GaConfig::configure(150, 128, 300, 5, 42).unwrap();
        assert_eq!(config, GaConfig::default());
    }

    #[test]
    fn test_configure_shrinks_injection_for_small_population() {
        let config = GaConfig::configure(10, 8, 5, 3, 1).unwrap();
        assert_eq!(config.injection_size, 6);
    }

    #[test]
    fn test_configure_rejects_empty_chromosome() {
        let err = GaConfig::configure(150, 0, 300, 5, 42).unwrap_err();
        assert_eq!(err, GaError::Configuration(ConfigError::EmptyChromosome));
    }

    #[test]
    fn test_configure_rejects_elite_filling_population() {
        let err = GaConfig::configure(4, 8, 10, 2, 42).unwrap_err();
        assert_eq!(
            err,
            GaError::Configuration(ConfigError::EliteTooLarge {
                elite_size: 4,
                population_size: 4,
            })
        );
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1).with_elite_size(0);
        assert!(matches!(
            config.validate(),
            Err(GaError::Configuration(ConfigError::PopulationTooSmall(1)))
        ));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_injection_too_large() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_injection_size(7);
        assert!(matches!(
            config.validate(),
            Err(GaError::Configuration(ConfigError::InjectionTooLarge {
                injection_size: 7,
                available: 6,
            }))
        ));
    }

    #[test]
    fn test_error_message() {
        let err: GaError = ConfigError::ZeroGenerations.into();
        assert_eq!(
            err.to_string(),
            "ConfigurationError: max_generations must be at least 1"
        );
    }
}
