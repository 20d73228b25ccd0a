//! Error taxonomy for setup-time rejection.
//!
//! A run has no recoverable failure path: configuration and input are
//! validated up front, and anything that goes wrong after that is a bug.

/// Invalid engine parameters, rejected before a run starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 2, got: {0}")]
    PopulationTooSmall(usize),
    #[error("chromosome_length must be at least 1")]
    EmptyChromosome,
    #[error("max_generations must be at least 1")]
    ZeroGenerations,
    #[error("tournament_size must be at least 1")]
    ZeroTournament,
    #[error("elite_size must be below population_size: elite_size={elite_size}, population_size={population_size}")]
    EliteTooLarge {
        elite_size: usize,
        population_size: usize,
    },
    #[error("injection_size exceeds the non-elite slots: injection_size={injection_size}, available={available}")]
    InjectionTooLarge {
        injection_size: usize,
        available: usize,
    },
}

/// Problem instance that does not fit the configured engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("item count must equal chromosome_length: items={items}, chromosome_length={chromosome_length}")]
    ItemCountMismatch {
        items: usize,
        chromosome_length: usize,
    },
    #[error("capacity must fit the 16-bit weight range, got: {0}")]
    CapacityOutOfRange(u32),
    #[error("total item value must fit the 16-bit fitness range, got: {0}")]
    ValueOverflow(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GaError {
    #[error("ConfigurationError: {0}")]
    Configuration(#[from] ConfigError),
    #[error("InputError: {0}")]
    Input(#[from] InputError),
}
