//! GA configuration.
//!
//! [`GaConfig`] holds the run-level parameters of the evolutionary loop.
//! Operator-specific parameters (mutation bounds, sigma) live on the operator
//! types themselves.

use crate::error::{check_probability, EvolveError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the evolutionary run.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_generations(1000)
///     .with_mutation_probability(0.002)
///     .with_crossover_probability(0.3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of genomes in every generation (`M`).
    pub population_size: usize,

    /// Number of select/crossover/mutate cycles (`N`).
    ///
    /// The run always performs exactly this many; there is no early exit.
    pub generations: usize,

    /// Per-gene mutation probability, passed to [`GaProblem::mutate`](super::GaProblem::mutate).
    pub mutation_probability: f64,

    /// Crossover probability, passed to [`GaProblem::crossover`](super::GaProblem::crossover).
    pub crossover_probability: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from the operating system.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            mutation_probability: 0.001,
            crossover_probability: 0.7,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the per-gene mutation probability.
    ///
    /// Not clamped; out-of-range values are rejected by [`validate`](Self::validate).
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the crossover probability.
    ///
    /// Not clamped; out-of-range values are rejected by [`validate`](Self::validate).
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// A configuration-kind [`EvolveError`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), EvolveError> {
        if self.population_size == 0 {
            return Err(EvolveError::InvalidPopulationSize(self.population_size));
        }
        if self.generations == 0 {
            return Err(EvolveError::InvalidGenerations(self.generations));
        }
        check_probability("mutation_probability", self.mutation_probability)?;
        check_probability("crossover_probability", self.crossover_probability)?;
        Ok(())
    }
}
