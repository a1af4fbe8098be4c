//! Error taxonomy for the evolutionary engine.
//!
//! Every failure is a contract violation reported to the caller; the engine
//! never retries and never resumes a partially built generation.
//!
//! Errors fall into three families, see [`ErrorKind`]:
//!
//! - **Configuration**: rejected before the run starts.
//! - **Fitness contract**: the fitness vector cannot be read as a probability
//!   mass (negative, NaN/∞, or zero total).
//! - **Shape mismatch**: an operator produced or received a population or
//!   genome of the wrong size.

/// Broad classification of an [`EvolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid run or operator parameters.
    Configuration,
    /// The fitness vector violates the non-negative, finite, positive-total contract.
    FitnessContract,
    /// Population or genome sizes do not line up.
    ShapeMismatch,
}

/// Errors reported by the evolutionary engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolveError {
    #[error("population_size must be at least 1, got {0}")]
    InvalidPopulationSize(usize),

    #[error("generations must be at least 1, got {0}")]
    InvalidGenerations(usize),

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("invalid bounds: min {min} must not exceed max {max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("sigma must be finite and non-negative, got {0}")]
    InvalidSigma(f64),

    #[error("fitness of individual {index} is negative ({value})")]
    NegativeFitness { index: usize, value: f64 },

    #[error("fitness of individual {index} is not finite ({value})")]
    NonFiniteFitness { index: usize, value: f64 },

    #[error("total fitness must be positive, got {0}")]
    NonPositiveTotalFitness(f64),

    #[error("total fitness overflows f64")]
    TotalFitnessOverflow,

    #[error("population is empty")]
    EmptyPopulation,

    #[error("fitness vector has {fitness} entries but population has {population}")]
    FitnessLengthMismatch { population: usize, fitness: usize },

    #[error("{stage} returned {actual} individuals, expected {expected}")]
    PopulationSizeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("genome of length {length} has no interior cut point (needs at least {minimum})")]
    GenomeTooShort { length: usize, minimum: usize },

    #[error("parents have different lengths ({left} and {right})")]
    ParentLengthMismatch { left: usize, right: usize },

    #[error("generation {generation}: {source}")]
    AtGeneration {
        generation: usize,
        #[source]
        source: Box<EvolveError>,
    },
}

impl EvolveError {
    /// Returns the family this error belongs to.
    ///
    /// [`EvolveError::AtGeneration`] reports the kind of the wrapped error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvolveError::InvalidPopulationSize(_)
            | EvolveError::InvalidGenerations(_)
            | EvolveError::ProbabilityOutOfRange { .. }
            | EvolveError::InvalidBounds { .. }
            | EvolveError::InvalidSigma(_) => ErrorKind::Configuration,
            EvolveError::NegativeFitness { .. }
            | EvolveError::NonFiniteFitness { .. }
            | EvolveError::NonPositiveTotalFitness(_)
            | EvolveError::TotalFitnessOverflow => ErrorKind::FitnessContract,
            EvolveError::EmptyPopulation
            | EvolveError::FitnessLengthMismatch { .. }
            | EvolveError::PopulationSizeMismatch { .. }
            | EvolveError::GenomeTooShort { .. }
            | EvolveError::ParentLengthMismatch { .. } => ErrorKind::ShapeMismatch,
            EvolveError::AtGeneration { source, .. } => source.kind(),
        }
    }

    /// Strips any [`EvolveError::AtGeneration`] wrapping.
    pub fn root(&self) -> &EvolveError {
        match self {
            EvolveError::AtGeneration { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn at_generation(self, generation: usize) -> Self {
        EvolveError::AtGeneration {
            generation,
            source: Box::new(self),
        }
    }
}

/// Checks that `value` is a probability in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), EvolveError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvolveError::ProbabilityOutOfRange { name, value })
    }
}
