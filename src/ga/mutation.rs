//! Per-gene mutation operators.
//!
//! Each operator decides how a single gene is perturbed; the provided
//! [`GeneMutation::mutate`] applies it independently to every gene with a
//! given probability and returns a new genome. The input is never modified
//! and the genome length never changes.
//!
//! # Operators
//!
//! - [`BitFlip`]: complement a bit (`bool` or `u8` 0/1)
//! - [`GaussianPerturbation`]: multiply by `N(1, sigma)` and clamp to bounds
//! - [`IntegerStep`]: add ±1, rejecting steps that leave the bounds
//!
//! Composite genomes (e.g. a struct of several gene vectors) apply one
//! operator per field.

use crate::error::EvolveError;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A per-gene mutation strategy.
pub trait GeneMutation<T: Clone> {
    /// Returns a perturbed copy of one gene.
    ///
    /// Called only for genes that were chosen for mutation.
    fn perturb<R: Rng>(&self, gene: &T, rng: &mut R) -> T;

    /// Returns a copy of `genes` where each gene is independently perturbed
    /// with probability `probability`.
    ///
    /// A probability of 0 returns an exact copy; a probability of 1 perturbs
    /// every gene. `probability` must lie in `[0, 1]`: this is asserted in
    /// debug builds only, since [`GaConfig::validate`](crate::ga::GaConfig::validate)
    /// already rejects out-of-range values for runs.
    fn mutate<R: Rng>(&self, genes: &[T], probability: f64, rng: &mut R) -> Vec<T> {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "mutation probability must be within [0, 1], got {probability}"
        );
        genes
            .iter()
            .map(|gene| {
                if rng.random::<f64>() < probability {
                    self.perturb(gene, rng)
                } else {
                    gene.clone()
                }
            })
            .collect()
    }
}

/// Bit-flip mutation for bit-string genomes.
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_evolve::ga::{BitFlip, GeneMutation};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let genome = vec![true, false, true];
/// assert_eq!(BitFlip.mutate(&genome, 1.0, &mut rng), vec![false, true, false]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitFlip;

impl GeneMutation<bool> for BitFlip {
    fn perturb<R: Rng>(&self, gene: &bool, _rng: &mut R) -> bool {
        !*gene
    }
}

impl GeneMutation<u8> for BitFlip {
    /// Maps 0 to 1 and any non-zero value to 0.
    fn perturb<R: Rng>(&self, gene: &u8, _rng: &mut R) -> u8 {
        u8::from(*gene == 0)
    }
}

/// Multiplicative Gaussian perturbation for continuous genes.
///
/// A chosen gene `x` becomes `clamp(x * N(1, sigma), min, max)`.
#[derive(Debug, Clone, Copy)]
pub struct GaussianPerturbation {
    normal: Normal<f64>,
    min: f64,
    max: f64,
}

impl GaussianPerturbation {
    /// Creates the operator.
    ///
    /// `max` may be `f64::INFINITY` for a one-sided bound.
    ///
    /// # Errors
    ///
    /// - [`EvolveError::InvalidSigma`] if `sigma` is negative or not finite
    /// - [`EvolveError::InvalidBounds`] if `min > max` or either is NaN
    pub fn new(sigma: f64, min: f64, max: f64) -> Result<Self, EvolveError> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(EvolveError::InvalidSigma(sigma));
        }
        if min.is_nan() || max.is_nan() || min > max {
            return Err(EvolveError::InvalidBounds { min, max });
        }
        let normal = Normal::new(1.0, sigma).map_err(|_| EvolveError::InvalidSigma(sigma))?;
        Ok(Self { normal, min, max })
    }

    /// Standard deviation of the multiplicative factor.
    pub fn sigma(&self) -> f64 {
        self.normal.std_dev()
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for GaussianPerturbation {
    /// `sigma = 0.1`, bounds `[0.05, +inf)`.
    fn default() -> Self {
        Self {
            normal: Normal::new(1.0, 0.1).expect("sigma 0.1 is valid"),
            min: 0.05,
            max: f64::INFINITY,
        }
    }
}

impl GeneMutation<f64> for GaussianPerturbation {
    fn perturb<R: Rng>(&self, gene: &f64, rng: &mut R) -> f64 {
        let factor = self.normal.sample(rng);
        (gene * factor).clamp(self.min, self.max)
    }
}

/// Bounded ±1 step for integer genes.
///
/// A chosen gene moves up or down by one with equal probability. A step that
/// would leave `[min, max]` is rejected and the gene keeps its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerStep {
    min: i64,
    max: i64,
}

impl IntegerStep {
    /// Creates the operator.
    ///
    /// # Errors
    ///
    /// [`EvolveError::InvalidBounds`] if `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self, EvolveError> {
        if min > max {
            return Err(EvolveError::InvalidBounds {
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }
}

impl GeneMutation<i64> for IntegerStep {
    fn perturb<R: Rng>(&self, gene: &i64, rng: &mut R) -> i64 {
        let step = if rng.random_bool(0.5) { 1 } else { -1 };
        match gene.checked_add(step) {
            Some(next) if (self.min..=self.max).contains(&next) => next,
            _ => *gene,
        }
    }
}
