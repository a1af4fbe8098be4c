//! Core trait definition for the GA engine.
//!
//! [`GaProblem`] is the contract between the generic evolutionary loop and a
//! caller's genome representation. The engine never looks inside a genome;
//! it only hands genomes back to the methods defined here.

use super::selection::Selection;
use super::stats::GenerationStats;
use crate::error::EvolveError;
use rand::Rng;

/// Defines an evolutionary optimization problem.
///
/// One method per operator:
///
/// 1. **Creation**: how to build a random genome
/// 2. **Evaluation**: how to score a genome (higher is fitter)
/// 3. **Selection**: how to draw the next generation from the scored one
/// 4. **Crossover**: how to recombine the selected population
/// 5. **Mutation**: how to perturb one genome
///
/// Only creation and evaluation are required. Selection defaults to
/// fitness-proportional roulette, crossover to a pass-through and mutation to
/// the identity.
///
/// # Fitness contract
///
/// [`evaluate`](GaProblem::evaluate) must return a finite, non-negative
/// value. Fitness is used directly as an unnormalized probability mass, so a
/// negative or NaN score is reported as an
/// [`ErrorKind::FitnessContract`](crate::error::ErrorKind::FitnessContract)
/// error.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_evolve::ga::{GaProblem, GeneMutation, BitFlip, Crossover};
/// use u_evolve::EvolveError;
///
/// struct OneMax;
///
/// impl GaProblem for OneMax {
///     type Genome = Vec<bool>;
///
///     fn create_genome<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
///         (0..20).map(|_| rng.random_bool(0.5)).collect()
///     }
///
///     fn evaluate(&self, genome: &Vec<bool>) -> f64 {
///         genome.iter().filter(|&&b| b).count() as f64
///     }
///
///     fn mutate<R: Rng>(&self, genome: &Vec<bool>, probability: f64, rng: &mut R) -> Vec<bool> {
///         BitFlip.mutate(genome, probability, rng)
///     }
///
///     fn crossover<R: Rng>(
///         &self,
///         population: Vec<Vec<bool>>,
///         probability: f64,
///         rng: &mut R,
///     ) -> Result<Vec<Vec<bool>>, EvolveError> {
///         Crossover::DisjointPairs.apply(population, probability, rng)
///     }
/// }
/// ```
pub trait GaProblem {
    /// The genome (candidate solution) type.
    ///
    /// Genomes are copied into the next generation, never shared with it.
    type Genome: Clone;

    /// Creates one randomly initialized genome.
    ///
    /// Called `population_size` times when the run starts.
    fn create_genome<R: Rng>(&self, rng: &mut R) -> Self::Genome;

    /// Scores a genome. Higher is fitter.
    fn evaluate(&self, genome: &Self::Genome) -> f64;

    /// Draws a new population of the same size, with replacement.
    ///
    /// `fitness` is aligned by index with `population`. The default is
    /// fitness-proportional roulette selection.
    fn select<R: Rng>(
        &self,
        population: &[Self::Genome],
        fitness: &[f64],
        rng: &mut R,
    ) -> Result<Vec<Self::Genome>, EvolveError> {
        Selection::Roulette.apply(population, fitness, rng)
    }

    /// Recombines some fraction of an already selected population.
    ///
    /// Must return the same number of genomes it was given. The default
    /// returns the population unchanged.
    fn crossover<R: Rng>(
        &self,
        population: Vec<Self::Genome>,
        _probability: f64,
        _rng: &mut R,
    ) -> Result<Vec<Self::Genome>, EvolveError> {
        Ok(population)
    }

    /// Returns a perturbed copy of `genome`, leaving the original untouched.
    ///
    /// `probability` is the per-element mutation probability. The default
    /// returns an unchanged copy.
    fn mutate<R: Rng>(&self, genome: &Self::Genome, _probability: f64, _rng: &mut R) -> Self::Genome {
        genome.clone()
    }

    /// Called once per statistics record, including the final one.
    ///
    /// Useful for progress reporting or external plotting. The default is a
    /// no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}
