//! Single-point crossover over a selected population.
//!
//! Crossover takes the population produced by selection and recombines some
//! fraction of it in place of the parents. The output always has the same
//! size as the input.
//!
//! # Strategies
//!
//! - [`Crossover::DisjointPairs`]: draw `floor(p * M)` distinct parents and
//!   pair them consecutively
//! - [`Crossover::RandomPair`]: `floor(M / 2)` independent trials, each
//!   recombining a random pair with probability `p`
//!
//! # Short genomes
//!
//! A single-point exchange needs a cut point strictly inside the genome, so
//! genomes shorter than [`MIN_SPLICE_LENGTH`] cannot be recombined. Choosing
//! such a genome as a parent is an
//! [`EvolveError::GenomeTooShort`] error rather than a silent pass-through.
//! When no pair is chosen (probability 0, or fewer than two parents) no
//! genome is inspected.

use crate::error::{check_probability, EvolveError};
use rand::seq::index;
use rand::Rng;

/// Smallest genome length that has an interior cut point.
pub const MIN_SPLICE_LENGTH: usize = 3;

/// A genome that supports single-point tail exchange.
pub trait Splice {
    /// Number of positions a cut point can be placed between.
    fn gene_count(&self) -> usize;

    /// Exchanges every gene at position `cut` and beyond with `other`.
    ///
    /// Both genomes have `gene_count()` equal and `cut < gene_count()`.
    fn swap_tails(&mut self, other: &mut Self, cut: usize);
}

impl<T> Splice for Vec<T> {
    fn gene_count(&self) -> usize {
        self.len()
    }

    fn swap_tails(&mut self, other: &mut Self, cut: usize) {
        self[cut..].swap_with_slice(&mut other[cut..]);
    }
}

/// Crossover strategy.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_evolve::ga::Crossover;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let population = vec![vec![0u8; 8], vec![1u8; 8], vec![0u8; 8], vec![1u8; 8]];
///
/// let next = Crossover::DisjointPairs.apply(population, 1.0, &mut rng).unwrap();
/// assert_eq!(next.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    /// Sample `floor(p * M)` distinct individuals without replacement and
    /// recombine them as consecutive pairs (1st with 2nd, 3rd with 4th, ...).
    ///
    /// With an odd count the last drawn individual is left unchanged.
    #[default]
    DisjointPairs,

    /// For each of `floor(M / 2)` trials, with probability `p` pick an
    /// individual `i` uniformly and a partner `j != i` uniformly, then
    /// recombine them. Individuals may take part in several trials.
    RandomPair,
}

impl Crossover {
    /// Recombines part of `population` and returns the result.
    ///
    /// # Errors
    ///
    /// - [`EvolveError::ProbabilityOutOfRange`] if `probability` is outside `[0, 1]`
    /// - [`EvolveError::GenomeTooShort`] if a chosen parent has no interior cut point
    /// - [`EvolveError::ParentLengthMismatch`] if a chosen pair differs in length
    pub fn apply<G: Splice, R: Rng>(
        &self,
        mut population: Vec<G>,
        probability: f64,
        rng: &mut R,
    ) -> Result<Vec<G>, EvolveError> {
        check_probability("crossover_probability", probability)?;
        let n = population.len();

        match self {
            Crossover::DisjointPairs => {
                let count = ((probability * n as f64).floor() as usize).min(n);
                let parents = index::sample(rng, n, count).into_vec();
                for pair in parents.chunks_exact(2) {
                    let (a, b) = pair_mut(&mut population, pair[0], pair[1]);
                    single_point(a, b, rng)?;
                }
            }
            Crossover::RandomPair => {
                if n < 2 {
                    return Ok(population);
                }
                for _ in 0..n / 2 {
                    if rng.random::<f64>() < probability {
                        let i = rng.random_range(0..n);
                        let j = (i + rng.random_range(1..n)) % n;
                        let (a, b) = pair_mut(&mut population, i, j);
                        single_point(a, b, rng)?;
                    }
                }
            }
        }

        Ok(population)
    }
}

/// Exchanges the tails of two genomes at a uniform cut point in `[1, len - 1)`.
///
/// Returns the cut point.
///
/// # Errors
///
/// - [`EvolveError::ParentLengthMismatch`] if the genomes differ in length
/// - [`EvolveError::GenomeTooShort`] if the length is below [`MIN_SPLICE_LENGTH`]
pub fn single_point<G: Splice, R: Rng>(
    a: &mut G,
    b: &mut G,
    rng: &mut R,
) -> Result<usize, EvolveError> {
    let length = a.gene_count();
    if length != b.gene_count() {
        return Err(EvolveError::ParentLengthMismatch {
            left: length,
            right: b.gene_count(),
        });
    }
    if length < MIN_SPLICE_LENGTH {
        return Err(EvolveError::GenomeTooShort {
            length,
            minimum: MIN_SPLICE_LENGTH,
        });
    }

    let cut = rng.random_range(1..length - 1);
    a.swap_tails(b, cut);
    Ok(cut)
}

/// Borrow two distinct elements mutably.
fn pair_mut<G>(population: &mut [G], i: usize, j: usize) -> (&mut G, &mut G) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = population.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = population.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
