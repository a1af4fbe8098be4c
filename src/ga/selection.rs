//! Selection strategies for the GA.
//!
//! Selection draws the next generation, with replacement, from the current
//! population and its aligned fitness vector. Fitness is **maximized**:
//! higher values mean a higher chance of being drawn.
//!
//! The default strategy is fitness-proportional ("roulette") selection,
//! implemented by tower sampling over a cumulative distribution (see
//! [`Tower`]).
//!
//! # References
//!
//! - Mitchell (1998), *An Introduction to Genetic Algorithms*
//! - Krauth (2006), *Statistical Mechanics: Algorithms and Computations*
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::error::EvolveError;
use rand::Rng;

/// Selection strategy for drawing the next generation.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_evolve::ga::Selection;
///
/// let population = vec!["a", "b", "c"];
/// let fitness = vec![0.0, 1.0, 3.0];
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let next = Selection::Roulette.apply(&population, &fitness, &mut rng).unwrap();
/// assert_eq!(next.len(), 3);
/// assert!(!next.contains(&"a"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// The probability of drawing individual `i` is `fitness[i] / sum(fitness)`.
    /// Individuals with zero fitness are never drawn.
    ///
    /// # Complexity
    /// O(n log n) per generation (sort), O(log n) per draw
    #[default]
    Roulette,

    /// Tournament selection: pick `k` individuals at random, keep the fittest.
    ///
    /// Higher `k` = stronger selection pressure. `k = 0` is treated as 1.
    ///
    /// # Complexity
    /// O(k) per draw
    Tournament(usize),

    /// Linear rank selection.
    ///
    /// The individual with rank `r` (0 = least fit) is drawn with weight
    /// `r + 1`, regardless of the raw fitness spread.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per generation (sort), O(log n) per draw
    Rank,
}

impl Selection {
    /// Draws `population.len()` individuals with replacement.
    ///
    /// # Errors
    ///
    /// - [`EvolveError::EmptyPopulation`] if `population` is empty
    /// - [`EvolveError::FitnessLengthMismatch`] if the vectors are not aligned
    /// - a fitness-contract error if any fitness is negative or not finite,
    ///   or (for [`Selection::Roulette`]) if the total fitness is not positive
    pub fn apply<G: Clone, R: Rng>(
        &self,
        population: &[G],
        fitness: &[f64],
        rng: &mut R,
    ) -> Result<Vec<G>, EvolveError> {
        if population.is_empty() {
            return Err(EvolveError::EmptyPopulation);
        }
        if population.len() != fitness.len() {
            return Err(EvolveError::FitnessLengthMismatch {
                population: population.len(),
                fitness: fitness.len(),
            });
        }
        validate_fitness(fitness)?;

        let n = population.len();
        let selected = match self {
            Selection::Roulette => {
                let tower = Tower::new(fitness)?;
                (0..n)
                    .map(|_| population[tower.sample(rng)].clone())
                    .collect()
            }
            Selection::Tournament(k) => (0..n)
                .map(|_| population[tournament(fitness, *k, rng)].clone())
                .collect(),
            Selection::Rank => {
                let tower = rank_tower(fitness);
                (0..n)
                    .map(|_| population[tower.sample(rng)].clone())
                    .collect()
            }
        };
        Ok(selected)
    }
}

/// Checks the per-individual fitness contract: finite and non-negative.
pub fn validate_fitness(fitness: &[f64]) -> Result<(), EvolveError> {
    for (index, &value) in fitness.iter().enumerate() {
        if !value.is_finite() {
            return Err(EvolveError::NonFiniteFitness { index, value });
        }
        if value < 0.0 {
            return Err(EvolveError::NegativeFitness { index, value });
        }
    }
    Ok(())
}

/// Cumulative distribution over a fitness vector, for tower sampling.
///
/// Weights are sorted ascending before summation so small values are
/// accumulated first. The sort order is internal: [`sample`](Tower::sample)
/// always returns an index into the original, unsorted fitness vector, and
/// the probability of drawing index `i` is `weight[i] / total` regardless of
/// how the input was ordered.
///
/// Sorted weight `j` owns the half-open interval `[b[j-1], b[j])` of
/// `[0, total)`, so a zero weight owns an empty interval and is never drawn.
#[derive(Debug, Clone)]
pub struct Tower {
    /// Original indices in ascending weight order.
    order: Vec<usize>,
    /// `breaks[j]` = sum of the `j + 1` smallest weights, for `j < n - 1`.
    breaks: Vec<f64>,
    total: f64,
}

impl Tower {
    /// Builds the cumulative distribution for `weights`.
    ///
    /// # Errors
    ///
    /// - [`EvolveError::EmptyPopulation`] if `weights` is empty
    /// - [`EvolveError::NonFiniteFitness`] / [`EvolveError::NegativeFitness`]
    ///   for an invalid entry
    /// - [`EvolveError::NonPositiveTotalFitness`] if all weights are zero
    /// - [`EvolveError::TotalFitnessOverflow`] if the weights sum past `f64::MAX`
    pub fn new(weights: &[f64]) -> Result<Self, EvolveError> {
        if weights.is_empty() {
            return Err(EvolveError::EmptyPopulation);
        }
        validate_fitness(weights)?;

        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]));

        let mut breaks = Vec::with_capacity(weights.len() - 1);
        let mut running = 0.0;
        for (j, &i) in order.iter().enumerate() {
            running += weights[i];
            if j + 1 < order.len() {
                breaks.push(running);
            }
        }

        if !running.is_finite() {
            return Err(EvolveError::TotalFitnessOverflow);
        }
        if running <= 0.0 {
            return Err(EvolveError::NonPositiveTotalFitness(running));
        }

        Ok(Self {
            order,
            breaks,
            total: running,
        })
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: construction rejects empty weight vectors.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Draws one index into the original weight vector.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let u = rng.random_range(0.0..self.total);
        self.locate(u)
    }

    /// Maps a point of `[0, total)` to the original index owning it.
    fn locate(&self, u: f64) -> usize {
        let slot = self.breaks.partition_point(|&b| b <= u);
        self.order[slot]
    }
}

/// Tournament selection: pick k random individuals, return the fittest.
fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Builds a tower whose weights are linear ranks (least fit = 1).
///
/// Tied fitness values share the average of the ranks they span, so equal
/// individuals are equally likely whatever their position.
fn rank_tower(fitness: &[f64]) -> Tower {
    let n = fitness.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

    // weights[j] belongs to order[j]; ascending because ranks are.
    let mut weights = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && fitness[order[end]].total_cmp(&fitness[order[start]]).is_eq() {
            end += 1;
        }
        // Ranks start + 1 ..= end
        let average = (start + 1 + end) as f64 / 2.0;
        weights[start..end].fill(average);
        start = end;
    }

    let mut breaks = Vec::with_capacity(n.saturating_sub(1));
    let mut running = 0.0;
    for (j, &w) in weights.iter().enumerate() {
        running += w;
        if j + 1 < n {
            breaks.push(running);
        }
    }

    Tower {
        order,
        breaks,
        total: running,
    }
}
