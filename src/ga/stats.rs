//! Per-generation fitness statistics and ranking.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of one generation's fitness vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats {
    /// Generation index. The initial population is generation 0; the record
    /// taken after the last loop iteration has index `generations`.
    pub generation: usize,

    /// Highest fitness in the population.
    pub max: f64,

    /// Mean fitness.
    pub mean: f64,

    /// Population standard deviation (divides by `M`, not `M - 1`).
    pub std_dev: f64,
}

impl GenerationStats {
    /// Computes statistics for a fitness vector.
    ///
    /// An empty vector yields all-zero statistics.
    pub fn from_fitness(generation: usize, fitness: &[f64]) -> Self {
        if fitness.is_empty() {
            return Self {
                generation,
                max: 0.0,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let n = fitness.len() as f64;
        let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = fitness.iter().sum::<f64>() / n;
        let variance = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

        Self {
            generation,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Indices of `fitness` in ascending fitness order.
///
/// Ties keep their original relative order, so the result is deterministic.
/// The fittest individual is at `rank[rank.len() - 1]`.
pub fn rank_ascending(fitness: &[f64]) -> Vec<usize> {
    let mut rank: Vec<usize> = (0..fitness.len()).collect();
    rank.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));
    rank
}

/// First generation whose maximum fitness reaches `target`.
///
/// The engine itself never stops early; this lets callers detect
/// convergence after a run.
pub fn first_generation_reaching(statistics: &[GenerationStats], target: f64) -> Option<usize> {
    statistics
        .iter()
        .find(|s| s.max >= target)
        .map(|s| s.generation)
}
