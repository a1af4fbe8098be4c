//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → statistics → selection → crossover →
//! mutation → repeat, then a final evaluation and ranking.

use super::config::GaConfig;
use super::selection::validate_fitness;
use super::stats::{rank_ascending, GenerationStats};
use super::types::GaProblem;
use crate::error::EvolveError;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a GA run.
///
/// Contains the final population together with its fitness, the statistics
/// of every generation, and the ranking of the final population.
#[derive(Debug, Clone)]
pub struct GaResult<G> {
    /// Population after the last generation.
    pub population: Vec<G>,

    /// Fitness of `population`, aligned by index.
    pub fitness: Vec<f64>,

    /// One record per generation plus a final record for `population`:
    /// `generations + 1` entries.
    pub statistics: Vec<GenerationStats>,

    /// Indices of `population` in ascending fitness order.
    ///
    /// `population[rank[rank.len() - 1]]` is the fittest genome.
    pub rank: Vec<usize>,
}

impl<G> GaResult<G> {
    /// The fittest genome of the final population.
    ///
    /// # Panics
    ///
    /// Panics if `population` is empty, which a [`GaRunner`] result never is.
    pub fn best(&self) -> &G {
        &self.population[self.best_index()]
    }

    /// Fitness of [`best`](Self::best).
    ///
    /// # Panics
    ///
    /// Panics if `population` is empty, which a [`GaRunner`] result never is.
    pub fn best_fitness(&self) -> f64 {
        self.fitness[self.best_index()]
    }

    /// Number of generations executed.
    pub fn generations(&self) -> usize {
        self.statistics.len().saturating_sub(1)
    }

    fn best_index(&self) -> usize {
        *self.rank.last().expect("population must not be empty")
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {}", result.best_fitness());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with an RNG seeded from [`GaConfig::seed`].
    ///
    /// The seed is always logged; when none is configured one is drawn from
    /// the operating system, so the run can still be replayed.
    ///
    /// # Errors
    ///
    /// See [`run_with_rng`](Self::run_with_rng).
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Genome>, EvolveError> {
        let seed = match config.seed {
            Some(seed) => {
                info!("using configured seed={seed}");
                seed
            }
            None => {
                let seed = rand::random();
                warn!("no seed configured, using seed={seed}");
                seed
            }
        };
        let mut rng = StdRng::seed_from_u64(seed);
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// [`GaConfig::seed`] is ignored.
    ///
    /// # Errors
    ///
    /// - a configuration error if `config` is invalid
    /// - a fitness-contract error, wrapped in [`EvolveError::AtGeneration`],
    ///   if a fitness vector is negative, non-finite, or sums to zero when
    ///   selection needs it
    /// - a shape error, wrapped in [`EvolveError::AtGeneration`], if an
    ///   operator changes the population size or rejects a genome
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Genome>, EvolveError> {
        config.validate()?;
        info!(
            "evolving population_size={} generations={} mutation_probability={} crossover_probability={}",
            config.population_size,
            config.generations,
            config.mutation_probability,
            config.crossover_probability
        );

        // 1. Initialize population
        let mut population: Vec<P::Genome> = (0..config.population_size)
            .map(|_| problem.create_genome(rng))
            .collect();

        let mut statistics = Vec::with_capacity(config.generations + 1);

        // 2. Evolutionary loop
        for generation in 0..config.generations {
            let fitness = evaluate_population(problem, &population)
                .map_err(|e| e.at_generation(generation))?;
            record(problem, &mut statistics, generation, &fitness);

            population = next_generation(problem, config, &population, &fitness, rng)
                .map_err(|e| e.at_generation(generation))?;
        }

        // 3. Final evaluation and ranking
        let fitness = evaluate_population(problem, &population)
            .map_err(|e| e.at_generation(config.generations))?;
        record(problem, &mut statistics, config.generations, &fitness);
        let rank = rank_ascending(&fitness);

        let result = GaResult {
            population,
            fitness,
            statistics,
            rank,
        };
        info!(
            "finished {} generations, best fitness {}",
            result.generations(),
            result.best_fitness()
        );
        Ok(result)
    }
}

/// Evaluate every genome and check the fitness contract.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &[P::Genome],
) -> Result<Vec<f64>, EvolveError> {
    let fitness: Vec<f64> = population.iter().map(|g| problem.evaluate(g)).collect();
    validate_fitness(&fitness)?;
    Ok(fitness)
}

/// Append a statistics record and notify the problem.
fn record<P: GaProblem>(
    problem: &P,
    statistics: &mut Vec<GenerationStats>,
    generation: usize,
    fitness: &[f64],
) {
    let stats = GenerationStats::from_fitness(generation, fitness);
    debug!(
        "generation {}: max={:.6} mean={:.6} std={:.6}",
        stats.generation, stats.max, stats.mean, stats.std_dev
    );
    problem.on_generation(&stats);
    statistics.push(stats);
}

/// Select, then crossover, then mutate. Always in that order.
fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &[P::Genome],
    fitness: &[f64],
    rng: &mut R,
) -> Result<Vec<P::Genome>, EvolveError> {
    let expected = population.len();

    let selected = problem.select(population, fitness, rng)?;
    check_size("select", expected, selected.len())?;

    let crossed = problem.crossover(selected, config.crossover_probability, rng)?;
    check_size("crossover", expected, crossed.len())?;

    Ok(crossed
        .iter()
        .map(|genome| problem.mutate(genome, config.mutation_probability, rng))
        .collect())
}

fn check_size(stage: &'static str, expected: usize, actual: usize) -> Result<(), EvolveError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvolveError::PopulationSizeMismatch {
            stage,
            expected,
            actual,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ga::{BitFlip, Crossover, GeneMutation, Selection};
    use std::cell::Cell;
    use std::sync::Mutex;

    // ---- OneMax problem: maximize the number of true bits ----

    struct OneMaxProblem {
        n: usize,
    }

    impl GaProblem for OneMaxProblem {
        type Genome = Vec<bool>;

        fn create_genome<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            (0..self.n).map(|_| rng.random_bool(0.5)).collect()
        }

        fn evaluate(&self, genome: &Vec<bool>) -> f64 {
            genome.iter().filter(|&&b| b).count() as f64
        }

        fn mutate<R: Rng>(&self, genome: &Vec<bool>, probability: f64, rng: &mut R) -> Vec<bool> {
            BitFlip.mutate(genome, probability, rng)
        }

        fn crossover<R: Rng>(
            &self,
            population: Vec<Vec<bool>>,
            probability: f64,
            rng: &mut R,
        ) -> Result<Vec<Vec<bool>>, EvolveError> {
            Crossover::DisjointPairs.apply(population, probability, rng)
        }
    }

    fn config(m: usize, n: usize) -> GaConfig {
        GaConfig::default()
            .with_population_size(m)
            .with_generations(n)
            .with_mutation_probability(0.01)
            .with_crossover_probability(0.7)
            .with_seed(42)
    }

    #[test]
    fn test_onemax_improves() {
        let problem = OneMaxProblem { n: 20 };
        let result = GaRunner::run(&problem, &config(50, 200)).unwrap();

        let first = result.statistics[0].mean;
        let last = result.statistics[200].mean;
        assert!(last > first, "mean fitness should rise: {first} -> {last}");
        assert!(
            result.best_fitness() >= 17.0,
            "expected near-optimal OneMax, got {}",
            result.best_fitness()
        );
    }

    #[test]
    fn test_statistics_length() {
        let problem = OneMaxProblem { n: 10 };
        let result = GaRunner::run(&problem, &config(20, 30)).unwrap();

        assert_eq!(result.statistics.len(), 31);
        assert_eq!(result.generations(), 30);
        for (g, stats) in result.statistics.iter().enumerate() {
            assert_eq!(stats.generation, g);
        }
    }

    #[test]
    fn test_rank_is_permutation() {
        let problem = OneMaxProblem { n: 10 };
        let result = GaRunner::run(&problem, &config(25, 10)).unwrap();

        let mut sorted = result.rank.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..25).collect::<Vec<_>>());

        for pair in result.rank.windows(2) {
            assert!(result.fitness[pair[0]] <= result.fitness[pair[1]]);
        }
        let best = problem.evaluate(result.best());
        assert_eq!(best, result.best_fitness());
        assert_eq!(best, result.statistics[10].max);
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = OneMaxProblem { n: 16 };
        let a = GaRunner::run(&problem, &config(30, 40)).unwrap();
        let b = GaRunner::run(&problem, &config(30, 40)).unwrap();
        assert_eq!(a.population, b.population);
        assert_eq!(a.statistics, b.statistics);
    }

    #[test]
    fn test_injected_rng() {
        let problem = OneMaxProblem { n: 16 };
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);
        let cfg = config(30, 20);
        let a = GaRunner::run_with_rng(&problem, &cfg, &mut rng_a).unwrap();
        let b = GaRunner::run_with_rng(&problem, &cfg, &mut rng_b).unwrap();
        assert_eq!(a.population, b.population);
    }

    #[test]
    fn test_single_individual_population() {
        let problem = OneMaxProblem { n: 32 };
        let result = GaRunner::run(&problem, &config(1, 5)).unwrap();
        assert_eq!(result.population.len(), 1);
        assert_eq!(result.rank, vec![0]);
        assert_eq!(result.statistics.len(), 6);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = OneMaxProblem { n: 8 };
        let err = GaRunner::run(&problem, &config(0, 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = GaRunner::run(&problem, &config(10, 5).with_mutation_probability(2.0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    // ---- Contract violations ----

    struct ZeroFitness;

    impl GaProblem for ZeroFitness {
        type Genome = Vec<bool>;

        fn create_genome<R: Rng>(&self, _rng: &mut R) -> Vec<bool> {
            vec![false; 4]
        }

        fn evaluate(&self, _genome: &Vec<bool>) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_zero_total_fitness_fails() {
        let err = GaRunner::run(&ZeroFitness, &config(10, 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FitnessContract);
        assert_eq!(
            err,
            EvolveError::AtGeneration {
                generation: 0,
                source: Box::new(EvolveError::NonPositiveTotalFitness(0.0)),
            }
        );
    }

    struct NegativeAfter {
        threshold: Cell<usize>,
    }

    impl GaProblem for NegativeAfter {
        type Genome = u8;

        fn create_genome<R: Rng>(&self, _rng: &mut R) -> u8 {
            0
        }

        fn evaluate(&self, _genome: &u8) -> f64 {
            let left = self.threshold.get();
            if left == 0 {
                -1.0
            } else {
                self.threshold.set(left - 1);
                1.0
            }
        }
    }

    #[test]
    fn test_negative_fitness_reports_generation() {
        // 4 individuals, 8 good evaluations: generation 2 goes negative.
        let problem = NegativeAfter {
            threshold: Cell::new(8),
        };
        let err = GaRunner::run(&problem, &config(4, 10)).unwrap_err();
        match err {
            EvolveError::AtGeneration { generation, source } => {
                assert_eq!(generation, 2);
                assert_eq!(
                    *source,
                    EvolveError::NegativeFitness {
                        index: 0,
                        value: -1.0
                    }
                );
            }
            other => panic!("expected AtGeneration, got {other:?}"),
        }
    }

    struct ShrinkingCrossover;

    impl GaProblem for ShrinkingCrossover {
        type Genome = u8;

        fn create_genome<R: Rng>(&self, _rng: &mut R) -> u8 {
            1
        }

        fn evaluate(&self, _genome: &u8) -> f64 {
            1.0
        }

        fn crossover<R: Rng>(
            &self,
            mut population: Vec<u8>,
            _probability: f64,
            _rng: &mut R,
        ) -> Result<Vec<u8>, EvolveError> {
            population.pop();
            Ok(population)
        }
    }

    #[test]
    fn test_crossover_size_change_fails() {
        let err = GaRunner::run(&ShrinkingCrossover, &config(5, 3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(
            err.root(),
            &EvolveError::PopulationSizeMismatch {
                stage: "crossover",
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_short_genome_crossover_fails() {
        let problem = OneMaxProblem { n: 2 };
        let err = GaRunner::run(&problem, &config(10, 5)).unwrap_err();
        assert_eq!(
            err.root(),
            &EvolveError::GenomeTooShort {
                length: 2,
                minimum: 3
            }
        );
    }

    // ---- Default operators and hooks ----

    struct Counting {
        calls: Cell<usize>,
    }

    impl GaProblem for Counting {
        type Genome = f64;

        fn create_genome<R: Rng>(&self, rng: &mut R) -> f64 {
            rng.random_range(0.0..10.0)
        }

        fn evaluate(&self, genome: &f64) -> f64 {
            *genome
        }

        fn on_generation(&self, _stats: &GenerationStats) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn test_default_operators_and_hook() {
        let problem = Counting {
            calls: Cell::new(0),
        };
        let result = GaRunner::run(&problem, &config(20, 15)).unwrap();

        assert_eq!(problem.calls.get(), 16);
        // Selection only copies existing genomes; with no variation the
        // max can never exceed the initial max.
        assert!(result.statistics[15].max <= result.statistics[0].max);
        assert!(result.statistics[15].mean >= result.statistics[0].mean * 0.5);
    }

    struct TournamentOneMax(OneMaxProblem);

    impl GaProblem for TournamentOneMax {
        type Genome = Vec<bool>;

        fn create_genome<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            self.0.create_genome(rng)
        }

        fn evaluate(&self, genome: &Vec<bool>) -> f64 {
            self.0.evaluate(genome)
        }

        fn select<R: Rng>(
            &self,
            population: &[Vec<bool>],
            fitness: &[f64],
            rng: &mut R,
        ) -> Result<Vec<Vec<bool>>, EvolveError> {
            Selection::Tournament(3).apply(population, fitness, rng)
        }

        fn mutate<R: Rng>(&self, genome: &Vec<bool>, probability: f64, rng: &mut R) -> Vec<bool> {
            self.0.mutate(genome, probability, rng)
        }
    }

    #[test]
    fn test_custom_selection() {
        let problem = TournamentOneMax(OneMaxProblem { n: 20 });
        let result = GaRunner::run(&problem, &config(40, 100)).unwrap();
        assert!(result.best_fitness() >= 17.0);
    }

    // ---- log capture ----

    static LOGGED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if let Ok(mut logged) = LOGGED.lock() {
                logged.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_configured_seed_is_logged() {
        // Another test may have installed the logger already.
        let _ = log::set_logger(&CaptureLogger);
        log::set_max_level(log::LevelFilter::Info);

        let problem = OneMaxProblem { n: 8 };
        GaRunner::run(&problem, &config(4, 2).with_seed(90_210)).unwrap();

        let logged = LOGGED.lock().unwrap();
        assert!(
            logged.iter().any(|m| m.contains("seed=90210")),
            "seed missing from {logged:?}"
        );
    }

    #[test]
    fn test_configured_seed_matches_injected_rng() {
        let problem = OneMaxProblem { n: 16 };
        let cfg = config(10, 5).with_seed(7);
        let seeded = GaRunner::run(&problem, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let injected = GaRunner::run_with_rng(&problem, &cfg, &mut rng).unwrap();
        assert_eq!(seeded.population, injected.population);
    }

    #[test]
    #[should_panic]
    fn test_best_of_empty_result_panics() {
        let empty: GaResult<Vec<bool>> = GaResult {
            population: Vec::new(),
            fitness: Vec::new(),
            statistics: Vec::new(),
            rank: Vec::new(),
        };
        empty.best();
    }
}
