//! Genetic Algorithm engine.
//!
//! A generic, representation-agnostic evolutionary loop. Users define their
//! problem by implementing [`GaProblem`], which specifies how to create and
//! evaluate genomes and, optionally, how to select, recombine, and mutate
//! them.
//!
//! # Generation cycle
//!
//! ```text
//! population → evaluate → record stats → select → crossover → mutate → next population
//! ```
//!
//! Each generation's population is a fresh, owned `Vec`; the previous one is
//! dropped once the next is built.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (population size, generations, probabilities, seed)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final population, per-generation statistics, and ranking
//!
//! # Operators
//!
//! - [`Selection`] / [`Tower`]: fitness-proportional tower sampling, tournament, rank
//! - [`GeneMutation`]: [`BitFlip`], [`GaussianPerturbation`], [`IntegerStep`]
//! - [`Crossover`] / [`Splice`]: single-point recombination strategies
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Mitchell (1998), *An Introduction to Genetic Algorithms*

mod config;
mod crossover;
mod mutation;
mod runner;
mod selection;
mod stats;
mod types;

pub use config::GaConfig;
pub use crossover::{single_point, Crossover, Splice, MIN_SPLICE_LENGTH};
pub use mutation::{BitFlip, GaussianPerturbation, GeneMutation, IntegerStep};
pub use runner::{GaResult, GaRunner};
pub use selection::{validate_fitness, Selection, Tower};
pub use stats::{first_generation_reaching, rank_ascending, GenerationStats};
pub use types::GaProblem;
