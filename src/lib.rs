//! Generic evolutionary optimization engine.
//!
//! A population-based stochastic search loop with pluggable genome creation,
//! fitness evaluation, selection, crossover, and mutation:
//!
//! - **Selection**: fitness-proportional ("roulette") selection by tower
//!   sampling over a cumulative distribution, plus tournament and rank
//!   alternatives.
//! - **Mutation**: per-gene bit-flip, bounded multiplicative Gaussian, and
//!   bounded integer step operators.
//! - **Crossover**: single-point recombination with disjoint or random
//!   pairing.
//! - **Driver**: a fixed number of generations, with max/mean/std-dev
//!   fitness recorded every generation and the final population ranked.
//!
//! # Architecture
//!
//! The engine never inspects a genome. Representations (bit strings, real
//! vectors, composite structs) belong to the caller, who plugs them in by
//! implementing [`ga::GaProblem`]. Randomness always comes from an explicit
//! RNG, so a run is reproducible from its seed.
//!
//! Contract violations (invalid configuration, negative or zero-sum fitness,
//! operators that change the population size) are reported as
//! [`EvolveError`]; see [`ErrorKind`] for the families.

pub mod error;
pub mod ga;

pub use error::{ErrorKind, EvolveError};
