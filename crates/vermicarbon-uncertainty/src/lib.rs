//! Uncertainty and sensitivity analysis for avoided-emission scenarios.
//!
//! Wraps the scenario pipeline as a scalar function of uncertain inputs and
//! re-runs it many times:
//!
//! - [`monte_carlo`]: independent draws from per-parameter distributions,
//!   reported as a mean and a 95 % percentile interval
//! - [`sobol`]: quasi-random Saltelli design and first-order, total-order and
//!   second-order Sobol indices
//!
//! Evaluations are distributed over a rayon pool. All random draws come from
//! a `ChaCha8Rng` seeded explicitly by the caller and are made on one thread
//! before evaluation starts, so identical inputs reproduce identical outputs.

pub mod distribution;
pub mod model_runner;
pub mod monte_carlo;
pub mod parameter_set;
pub mod sobol;

pub use distribution::ParameterDistribution;
pub use model_runner::{AvoidedEmissionsModel, FnModel, ScalarModel};
pub use monte_carlo::{run_monte_carlo, MonteCarloConfig, MonteCarloResult};
pub use parameter_set::{ParameterBounds, ParameterSet};
pub use sobol::{run_sobol, SensitivityResult, SobolConfig, SobolIndices};

use thiserror::Error;
use vermicarbon_core::VermiError;

/// Seed used by both sampling phases unless the caller chooses another.
pub const DEFAULT_SEED: u64 = 50;

/// Errors raised while sampling or analysing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Sampling error: {0}")]
    SamplingError(String),
    #[error("Model evaluation failed: {0}")]
    Model(#[from] VermiError),
}

/// Convenience type for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
