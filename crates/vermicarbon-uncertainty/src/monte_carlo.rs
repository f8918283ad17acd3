//! Monte Carlo uncertainty propagation.
//!
//! Draws `n_samples` independent parameter vectors from a [`ParameterSet`],
//! evaluates the model once per vector and summarises the outcomes with the
//! sample mean and the 2.5th/97.5th empirical percentiles.

use crate::model_runner::{check_within_domain, warn_outside_fitted_range, ScalarModel};
use crate::parameter_set::ParameterSet;
use crate::{Error, Result};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Monte Carlo run settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Number of independent draws
    /// default: 1000
    pub n_samples: usize,

    /// Two-sided interval coverage
    /// default: 0.95
    pub confidence: f64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            confidence: 0.95,
        }
    }
}

/// Outcome of a Monte Carlo run
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloResult {
    /// Parameter names, in column order of `inputs`
    pub param_names: Vec<String>,
    /// Drawn inputs, shape `(n_samples, n_params)`
    pub inputs: Array2<f64>,
    /// Model output per draw, in draw order
    pub outcomes: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    /// Lower percentile bound (2.5th for 95 % coverage)
    pub lower: f64,
    /// Upper percentile bound (97.5th for 95 % coverage)
    pub upper: f64,
}

impl MonteCarloResult {
    /// Fraction of draws with a strictly positive outcome.
    pub fn fraction_positive(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.outcomes.iter().filter(|&&v| v > 0.0).count() as f64 / self.outcomes.len() as f64
    }
}

/// Propagate input uncertainty through a model.
///
/// Every draw is made up front from a `ChaCha8Rng` seeded with `seed`;
/// evaluation then runs in parallel. Identical arguments give identical
/// results regardless of thread count.
pub fn run_monte_carlo<M: ScalarModel>(
    model: &M,
    params: &ParameterSet,
    config: &MonteCarloConfig,
    seed: u64,
) -> Result<MonteCarloResult> {
    if config.n_samples == 0 {
        return Err(Error::SamplingError(
            "Monte Carlo needs at least one sample".to_string(),
        ));
    }
    if !(config.confidence > 0.0 && config.confidence < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "Confidence must lie in (0, 1), got {}",
            config.confidence
        )));
    }
    let names: Vec<&str> = params.param_names();
    let expected: Vec<&str> = model.param_names().iter().map(|s| s.as_str()).collect();
    if names != expected {
        return Err(Error::InvalidParameter(format!(
            "Parameter set {:?} does not match model parameters {:?}",
            names, expected
        )));
    }
    for (name, dist) in params.iter() {
        dist.validate()?;
        check_within_domain(model, name, dist.support())?;
        warn_outside_fitted_range(model, name, dist.support());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let inputs = params.sample_with_rng(config.n_samples, &mut rng)?;
    debug!(n_samples = config.n_samples, seed, "Drew Monte Carlo inputs");

    let outcomes = model.evaluate_batch(&inputs)?;

    let n = outcomes.len() as f64;
    let mean = outcomes.iter().sum::<f64>() / n;
    let std_dev = if outcomes.len() > 1 {
        (outcomes.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    let mut sorted = outcomes.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let tail = (1.0 - config.confidence) / 2.0 * 100.0;
    let lower = percentile(&sorted, tail);
    let upper = percentile(&sorted, 100.0 - tail);

    info!(mean, lower, upper, "Monte Carlo run complete");

    Ok(MonteCarloResult {
        param_names: expected.iter().map(|s| s.to_string()).collect(),
        inputs,
        outcomes,
        mean,
        std_dev,
        lower,
        upper,
    })
}

/// Percentile of sorted data with linear interpolation between order statistics.
///
/// For `q` in [0, 100] the rank is `h = (n - 1) q / 100` and the result is
/// `x[floor(h)] + (h - floor(h)) (x[ceil(h)] - x[floor(h)])`.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * q.clamp(0.0, 100.0) / 100.0;
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}
