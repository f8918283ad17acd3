//! Variance-based global sensitivity analysis.
//!
//! [`run_sobol`] builds a Saltelli design over the parameter bounds, runs the
//! model over every row in parallel and estimates first-order (`S1`),
//! total-order (`ST`) and optionally second-order (`S2`) Sobol indices with
//! bootstrap confidence intervals.

mod analysis;
mod saltelli;
mod sequence;

pub use saltelli::{rows_per_sample, saltelli_design, MAX_PARAMETERS};
pub use sequence::SobolSequence;

use crate::model_runner::{check_within_domain, warn_outside_fitted_range, ScalarModel};
use crate::parameter_set::ParameterBounds;
use crate::{Error, Result};
use indexmap::IndexMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Sobol analysis settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SobolConfig {
    /// Base samples `N`; the model runs `N (2k + 2)` times
    /// default: 512
    pub n_samples: usize,

    /// Also estimate pairwise interaction indices
    /// default: true
    pub second_order: bool,

    /// Bootstrap resamples used for confidence intervals
    /// default: 100
    pub n_bootstrap: usize,
}

impl Default for SobolConfig {
    fn default() -> Self {
        Self {
            n_samples: 512,
            second_order: true,
            n_bootstrap: 100,
        }
    }
}

/// Indices for a single parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SobolIndices {
    /// First-order index
    pub s1: f64,
    /// 95 % confidence half-width of `s1`
    pub s1_conf: f64,
    /// Total-order index
    pub st: f64,
    /// 95 % confidence half-width of `st`
    pub st_conf: f64,
}

/// Outcome of a sensitivity run
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityResult {
    /// Indices per parameter, in bounds order
    pub indices: IndexMap<String, SobolIndices>,
    /// Pairwise indices; only the upper triangle is populated, the rest is NaN
    pub s2: Option<Array2<f64>>,
    pub s2_conf: Option<Array2<f64>>,
    /// Number of model evaluations performed
    pub n_evaluations: usize,
}

impl SensitivityResult {
    /// Parameters ordered by descending total-order index.
    pub fn ranked(&self) -> Vec<(&str, &SobolIndices)> {
        let mut ranked: Vec<(&str, &SobolIndices)> = self
            .indices
            .iter()
            .map(|(name, idx)| (name.as_str(), idx))
            .collect();
        ranked.sort_by(|a, b| b.1.st.total_cmp(&a.1.st));
        ranked
    }

    /// Second-order index for a pair of parameters, in either order.
    pub fn s2_for(&self, first: &str, second: &str) -> Option<f64> {
        let s2 = self.s2.as_ref()?;
        let i = self.indices.get_index_of(first)?;
        let j = self.indices.get_index_of(second)?;
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        (lo != hi).then(|| s2[[lo, hi]])
    }
}

/// Run a Sobol sensitivity analysis.
///
/// Bounds must name exactly the model's parameters, in the same order, and
/// stay inside any domain the model declares. The design is shifted and the
/// bootstrap resampled from streams derived from `seed`.
pub fn run_sobol<M: ScalarModel>(
    model: &M,
    bounds: &ParameterBounds,
    config: &SobolConfig,
    seed: u64,
) -> Result<SensitivityResult> {
    bounds.validate()?;
    let names: Vec<&str> = bounds.param_names();
    let expected: Vec<&str> = model.param_names().iter().map(|s| s.as_str()).collect();
    if names != expected {
        return Err(Error::InvalidParameter(format!(
            "Bounds {:?} do not match model parameters {:?}",
            names, expected
        )));
    }
    for (name, &range) in bounds.iter() {
        check_within_domain(model, name, Some(range))?;
        warn_outside_fitted_range(model, name, Some(range));
    }

    let k = bounds.len();
    let unit = saltelli_design(config.n_samples, k, config.second_order, seed)?;
    let design = bounds.scale(&unit);
    debug!(
        n_samples = config.n_samples,
        n_params = k,
        rows = design.nrows(),
        "Built Saltelli design"
    );

    let outputs = model.evaluate_batch(&design)?;
    let raw = analysis::analyse(
        &outputs,
        k,
        config.second_order,
        config.n_bootstrap,
        seed,
    )?;

    let indices: IndexMap<String, SobolIndices> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            (
                name.to_string(),
                SobolIndices {
                    s1: raw.s1[i],
                    s1_conf: raw.s1_conf[i],
                    st: raw.st[i],
                    st_conf: raw.st_conf[i],
                },
            )
        })
        .collect();

    for (name, idx) in &indices {
        info!(parameter = %name, s1 = idx.s1, st = idx.st, "Sobol indices");
    }

    Ok(SensitivityResult {
        indices,
        s2: raw.s2,
        s2_conf: raw.s2_conf,
        n_evaluations: outputs.len(),
    })
}
