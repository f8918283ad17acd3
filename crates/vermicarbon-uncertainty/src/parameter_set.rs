//! Named sets of uncertain inputs.
//!
//! [`ParameterSet`] drives Monte Carlo draws; [`ParameterBounds`] defines the
//! box a Sobol design covers. Both keep insertion order, which is the column
//! order of every sample matrix they produce.

use crate::distribution::ParameterDistribution;
use crate::{Error, Result};
use indexmap::IndexMap;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordered mapping from parameter name to its distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    params: IndexMap<String, ParameterDistribution>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literature distributions for (humidity, temperature, DOC).
    ///
    /// - humidity: uniform on [0.75, 0.90]
    /// - temperature: normal, mean 25 °C, sd 3 °C
    /// - DOC: triangular on [0.12, 0.18] with mode 0.15
    pub fn avoided_emissions_defaults() -> Self {
        let mut set = Self::new();
        set.add(
            "humidity",
            ParameterDistribution::Uniform {
                low: 0.75,
                high: 0.90,
            },
        )
        .add(
            "temperature",
            ParameterDistribution::Normal {
                mean: 25.0,
                std_dev: 3.0,
            },
        )
        .add(
            "doc",
            ParameterDistribution::Triangular {
                min: 0.12,
                mode: 0.15,
                max: 0.18,
            },
        );
        set
    }

    /// Add or replace a parameter.
    pub fn add(&mut self, name: &str, distribution: ParameterDistribution) -> &mut Self {
        self.params.insert(name.to_string(), distribution);
        self
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.params.keys().map(|k| k.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDistribution> {
        self.params.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterDistribution)> {
        self.params.iter()
    }

    /// Draw `n` independent rows, shape `(n, n_params)`.
    ///
    /// Columns are drawn one after another from the same generator, so the
    /// result depends only on the generator state and the parameter order.
    pub fn sample_with_rng<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Array2<f64>> {
        let mut samples = Array2::zeros((n, self.len()));
        for (j, dist) in self.params.values().enumerate() {
            let column = dist.sample_n(n, rng)?;
            for (i, value) in column.into_iter().enumerate() {
                samples[[i, j]] = value;
            }
        }
        Ok(samples)
    }
}

/// Ordered mapping from parameter name to a closed `[low, high]` interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBounds {
    bounds: IndexMap<String, (f64, f64)>,
}

impl ParameterBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literature ranges for (humidity, temperature, DOC) used in sensitivity runs.
    pub fn avoided_emissions_defaults() -> Self {
        let mut bounds = Self::new();
        bounds
            .add("humidity", 0.5, 0.85)
            .add("temperature", 25.0, 45.0)
            .add("doc", 0.15, 0.25);
        bounds
    }

    pub fn add(&mut self, name: &str, low: f64, high: f64) -> &mut Self {
        self.bounds.insert(name.to_string(), (low, high));
        self
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.bounds.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &(f64, f64))> {
        self.bounds.iter()
    }

    /// Reject empty or inverted intervals.
    pub fn validate(&self) -> Result<()> {
        if self.bounds.is_empty() {
            return Err(Error::InvalidParameter(
                "At least one parameter bound is required".to_string(),
            ));
        }
        for (name, &(low, high)) in &self.bounds {
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(Error::InvalidParameter(format!(
                    "Bounds for '{}' must satisfy low < high, got [{}, {}]",
                    name, low, high
                )));
            }
        }
        Ok(())
    }

    /// Map unit-cube coordinates onto the bounds, column by column.
    pub fn scale(&self, unit: &Array2<f64>) -> Array2<f64> {
        let mut scaled = unit.clone();
        for (j, &(low, high)) in self.bounds.values().enumerate() {
            scaled
                .column_mut(j)
                .mapv_inplace(|u| low + u * (high - low));
        }
        scaled
    }
}
