//! Input distributions for Monte Carlo propagation.

use crate::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal, Triangular, Uniform};
use serde::{Deserialize, Serialize};

/// Distribution of one uncertain input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterDistribution {
    /// Uniform on `[low, high)`
    Uniform { low: f64, high: f64 },
    /// Normal with mean and standard deviation
    Normal { mean: f64, std_dev: f64 },
    /// Triangular on `[min, max]` with peak at `mode`
    Triangular { min: f64, mode: f64, max: f64 },
}

impl ParameterDistribution {
    /// Check the shape parameters are well formed.
    pub fn validate(&self) -> Result<()> {
        let ok = match *self {
            ParameterDistribution::Uniform { low, high } => {
                low.is_finite() && high.is_finite() && low < high
            }
            ParameterDistribution::Normal { mean, std_dev } => {
                mean.is_finite() && std_dev.is_finite() && std_dev > 0.0
            }
            ParameterDistribution::Triangular { min, mode, max } => {
                min.is_finite() && max.is_finite() && min < max && (min..=max).contains(&mode)
            }
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidParameter(format!(
                "Malformed distribution {:?}",
                self
            )))
        }
    }

    /// Closed support, `None` for unbounded distributions.
    pub fn support(&self) -> Option<(f64, f64)> {
        match *self {
            ParameterDistribution::Uniform { low, high } => Some((low, high)),
            ParameterDistribution::Normal { .. } => None,
            ParameterDistribution::Triangular { min, max, .. } => Some((min, max)),
        }
    }

    /// Analytical mean.
    pub fn mean(&self) -> f64 {
        match *self {
            ParameterDistribution::Uniform { low, high } => 0.5 * (low + high),
            ParameterDistribution::Normal { mean, .. } => mean,
            ParameterDistribution::Triangular { min, mode, max } => (min + mode + max) / 3.0,
        }
    }

    /// Draw `n` values.
    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>> {
        self.validate()?;
        let shape_error = |e: &dyn std::fmt::Display| {
            Error::InvalidParameter(format!("Cannot build {:?}: {}", self, e))
        };

        let values = match *self {
            ParameterDistribution::Uniform { low, high } => {
                let dist = Uniform::new(low, high);
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            ParameterDistribution::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev).map_err(|e| shape_error(&e))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            ParameterDistribution::Triangular { min, mode, max } => {
                let dist = Triangular::new(min, max, mode).map_err(|e| shape_error(&e))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
        };
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_validate() {
        assert!(ParameterDistribution::Uniform { low: 0.0, high: 1.0 }.validate().is_ok());
        assert!(ParameterDistribution::Uniform { low: 1.0, high: 1.0 }.validate().is_err());
        assert!(ParameterDistribution::Normal { mean: 0.0, std_dev: 0.0 }.validate().is_err());
        assert!(ParameterDistribution::Triangular { min: 0.0, mode: 2.0, max: 1.0 }
            .validate()
            .is_err());
    }

    #[test]
    fn test_samples_within_support() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for dist in [
            ParameterDistribution::Uniform { low: 0.75, high: 0.90 },
            ParameterDistribution::Triangular { min: 0.12, mode: 0.15, max: 0.18 },
        ] {
            let (lo, hi) = dist.support().unwrap();
            let values = dist.sample_n(2000, &mut rng).unwrap();
            assert!(values.iter().all(|v| (lo..=hi).contains(v)));
        }
    }

    #[test]
    fn test_sample_mean_close_to_analytical() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let dist = ParameterDistribution::Triangular { min: 0.12, mode: 0.15, max: 0.18 };
        let values = dist.sample_n(20_000, &mut rng).unwrap();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!((mean - dist.mean()).abs() < 1e-3);
    }

    #[test]
    fn test_serde_tagged() {
        let dist: ParameterDistribution =
            serde_json::from_str(r#"{"kind": "normal", "mean": 25.0, "std_dev": 3.0}"#).unwrap();
        assert_eq!(dist, ParameterDistribution::Normal { mean: 25.0, std_dev: 3.0 });
    }
}
