//! Normalised temporal release profiles.
//!
//! A profile answers "what fraction of one day's batch total is released
//! `n` days after intake". Offset 0 is the intake day itself.

use crate::errors::{VermiError, VermiResult};
use crate::timeseries::FloatValue;
use serde::Serialize;

/// Tolerance on `sum(weights) == 1`.
pub const NORMALISATION_TOLERANCE: FloatValue = 1e-9;

/// A non-empty sequence of non-negative weights summing to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionProfile {
    name: String,
    weights: Vec<FloatValue>,
}

impl EmissionProfile {
    /// Build a profile from weights that are already normalised.
    pub fn new(name: &str, weights: Vec<FloatValue>) -> VermiResult<Self> {
        validate_weights(name, &weights)?;
        let sum: FloatValue = weights.iter().sum();
        if (sum - 1.0).abs() >= NORMALISATION_TOLERANCE {
            return Err(VermiError::InvalidProfile {
                name: name.to_string(),
                reason: format!("weights sum to {} rather than 1", sum),
            });
        }
        Ok(Self {
            name: name.to_string(),
            weights,
        })
    }

    /// Build a profile by dividing raw weights by their sum.
    pub fn normalised(name: &str, raw: &[FloatValue]) -> VermiResult<Self> {
        validate_weights(name, raw)?;
        let sum: FloatValue = raw.iter().sum();
        if sum <= 0.0 {
            return Err(VermiError::InvalidProfile {
                name: name.to_string(),
                reason: "weights sum to zero".to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            weights: raw.iter().map(|w| w / sum).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weights(&self) -> &[FloatValue] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false: empty profiles cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Offset (in days after intake) carrying the largest weight.
    pub fn peak_offset(&self) -> usize {
        self.weights
            .iter()
            .enumerate()
            .fold((0, FloatValue::MIN), |(best_i, best_w), (i, &w)| {
                if w > best_w {
                    (i, w)
                } else {
                    (best_i, best_w)
                }
            })
            .0
    }
}

fn validate_weights(name: &str, weights: &[FloatValue]) -> VermiResult<()> {
    if weights.is_empty() {
        return Err(VermiError::InvalidProfile {
            name: name.to_string(),
            reason: "profile must have at least one weight".to_string(),
        });
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(VermiError::InvalidProfile {
            name: name.to_string(),
            reason: format!("weight {} is negative or not finite", bad),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_requires_unit_sum() {
        assert!(EmissionProfile::new("ok", vec![0.25, 0.75]).is_ok());
        assert!(EmissionProfile::new("short", vec![0.25, 0.5]).is_err());
    }

    #[test]
    fn test_normalised() {
        let profile = EmissionProfile::normalised("raw", &[1.0, 3.0]).unwrap();
        assert_relative_eq!(profile.weights()[0], 0.25);
        assert_relative_eq!(profile.weights()[1], 0.75);
        assert_eq!(profile.peak_offset(), 1);
    }

    #[test]
    fn test_rejects_degenerate_weights() {
        assert!(EmissionProfile::normalised("empty", &[]).is_err());
        assert!(EmissionProfile::normalised("zero", &[0.0, 0.0]).is_err());
        assert!(EmissionProfile::normalised("negative", &[1.0, -0.5]).is_err());
        assert!(EmissionProfile::normalised("nan", &[1.0, f64::NAN]).is_err());
    }
}
