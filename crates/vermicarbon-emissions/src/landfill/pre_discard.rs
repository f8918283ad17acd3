//! Pre-discard Emissions
//!
//! Emissions released while waste sits at the source awaiting collection.
//! They occur regardless of the final destination, so they are added to the
//! landfill baseline only.

use crate::parameters::PreDiscardParameters;
use tracing::debug;
use vermicarbon_core::convolution::spread;
use vermicarbon_core::errors::ensure_non_negative;
use vermicarbon_core::{DailyEmissionSeries, EmissionProfile, FloatValue, VermiResult};

/// Pre-collection CH4 and N2O
#[derive(Debug, Clone)]
pub struct PreDiscardEmissions {
    parameters: PreDiscardParameters,
    n2o_profile: EmissionProfile,
}

impl PreDiscardEmissions {
    pub fn new() -> VermiResult<Self> {
        Self::from_parameters(PreDiscardParameters::default())
    }

    pub fn from_parameters(parameters: PreDiscardParameters) -> VermiResult<Self> {
        parameters.validate()?;
        let n2o_profile =
            EmissionProfile::new("pre-discard N2O", parameters.n2o_profile.clone())?;
        Ok(Self {
            parameters,
            n2o_profile,
        })
    }

    pub fn parameters(&self) -> &PreDiscardParameters {
        &self.parameters
    }

    pub fn n2o_profile(&self) -> &EmissionProfile {
        &self.n2o_profile
    }

    /// N2O multiplier for a storage O2 concentration.
    ///
    /// Untabulated concentrations are treated as ambient air (1.0). This is a
    /// known limitation rather than an interpolation.
    pub fn o2_factor(&self, o2_percent: FloatValue) -> FloatValue {
        match self.parameters.o2_multiplier(o2_percent) {
            Some(factor) => factor,
            None => {
                debug!(o2_percent, "No tabulated N2O multiplier; using ambient value 1.0");
                1.0
            }
        }
    }

    /// Daily pre-discard series for an intake series.
    ///
    /// CH4 is emitted on the intake day; N2O is spread over the three-day
    /// profile and truncated at the end of the series.
    pub fn simulate(
        &self,
        intake: &[FloatValue],
        o2_percent: FloatValue,
    ) -> VermiResult<DailyEmissionSeries> {
        for &mass in intake {
            ensure_non_negative("intake", mass)?;
        }
        let ch4_rate = self.parameters.ch4_kg_per_kg_day();
        let n2o_rate = self.parameters.n2o_kg_per_kg_day() * self.o2_factor(o2_percent);

        let ch4 = intake.iter().map(|m| m * ch4_rate).collect();
        let n2o_batches: Vec<FloatValue> = intake.iter().map(|m| m * n2o_rate).collect();
        let n2o = spread(&n2o_batches, &self.n2o_profile);

        DailyEmissionSeries::new(ch4, n2o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ch4_emitted_same_day() {
        let model = PreDiscardEmissions::new().unwrap();
        let series = model.simulate(&[100.0, 0.0, 0.0], 21.0).unwrap();
        let expected = 100.0 * model.parameters().ch4_kg_per_kg_day();

        assert_relative_eq!(series.ch4()[0], expected);
        assert_eq!(series.ch4()[1], 0.0);
    }

    #[test]
    fn test_n2o_follows_three_day_profile() {
        let model = PreDiscardEmissions::new().unwrap();
        let series = model.simulate(&[100.0, 0.0, 0.0, 0.0], 21.0).unwrap();
        let batch = 100.0 * model.parameters().n2o_kg_per_kg_day();

        assert_relative_eq!(series.n2o()[0], batch * 0.8623);
        assert_relative_eq!(series.n2o()[1], batch * 0.10);
        assert_relative_eq!(series.n2o()[2], batch * 0.0377);
        assert_eq!(series.n2o()[3], 0.0);
    }

    #[test]
    fn test_low_o2_reduces_n2o_only() {
        let model = PreDiscardEmissions::new().unwrap();
        let ambient = model.simulate(&[100.0; 10], 21.0).unwrap();
        let low = model.simulate(&[100.0; 10], 1.0).unwrap();

        assert_eq!(ambient.ch4(), low.ch4());
        assert_relative_eq!(
            low.total_n2o() / ambient.total_n2o(),
            7.86 / 20.26,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_untabulated_o2_defaults_to_ambient() {
        let model = PreDiscardEmissions::new().unwrap();
        let ambient = model.simulate(&[100.0; 10], 21.0).unwrap();
        let other = model.simulate(&[100.0; 10], 15.0).unwrap();
        assert_eq!(ambient, other);
        assert_eq!(model.o2_factor(5.5), 1.0);
    }

    // ===== Validation Tests =====

    #[test]
    fn test_negative_intake_entry_rejected() {
        let model = PreDiscardEmissions::new().unwrap();
        assert!(model.simulate(&[100.0, -500.0, 100.0], 21.0).is_err());
    }

    #[test]
    fn test_unnormalised_profile_rejected() {
        let params = PreDiscardParameters {
            n2o_profile: vec![1.0, 1.0, 1.0],
            ..Default::default()
        };
        assert!(PreDiscardEmissions::from_parameters(params).is_err());
    }

    #[test]
    fn test_zero_release_days_rejected() {
        let params = PreDiscardParameters {
            n2o_release_days: 0.0,
            ..Default::default()
        };
        let err = PreDiscardEmissions::from_parameters(params).unwrap_err();
        assert!(err.to_string().contains("n2o_release_days"));
    }
}
