//! Scenario conditions shared by every pathway in a run.

use serde::{Deserialize, Serialize};
use vermicarbon_core::errors::{ensure_in_range, ensure_non_negative};
use vermicarbon_core::{FloatValue, VermiResult};

/// Site conditions for one simulation call
///
/// Created fresh per run and never mutated mid-run. Validation happens at the
/// model boundary so no model ever sees an out-of-domain value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConditions {
    /// Waste received per day
    /// unit: kg/day
    /// default: 100.0
    pub daily_intake: FloatValue,

    /// Moisture content of the waste
    /// unit: fraction in [0, 1]
    /// default: 0.85
    pub humidity: FloatValue,

    /// Mean ambient temperature
    /// unit: °C
    /// default: 25.0
    pub temperature: FloatValue,

    /// Degradable organic carbon fraction of the waste
    /// unit: fraction in [0, 1]
    /// default: 0.15
    pub doc: FloatValue,

    /// O2 concentration during pre-collection storage
    /// unit: %
    /// default: 21.0
    pub o2_concentration: FloatValue,
}

impl Default for ScenarioConditions {
    fn default() -> Self {
        Self {
            daily_intake: 100.0,
            humidity: 0.85,
            temperature: 25.0,
            doc: 0.15,
            o2_concentration: 21.0,
        }
    }
}

impl ScenarioConditions {
    /// Same conditions with the three uncertain inputs replaced.
    pub fn with_uncertain(
        &self,
        humidity: FloatValue,
        temperature: FloatValue,
        doc: FloatValue,
    ) -> Self {
        Self {
            humidity,
            temperature,
            doc,
            ..*self
        }
    }

    /// Reject physically invalid inputs.
    pub fn validate(&self) -> VermiResult<()> {
        ensure_non_negative("daily_intake", self.daily_intake)?;
        ensure_in_range("humidity", self.humidity, 0.0, 1.0)?;
        ensure_in_range("doc", self.doc, 0.0, 1.0)?;
        ensure_in_range("temperature", self.temperature, -273.15, FloatValue::MAX)?;
        ensure_in_range("o2_concentration", self.o2_concentration, 0.0, 100.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ScenarioConditions::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_domain() {
        let base = ScenarioConditions::default();

        let cases = [
            ScenarioConditions { humidity: 1.1, ..base },
            ScenarioConditions { humidity: -0.1, ..base },
            ScenarioConditions { doc: 2.0, ..base },
            ScenarioConditions { daily_intake: -5.0, ..base },
            ScenarioConditions { temperature: f64::NAN, ..base },
            ScenarioConditions { o2_concentration: 120.0, ..base },
        ];

        for case in cases {
            assert!(case.validate().is_err(), "{:?} should be rejected", case);
        }
    }

    #[test]
    fn test_with_uncertain_keeps_other_fields() {
        let base = ScenarioConditions {
            daily_intake: 250.0,
            ..Default::default()
        };
        let perturbed = base.with_uncertain(0.7, 30.0, 0.2);
        assert_eq!(perturbed.daily_intake, 250.0);
        assert_eq!(perturbed.humidity, 0.7);
        assert_eq!(perturbed.o2_concentration, 21.0);
    }
}
