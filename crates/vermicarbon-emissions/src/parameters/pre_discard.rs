//! Pre-discard Parameters
//!
//! Emissions from waste held at the source before collection, following the
//! storage measurements of Feng et al. (2020).

use super::PRE_DISCARD_N2O_PROFILE;
use serde::{Deserialize, Serialize};
use vermicarbon_core::gwp::{CH4_PER_C, N2O_PER_N};
use vermicarbon_core::errors::ensure_non_negative;
use vermicarbon_core::{FloatValue, VermiError, VermiResult};

/// Ambient O2 concentration; the reference level for N2O measurements.
pub(crate) const AMBIENT_O2: FloatValue = 21.0;

const O2_MATCH_TOLERANCE: FloatValue = 1e-9;

/// Parameters for pre-collection CH4 and N2O
///
/// CH4 is emitted on the day of intake. N2O is a per-kg total released over
/// `n2o_release_days` days and spread by `n2o_profile`; the total depends on
/// the O2 concentration of the storage container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreDiscardParameters {
    /// Mean CH4 emission rate
    /// unit: µg C / kg waste / h
    /// default: 2.78
    pub ch4_rate: FloatValue,

    /// N2O released per kg of waste at ambient O2 (21 %)
    /// unit: mg N / kg waste
    /// default: 20.26
    pub n2o_total: FloatValue,

    /// N2O released per kg of waste at 10 % O2
    /// unit: mg N / kg waste
    /// default: 11.11
    pub n2o_total_o2_10: FloatValue,

    /// N2O released per kg of waste at 1 % O2
    /// unit: mg N / kg waste
    /// default: 7.86
    pub n2o_total_o2_1: FloatValue,

    /// Days over which the N2O total is averaged
    /// unit: day
    /// default: 3.0
    pub n2o_release_days: FloatValue,

    /// Release of one batch's daily N2O over days 1..=3
    /// default: [0.8623, 0.10, 0.0377]
    pub n2o_profile: Vec<FloatValue>,
}

impl Default for PreDiscardParameters {
    fn default() -> Self {
        Self {
            ch4_rate: 2.78,
            n2o_total: 20.26,
            n2o_total_o2_10: 11.11,
            n2o_total_o2_1: 7.86,
            n2o_release_days: 3.0,
            n2o_profile: PRE_DISCARD_N2O_PROFILE.to_vec(),
        }
    }
}

impl PreDiscardParameters {
    /// CH4 emitted per kg of waste per day (kg CH4 / kg / day)
    ///
    /// µg C/kg/h × 24 h × 16/12, then µg → kg.
    pub fn ch4_kg_per_kg_day(&self) -> FloatValue {
        self.ch4_rate * CH4_PER_C * 24.0 / 1e9
    }

    /// N2O emitted per kg of waste per day at ambient O2 (kg N2O / kg / day)
    pub fn n2o_kg_per_kg_day(&self) -> FloatValue {
        self.n2o_total / self.n2o_release_days * N2O_PER_N / 1e6
    }

    /// Check the scalar parameters; the profile is checked when the model is built.
    pub fn validate(&self) -> VermiResult<()> {
        for (name, value) in [
            ("ch4_rate", self.ch4_rate),
            ("n2o_total", self.n2o_total),
            ("n2o_total_o2_10", self.n2o_total_o2_10),
            ("n2o_total_o2_1", self.n2o_total_o2_1),
            ("n2o_release_days", self.n2o_release_days),
        ] {
            ensure_non_negative(name, value)?;
        }
        // O2 multipliers are ratios to the ambient total
        if self.n2o_total == 0.0 {
            return Err(VermiError::invalid_parameter(
                "n2o_total",
                self.n2o_total,
                "must be positive",
            ));
        }
        if self.n2o_release_days == 0.0 {
            return Err(VermiError::invalid_parameter(
                "n2o_release_days",
                self.n2o_release_days,
                "must be positive",
            ));
        }
        Ok(())
    }

    /// N2O scaling for the storage O2 concentration.
    ///
    /// Only the three measured levels (21, 10 and 1 %) are tabulated. Anything
    /// else returns `None`; callers fall back to the ambient multiplier of 1.0.
    pub fn o2_multiplier(&self, o2_percent: FloatValue) -> Option<FloatValue> {
        let matches = |level: FloatValue| (o2_percent - level).abs() < O2_MATCH_TOLERANCE;

        if matches(AMBIENT_O2) {
            Some(1.0)
        } else if matches(10.0) {
            Some(self.n2o_total_o2_10 / self.n2o_total)
        } else if matches(1.0) {
            Some(self.n2o_total_o2_1 / self.n2o_total)
        } else {
            None
        }
    }
}
