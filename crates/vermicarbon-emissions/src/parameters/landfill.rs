//! Landfill Parameters
//!
//! Parameters for the landfill baseline: IPCC 2006 first-order decay for CH4
//! and an exposure-weighted emission factor for N2O.
//!
//! # Reference
//!
//! IPCC (2006) Guidelines for National Greenhouse Gas Inventories, Vol. 5
//! Ch. 3 (Solid Waste Disposal); Wang et al. (2017) for open/closed N2O rates.

use super::PreDiscardParameters;
use super::LANDFILL_N2O_PROFILE;
use serde::{Deserialize, Serialize};
use vermicarbon_core::errors::{ensure_in_range, ensure_non_negative};
use vermicarbon_core::{FloatValue, VermiError, VermiResult};

/// Parameters for landfill CH4 and N2O emissions
///
/// # CH4 potential
///
/// Per kg of waste:
///
/// $$L = DOC \cdot DOC_f(T) \cdot MCF \cdot F \cdot \tfrac{16}{12} \cdot (1 - R) \cdot (1 - OX)$$
///
/// with the decomposed fraction linear in temperature,
/// $DOC_f(T) = a \cdot T + b$, clamped to $[0, 1]$.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandfillParameters {
    /// First-order decay rate constant
    /// unit: yr^-1
    /// default: 0.06
    pub decay_rate: FloatValue,

    /// Methane correction factor (managed anaerobic site)
    /// unit: dimensionless
    /// default: 1.0
    pub mcf: FloatValue,

    /// Volume fraction of CH4 in landfill gas
    /// unit: dimensionless
    /// default: 0.5
    pub biogas_ch4_fraction: FloatValue,

    /// Oxidation factor in the cover layer
    /// unit: dimensionless
    /// default: 0.1
    pub oxidation_factor: FloatValue,

    /// Fraction of generated CH4 that is recovered
    /// unit: dimensionless
    /// default: 0.0
    pub recovered_fraction: FloatValue,

    /// Slope of the DOCf temperature model
    /// unit: °C^-1
    /// default: 0.0147
    pub docf_slope: FloatValue,

    /// Intercept of the DOCf temperature model
    /// unit: dimensionless
    /// default: 0.28
    pub docf_intercept: FloatValue,

    /// Highest temperature the DOCf model was fitted for; warmer inputs are logged
    /// unit: °C
    /// default: 45.0
    pub docf_max_temperature: FloatValue,

    /// N2O emission rate from waste exposed to open air
    /// unit: g N2O-N / t waste / day
    /// default: 1.91
    pub n2o_open_rate: FloatValue,

    /// N2O emission rate from covered waste
    /// unit: g N2O-N / t waste / day
    /// default: 2.15
    pub n2o_closed_rate: FloatValue,

    /// Mass of waste left exposed at the working face each day
    /// unit: kg
    /// default: 100.0
    pub exposed_mass: FloatValue,

    /// Hours per day the working face stays exposed
    /// unit: h
    /// default: 8.0
    pub exposed_hours: FloatValue,

    /// Humidity at which the N2O rates were measured
    /// unit: dimensionless
    /// default: 0.55
    pub reference_humidity: FloatValue,

    /// Release of one batch's N2O over days 1..=5
    /// default: [0.10, 0.30, 0.40, 0.15, 0.05]
    pub n2o_profile: Vec<FloatValue>,

    /// Pre-collection emissions added on top of the bulk landfill series
    pub pre_discard: PreDiscardParameters,
}

impl Default for LandfillParameters {
    fn default() -> Self {
        Self {
            decay_rate: 0.06,
            mcf: 1.0,
            biogas_ch4_fraction: 0.5,
            oxidation_factor: 0.1,
            recovered_fraction: 0.0,
            docf_slope: 0.0147,
            docf_intercept: 0.28,
            docf_max_temperature: 45.0,
            n2o_open_rate: 1.91,
            n2o_closed_rate: 2.15,
            exposed_mass: 100.0,
            exposed_hours: 8.0,
            reference_humidity: 0.55,
            n2o_profile: LANDFILL_N2O_PROFILE.to_vec(),
            pre_discard: PreDiscardParameters::default(),
        }
    }
}

impl LandfillParameters {
    /// Unclamped decomposed fraction of DOC at a temperature
    pub fn raw_docf(&self, temperature: FloatValue) -> FloatValue {
        self.docf_slope * temperature + self.docf_intercept
    }

    /// Check the scalar parameters of the bulk landfill model.
    ///
    /// The N2O profile and the pre-discard parameters are checked when the
    /// model is built from them.
    pub fn validate(&self) -> VermiResult<()> {
        for (name, value) in [
            ("mcf", self.mcf),
            ("biogas_ch4_fraction", self.biogas_ch4_fraction),
            ("oxidation_factor", self.oxidation_factor),
            ("recovered_fraction", self.recovered_fraction),
            ("reference_humidity", self.reference_humidity),
        ] {
            ensure_in_range(name, value, 0.0, 1.0)?;
        }
        if self.reference_humidity >= 1.0 {
            return Err(VermiError::invalid_parameter(
                "reference_humidity",
                self.reference_humidity,
                "must be below 1",
            ));
        }
        for (name, value) in [
            ("decay_rate", self.decay_rate),
            ("n2o_open_rate", self.n2o_open_rate),
            ("n2o_closed_rate", self.n2o_closed_rate),
            ("exposed_mass", self.exposed_mass),
            ("exposed_hours", self.exposed_hours),
        ] {
            ensure_non_negative(name, value)?;
        }
        for (name, value) in [
            ("docf_slope", self.docf_slope),
            ("docf_intercept", self.docf_intercept),
            ("docf_max_temperature", self.docf_max_temperature),
        ] {
            ensure_in_range(name, value, FloatValue::MIN, FloatValue::MAX)?;
        }
        Ok(())
    }
}
