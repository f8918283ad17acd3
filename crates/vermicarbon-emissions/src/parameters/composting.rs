//! Composting Parameters
//!
//! Stoichiometric constants and release profiles for the two composting
//! methodologies. Both share one model; only these values differ.
//!
//! # Reference
//!
//! Yang et al. (2017), greenhouse gas emissions during vermicomposting and
//! thermophilic composting of food waste.

use super::{
    THERMOPHILIC_CH4_PROFILE, THERMOPHILIC_N2O_PROFILE, VERMICOMPOST_CH4_PROFILE,
    VERMICOMPOST_N2O_PROFILE,
};
use serde::{Deserialize, Serialize};
use vermicarbon_core::FloatValue;

/// Parameters for a composting pathway
///
/// Per kg of wet waste the batch totals are
///
/// $$CH_4 = TOC \cdot f_{CH_4-C} \cdot \tfrac{16}{12} \cdot (1 - h)$$
/// $$N_2O = TN \cdot f_{N_2O-N} \cdot \tfrac{44}{28} \cdot (1 - h)$$
///
/// where $h$ is the moisture content. Profiles hold raw weights and are
/// normalised when the model is built.
///
/// The constants form one literature set, so this struct is deserialised as a
/// whole: every field must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompostingParameters {
    /// Total organic carbon, dry basis
    /// unit: kg C / kg dry matter
    pub toc: FloatValue,

    /// Total nitrogen, dry basis
    /// unit: kg N / kg dry matter
    pub tn: FloatValue,

    /// Fraction of initial carbon emitted as CH4-C
    /// unit: dimensionless
    pub ch4_c_fraction: FloatValue,

    /// Fraction of initial nitrogen emitted as N2O-N
    /// unit: dimensionless
    pub n2o_n_fraction: FloatValue,

    /// Raw CH4 release weights, index 0 = intake day
    pub ch4_profile: Vec<FloatValue>,

    /// Raw N2O release weights, index 0 = intake day
    pub n2o_profile: Vec<FloatValue>,
}

impl CompostingParameters {
    /// Vermicomposting (thesis methodology)
    ///
    /// TOC 43.6 %, TN 14.2 g/kg, 0.13 % of C as CH4, 0.92 % of N as N2O.
    pub fn vermicompost() -> Self {
        Self {
            toc: 0.436,
            tn: 0.0142,
            ch4_c_fraction: 0.0013,
            n2o_n_fraction: 0.0092,
            ch4_profile: VERMICOMPOST_CH4_PROFILE.to_vec(),
            n2o_profile: VERMICOMPOST_N2O_PROFILE.to_vec(),
        }
    }

    /// Thermophilic composting (UNFCCC-style reference methodology)
    ///
    /// Same substrate as [`CompostingParameters::vermicompost`] with 0.6 % of C
    /// as CH4 and 1.96 % of N as N2O.
    pub fn thermophilic() -> Self {
        Self {
            toc: 0.436,
            tn: 0.0142,
            ch4_c_fraction: 0.006,
            n2o_n_fraction: 0.0196,
            ch4_profile: THERMOPHILIC_CH4_PROFILE.to_vec(),
            n2o_profile: THERMOPHILIC_N2O_PROFILE.to_vec(),
        }
    }
}

impl Default for CompostingParameters {
    fn default() -> Self {
        Self::vermicompost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methodologies_share_substrate() {
        let vermi = CompostingParameters::vermicompost();
        let thermo = CompostingParameters::thermophilic();
        assert_eq!(vermi.toc, thermo.toc);
        assert_eq!(vermi.tn, thermo.tn);
        assert!(thermo.ch4_c_fraction > vermi.ch4_c_fraction);
        assert!(thermo.n2o_n_fraction > vermi.n2o_n_fraction);
    }

    #[test]
    fn test_profiles_have_fifty_days() {
        for params in [
            CompostingParameters::vermicompost(),
            CompostingParameters::thermophilic(),
        ] {
            assert_eq!(params.ch4_profile.len(), 50);
            assert_eq!(params.n2o_profile.len(), 50);
        }
    }

    #[test]
    fn test_deserialization_requires_all_fields() {
        let json = r#"{"toc": 0.4}"#;
        let result: Result<CompostingParameters, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let full = serde_json::to_string(&CompostingParameters::thermophilic()).unwrap();
        let params: CompostingParameters = serde_json::from_str(&full).unwrap();
        assert_eq!(params, CompostingParameters::thermophilic());
    }
}
