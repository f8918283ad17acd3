//! Composting Emission Component
//!
//! One model for both composting pathways. Vermicomposting and thermophilic
//! composting differ only in their stoichiometric constants and release
//! profiles, which come from [`CompostingParameters`].
//!
//! # Algorithm
//!
//! Each day's intake is a batch with fixed totals
//!
//! $$Q_{CH_4} = m \cdot TOC \cdot f_{CH_4-C} \cdot \tfrac{16}{12} \cdot (1 - h)$$
//! $$Q_{N_2O} = m \cdot TN \cdot f_{N_2O-N} \cdot \tfrac{44}{28} \cdot (1 - h)$$
//!
//! spread over a 50-day profile. Emission on day $j$ is
//! $\sum_{i \le j} Q_i \, w_{j-i}$, truncated to the horizon.

use crate::parameters::{CompostingParameters, ScenarioConditions};
use serde::{Deserialize, Serialize};
use vermicarbon_core::convolution::spread;
use vermicarbon_core::errors::{ensure_in_range, ensure_non_negative};
use vermicarbon_core::gwp::{CH4_PER_C, N2O_PER_N};
use vermicarbon_core::{
    DailyEmissionSeries, EmissionProfile, FloatValue, SimulationHorizon, VermiResult,
};

/// Project methodology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompostingMethod {
    /// Vermicomposting, the thesis-proposed methodology
    Vermicompost,
    /// Thermophilic composting, the UNFCCC-style reference methodology
    Thermophilic,
}

impl CompostingMethod {
    pub fn default_parameters(&self) -> CompostingParameters {
        match self {
            CompostingMethod::Vermicompost => CompostingParameters::vermicompost(),
            CompostingMethod::Thermophilic => CompostingParameters::thermophilic(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompostingMethod::Vermicompost => "vermicompost",
            CompostingMethod::Thermophilic => "thermophilic",
        }
    }
}

/// Profile-convolution composting model
#[derive(Debug, Clone)]
pub struct CompostingEmissions {
    parameters: CompostingParameters,
    ch4_profile: EmissionProfile,
    n2o_profile: EmissionProfile,
}

impl CompostingEmissions {
    /// Build the model for a methodology with its literature constants.
    pub fn for_method(method: CompostingMethod) -> VermiResult<Self> {
        Self::from_parameters(method.default_parameters())
    }

    /// Build the model from parameters, normalising both profiles.
    pub fn from_parameters(parameters: CompostingParameters) -> VermiResult<Self> {
        for (name, value) in [
            ("toc", parameters.toc),
            ("tn", parameters.tn),
            ("ch4_c_fraction", parameters.ch4_c_fraction),
            ("n2o_n_fraction", parameters.n2o_n_fraction),
        ] {
            ensure_in_range(name, value, 0.0, 1.0)?;
        }
        let ch4_profile = EmissionProfile::normalised("composting CH4", &parameters.ch4_profile)?;
        let n2o_profile = EmissionProfile::normalised("composting N2O", &parameters.n2o_profile)?;

        Ok(Self {
            parameters,
            ch4_profile,
            n2o_profile,
        })
    }

    pub fn parameters(&self) -> &CompostingParameters {
        &self.parameters
    }

    pub fn ch4_profile(&self) -> &EmissionProfile {
        &self.ch4_profile
    }

    pub fn n2o_profile(&self) -> &EmissionProfile {
        &self.n2o_profile
    }

    /// Lifetime CH4 of one kg of wet waste (kg CH4 / kg)
    pub fn ch4_per_kg(&self, humidity: FloatValue) -> FloatValue {
        self.parameters.toc * self.parameters.ch4_c_fraction * CH4_PER_C * (1.0 - humidity)
    }

    /// Lifetime N2O of one kg of wet waste (kg N2O / kg)
    pub fn n2o_per_kg(&self, humidity: FloatValue) -> FloatValue {
        self.parameters.tn * self.parameters.n2o_n_fraction * N2O_PER_N * (1.0 - humidity)
    }

    /// Daily series for an arbitrary intake series.
    pub fn simulate_intake(
        &self,
        humidity: FloatValue,
        intake: &[FloatValue],
    ) -> VermiResult<DailyEmissionSeries> {
        ensure_in_range("humidity", humidity, 0.0, 1.0)?;
        for &mass in intake {
            ensure_non_negative("intake", mass)?;
        }

        let ch4_per_kg = self.ch4_per_kg(humidity);
        let n2o_per_kg = self.n2o_per_kg(humidity);

        let ch4_batches: Vec<FloatValue> = intake.iter().map(|m| m * ch4_per_kg).collect();
        let n2o_batches: Vec<FloatValue> = intake.iter().map(|m| m * n2o_per_kg).collect();

        DailyEmissionSeries::new(
            spread(&ch4_batches, &self.ch4_profile),
            spread(&n2o_batches, &self.n2o_profile),
        )
    }

    /// Daily series for a constant daily intake over a horizon.
    pub fn simulate(
        &self,
        conditions: &ScenarioConditions,
        horizon: SimulationHorizon,
    ) -> VermiResult<DailyEmissionSeries> {
        conditions.validate()?;
        let intake = horizon.constant(conditions.daily_intake);
        self.simulate_intake(conditions.humidity, &intake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vermicompost() -> CompostingEmissions {
        CompostingEmissions::for_method(CompostingMethod::Vermicompost).unwrap()
    }

    fn thermophilic() -> CompostingEmissions {
        CompostingEmissions::for_method(CompostingMethod::Thermophilic).unwrap()
    }

    // ===== Profile Tests =====

    #[test]
    fn test_profiles_normalised() {
        for model in [vermicompost(), thermophilic()] {
            for profile in [model.ch4_profile(), model.n2o_profile()] {
                let sum: f64 = profile.weights().iter().sum();
                assert!((sum - 1.0).abs() < 1e-9, "{} sums to {}", profile.name(), sum);
                assert_eq!(profile.len(), 50);
            }
        }
    }

    #[test]
    fn test_profile_peaks() {
        // Peak offsets are 0-based: day 14 is offset 13
        let vermi = vermicompost();
        let thermo = thermophilic();
        assert!((12..=13).contains(&vermi.ch4_profile().peak_offset()));
        assert!((8..=9).contains(&thermo.ch4_profile().peak_offset()));
        assert!(thermo.ch4_profile().peak_offset() < vermi.ch4_profile().peak_offset());
    }

    // ===== Batch Total Tests =====

    #[test]
    fn test_vermicompost_reference_ch4() {
        // 100 kg/day at 85 % moisture
        let model = vermicompost();
        let per_day = 100.0 * model.ch4_per_kg(0.85);
        assert_relative_eq!(per_day, 100.0 * 0.436 * 0.0013 * (16.0 / 12.0) * 0.15, max_relative = 1e-12);
        assert_relative_eq!(per_day, 0.011336, max_relative = 1e-3);
    }

    #[test]
    fn test_thermophilic_emits_more_than_vermicompost() {
        let vermi = vermicompost();
        let thermo = thermophilic();
        assert!(thermo.ch4_per_kg(0.85) > vermi.ch4_per_kg(0.85));
        assert!(thermo.n2o_per_kg(0.85) > vermi.n2o_per_kg(0.85));
    }

    #[test]
    fn test_saturated_waste_emits_nothing() {
        let model = vermicompost();
        let series = model.simulate_intake(1.0, &[100.0; 60]).unwrap();
        assert_eq!(series.total_ch4(), 0.0);
        assert_eq!(series.total_n2o(), 0.0);
    }

    // ===== Convolution Tests =====

    #[test]
    fn test_single_batch_conserved_over_long_horizon() {
        let model = thermophilic();
        let mut intake = vec![0.0; 80];
        intake[0] = 100.0;
        let series = model.simulate_intake(0.85, &intake).unwrap();

        assert_relative_eq!(series.total_ch4(), 100.0 * model.ch4_per_kg(0.85), max_relative = 1e-12);
        assert_relative_eq!(series.total_n2o(), 100.0 * model.n2o_per_kg(0.85), max_relative = 1e-12);
        assert!(series.ch4()[50..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_steady_state_equals_daily_batch() {
        // After the profile length every day receives a full profile of batches
        let model = vermicompost();
        let series = model.simulate_intake(0.85, &[100.0; 120]).unwrap();
        let batch = 100.0 * model.ch4_per_kg(0.85);
        assert_relative_eq!(series.ch4()[100], batch, max_relative = 1e-12);
        assert!(series.ch4()[10] < batch);
    }

    #[test]
    fn test_doubling_intake_doubles_series() {
        let model = vermicompost();
        let single = model.simulate_intake(0.8, &[50.0; 90]).unwrap();
        let double = model.simulate_intake(0.8, &[100.0; 90]).unwrap();

        for (a, b) in single.ch4().iter().zip(double.ch4()) {
            assert_relative_eq!(2.0 * a, *b, max_relative = 1e-12);
        }
        for (a, b) in single.n2o().iter().zip(double.n2o()) {
            assert_relative_eq!(2.0 * a, *b, max_relative = 1e-12);
        }
    }

    // ===== Validation Tests =====

    #[test]
    fn test_rejects_negative_intake() {
        let model = vermicompost();
        assert!(model.simulate_intake(0.85, &[100.0, -1.0]).is_err());
    }

    #[test]
    fn test_rejects_bad_profile() {
        let mut params = CompostingParameters::vermicompost();
        params.ch4_profile = vec![0.0; 50];
        assert!(CompostingEmissions::from_parameters(params).is_err());
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&CompostingMethod::Thermophilic).unwrap();
        assert_eq!(json, "\"thermophilic\"");
    }
}
