//! Run configuration
//!
//! A [`SimulationConfig`] gathers every input of one end-to-end run. It is an
//! immutable value passed into [`crate::run_simulation`]; nothing is read from
//! process-wide state.
//!
//! All sections are optional in TOML. Missing sections and fields take the
//! literature defaults, except the composting sections which are replaced as
//! a whole when present.
//!
//! ```toml
//! years = 10
//! seed = 50
//!
//! [scenario]
//! daily_intake = 250.0
//!
//! [monte_carlo]
//! n_samples = 2000
//!
//! [uncertain_parameters.humidity]
//! kind = "uniform"
//! low = 0.75
//! high = 0.90
//!
//! [market]
//! carbon_price_eur = 92.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use vermicarbon_core::{SimulationHorizon, VermiResult};
use vermicarbon_emissions::parameters::{
    CompostingParameters, LandfillParameters, ScenarioConditions,
};
use vermicarbon_emissions::MarketConditions;
use vermicarbon_uncertainty::{
    MonteCarloConfig, ParameterBounds, ParameterSet, SobolConfig, DEFAULT_SEED,
};

/// Inputs for one end-to-end simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Horizon length
    /// unit: years of 365 days
    /// default: 1
    pub years: usize,

    /// Seed shared by the Monte Carlo and Sobol phases
    /// default: 50
    pub seed: u64,

    /// Run Monte Carlo propagation for each methodology
    /// default: true
    pub run_monte_carlo: bool,

    /// Run Sobol sensitivity analysis for each methodology
    /// default: true
    pub run_sensitivity: bool,

    pub scenario: ScenarioConditions,
    pub landfill: LandfillParameters,
    pub vermicompost: CompostingParameters,
    pub thermophilic: CompostingParameters,
    pub monte_carlo: MonteCarloConfig,

    /// Distributions for Monte Carlo, keyed by parameter name in model order
    pub uncertain_parameters: ParameterSet,

    pub sobol: SobolConfig,

    /// Sampling box for Sobol analysis, keyed by parameter name in model order
    pub sensitivity_bounds: ParameterBounds,

    pub market: MarketConditions,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            years: 1,
            seed: DEFAULT_SEED,
            run_monte_carlo: true,
            run_sensitivity: true,
            scenario: ScenarioConditions::default(),
            landfill: LandfillParameters::default(),
            vermicompost: CompostingParameters::vermicompost(),
            thermophilic: CompostingParameters::thermophilic(),
            monte_carlo: MonteCarloConfig::default(),
            uncertain_parameters: ParameterSet::avoided_emissions_defaults(),
            sobol: SobolConfig::default(),
            sensitivity_bounds: ParameterBounds::avoided_emissions_defaults(),
            market: MarketConditions::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> VermiResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> VermiResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn horizon(&self) -> SimulationHorizon {
        SimulationHorizon::from_years(self.years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vermicarbon_core::VermiError;
    use vermicarbon_uncertainty::ParameterDistribution;

    #[test]
    fn test_empty_document_is_default() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.horizon().days(), 365);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            years = 3
            run_sensitivity = false

            [scenario]
            daily_intake = 250.0

            [landfill]
            decay_rate = 0.09

            [market]
            carbon_price_eur = 92.0
            "#,
        )
        .unwrap();

        assert_eq!(config.years, 3);
        assert!(!config.run_sensitivity);
        assert_eq!(config.scenario.daily_intake, 250.0);
        assert_eq!(config.scenario.humidity, 0.85);
        assert_eq!(config.landfill.decay_rate, 0.09);
        assert_eq!(config.landfill.oxidation_factor, 0.1);
        assert_eq!(config.market.carbon_price_eur, 92.0);
        assert_eq!(config.market.fx_brl_per_eur, 5.50);
        assert_eq!(config.thermophilic, CompostingParameters::thermophilic());
    }

    #[test]
    fn test_uncertain_parameters_from_toml() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [uncertain_parameters.humidity]
            kind = "uniform"
            low = 0.7
            high = 0.8

            [uncertain_parameters.temperature]
            kind = "normal"
            mean = 30.0
            std_dev = 2.0

            [uncertain_parameters.doc]
            kind = "triangular"
            min = 0.1
            mode = 0.15
            max = 0.2

            [sensitivity_bounds]
            humidity = [0.6, 0.8]
            temperature = [20.0, 30.0]
            doc = [0.1, 0.2]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.uncertain_parameters.param_names(),
            vec!["humidity", "temperature", "doc"]
        );
        assert_eq!(
            config.uncertain_parameters.get("temperature"),
            Some(&ParameterDistribution::Normal {
                mean: 30.0,
                std_dev: 2.0
            })
        );
        assert_eq!(
            config.sensitivity_bounds.param_names(),
            vec!["humidity", "temperature", "doc"]
        );
    }

    #[test]
    fn test_incomplete_composting_section_rejected() {
        let result = SimulationConfig::from_toml_str(
            r#"
            [vermicompost]
            toc = 0.4
            "#,
        );
        assert!(matches!(result, Err(VermiError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SimulationConfig::from_file("/nonexistent/vermicarbon.toml");
        assert!(matches!(result, Err(VermiError::Io(_))));
    }
}
