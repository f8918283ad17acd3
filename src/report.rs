//! End-to-end pipeline
//!
//! [`run_simulation`] runs the landfill baseline once and compares it with
//! each composting methodology, then optionally propagates input uncertainty
//! and ranks parameter sensitivity for each methodology.

use crate::config::SimulationConfig;
use crate::Result;
use serde::Serialize;
use tracing::{info, warn};
use vermicarbon_core::{DailyEmissionSeries, FloatValue, DAYS_PER_YEAR};
use vermicarbon_emissions::quick_estimate::{quick_estimate, QuickEstimate};
use vermicarbon_emissions::{
    compare, value_credits, AnnualRow, CompostingEmissions, CompostingMethod, CreditValue,
    LandfillEmissions,
};
use vermicarbon_uncertainty::{
    run_monte_carlo, run_sobol, AvoidedEmissionsModel, MonteCarloResult, SensitivityResult,
};

/// Results for one composting methodology against the landfill baseline
#[derive(Debug, Clone, Serialize)]
pub struct MethodReport {
    pub method: CompostingMethod,
    pub baseline_tco2eq: FloatValue,
    pub project_tco2eq: FloatValue,
    pub avoided_tco2eq: FloatValue,
    /// Cumulative avoided tCO2eq at the end of each day
    pub avoided_cumulative: Vec<FloatValue>,
    pub annual: Vec<AnnualRow>,
    pub credits: CreditValue,
    pub monte_carlo: Option<MonteCarloResult>,
    pub sensitivity: Option<SensitivityResult>,
}

impl MethodReport {
    fn zero(method: CompostingMethod, config: &SimulationConfig) -> Self {
        Self {
            method,
            baseline_tco2eq: 0.0,
            project_tco2eq: 0.0,
            avoided_tco2eq: 0.0,
            avoided_cumulative: Vec::new(),
            annual: Vec::new(),
            credits: value_credits(0.0, &config.market),
            monte_carlo: None,
            sensitivity: None,
        }
    }
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub horizon_days: usize,
    pub seed: u64,
    /// Non-temporal annual sizing for the configured daily intake
    pub quick_estimate: QuickEstimate,
    pub vermicompost: MethodReport,
    pub thermophilic: MethodReport,
}

impl SimulationReport {
    pub fn method(&self, method: CompostingMethod) -> &MethodReport {
        match method {
            CompostingMethod::Vermicompost => &self.vermicompost,
            CompostingMethod::Thermophilic => &self.thermophilic,
        }
    }

    /// Avoided emissions of vermicomposting beyond thermophilic composting (tCO2eq).
    pub fn vermicompost_advantage(&self) -> FloatValue {
        self.vermicompost.avoided_tco2eq - self.thermophilic.avoided_tco2eq
    }
}

/// Run the full pipeline for a configuration.
///
/// Invalid inputs fail the whole call. A zero-length horizon is not an error:
/// it yields a report of zeros with no uncertainty results.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport> {
    config.scenario.validate()?;
    let horizon = config.horizon();
    let daily_kg = config.scenario.daily_intake;
    let estimate = quick_estimate(daily_kg * DAYS_PER_YEAR as FloatValue, daily_kg)?;

    let landfill = LandfillEmissions::from_parameters(config.landfill.clone())?;
    let (docf_low, docf_high) = landfill.docf_fitted_range();
    if !(docf_low..=docf_high).contains(&config.scenario.temperature) {
        warn!(
            temperature = config.scenario.temperature,
            fitted_low = docf_low,
            fitted_high = docf_high,
            "Scenario temperature outside the fitted DOCf range; decomposed fraction is extrapolated"
        );
    }
    let o2 = config.scenario.o2_concentration;
    if landfill.pre_discard().parameters().o2_multiplier(o2).is_none() {
        warn!(
            o2_percent = o2,
            "O2 concentration has no tabulated N2O multiplier; using ambient value 1.0"
        );
    }
    let projects = [
        (
            CompostingMethod::Vermicompost,
            CompostingEmissions::from_parameters(config.vermicompost.clone())?,
        ),
        (
            CompostingMethod::Thermophilic,
            CompostingEmissions::from_parameters(config.thermophilic.clone())?,
        ),
    ];

    if horizon.is_empty() {
        warn!("Simulation horizon is empty; reporting zero avoided emissions");
        return Ok(SimulationReport {
            horizon_days: 0,
            seed: config.seed,
            quick_estimate: estimate,
            vermicompost: MethodReport::zero(CompostingMethod::Vermicompost, config),
            thermophilic: MethodReport::zero(CompostingMethod::Thermophilic, config),
        });
    }

    let baseline = landfill.simulate(&config.scenario, horizon)?;
    let [vermicompost, thermophilic] = projects.map(|(method, project)| {
        method_report(config, &landfill, &baseline, method, project)
    });

    Ok(SimulationReport {
        horizon_days: horizon.days(),
        seed: config.seed,
        quick_estimate: estimate,
        vermicompost: vermicompost?,
        thermophilic: thermophilic?,
    })
}

fn method_report(
    config: &SimulationConfig,
    landfill: &LandfillEmissions,
    baseline: &DailyEmissionSeries,
    method: CompostingMethod,
    project: CompostingEmissions,
) -> Result<MethodReport> {
    let horizon = config.horizon();
    let project_series = project.simulate(&config.scenario, horizon)?;
    let comparison = compare(baseline.clone(), project_series)?;
    let avoided = comparison.total_avoided();

    info!(
        method = method.label(),
        baseline_tco2eq = comparison.baseline().total(),
        project_tco2eq = comparison.project().total(),
        avoided_tco2eq = avoided,
        "Scenario comparison complete"
    );

    let model =
        AvoidedEmissionsModel::new(config.scenario, horizon, landfill.clone(), project);
    let monte_carlo = if config.run_monte_carlo {
        Some(run_monte_carlo(
            &model,
            &config.uncertain_parameters,
            &config.monte_carlo,
            config.seed,
        )?)
    } else {
        None
    };
    let sensitivity = if config.run_sensitivity {
        Some(run_sobol(
            &model,
            &config.sensitivity_bounds,
            &config.sobol,
            config.seed,
        )?)
    } else {
        None
    };

    Ok(MethodReport {
        method,
        baseline_tco2eq: comparison.baseline().total(),
        project_tco2eq: comparison.project().total(),
        avoided_tco2eq: avoided,
        avoided_cumulative: comparison.avoided_cumulative().to_vec(),
        annual: comparison.annual(),
        credits: value_credits(avoided, &config.market),
        monte_carlo,
        sensitivity,
    })
}
