//! Landfill Emission Component
//!
//! Projects daily CH4 and N2O from disposing of a daily waste stream in a
//! managed landfill.
//!
//! # What This Component Does
//!
//! 1. Computes the temperature-dependent decomposed fraction of DOC:
//!    $DOC_f = 0.0147 \cdot T + 0.28$, clamped to $[0, 1]$
//!
//! 2. Computes the CH4 generation potential per kg of waste and decays every
//!    day's batch with the IPCC first-order kernel
//!    $w_t = e^{-k(t-1)/365} - e^{-kt/365}$
//!
//! 3. Blends open-air and covered N2O rates by the exposed fraction of the
//!    working face, corrects for humidity and spreads each batch over five days
//!
//! 4. Adds the pre-discard (pre-collection) series
//!
//! # Inputs
//!
//! - Daily intake (kg/day), constant or as a series over the horizon
//! - Humidity, temperature and DOC from [`ScenarioConditions`]
//!
//! # Outputs
//!
//! - [`DailyEmissionSeries`] of CH4 and N2O in kg/day

mod pre_discard;

pub use pre_discard::PreDiscardEmissions;

use crate::parameters::{LandfillParameters, ScenarioConditions};
use tracing::debug;
use vermicarbon_core::convolution::{first_order_decay, spread};
use vermicarbon_core::errors::ensure_non_negative;
use vermicarbon_core::gwp::{CH4_PER_C, N2O_PER_N};
use vermicarbon_core::{
    DailyEmissionSeries, EmissionProfile, FloatValue, SimulationHorizon, VermiResult,
};

const HOURS_PER_DAY: FloatValue = 24.0;

/// Landfill baseline emission model
#[derive(Debug, Clone)]
pub struct LandfillEmissions {
    parameters: LandfillParameters,
    n2o_profile: EmissionProfile,
    pre_discard: PreDiscardEmissions,
}

impl LandfillEmissions {
    /// Create a landfill model with default parameters
    pub fn new() -> VermiResult<Self> {
        Self::from_parameters(LandfillParameters::default())
    }

    /// Create a landfill model from parameters.
    ///
    /// The N2O profile must already sum to one; it is not renormalised.
    pub fn from_parameters(parameters: LandfillParameters) -> VermiResult<Self> {
        parameters.validate()?;
        let n2o_profile = EmissionProfile::new("landfill N2O", parameters.n2o_profile.clone())?;
        let pre_discard = PreDiscardEmissions::from_parameters(parameters.pre_discard.clone())?;

        Ok(Self {
            parameters,
            n2o_profile,
            pre_discard,
        })
    }

    pub fn parameters(&self) -> &LandfillParameters {
        &self.parameters
    }

    pub fn n2o_profile(&self) -> &EmissionProfile {
        &self.n2o_profile
    }

    pub fn pre_discard(&self) -> &PreDiscardEmissions {
        &self.pre_discard
    }

    /// Temperatures (°C) the DOCf model was fitted for
    pub fn docf_fitted_range(&self) -> (FloatValue, FloatValue) {
        (0.0, self.parameters.docf_max_temperature)
    }

    /// Fraction of DOC that decomposes at a temperature.
    ///
    /// The linear model exceeds 1 above roughly 49 °C, so the result is
    /// clamped to $[0, 1]$. Callers that sweep temperature should check
    /// [`Self::docf_fitted_range`] once up front.
    pub fn decomposed_fraction(&self, temperature: FloatValue) -> FloatValue {
        let (low, high) = self.docf_fitted_range();
        if !(low..=high).contains(&temperature) {
            debug!(temperature, max = high, "Extrapolating DOCf");
        }
        self.parameters.raw_docf(temperature).clamp(0.0, 1.0)
    }

    /// CH4 generation potential (kg CH4 per kg waste)
    pub fn ch4_potential(&self, doc: FloatValue, temperature: FloatValue) -> FloatValue {
        let p = &self.parameters;
        doc * self.decomposed_fraction(temperature)
            * p.mcf
            * p.biogas_ch4_fraction
            * CH4_PER_C
            * (1.0 - p.recovered_fraction)
            * (1.0 - p.oxidation_factor)
    }

    /// Share of the day's waste exposed to open air, in $[0, 1]$.
    ///
    /// Zero intake gives zero exposure instead of a division by zero.
    pub fn exposed_fraction(&self, daily_intake: FloatValue) -> FloatValue {
        if daily_intake <= 0.0 {
            return 0.0;
        }
        let p = &self.parameters;
        (p.exposed_mass / daily_intake * p.exposed_hours / HOURS_PER_DAY).clamp(0.0, 1.0)
    }

    /// N2O emitted per kg of waste received (kg N2O / kg)
    ///
    /// $$E = \left[f_{open} E_{open} + (1 - f_{open}) E_{closed}\right]
    ///       \cdot \frac{1 - h}{1 - h_{ref}} \cdot \frac{44}{28} \cdot 10^{-6}$$
    pub fn n2o_rate(&self, humidity: FloatValue, daily_intake: FloatValue) -> FloatValue {
        let p = &self.parameters;
        let f_open = self.exposed_fraction(daily_intake);
        let blended = f_open * p.n2o_open_rate + (1.0 - f_open) * p.n2o_closed_rate;
        let humidity_factor = (1.0 - humidity) / (1.0 - p.reference_humidity);

        blended * humidity_factor * N2O_PER_N / 1e6
    }

    /// Bulk landfill series (decay CH4 + profiled N2O) without pre-discard.
    ///
    /// The N2O exposure fraction is evaluated with each day's own intake.
    pub fn bulk(
        &self,
        conditions: &ScenarioConditions,
        intake: &[FloatValue],
    ) -> VermiResult<DailyEmissionSeries> {
        conditions.validate()?;
        for &mass in intake {
            ensure_non_negative("intake", mass)?;
        }

        let potential = self.ch4_potential(conditions.doc, conditions.temperature);
        let ch4_batches: Vec<FloatValue> = intake.iter().map(|m| m * potential).collect();
        let ch4 = first_order_decay(&ch4_batches, self.parameters.decay_rate);

        let n2o_batches: Vec<FloatValue> = intake
            .iter()
            .map(|&m| m * self.n2o_rate(conditions.humidity, m))
            .collect();
        let n2o = spread(&n2o_batches, &self.n2o_profile);

        DailyEmissionSeries::new(ch4, n2o)
    }

    /// Total landfill series (bulk + pre-discard) for an intake series.
    pub fn simulate_intake(
        &self,
        conditions: &ScenarioConditions,
        intake: &[FloatValue],
    ) -> VermiResult<DailyEmissionSeries> {
        let bulk = self.bulk(conditions, intake)?;
        let pre = self.pre_discard.simulate(intake, conditions.o2_concentration)?;
        bulk.try_add(&pre)
    }

    /// Total landfill series for a constant daily intake over a horizon.
    pub fn simulate(
        &self,
        conditions: &ScenarioConditions,
        horizon: SimulationHorizon,
    ) -> VermiResult<DailyEmissionSeries> {
        let intake = horizon.constant(conditions.daily_intake);
        self.simulate_intake(conditions, &intake)
    }
}
