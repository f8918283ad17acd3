//! Quick annual estimate
//!
//! A non-temporal breakdown used for fast sizing before a full daily run. It
//! ignores decay timing entirely: the landfill figure is the whole CH4
//! generation potential of one year's waste (fixed $DOC_f = 0.5$) plus a flat
//! N2O factor, and the compost figure is a year of vermicomposting batches at
//! 85 % moisture.

use crate::composting::{CompostingEmissions, CompostingMethod};
use serde::Serialize;
use vermicarbon_core::errors::ensure_non_negative;
use vermicarbon_core::gwp::{self, CH4_PER_C};
use vermicarbon_core::{FloatValue, VermiResult, DAYS_PER_YEAR};

const DOC: FloatValue = 0.15;
const DOC_F: FloatValue = 0.5;
const BIOGAS_CH4_FRACTION: FloatValue = 0.5;
const MCF: FloatValue = 1.0;
const OXIDATION: FloatValue = 0.1;
/// kg N2O per kg of municipal waste landfilled
const LANDFILL_N2O_FACTOR: FloatValue = 0.005;
const HUMIDITY: FloatValue = 0.85;

/// Per-gas figures for one pathway
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasBreakdown {
    pub ch4_kg: FloatValue,
    pub n2o_kg: FloatValue,
    pub ch4_tco2eq: FloatValue,
    pub n2o_tco2eq: FloatValue,
    pub total_tco2eq: FloatValue,
}

impl GasBreakdown {
    fn from_kg(ch4_kg: FloatValue, n2o_kg: FloatValue) -> Self {
        let ch4_tco2eq = gwp::tco2eq(ch4_kg, 0.0);
        let n2o_tco2eq = gwp::tco2eq(0.0, n2o_kg);
        Self {
            ch4_kg,
            n2o_kg,
            ch4_tco2eq,
            n2o_tco2eq,
            total_tco2eq: ch4_tco2eq + n2o_tco2eq,
        }
    }
}

/// Annual landfill versus vermicompost breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuickEstimate {
    pub landfill: GasBreakdown,
    pub compost: GasBreakdown,
    /// Compost CH4 per day (kg)
    pub compost_ch4_kg_per_day: FloatValue,
    /// Compost N2O per day (kg)
    pub compost_n2o_kg_per_day: FloatValue,
    pub avoided_tco2eq: FloatValue,
}

/// Annual breakdown for `annual_kg` of waste received at `daily_kg` per day.
pub fn quick_estimate(annual_kg: FloatValue, daily_kg: FloatValue) -> VermiResult<QuickEstimate> {
    ensure_non_negative("annual_kg", annual_kg)?;
    ensure_non_negative("daily_kg", daily_kg)?;

    let landfill_ch4 =
        annual_kg * DOC * DOC_F * BIOGAS_CH4_FRACTION * CH4_PER_C * MCF * (1.0 - OXIDATION);
    let landfill_n2o = annual_kg * LANDFILL_N2O_FACTOR;
    let landfill = GasBreakdown::from_kg(landfill_ch4, landfill_n2o);

    let vermi = CompostingEmissions::for_method(CompostingMethod::Vermicompost)?;
    let ch4_per_day = daily_kg * vermi.ch4_per_kg(HUMIDITY);
    let n2o_per_day = daily_kg * vermi.n2o_per_kg(HUMIDITY);
    let days = DAYS_PER_YEAR as FloatValue;
    let compost = GasBreakdown::from_kg(ch4_per_day * days, n2o_per_day * days);

    Ok(QuickEstimate {
        landfill,
        compost,
        compost_ch4_kg_per_day: ch4_per_day,
        compost_n2o_kg_per_day: n2o_per_day,
        avoided_tco2eq: landfill.total_tco2eq - compost.total_tco2eq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_landfill_breakdown() {
        let estimate = quick_estimate(36_500.0, 100.0).unwrap();
        let expected_ch4 = 36_500.0 * 0.15 * 0.5 * 0.5 * (16.0 / 12.0) * 0.9;
        assert_relative_eq!(estimate.landfill.ch4_kg, expected_ch4, max_relative = 1e-12);
        assert_relative_eq!(estimate.landfill.n2o_kg, 182.5, max_relative = 1e-12);
    }

    #[test]
    fn test_compost_matches_daily_model() {
        let estimate = quick_estimate(36_500.0, 100.0).unwrap();
        assert_relative_eq!(estimate.compost_ch4_kg_per_day, 0.011336, max_relative = 1e-3);
        assert_relative_eq!(estimate.compost.ch4_kg, estimate.compost_ch4_kg_per_day * 365.0);
    }

    #[test]
    fn test_avoided_positive() {
        let estimate = quick_estimate(36_500.0, 100.0).unwrap();
        assert!(estimate.avoided_tco2eq > 0.0);
        assert_relative_eq!(
            estimate.avoided_tco2eq,
            estimate.landfill.total_tco2eq - estimate.compost.total_tco2eq
        );
    }

    #[test]
    fn test_negative_mass_rejected() {
        assert!(quick_estimate(-1.0, 100.0).is_err());
    }
}
