//! Day-resolution time series.
//!
//! Every emission model in vermicarbon works on the same grid: day indices
//! `[0, D)` where `D = years × 365`. [`SimulationHorizon`] fixes that grid for a
//! run and [`DailyEmissionSeries`] carries the two gas series produced on it.

use crate::errors::{VermiError, VermiResult};
use crate::gwp;
use serde::{Deserialize, Serialize};

pub type FloatValue = f64;

/// Days in a simulated year. Leap days are not modelled.
pub const DAYS_PER_YEAR: usize = 365;

/// The ordered day-grid `[0, D)` of a simulation.
///
/// Immutable once constructed; every daily series produced for a run has
/// exactly [`SimulationHorizon::days`] entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationHorizon {
    days: usize,
}

impl SimulationHorizon {
    /// Horizon covering a whole number of 365-day years.
    pub fn from_years(years: usize) -> Self {
        Self {
            days: years * DAYS_PER_YEAR,
        }
    }

    pub fn from_days(days: usize) -> Self {
        Self { days }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of (possibly partial) years spanned by the horizon.
    pub fn n_years(&self) -> usize {
        self.days.div_ceil(DAYS_PER_YEAR)
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }

    /// Zero-based year index a day belongs to.
    pub fn year_of(day: usize) -> usize {
        day / DAYS_PER_YEAR
    }

    /// A series of `value` repeated on every day of the horizon.
    pub fn constant(&self, value: FloatValue) -> Vec<FloatValue> {
        vec![value; self.days]
    }

    /// Fail if `series` does not cover exactly this horizon.
    pub fn check_len(&self, context: &str, series: &[FloatValue]) -> VermiResult<()> {
        if series.len() != self.days {
            return Err(VermiError::SeriesLengthMismatch {
                context: context.to_string(),
                expected: self.days,
                found: series.len(),
            });
        }
        Ok(())
    }
}

/// Paired CH4 and N2O emissions in kg/day on a shared day-grid.
///
/// Owned by the scenario that produced it. The two series always have the same
/// length; the constructor enforces this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEmissionSeries {
    ch4_kg: Vec<FloatValue>,
    n2o_kg: Vec<FloatValue>,
}

impl DailyEmissionSeries {
    pub fn new(ch4_kg: Vec<FloatValue>, n2o_kg: Vec<FloatValue>) -> VermiResult<Self> {
        if ch4_kg.len() != n2o_kg.len() {
            return Err(VermiError::SeriesLengthMismatch {
                context: "N2O series paired with CH4".to_string(),
                expected: ch4_kg.len(),
                found: n2o_kg.len(),
            });
        }
        Ok(Self { ch4_kg, n2o_kg })
    }

    pub fn len(&self) -> usize {
        self.ch4_kg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ch4_kg.is_empty()
    }

    pub fn ch4(&self) -> &[FloatValue] {
        &self.ch4_kg
    }

    pub fn n2o(&self) -> &[FloatValue] {
        &self.n2o_kg
    }

    pub fn total_ch4(&self) -> FloatValue {
        self.ch4_kg.iter().sum()
    }

    pub fn total_n2o(&self) -> FloatValue {
        self.n2o_kg.iter().sum()
    }

    /// Element-wise sum of two series on the same grid.
    pub fn try_add(&self, other: &DailyEmissionSeries) -> VermiResult<DailyEmissionSeries> {
        if self.len() != other.len() {
            return Err(VermiError::SeriesLengthMismatch {
                context: "adding emission series".to_string(),
                expected: self.len(),
                found: other.len(),
            });
        }
        let ch4 = self
            .ch4_kg
            .iter()
            .zip(&other.ch4_kg)
            .map(|(a, b)| a + b)
            .collect();
        let n2o = self
            .n2o_kg
            .iter()
            .zip(&other.n2o_kg)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            ch4_kg: ch4,
            n2o_kg: n2o,
        })
    }

    /// Daily emissions in tCO2eq using the fixed AR6 20-year GWPs.
    pub fn to_tco2eq(&self) -> Vec<FloatValue> {
        self.ch4_kg
            .iter()
            .zip(&self.n2o_kg)
            .map(|(&ch4, &n2o)| gwp::tco2eq(ch4, n2o))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_horizon_from_years() {
        let horizon = SimulationHorizon::from_years(3);
        assert_eq!(horizon.days(), 1095);
        assert_eq!(horizon.n_years(), 3);
        assert!(!horizon.is_empty());
    }

    #[test]
    fn test_partial_year_counts_as_year() {
        let horizon = SimulationHorizon::from_days(400);
        assert_eq!(horizon.n_years(), 2);
        assert_eq!(SimulationHorizon::year_of(364), 0);
        assert_eq!(SimulationHorizon::year_of(365), 1);
    }

    #[test]
    fn test_check_len() {
        let horizon = SimulationHorizon::from_days(10);
        assert!(horizon.check_len("intake", &[1.0; 10]).is_ok());
        assert!(matches!(
            horizon.check_len("intake", &[1.0; 9]),
            Err(VermiError::SeriesLengthMismatch { expected: 10, found: 9, .. })
        ));
    }

    #[test]
    fn test_series_rejects_mismatched_gases() {
        let result = DailyEmissionSeries::new(vec![0.0; 3], vec![0.0; 4]);
        assert!(result.is_err());
    }

    #[test]
    fn test_try_add() {
        let a = DailyEmissionSeries::new(vec![1.0, 2.0], vec![0.1, 0.2]).unwrap();
        let b = DailyEmissionSeries::new(vec![0.5, 0.5], vec![0.0, 0.3]).unwrap();
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.ch4(), &[1.5, 2.5]);
        assert_relative_eq!(sum.n2o()[1], 0.5);

        let short = DailyEmissionSeries::new(vec![1.0], vec![1.0]).unwrap();
        assert!(a.try_add(&short).is_err());
    }

    #[test]
    fn test_to_tco2eq() {
        let series = DailyEmissionSeries::new(vec![1000.0, 0.0], vec![0.0, 1000.0]).unwrap();
        let daily = series.to_tco2eq();
        assert_relative_eq!(daily[0], gwp::GWP_CH4_20);
        assert_relative_eq!(daily[1], gwp::GWP_N2O_20);
    }
}
