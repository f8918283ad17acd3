//! Scenario Aggregator
//!
//! Converts daily CH4/N2O into tCO2eq with the fixed AR6 20-year GWPs,
//! accumulates over the horizon and compares a baseline (landfill) against a
//! project (composting) scenario.
//!
//! Avoided emissions are `baseline - project` at every granularity and are
//! never clamped: a project that emits more than its baseline yields a
//! negative value.

use serde::Serialize;
use vermicarbon_core::{
    DailyEmissionSeries, FloatValue, SimulationHorizon, VermiError, VermiResult, DAYS_PER_YEAR,
};

/// A scenario's emissions in CO2-equivalent terms
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    series: DailyEmissionSeries,
    daily: Vec<FloatValue>,
    cumulative: Vec<FloatValue>,
}

impl ScenarioResult {
    pub fn from_series(series: DailyEmissionSeries) -> Self {
        let daily = series.to_tco2eq();
        let cumulative = cumulative_sum(&daily);
        Self {
            series,
            daily,
            cumulative,
        }
    }

    pub fn series(&self) -> &DailyEmissionSeries {
        &self.series
    }

    /// Daily emissions (tCO2eq/day)
    pub fn daily(&self) -> &[FloatValue] {
        &self.daily
    }

    /// Running total, `cumulative[i] = cumulative[i-1] + daily[i]`
    pub fn cumulative(&self) -> &[FloatValue] {
        &self.cumulative
    }

    /// Period total (tCO2eq)
    pub fn total(&self) -> FloatValue {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.daily.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}

/// One year of a baseline/project comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualRow {
    /// 1-based year of the horizon
    pub year: usize,
    pub baseline_ch4_kg: FloatValue,
    pub baseline_n2o_kg: FloatValue,
    pub project_ch4_kg: FloatValue,
    pub project_n2o_kg: FloatValue,
    pub baseline_tco2eq: FloatValue,
    pub project_tco2eq: FloatValue,
    pub avoided_tco2eq: FloatValue,
    pub cumulative_avoided_tco2eq: FloatValue,
}

/// Baseline versus project over the same horizon
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioComparison {
    baseline: ScenarioResult,
    project: ScenarioResult,
    avoided_daily: Vec<FloatValue>,
    avoided_cumulative: Vec<FloatValue>,
}

impl ScenarioComparison {
    pub fn baseline(&self) -> &ScenarioResult {
        &self.baseline
    }

    pub fn project(&self) -> &ScenarioResult {
        &self.project
    }

    /// Avoided emissions per day (tCO2eq/day), possibly negative
    pub fn avoided_daily(&self) -> &[FloatValue] {
        &self.avoided_daily
    }

    pub fn avoided_cumulative(&self) -> &[FloatValue] {
        &self.avoided_cumulative
    }

    /// Avoided emissions over the whole horizon (tCO2eq)
    pub fn total_avoided(&self) -> FloatValue {
        self.baseline.total() - self.project.total()
    }

    /// Totals grouped into consecutive 365-day years.
    ///
    /// A trailing partial year forms its own row.
    pub fn annual(&self) -> Vec<AnnualRow> {
        let n_years = SimulationHorizon::from_days(self.baseline.len()).n_years();
        let mut rows = Vec::with_capacity(n_years);
        let mut cumulative = 0.0;

        for year in 0..n_years {
            let start = year * DAYS_PER_YEAR;
            let end = (start + DAYS_PER_YEAR).min(self.baseline.len());
            let window = |values: &[FloatValue]| values[start..end].iter().sum::<FloatValue>();

            let baseline_tco2eq = window(self.baseline.daily());
            let project_tco2eq = window(self.project.daily());
            let avoided = baseline_tco2eq - project_tco2eq;
            cumulative += avoided;

            rows.push(AnnualRow {
                year: year + 1,
                baseline_ch4_kg: window(self.baseline.series().ch4()),
                baseline_n2o_kg: window(self.baseline.series().n2o()),
                project_ch4_kg: window(self.project.series().ch4()),
                project_n2o_kg: window(self.project.series().n2o()),
                baseline_tco2eq,
                project_tco2eq,
                avoided_tco2eq: avoided,
                cumulative_avoided_tco2eq: cumulative,
            });
        }

        rows
    }
}

/// Compare a baseline and a project series.
///
/// Both series must be non-empty and of equal length; anything else is a
/// caller error and fails immediately rather than truncating.
pub fn compare(
    baseline: DailyEmissionSeries,
    project: DailyEmissionSeries,
) -> VermiResult<ScenarioComparison> {
    if baseline.is_empty() {
        return Err(VermiError::EmptySeries("baseline scenario".to_string()));
    }
    if project.is_empty() {
        return Err(VermiError::EmptySeries("project scenario".to_string()));
    }
    if baseline.len() != project.len() {
        return Err(VermiError::SeriesLengthMismatch {
            context: "project scenario compared with baseline".to_string(),
            expected: baseline.len(),
            found: project.len(),
        });
    }

    let baseline = ScenarioResult::from_series(baseline);
    let project = ScenarioResult::from_series(project);

    let avoided_daily: Vec<FloatValue> = baseline
        .daily()
        .iter()
        .zip(project.daily())
        .map(|(b, p)| b - p)
        .collect();
    let avoided_cumulative = cumulative_sum(&avoided_daily);

    Ok(ScenarioComparison {
        baseline,
        project,
        avoided_daily,
        avoided_cumulative,
    })
}

fn cumulative_sum(values: &[FloatValue]) -> Vec<FloatValue> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}
