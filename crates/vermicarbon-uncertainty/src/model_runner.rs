//! Scalar model abstraction for sampling.
//!
//! Samplers only need "parameter vector in, number out". [`ScalarModel`] is
//! that seam; [`AvoidedEmissionsModel`] plugs the full landfill-versus-compost
//! pipeline into it and [`FnModel`] wraps a closure.

use crate::{Error, Result};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::warn;
use vermicarbon_core::SimulationHorizon;
use vermicarbon_emissions::parameters::ScenarioConditions;
use vermicarbon_emissions::{compare, CompostingEmissions, LandfillEmissions};

/// A pure function of a parameter vector.
///
/// Implementations must be free of shared mutable state: batch evaluation
/// calls [`ScalarModel::evaluate`] concurrently.
pub trait ScalarModel: Sync {
    /// Names of the parameters, in the order `evaluate` expects them.
    fn param_names(&self) -> &[String];

    /// Closed interval a parameter must stay within, if any.
    fn parameter_domain(&self, _name: &str) -> Option<(f64, f64)> {
        None
    }

    /// Range a parameter's sub-model was fitted over, if any.
    ///
    /// Unlike the domain this is advisory: values outside it are evaluated
    /// by extrapolation.
    fn fitted_range(&self, _name: &str) -> Option<(f64, f64)> {
        None
    }

    /// Evaluate the model for one parameter vector.
    fn evaluate(&self, params: &[f64]) -> Result<f64>;

    /// Evaluate every row of a design matrix in parallel.
    ///
    /// Output order matches row order. Any failing row fails the batch.
    fn evaluate_batch(&self, design: &Array2<f64>) -> Result<Vec<f64>> {
        if design.ncols() != self.param_names().len() {
            return Err(Error::InvalidParameter(format!(
                "Design has {} columns but the model takes {} parameters",
                design.ncols(),
                self.param_names().len()
            )));
        }
        let rows: Vec<Vec<f64>> = design.outer_iter().map(|row| row.to_vec()).collect();
        rows.par_iter().map(|params| self.evaluate(params)).collect()
    }
}

/// Check that a sampling range lies inside a model's domain for a parameter.
pub(crate) fn check_within_domain<M: ScalarModel + ?Sized>(
    model: &M,
    name: &str,
    range: Option<(f64, f64)>,
) -> Result<()> {
    let Some((lo, hi)) = model.parameter_domain(name) else {
        return Ok(());
    };
    match range {
        Some((low, high)) if low >= lo && high <= hi => Ok(()),
        Some((low, high)) => Err(Error::InvalidParameter(format!(
            "Sampling range [{}, {}] for '{}' leaves the valid domain [{}, {}]",
            low, high, name, lo, hi
        ))),
        None => Err(Error::InvalidParameter(format!(
            "Unbounded distribution for '{}' can leave the valid domain [{}, {}]",
            name, lo, hi
        ))),
    }
}

/// Warn once when a sampling range reaches beyond a parameter's fitted range.
///
/// Returns whether a warning was logged.
pub(crate) fn warn_outside_fitted_range<M: ScalarModel + ?Sized>(
    model: &M,
    name: &str,
    range: Option<(f64, f64)>,
) -> bool {
    let Some((lo, hi)) = model.fitted_range(name) else {
        return false;
    };
    let outside = match range {
        Some((low, high)) => low < lo || high > hi,
        None => true,
    };
    if outside {
        warn!(
            parameter = name,
            fitted_low = lo,
            fitted_high = hi,
            "Sampling range reaches outside the fitted range; affected draws are extrapolated"
        );
    }
    outside
}

/// Total avoided emissions (tCO2eq) over a horizon as a function of
/// (humidity, temperature, DOC).
#[derive(Debug, Clone)]
pub struct AvoidedEmissionsModel {
    conditions: ScenarioConditions,
    horizon: SimulationHorizon,
    landfill: LandfillEmissions,
    project: CompostingEmissions,
    names: Vec<String>,
}

impl AvoidedEmissionsModel {
    /// `conditions` supplies everything except the three uncertain inputs.
    pub fn new(
        conditions: ScenarioConditions,
        horizon: SimulationHorizon,
        landfill: LandfillEmissions,
        project: CompostingEmissions,
    ) -> Self {
        Self {
            conditions,
            horizon,
            landfill,
            project,
            names: vec![
                "humidity".to_string(),
                "temperature".to_string(),
                "doc".to_string(),
            ],
        }
    }

    pub fn horizon(&self) -> SimulationHorizon {
        self.horizon
    }
}

impl ScalarModel for AvoidedEmissionsModel {
    fn param_names(&self) -> &[String] {
        &self.names
    }

    fn parameter_domain(&self, name: &str) -> Option<(f64, f64)> {
        match name {
            "humidity" | "doc" => Some((0.0, 1.0)),
            _ => None,
        }
    }

    fn fitted_range(&self, name: &str) -> Option<(f64, f64)> {
        match name {
            "temperature" => Some(self.landfill.docf_fitted_range()),
            _ => None,
        }
    }

    fn evaluate(&self, params: &[f64]) -> Result<f64> {
        let [humidity, temperature, doc] = params else {
            return Err(Error::InvalidParameter(format!(
                "Expected 3 parameters (humidity, temperature, doc), got {}",
                params.len()
            )));
        };
        let conditions = self.conditions.with_uncertain(*humidity, *temperature, *doc);

        let baseline = self.landfill.simulate(&conditions, self.horizon)?;
        let project = self.project.simulate(&conditions, self.horizon)?;
        Ok(compare(baseline, project)?.total_avoided())
    }
}

/// A closure exposed as a [`ScalarModel`].
pub struct FnModel<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    names: Vec<String>,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    pub fn new(names: &[&str], f: F) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            f,
        }
    }
}

impl<F> ScalarModel for FnModel<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn param_names(&self) -> &[String] {
        &self.names
    }

    fn evaluate(&self, params: &[f64]) -> Result<f64> {
        Ok((self.f)(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use vermicarbon_emissions::CompostingMethod;

    fn reference_model() -> AvoidedEmissionsModel {
        AvoidedEmissionsModel::new(
            ScenarioConditions::default(),
            SimulationHorizon::from_years(1),
            LandfillEmissions::new().unwrap(),
            CompostingEmissions::for_method(CompostingMethod::Vermicompost).unwrap(),
        )
    }

    #[test]
    fn test_reference_point_positive() {
        let model = reference_model();
        let avoided = model.evaluate(&[0.85, 25.0, 0.15]).unwrap();
        assert!(avoided > 0.0);
    }

    #[test]
    fn test_more_doc_avoids_more() {
        let model = reference_model();
        let low = model.evaluate(&[0.85, 25.0, 0.12]).unwrap();
        let high = model.evaluate(&[0.85, 25.0, 0.18]).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let model = reference_model();
        assert!(model.evaluate(&[0.85, 25.0]).is_err());
    }

    #[test]
    fn test_out_of_domain_sample_fails() {
        let model = reference_model();
        assert!(matches!(
            model.evaluate(&[1.5, 25.0, 0.15]),
            Err(Error::Model(_))
        ));
    }

    #[test]
    fn test_batch_preserves_order() {
        let model = FnModel::new(&["x", "y"], |p| p[0] * 10.0 + p[1]);
        let design = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let out = model.evaluate_batch(&design).unwrap();
        assert_eq!(out, vec![12.0, 34.0, 56.0]);
    }

    #[test]
    fn test_batch_dimension_checked() {
        let model = FnModel::new(&["x"], |p| p[0]);
        assert!(model.evaluate_batch(&array![[1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_domain_check() {
        let model = reference_model();
        assert!(check_within_domain(&model, "humidity", Some((0.5, 0.9))).is_ok());
        assert!(check_within_domain(&model, "humidity", Some((0.5, 1.2))).is_err());
        assert!(check_within_domain(&model, "humidity", None).is_err());
        assert!(check_within_domain(&model, "temperature", None).is_ok());
    }

    #[test]
    fn test_fitted_range_warning() {
        let model = reference_model();
        assert!(!warn_outside_fitted_range(&model, "temperature", Some((20.0, 30.0))));
        assert!(warn_outside_fitted_range(&model, "temperature", Some((20.0, 60.0))));
        // Normal draws are unbounded
        assert!(warn_outside_fitted_range(&model, "temperature", None));
        assert!(!warn_outside_fitted_range(&model, "humidity", None));

        let plain = FnModel::new(&["x"], |p| p[0]);
        assert!(!warn_outside_fitted_range(&plain, "x", None));
    }
}
