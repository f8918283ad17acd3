//! End-to-end uncertainty runs over the landfill versus compost pipeline.

use vermicarbon_core::SimulationHorizon;
use vermicarbon_emissions::parameters::ScenarioConditions;
use vermicarbon_emissions::{CompostingEmissions, CompostingMethod, LandfillEmissions};
use vermicarbon_uncertainty::{
    run_monte_carlo, run_sobol, AvoidedEmissionsModel, MonteCarloConfig, ParameterBounds,
    ParameterDistribution, ParameterSet, SobolConfig, DEFAULT_SEED,
};

fn model(years: usize, method: CompostingMethod) -> AvoidedEmissionsModel {
    AvoidedEmissionsModel::new(
        ScenarioConditions::default(),
        SimulationHorizon::from_years(years),
        LandfillEmissions::new().unwrap(),
        CompostingEmissions::for_method(method).unwrap(),
    )
}

#[test]
fn monte_carlo_interval_brackets_mean() {
    let model = model(1, CompostingMethod::Vermicompost);
    let config = MonteCarloConfig {
        n_samples: 200,
        ..Default::default()
    };
    let result = run_monte_carlo(
        &model,
        &ParameterSet::avoided_emissions_defaults(),
        &config,
        DEFAULT_SEED,
    )
    .unwrap();

    assert_eq!(result.outcomes.len(), 200);
    assert!(result.lower <= result.mean && result.mean <= result.upper);
    assert!(result.lower > 0.0, "avoided emissions should stay positive");
    assert_eq!(result.fraction_positive(), 1.0);
}

#[test]
fn monte_carlo_is_reproducible_across_runs() {
    let model = model(1, CompostingMethod::Thermophilic);
    let params = ParameterSet::avoided_emissions_defaults();
    let config = MonteCarloConfig {
        n_samples: 64,
        ..Default::default()
    };

    let first = run_monte_carlo(&model, &params, &config, 7).unwrap();
    let second = run_monte_carlo(&model, &params, &config, 7).unwrap();
    assert_eq!(first.outcomes, second.outcomes);
    assert_eq!(first.inputs, second.inputs);

    let other = run_monte_carlo(&model, &params, &config, 8).unwrap();
    assert_ne!(first.outcomes, other.outcomes);
}

#[test]
fn monte_carlo_rejects_humidity_outside_unit_interval() {
    let model = model(1, CompostingMethod::Vermicompost);
    let mut params = ParameterSet::new();
    params
        .add(
            "humidity",
            ParameterDistribution::Normal {
                mean: 0.8,
                std_dev: 0.1,
            },
        )
        .add(
            "temperature",
            ParameterDistribution::Normal {
                mean: 25.0,
                std_dev: 3.0,
            },
        )
        .add(
            "doc",
            ParameterDistribution::Uniform {
                low: 0.1,
                high: 0.2,
            },
        );

    assert!(run_monte_carlo(&model, &params, &MonteCarloConfig::default(), 0).is_err());
}

#[test]
fn sobol_indices_on_reference_scenario() {
    let model = model(1, CompostingMethod::Vermicompost);
    let config = SobolConfig {
        n_samples: 128,
        n_bootstrap: 20,
        ..Default::default()
    };
    let result = run_sobol(
        &model,
        &ParameterBounds::avoided_emissions_defaults(),
        &config,
        DEFAULT_SEED,
    )
    .unwrap();

    assert_eq!(result.n_evaluations, 128 * 8);
    assert_eq!(result.indices.len(), 3);
    for (name, idx) in &result.indices {
        assert!(idx.st.is_finite(), "ST({}) not finite", name);
        assert!(idx.st > -0.1 && idx.st < 1.1, "ST({}) = {}", name, idx.st);
        assert!(idx.s1_conf >= 0.0 && idx.st_conf >= 0.0);
    }

    let st_sum: f64 = result.indices.values().map(|i| i.st).sum();
    assert!(st_sum > 0.5, "total-order indices should explain the variance");

    let s2 = result.s2.as_ref().unwrap();
    assert_eq!(s2.dim(), (3, 3));
    assert!(s2[[0, 1]].is_finite());
    assert!(s2[[1, 0]].is_nan());
}
