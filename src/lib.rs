//! Avoided-emission accounting for diverting organic waste from landfill
//!
//! Projects daily CH4 and N2O for a landfill baseline and two composting
//! projects (vermicomposting and thermophilic composting), converts the
//! difference into avoided tCO2eq and a carbon-credit value, and quantifies
//! how uncertain inputs move the result.
//!
//! The work is split across the workspace:
//!
//! - `vermicarbon-core`: series, profiles, convolution, GWP
//! - `vermicarbon-emissions`: the emission models, aggregation and valuation
//! - `vermicarbon-uncertainty`: Monte Carlo and Sobol analysis
//!
//! This crate ties them together behind [`SimulationConfig`] and
//! [`run_simulation`].

pub mod config;
pub mod report;

pub use config::SimulationConfig;
pub use report::{run_simulation, MethodReport, SimulationReport};

pub use vermicarbon_core;
pub use vermicarbon_emissions;
pub use vermicarbon_uncertainty;

use thiserror::Error;

/// Any failure of an end-to-end run
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] vermicarbon_core::VermiError),
    #[error(transparent)]
    Uncertainty(#[from] vermicarbon_uncertainty::Error),
}

/// Convenience type for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
