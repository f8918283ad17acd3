//! Emission models for organic waste disposal pathways
//!
//! This crate projects daily CH4 and N2O emissions for one baseline and two
//! project pathways, then turns the difference into avoided tCO2eq and a
//! carbon-credit value.
//!
//! # Module Organisation
//!
//! - `landfill`: IPCC first-order decay CH4, exposure-weighted N2O and the
//!   pre-discard (pre-collection) add-on
//! - `composting`: one profile-convolution model shared by vermicomposting
//!   and thermophilic composting
//! - `aggregate`: GWP weighting, cumulative totals and baseline/project deltas
//! - `valuation`: carbon price and exchange-rate conversion
//! - `quick_estimate`: a non-temporal annual breakdown for quick sizing
//!
//! # Parameters
//!
//! Each model has a parameters struct in the `parameters` module whose
//! defaults are the literature values the models were calibrated with.

pub mod aggregate;
pub mod composting;
pub mod landfill;
pub mod parameters;
pub mod quick_estimate;
pub mod valuation;

pub use aggregate::{compare, AnnualRow, ScenarioComparison, ScenarioResult};
pub use composting::{CompostingEmissions, CompostingMethod};
pub use landfill::{LandfillEmissions, PreDiscardEmissions};
pub use valuation::{value_credits, CreditValue, MarketConditions};
