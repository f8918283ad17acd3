//! Core types for vermicarbon
//!
//! This crate holds the pieces every emission model shares and that carry no
//! model physics of their own:
//!
//! - [`timeseries`]: the simulation day-grid and paired CH4/N2O daily series
//! - [`profile`]: normalised temporal release profiles
//! - [`convolution`]: truncated direct convolution and the first-order decay kernel
//! - [`gwp`]: global warming potentials and molar-mass conversion ratios

pub mod convolution;
pub mod errors;
pub mod gwp;
pub mod profile;
pub mod timeseries;

pub use errors::{VermiError, VermiResult};
pub use profile::EmissionProfile;
pub use timeseries::{DailyEmissionSeries, FloatValue, SimulationHorizon, DAYS_PER_YEAR};
