//! Model parameters
//!
//! Parameter structures for every emission model. Structs deriving
//! `#[serde(default)]` may be partially deserialised: fields left out keep the
//! literature defaults.

mod composting;
mod landfill;
mod pre_discard;
mod profiles;
mod scenario;

pub use composting::CompostingParameters;
pub use landfill::LandfillParameters;
pub use pre_discard::PreDiscardParameters;
pub use profiles::{
    LANDFILL_N2O_PROFILE, PRE_DISCARD_N2O_PROFILE, THERMOPHILIC_CH4_PROFILE,
    THERMOPHILIC_N2O_PROFILE, VERMICOMPOST_CH4_PROFILE, VERMICOMPOST_N2O_PROFILE,
};
pub use scenario::ScenarioConditions;
