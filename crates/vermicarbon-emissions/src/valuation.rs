//! Financial Valuation
//!
//! Prices avoided emissions as carbon credits. Market inputs arrive as an
//! explicit [`MarketConditions`] value; live quotes and the fallback
//! reference values are handled identically.

use serde::{Deserialize, Serialize};
use vermicarbon_core::FloatValue;

/// Reference EU carbon price used when no live quote is available (€/tCO2eq)
pub const FALLBACK_CARBON_PRICE_EUR: FloatValue = 85.50;

/// Reference exchange rate used when no live quote is available (BRL per EUR)
pub const FALLBACK_FX_BRL_PER_EUR: FloatValue = 5.50;

/// Carbon price and exchange rate for one valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConditions {
    /// Carbon credit price
    /// unit: € / tCO2eq
    /// default: 85.50
    pub carbon_price_eur: FloatValue,

    /// Exchange rate
    /// unit: BRL / €
    /// default: 5.50
    pub fx_brl_per_eur: FloatValue,
}

impl Default for MarketConditions {
    fn default() -> Self {
        Self {
            carbon_price_eur: FALLBACK_CARBON_PRICE_EUR,
            fx_brl_per_eur: FALLBACK_FX_BRL_PER_EUR,
        }
    }
}

/// Value of a quantity of carbon credits
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditValue {
    pub tco2eq: FloatValue,
    pub eur: FloatValue,
    pub brl: FloatValue,
}

/// Price avoided emissions. Negative quantities yield negative value.
pub fn value_credits(tco2eq: FloatValue, market: &MarketConditions) -> CreditValue {
    let eur = tco2eq * market.carbon_price_eur;
    CreditValue {
        tco2eq,
        eur,
        brl: eur * market.fx_brl_per_eur,
    }
}
