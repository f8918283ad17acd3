//! Global warming potentials and stoichiometric conversion ratios.
//!
//! GWP values are the IPCC AR6 20-year horizon figures. They are fixed for the
//! whole crate and not configurable per call.

use crate::timeseries::FloatValue;

/// GWP of methane over 20 years (IPCC AR6)
pub const GWP_CH4_20: FloatValue = 79.7;

/// GWP of nitrous oxide over 20 years (IPCC AR6)
pub const GWP_N2O_20: FloatValue = 273.0;

/// Mass ratio CH4/C (16/12)
pub const CH4_PER_C: FloatValue = 16.0 / 12.0;

/// Mass ratio N2O/N2 (44/28)
pub const N2O_PER_N: FloatValue = 44.0 / 28.0;

const KG_PER_TONNE: FloatValue = 1000.0;

/// Convert kg of CH4 and N2O into tonnes of CO2-equivalent.
///
/// $$t\text{CO}_2\text{eq} = \frac{m_{CH_4} \cdot GWP_{CH_4} + m_{N_2O} \cdot GWP_{N_2O}}{1000}$$
pub fn tco2eq(ch4_kg: FloatValue, n2o_kg: FloatValue) -> FloatValue {
    (ch4_kg * GWP_CH4_20 + n2o_kg * GWP_N2O_20) / KG_PER_TONNE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tco2eq_weights() {
        assert_relative_eq!(tco2eq(1.0, 0.0), 0.0797);
        assert_relative_eq!(tco2eq(0.0, 1.0), 0.273);
        assert_relative_eq!(tco2eq(2.0, 1.0), 2.0 * 0.0797 + 0.273, max_relative = 1e-12);
    }
}
