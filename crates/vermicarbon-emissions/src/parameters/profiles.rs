//! Raw daily release weights.
//!
//! Index 0 is the intake day. Compost tables are stored unnormalised and are
//! divided by their sum when a model is built; the short landfill tables
//! already sum to one.

use vermicarbon_core::FloatValue;

/// Landfill N2O release over days 1-5 after intake (Wang et al. 2017)
pub const LANDFILL_N2O_PROFILE: [FloatValue; 5] = [0.10, 0.30, 0.40, 0.15, 0.05];

/// Pre-discard N2O release over days 1-3 (Feng et al. 2020)
pub const PRE_DISCARD_N2O_PROFILE: [FloatValue; 3] = [0.8623, 0.10, 0.0377];

/// Vermicomposting CH4, peaking on day 14
#[rustfmt::skip]
pub const VERMICOMPOST_CH4_PROFILE: [FloatValue; 50] = [
    0.0020, 0.0034, 0.0053, 0.0081, 0.0119, 0.0167, 0.0225, 0.0292, 0.0364, 0.0436,
    0.0501, 0.0554, 0.0588, 0.0600, 0.0596, 0.0585, 0.0568, 0.0544, 0.0514, 0.0480,
    0.0443, 0.0404, 0.0364, 0.0324, 0.0284, 0.0247, 0.0211, 0.0179, 0.0150, 0.0124,
    0.0101, 0.0081, 0.0065, 0.0051, 0.0039, 0.0030, 0.0023, 0.0017, 0.0013, 0.0009,
    0.0007, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005,
];

/// Vermicomposting N2O, peaking on day 16
#[rustfmt::skip]
pub const VERMICOMPOST_N2O_PROFILE: [FloatValue; 50] = [
    0.0026, 0.0039, 0.0057, 0.0081, 0.0112, 0.0150, 0.0195, 0.0247, 0.0304, 0.0364,
    0.0424, 0.0480, 0.0529, 0.0568, 0.0592, 0.0600, 0.0597, 0.0588, 0.0574, 0.0554,
    0.0529, 0.0501, 0.0470, 0.0436, 0.0400, 0.0364, 0.0328, 0.0292, 0.0258, 0.0225,
    0.0195, 0.0167, 0.0141, 0.0119, 0.0099, 0.0081, 0.0066, 0.0053, 0.0043, 0.0034,
    0.0026, 0.0020, 0.0016, 0.0012, 0.0009, 0.0007, 0.0005, 0.0005, 0.0005, 0.0005,
];

/// Thermophilic composting CH4, peaking on day 10
#[rustfmt::skip]
pub const THERMOPHILIC_CH4_PROFILE: [FloatValue; 50] = [
    0.0007, 0.0017, 0.0039, 0.0081, 0.0150, 0.0247, 0.0364, 0.0480, 0.0568, 0.0600,
    0.0588, 0.0554, 0.0501, 0.0436, 0.0364, 0.0292, 0.0225, 0.0167, 0.0119, 0.0081,
    0.0053, 0.0034, 0.0020, 0.0012, 0.0007, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005,
    0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005,
    0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005,
];

/// Thermophilic composting N2O, peaking on day 9
#[rustfmt::skip]
pub const THERMOPHILIC_N2O_PROFILE: [FloatValue; 50] = [
    0.0017, 0.0039, 0.0081, 0.0150, 0.0247, 0.0364, 0.0480, 0.0568, 0.0600, 0.0592,
    0.0568, 0.0529, 0.0480, 0.0424, 0.0364, 0.0304, 0.0247, 0.0195, 0.0150, 0.0112,
    0.0081, 0.0057, 0.0039, 0.0026, 0.0017, 0.0011, 0.0007, 0.0005, 0.0005, 0.0005,
    0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005,
    0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005, 0.0005,
];
