//! Truncated convolution of daily intake against release kernels.
//!
//! Each day's intake is an independent batch that releases its emissions
//! according to a kernel; contributions from all earlier batches superpose.
//! Output is always truncated to the length of the intake series: nothing is
//! emitted past the end of the horizon and there is no wraparound.

use crate::profile::EmissionProfile;
use crate::timeseries::{FloatValue, DAYS_PER_YEAR};

/// Direct convolution truncated to `signal.len()`.
///
/// $$y_j = \sum_{i \le j,\; j - i < L} x_i \, w_{j-i}$$
///
/// Cost is `O(D × L)`, which is fine for the short compost and N2O profiles.
pub fn convolve_truncated(signal: &[FloatValue], kernel: &[FloatValue]) -> Vec<FloatValue> {
    let n = signal.len();
    let mut out = vec![0.0; n];

    for (i, &x) in signal.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        let reach = kernel.len().min(n - i);
        for (offset, &w) in kernel[..reach].iter().enumerate() {
            out[i + offset] += x * w;
        }
    }

    out
}

/// Spread each day's batch across a profile.
pub fn spread(batches: &[FloatValue], profile: &EmissionProfile) -> Vec<FloatValue> {
    convolve_truncated(batches, profile.weights())
}

/// First-order decay kernel on a daily grid.
///
/// For 1-based offset `t` the entry is
///
/// $$w_t = e^{-k (t-1)/365} - e^{-k t / 365}$$
///
/// which is the fraction of a batch decaying during day `t` after intake under
/// continuous first-order decay with annual rate `k`. Exponents are never
/// positive so the kernel cannot overflow.
pub fn first_order_decay_kernel(k_per_year: FloatValue, len: usize) -> Vec<FloatValue> {
    let days = DAYS_PER_YEAR as FloatValue;
    (1..=len)
        .map(|t| {
            let t = t as FloatValue;
            (-k_per_year * (t - 1.0) / days).exp() - (-k_per_year * t / days).exp()
        })
        .collect()
}

/// Convolve a signal with the full-horizon first-order decay kernel.
///
/// Equivalent to `convolve_truncated(signal, &first_order_decay_kernel(k, signal.len()))`
/// but runs in `O(D)`: the kernel is geometric with ratio $r = e^{-k/365}$ and
/// first term $c = 1 - r$, so the convolution obeys
///
/// $$y_j = r \, y_{j-1} + c \, x_j$$
pub fn first_order_decay(signal: &[FloatValue], k_per_year: FloatValue) -> Vec<FloatValue> {
    let ratio = (-k_per_year / DAYS_PER_YEAR as FloatValue).exp();
    let first = 1.0 - ratio;

    let mut out = Vec::with_capacity(signal.len());
    let mut carried = 0.0;
    for &x in signal {
        carried = ratio * carried + first * x;
        out.push(carried);
    }
    out
}
