//! Sobol index estimators with bootstrap confidence intervals.
//!
//! Estimators follow Saltelli et al. (2010): first order
//! `mean(f_B (f_AB_i - f_A)) / V`, total order (Jansen)
//! `mean((f_A - f_AB_i)^2) / 2V`, and closed second order
//! `mean(f_BA_j f_AB_k - f_A f_B) / V - S_j - S_k`.
//! `V` is the population variance of the pooled `A` and `B` outputs.

use super::saltelli::rows_per_sample;
use crate::{Error, Result};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Two-sided 95 % standard normal quantile.
const Z_95: f64 = 1.959964;

/// Raw index estimates before they are attached to parameter names.
#[derive(Debug, Clone)]
pub(crate) struct RawIndices {
    pub s1: Vec<f64>,
    pub s1_conf: Vec<f64>,
    pub st: Vec<f64>,
    pub st_conf: Vec<f64>,
    pub s2: Option<Array2<f64>>,
    pub s2_conf: Option<Array2<f64>>,
}

/// Model outputs split into the blocks of a Saltelli design.
struct Blocks {
    a: Vec<f64>,
    b: Vec<f64>,
    /// `ab[i]` holds outputs of `AB_i`
    ab: Vec<Vec<f64>>,
    ba: Option<Vec<Vec<f64>>>,
}

impl Blocks {
    fn split(outputs: &[f64], n_params: usize, second_order: bool) -> Result<Self> {
        let step = rows_per_sample(n_params, second_order);
        if outputs.is_empty() || outputs.len() % step != 0 {
            return Err(Error::SamplingError(format!(
                "Expected a multiple of {} model outputs, got {}",
                step,
                outputs.len()
            )));
        }

        let mut blocks = Self {
            a: Vec::new(),
            b: Vec::new(),
            ab: vec![Vec::new(); n_params],
            ba: second_order.then(|| vec![Vec::new(); n_params]),
        };
        for chunk in outputs.chunks_exact(step) {
            blocks.a.push(chunk[0]);
            for i in 0..n_params {
                blocks.ab[i].push(chunk[1 + i]);
            }
            if let Some(ba) = blocks.ba.as_mut() {
                for (i, column) in ba.iter_mut().enumerate() {
                    column.push(chunk[1 + n_params + i]);
                }
            }
            blocks.b.push(chunk[step - 1]);
        }
        Ok(blocks)
    }

    fn resample(&self, idx: &[usize]) -> Self {
        let pick = |v: &Vec<f64>| idx.iter().map(|&r| v[r]).collect::<Vec<_>>();
        Self {
            a: pick(&self.a),
            b: pick(&self.b),
            ab: self.ab.iter().map(pick).collect(),
            ba: self.ba.as_ref().map(|ba| ba.iter().map(pick).collect()),
        }
    }

    fn variance(&self) -> f64 {
        let n = (self.a.len() + self.b.len()) as f64;
        let mean = self.a.iter().chain(&self.b).sum::<f64>() / n;
        self.a
            .iter()
            .chain(&self.b)
            .map(|y| (y - mean).powi(2))
            .sum::<f64>()
            / n
    }

    fn first_order(&self, i: usize, var: f64) -> f64 {
        let n = self.a.len() as f64;
        self.b
            .iter()
            .zip(&self.ab[i])
            .zip(&self.a)
            .map(|((b, ab), a)| b * (ab - a))
            .sum::<f64>()
            / n
            / var
    }

    fn total_order(&self, i: usize, var: f64) -> f64 {
        let n = self.a.len() as f64;
        0.5 * self
            .a
            .iter()
            .zip(&self.ab[i])
            .map(|(a, ab)| (a - ab).powi(2))
            .sum::<f64>()
            / n
            / var
    }

    fn second_order(&self, j: usize, k: usize, var: f64) -> f64 {
        let Some(ba) = self.ba.as_ref() else {
            return f64::NAN;
        };
        let n = self.a.len() as f64;
        let vjk = ba[j]
            .iter()
            .zip(&self.ab[k])
            .zip(self.a.iter().zip(&self.b))
            .map(|((ba_j, ab_k), (a, b))| ba_j * ab_k - a * b)
            .sum::<f64>()
            / n
            / var;
        vjk - self.first_order(j, var) - self.first_order(k, var)
    }

    /// Point estimates flattened as `[S1.., ST.., S2 upper triangle..]`.
    fn estimates(&self, n_params: usize) -> Vec<f64> {
        let var = self.variance();
        let mut out: Vec<f64> = (0..n_params).map(|i| self.first_order(i, var)).collect();
        out.extend((0..n_params).map(|i| self.total_order(i, var)));
        if self.ba.is_some() {
            for j in 0..n_params {
                for k in (j + 1)..n_params {
                    out.push(self.second_order(j, k, var));
                }
            }
        }
        out
    }
}

/// Estimate indices from model outputs laid out as a Saltelli design.
///
/// Confidence half-widths are `1.96` times the sample standard deviation of
/// the estimates over `n_bootstrap` resamples of the base rows. Resample
/// indices come from a `ChaCha8Rng` seeded with `seed` on stream 1, so they
/// never overlap the draws used to shift the design.
pub(crate) fn analyse(
    outputs: &[f64],
    n_params: usize,
    second_order: bool,
    n_bootstrap: usize,
    seed: u64,
) -> Result<RawIndices> {
    let blocks = Blocks::split(outputs, n_params, second_order)?;
    let var = blocks.variance();
    if !(var > 0.0 && var.is_finite()) {
        return Err(Error::SamplingError(
            "Model output has zero variance over the design; indices are undefined".to_string(),
        ));
    }

    let point = blocks.estimates(n_params);

    let n = blocks.a.len();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(1);
    let resamples: Vec<Vec<usize>> = (0..n_bootstrap)
        .map(|_| (0..n).map(|_| rng.gen_range(0..n)).collect())
        .collect();
    let boot: Vec<Vec<f64>> = resamples
        .par_iter()
        .map(|idx| blocks.resample(idx).estimates(n_params))
        .collect();
    let conf: Vec<f64> = (0..point.len())
        .map(|e| confidence(boot.iter().map(|row| row[e])))
        .collect();

    let s1 = point[..n_params].to_vec();
    let st = point[n_params..2 * n_params].to_vec();
    let s1_conf = conf[..n_params].to_vec();
    let st_conf = conf[n_params..2 * n_params].to_vec();

    let (s2, s2_conf) = if second_order {
        let mut s2 = Array2::from_elem((n_params, n_params), f64::NAN);
        let mut s2_conf = Array2::from_elem((n_params, n_params), f64::NAN);
        let mut e = 2 * n_params;
        for j in 0..n_params {
            for k in (j + 1)..n_params {
                s2[[j, k]] = point[e];
                s2_conf[[j, k]] = conf[e];
                e += 1;
            }
        }
        (Some(s2), Some(s2_conf))
    } else {
        (None, None)
    };

    Ok(RawIndices {
        s1,
        s1_conf,
        st,
        st_conf,
        s2,
        s2_conf,
    })
}

/// Half-width of a normal-approximation 95 % interval.
///
/// Non-finite estimates (resamples with zero variance) are skipped.
fn confidence(estimates: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = estimates.filter(|v| v.is_finite()).collect();
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Z_95 * var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_split_layout() {
        // One base row, two parameters, second order: A, AB1, AB2, BA1, BA2, B
        let blocks = Blocks::split(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, true).unwrap();
        assert_eq!(blocks.a, vec![1.0]);
        assert_eq!(blocks.ab, vec![vec![2.0], vec![3.0]]);
        assert_eq!(blocks.ba, Some(vec![vec![4.0], vec![5.0]]));
        assert_eq!(blocks.b, vec![6.0]);
    }

    #[test]
    fn test_split_rejects_ragged_output() {
        assert!(Blocks::split(&[1.0, 2.0, 3.0], 2, false).is_err());
        assert!(Blocks::split(&[], 2, false).is_err());
    }

    #[test]
    fn test_constant_output_rejected() {
        let outputs = vec![3.0; 4 * 8];
        assert!(matches!(
            analyse(&outputs, 3, true, 10, 0),
            Err(Error::SamplingError(_))
        ));
    }

    #[test]
    fn test_confidence_skips_non_finite() {
        let half = confidence([1.0, f64::NAN, 3.0].into_iter());
        assert_relative_eq!(half, Z_95 * 2.0_f64.sqrt());
        assert_eq!(confidence([1.0].into_iter()), 0.0);
    }
}
