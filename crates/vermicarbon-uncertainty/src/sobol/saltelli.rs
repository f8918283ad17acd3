//! Saltelli cross-sampling design.
//!
//! Two quasi-random base matrices `A` and `B` come from one Sobol sequence of
//! dimension `2k`. For each base row the design holds, in order:
//!
//! ```text
//! A, AB_1 .. AB_k, [BA_1 .. BA_k,] B
//! ```
//!
//! where `AB_i` is `A` with column `i` taken from `B` and `BA_i` the reverse.
//! The `BA_i` block is only present when second-order indices are requested.

use super::sequence::{SobolSequence, MAX_DIMENSIONS};
use crate::{Error, Result};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

/// Largest number of parameters a design can carry.
pub const MAX_PARAMETERS: usize = MAX_DIMENSIONS / 2;

/// Rows generated per base sample.
pub fn rows_per_sample(n_params: usize, second_order: bool) -> usize {
    if second_order {
        2 * n_params + 2
    } else {
        n_params + 2
    }
}

/// Build a unit-cube Saltelli design with `n_samples` base rows.
///
/// The Sobol points are digitally shifted with a `ChaCha8Rng` seeded from
/// `seed`. The returned matrix has `n_samples * rows_per_sample` rows.
pub fn saltelli_design(
    n_samples: usize,
    n_params: usize,
    second_order: bool,
    seed: u64,
) -> Result<Array2<f64>> {
    if n_samples == 0 {
        return Err(Error::SamplingError(
            "Sobol analysis needs at least one base sample".to_string(),
        ));
    }
    if n_params == 0 || n_params > MAX_PARAMETERS {
        return Err(Error::InvalidParameter(format!(
            "Sobol analysis supports 1 to {} parameters, got {}",
            MAX_PARAMETERS, n_params
        )));
    }
    if !n_samples.is_power_of_two() {
        warn!(
            n_samples,
            "Sobol base sample count is not a power of two; convergence may suffer"
        );
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut seq = SobolSequence::with_shift(2 * n_params, &mut rng)?;
    let base = seq.take_points(n_samples)?;

    let step = rows_per_sample(n_params, second_order);
    let mut design = Array2::zeros((n_samples * step, n_params));

    for (j, point) in base.outer_iter().enumerate() {
        let a = point.slice(ndarray::s![..n_params]);
        let b = point.slice(ndarray::s![n_params..]);
        let offset = j * step;

        design.row_mut(offset).assign(&a);
        for i in 0..n_params {
            let mut row = design.row_mut(offset + 1 + i);
            row.assign(&a);
            row[i] = b[i];
        }
        if second_order {
            for i in 0..n_params {
                let mut row = design.row_mut(offset + 1 + n_params + i);
                row.assign(&b);
                row[i] = a[i];
            }
        }
        design.row_mut(offset + step - 1).assign(&b);
    }

    Ok(design)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_shape() {
        let design = saltelli_design(16, 3, true, 50).unwrap();
        assert_eq!(design.dim(), (16 * 8, 3));

        let design = saltelli_design(16, 3, false, 50).unwrap();
        assert_eq!(design.dim(), (16 * 5, 3));
    }

    #[test]
    fn test_cross_rows_mix_a_and_b() {
        let k = 3;
        let design = saltelli_design(4, k, true, 7).unwrap();
        let step = rows_per_sample(k, true);

        for j in 0..4 {
            let a = design.row(j * step);
            let b = design.row(j * step + step - 1);
            for i in 0..k {
                let ab = design.row(j * step + 1 + i);
                let ba = design.row(j * step + 1 + k + i);
                for c in 0..k {
                    if c == i {
                        assert_eq!(ab[c], b[c]);
                        assert_eq!(ba[c], a[c]);
                    } else {
                        assert_eq!(ab[c], a[c]);
                        assert_eq!(ba[c], b[c]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_seed_changes_design() {
        let a = saltelli_design(8, 2, false, 1).unwrap();
        let b = saltelli_design(8, 2, false, 1).unwrap();
        let c = saltelli_design(8, 2, false, 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parameter_limits() {
        assert!(saltelli_design(8, 0, true, 0).is_err());
        assert!(saltelli_design(8, MAX_PARAMETERS + 1, true, 0).is_err());
        assert!(saltelli_design(0, 2, true, 0).is_err());
    }
}
