//! Sobol low-discrepancy sequence.
//!
//! Gray-code construction (Antonov & Saleev) over 32-bit direction numbers
//! from the Joe & Kuo (2008) tables, with an optional random digital shift.
//! The shift XORs a fixed mask into every coordinate of a dimension, which
//! keeps the net structure while making the point set depend on a seed.

use crate::{Error, Result};
use ndarray::Array2;
use rand::Rng;

const BITS: usize = 32;
const SCALE: f64 = 4_294_967_296.0; // 2^32

/// Joe & Kuo primitive polynomials for dimensions 2..=10: (degree s, coefficients a, initial m).
const JOE_KUO: [(u32, u32, &[u32]); 9] = [
    (1, 0, &[1]),
    (2, 1, &[1, 3]),
    (3, 1, &[1, 3, 1]),
    (3, 2, &[1, 1, 1]),
    (4, 1, &[1, 1, 3, 3]),
    (4, 4, &[1, 3, 5, 13]),
    (5, 2, &[1, 1, 5, 5, 17]),
    (5, 4, &[1, 1, 5, 5, 5]),
    (5, 7, &[1, 1, 7, 11, 19]),
];

/// Highest dimension the built-in direction numbers support.
pub const MAX_DIMENSIONS: usize = JOE_KUO.len() + 1;

/// Generator for the first `2^32` points of a Sobol sequence
#[derive(Debug, Clone)]
pub struct SobolSequence {
    directions: Vec<[u32; BITS]>,
    shift: Vec<u32>,
    state: Vec<u32>,
    index: u64,
}

impl SobolSequence {
    /// Unscrambled sequence starting at the origin.
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 || dimensions > MAX_DIMENSIONS {
            return Err(Error::InvalidParameter(format!(
                "Sobol sequence supports 1 to {} dimensions, got {}",
                MAX_DIMENSIONS, dimensions
            )));
        }

        let directions = (0..dimensions).map(direction_numbers).collect();
        Ok(Self {
            directions,
            shift: vec![0; dimensions],
            state: vec![0; dimensions],
            index: 0,
        })
    }

    /// Sequence with a random digital shift drawn from `rng`.
    pub fn with_shift<R: Rng + ?Sized>(dimensions: usize, rng: &mut R) -> Result<Self> {
        let mut seq = Self::new(dimensions)?;
        seq.shift = (0..dimensions).map(|_| rng.gen::<u32>()).collect();
        Ok(seq)
    }

    pub fn dimensions(&self) -> usize {
        self.directions.len()
    }

    /// Return the current point and advance.
    pub fn next_point(&mut self) -> Result<Vec<f64>> {
        if self.index >= 1u64 << BITS {
            return Err(Error::SamplingError(
                "Sobol sequence exhausted after 2^32 points".to_string(),
            ));
        }

        let point = self
            .state
            .iter()
            .zip(&self.shift)
            .map(|(&x, &s)| (x ^ s) as f64 / SCALE)
            .collect();

        // Gray code: flip the direction number at the lowest zero bit of the index
        let c = self.index.trailing_ones() as usize;
        if c < BITS {
            for (x, v) in self.state.iter_mut().zip(&self.directions) {
                *x ^= v[c];
            }
        }
        self.index += 1;

        Ok(point)
    }

    /// Next `n` points as rows of a matrix.
    pub fn take_points(&mut self, n: usize) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((n, self.dimensions()));
        for i in 0..n {
            for (j, value) in self.next_point()?.into_iter().enumerate() {
                out[[i, j]] = value;
            }
        }
        Ok(out)
    }
}

/// Direction numbers `v_k = m_k / 2^k`, stored left-aligned in 32 bits.
fn direction_numbers(dimension: usize) -> [u32; BITS] {
    let mut v = [0u32; BITS];

    if dimension == 0 {
        for (k, vk) in v.iter_mut().enumerate() {
            *vk = 1 << (BITS - 1 - k);
        }
        return v;
    }

    let (s, a, m) = JOE_KUO[dimension - 1];
    let s = s as usize;
    for k in 0..s {
        v[k] = m[k] << (BITS - 1 - k);
    }
    for k in s..BITS {
        let mut value = v[k - s] ^ (v[k - s] >> s);
        for j in 1..s {
            if (a >> (s - 1 - j)) & 1 == 1 {
                value ^= v[k - j];
            }
        }
        v[k] = value;
    }
    v
}
