//! Hebbian weight matrix.
//!
//! `W = (1/P) · Σ_p pᵀp` with the diagonal cleared, for P bipolar patterns
//! of length N. The result is symmetric with a zero diagonal.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::core::pattern::Pattern;

/// N×N connection weights between pattern units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    weights: Array2<f64>,
}

impl WeightMatrix {
    /// All-zero matrix of size n×n.
    pub fn zeros(n: usize) -> Self {
        Self {
            weights: Array2::zeros((n, n)),
        }
    }

    /// Build the normalised Hebbian matrix for `patterns`.
    ///
    /// Callers must have checked that the set is non-empty and every
    /// pattern has length `n`.
    pub fn hebbian(patterns: &[Pattern], n: usize) -> Self {
        debug_assert!(!patterns.is_empty());
        let mut weights = Array2::<f64>::zeros((n, n));

        // Outer product accumulation: W[i][j] += p[i] * p[j]
        for pattern in patterns {
            let p = pattern.values();
            debug_assert_eq!(p.len(), n);
            for i in 0..n {
                let pi = p[i];
                for j in 0..n {
                    weights[[i, j]] += pi * p[j];
                }
            }
        }

        // No self-connections.
        weights.diag_mut().fill(0.0);
        weights /= patterns.len() as f64;

        Self { weights }
    }

    /// Pattern size N.
    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[[i, j]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Local field `h = s · W` (row vector times matrix).
    ///
    /// Summed in ascending row order so the result is bit-for-bit
    /// reproducible.
    pub fn field(&self, state: &Array1<f64>) -> Array1<f64> {
        let n = self.size();
        assert_eq!(state.len(), n, "state length must match weight matrix");

        let mut h = Array1::<f64>::zeros(n);
        for i in 0..n {
            let si = state[i];
            let row = self.weights.row(i);
            for j in 0..n {
                h[j] += si * row[j];
            }
        }
        h
    }

    /// Hopfield energy `E(s) = -½ · sᵀWs`.
    pub fn energy(&self, state: &Array1<f64>) -> f64 {
        let h = self.field(state);
        -0.5 * state.iter().zip(h.iter()).map(|(s, h)| s * h).sum::<f64>()
    }

    /// `W[i][j] == W[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        self.weights.ncols() == n
            && (0..n).all(|i| (i + 1..n).all(|j| self.weights[[i, j]] == self.weights[[j, i]]))
    }

    /// `W[i][i] == 0` for every i.
    pub fn has_zero_diagonal(&self) -> bool {
        self.weights.diag().iter().all(|&w| w == 0.0)
    }
}
