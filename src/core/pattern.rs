//! Pattern vectors and the sign activation.
//!
//! A pattern is a fixed-length vector of f64 values. Stored patterns are
//! bipolar ({-1, +1}); queries may also carry 0 for "unknown" or any other
//! finite value, since the activation always maps back into {-1, +1}.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::PatternDefect;

/// Sign activation with the zero tie-break fixed to +1.
///
/// `sign(0.0) == 1.0` is a policy choice: a unit with no net input
/// switches on.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// A fixed-length state or training vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    values: Array1<f64>,
}

impl Pattern {
    /// Wrap raw values. No domain check; see [`Pattern::check_bipolar`].
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: Array1::from_vec(values),
        }
    }

    /// Build a pattern from ±1 integers.
    pub fn from_bipolar(bits: &[i8]) -> Self {
        Self::new(bits.iter().map(|&b| b as f64).collect())
    }

    /// Apply the sign activation element-wise to a field vector.
    pub fn activate(field: &Array1<f64>) -> Self {
        Self {
            values: field.mapv(sign),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }

    /// First element outside {-1, +1}, if any.
    pub fn check_bipolar(&self) -> Result<(), PatternDefect> {
        match self
            .values
            .iter()
            .enumerate()
            .find(|(_, &v)| v != 1.0 && v != -1.0)
        {
            Some((position, &value)) => Err(PatternDefect::NonBipolar { position, value }),
            None => Ok(()),
        }
    }

    pub fn is_bipolar(&self) -> bool {
        self.check_bipolar().is_ok()
    }

    /// Number of positions where the two patterns differ.
    /// Panics if lengths differ.
    pub fn hamming_distance(&self, other: &Pattern) -> usize {
        assert_eq!(self.len(), other.len(), "patterns must have same length");
        self.values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Copy with element `i` negated.
    pub fn flipped(&self, i: usize) -> Pattern {
        let mut values = self.values.clone();
        values[i] = -values[i];
        Pattern { values }
    }

    /// Copy with `flips` distinct positions negated, chosen from `seed`.
    ///
    /// The same seed always flips the same positions. `flips` is capped at
    /// the pattern length.
    pub fn corrupted(&self, flips: usize, seed: u64) -> Pattern {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut values = self.values.clone();
        for i in index::sample(&mut rng, self.len(), flips.min(self.len())) {
            values[i] = -values[i];
        }
        Pattern { values }
    }

    /// Values as ±1 integers (0 stays 0, other values are signed).
    pub fn to_bipolar(&self) -> Vec<i8> {
        self.values
            .iter()
            .map(|&v| if v == 0.0 { 0 } else { sign(v) as i8 })
            .collect()
    }
}

impl From<Vec<f64>> for Pattern {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<Array1<f64>> for Pattern {
    fn from(values: Array1<f64>) -> Self {
        Self { values }
    }
}
