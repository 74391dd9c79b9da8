//! Core module: pattern vectors and the Hebbian weight matrix.

pub mod pattern;
pub mod weights;
