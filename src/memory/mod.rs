//! Hopfield associative memory.
//!
//! - **Hebbian training** into a symmetric, zero-diagonal weight matrix
//! - **Synchronous recall** by sign relaxation to a fixed point
//! - **Batch recall** of independent queries on the rayon pool
//! - **Snapshots** via bincode

pub mod associative;
pub mod batch;
pub mod snapshot;
