//! Parallel recall of independent queries.
//!
//! Recall only reads the weight matrix, so any number of queries can share
//! one trained memory. Training needs `&mut`, which the borrow checker
//! keeps out while a batch holds `&AssociativeMemory`.

use rayon::prelude::*;

use crate::core::pattern::Pattern;
use crate::error::Result;
use crate::memory::associative::{AssociativeMemory, RecallConfig, RecallOutcome};

/// Recall every query across the rayon pool. Output order matches input.
pub fn recall_batch(
    memory: &AssociativeMemory,
    queries: &[Pattern],
    config: &RecallConfig,
) -> Vec<Result<RecallOutcome>> {
    queries
        .par_iter()
        .map(|query| memory.recall_with(query, config))
        .collect()
}

/// Fraction of outcomes that reached a fixed point. Errors count as misses.
pub fn convergence_rate(outcomes: &[Result<RecallOutcome>]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let converged = outcomes
        .iter()
        .filter(|o| matches!(o, Ok(outcome) if outcome.converged()))
        .count();
    converged as f64 / outcomes.len() as f64
}
