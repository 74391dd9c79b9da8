//! Hopfield associative memory: Hebbian training and synchronous recall.
//!
//! Recall runs the relaxation `s ← sign(s · W)` until the state stops
//! changing (converged) or the iteration bound is spent (exhausted). Both
//! exits hand back the current state; non-convergence is not an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_MAX_ITERATIONS;
use crate::core::pattern::Pattern;
use crate::core::weights::WeightMatrix;
use crate::error::{MemoryError, PatternDefect, Result};

/// Recall parameters.
#[derive(Clone, Debug)]
pub struct RecallConfig {
    /// Upper bound on update steps. Must be at least one.
    pub max_iterations: usize,

    /// Keep every intermediate state in [`RecallOutcome::trajectory`].
    pub record_trajectory: bool,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            record_trajectory: false,
        }
    }
}

impl RecallConfig {
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..Default::default()
        }
    }
}

/// How the relaxation loop terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecallExit {
    /// An update left the state unchanged.
    Converged,
    /// `max_iterations` updates ran without reaching a fixed point.
    Exhausted,
}

/// Result of one recall.
#[derive(Clone, Debug)]
pub struct RecallOutcome {
    /// Final state, always bipolar.
    pub pattern: Pattern,

    /// Update steps performed (1..=max_iterations).
    pub iterations: usize,

    pub exit: RecallExit,

    /// State after each update step, if recorded.
    pub trajectory: Vec<Pattern>,
}

impl RecallOutcome {
    pub fn converged(&self) -> bool {
        self.exit == RecallExit::Converged
    }
}

/// A trained (or blank) associative memory over patterns of fixed size.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssociativeMemory {
    pattern_size: usize,
    weights: WeightMatrix,
    trained_patterns: usize,
}

impl AssociativeMemory {
    /// Blank memory for patterns of `pattern_size` elements.
    pub fn new(pattern_size: usize) -> Result<Self> {
        if pattern_size == 0 {
            return Err(MemoryError::InvalidDimension(pattern_size));
        }
        Ok(Self {
            pattern_size,
            weights: WeightMatrix::zeros(pattern_size),
            trained_patterns: 0,
        })
    }

    /// Replace the weights with the Hebbian matrix of `patterns`.
    ///
    /// The whole set is validated before anything is written, so a failed
    /// call keeps the previous weights.
    pub fn train(&mut self, patterns: &[Pattern]) -> Result<()> {
        if patterns.is_empty() {
            return Err(MemoryError::EmptyTrainingSet);
        }
        for (index, pattern) in patterns.iter().enumerate() {
            if let Err(defect) = self.check_length(pattern).and_then(|_| pattern.check_bipolar()) {
                debug!(index, %defect, "rejected training pattern");
                return Err(defect.into());
            }
        }

        self.weights = WeightMatrix::hebbian(patterns, self.pattern_size);
        self.trained_patterns = patterns.len();
        debug!(
            patterns = patterns.len(),
            size = self.pattern_size,
            "trained associative memory"
        );
        Ok(())
    }

    /// Relax `query` toward a stored pattern and return the final state.
    pub fn recall(&self, query: &Pattern, max_iterations: usize) -> Result<Pattern> {
        self.recall_with(query, &RecallConfig::with_max_iterations(max_iterations))
            .map(|outcome| outcome.pattern)
    }

    /// Like [`recall`](Self::recall) but reports iteration count, exit
    /// reason and optionally the trajectory.
    pub fn recall_with(&self, query: &Pattern, config: &RecallConfig) -> Result<RecallOutcome> {
        self.check_length(query)?;
        if config.max_iterations == 0 {
            return Err(MemoryError::InvalidIterationBound);
        }

        let mut state = query.clone();
        let mut trajectory = Vec::new();

        for step in 1..=config.max_iterations {
            let next = Pattern::activate(&self.weights.field(state.values()));
            if config.record_trajectory {
                trajectory.push(next.clone());
            }
            let fixed_point = next == state;
            state = next;

            if fixed_point {
                debug!(iterations = step, "recall converged");
                return Ok(RecallOutcome {
                    pattern: state,
                    iterations: step,
                    exit: RecallExit::Converged,
                    trajectory,
                });
            }
        }

        debug!(
            iterations = config.max_iterations,
            "recall exhausted without a fixed point"
        );
        Ok(RecallOutcome {
            pattern: state,
            iterations: config.max_iterations,
            exit: RecallExit::Exhausted,
            trajectory,
        })
    }

    /// Energy of `state` under the current weights.
    pub fn energy(&self, state: &Pattern) -> Result<f64> {
        self.check_length(state)?;
        Ok(self.weights.energy(state.values()))
    }

    pub fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Patterns in the last successful training run (0 if never trained).
    pub fn trained_patterns(&self) -> usize {
        self.trained_patterns
    }

    pub fn is_trained(&self) -> bool {
        self.trained_patterns > 0
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    fn check_length(&self, pattern: &Pattern) -> std::result::Result<(), PatternDefect> {
        if pattern.len() == self.pattern_size {
            Ok(())
        } else {
            Err(PatternDefect::Length {
                expected: self.pattern_size,
                found: pattern.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::catalog::vowels;

    fn vowel_patterns() -> Vec<Pattern> {
        vowels().into_iter().map(|g| g.pattern).collect()
    }

    fn vowel_memory() -> AssociativeMemory {
        let mut memory = AssociativeMemory::new(25).unwrap();
        memory.train(&vowel_patterns()).unwrap();
        memory
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert_eq!(
            AssociativeMemory::new(0).unwrap_err(),
            MemoryError::InvalidDimension(0)
        );
    }

    #[test]
    fn test_new_is_blank() {
        let memory = AssociativeMemory::new(9).unwrap();
        assert_eq!(memory.pattern_size(), 9);
        assert!(!memory.is_trained());
        assert_eq!(memory.weights(), &WeightMatrix::zeros(9));
    }

    #[test]
    fn test_training_is_idempotent() {
        let mut a = AssociativeMemory::new(25).unwrap();
        a.train(&vowel_patterns()).unwrap();
        let first = a.weights().clone();
        a.train(&vowel_patterns()).unwrap();
        assert_eq!(a.weights(), &first);
        assert_eq!(a.trained_patterns(), 5);
    }

    #[test]
    fn test_retraining_replaces_weights() {
        let patterns = vowel_patterns();
        let mut memory = AssociativeMemory::new(25).unwrap();
        memory.train(&patterns[..1]).unwrap();
        memory.train(&patterns[1..2]).unwrap();

        let mut fresh = AssociativeMemory::new(25).unwrap();
        fresh.train(&patterns[1..2]).unwrap();
        assert_eq!(memory.weights(), fresh.weights());
        assert_eq!(memory.trained_patterns(), 1);
    }

    #[test]
    fn test_trained_weights_symmetric_zero_diagonal() {
        let memory = vowel_memory();
        let w = memory.weights();
        for i in 0..25 {
            assert_eq!(w.get(i, i), 0.0);
            for j in 0..25 {
                assert_eq!(w.get(i, j), w.get(j, i));
            }
        }
    }

    #[test]
    fn test_stored_patterns_are_fixed_points() {
        let memory = vowel_memory();
        for pattern in vowel_patterns() {
            let recalled = memory.recall(&pattern, 1).unwrap();
            assert_eq!(recalled, pattern);
        }
    }

    #[test]
    fn test_exact_a_recalls_a() {
        let memory = vowel_memory();
        let a = &vowel_patterns()[0];
        let outcome = memory
            .recall_with(a, &RecallConfig::with_max_iterations(10))
            .unwrap();
        assert_eq!(&outcome.pattern, a);
        assert_eq!(outcome.iterations, 1);
        assert!(outcome.converged());
    }

    #[test]
    fn test_two_flips_of_a_recover_a() {
        let memory = vowel_memory();
        let a = vowel_patterns()[0].clone();
        let noisy = a.flipped(1).flipped(7);
        assert_eq!(noisy.hamming_distance(&a), 2);

        let outcome = memory.recall_with(&noisy, &RecallConfig::default()).unwrap();
        assert_eq!(outcome.pattern, a);
        assert!(outcome.converged());
        assert!(outcome.iterations <= 100);
    }

    #[test]
    fn test_empty_training_set_keeps_weights() {
        let mut memory = vowel_memory();
        let before = memory.weights().clone();
        assert_eq!(memory.train(&[]), Err(MemoryError::EmptyTrainingSet));
        assert_eq!(memory.weights(), &before);
        assert_eq!(memory.trained_patterns(), 5);
    }

    #[test]
    fn test_invalid_training_pattern_keeps_weights() {
        let mut memory = vowel_memory();
        let before = memory.weights().clone();

        let mut patterns = vowel_patterns();
        patterns.push(Pattern::from_bipolar(&[1; 24]));
        let err = memory.train(&patterns).unwrap_err();
        assert_eq!(
            err,
            MemoryError::InvalidPattern(PatternDefect::Length {
                expected: 25,
                found: 24
            })
        );

        let mut patterns = vowel_patterns();
        patterns[2] = Pattern::new(vec![0.0; 25]);
        let err = memory.train(&patterns).unwrap_err();
        assert!(matches!(
            err,
            MemoryError::InvalidPattern(PatternDefect::NonBipolar { position: 0, .. })
        ));

        assert_eq!(memory.weights(), &before);
    }

    #[test]
    fn test_recall_rejects_wrong_length() {
        let memory = vowel_memory();
        let err = memory.recall(&Pattern::from_bipolar(&[1; 16]), 10).unwrap_err();
        assert!(matches!(err, MemoryError::InvalidPattern(PatternDefect::Length { .. })));
    }

    #[test]
    fn test_recall_rejects_zero_iterations() {
        let memory = vowel_memory();
        let a = &vowel_patterns()[0];
        assert_eq!(
            memory.recall(a, 0).unwrap_err(),
            MemoryError::InvalidIterationBound
        );
    }

    #[test]
    fn test_recall_is_deterministic() {
        let memory = vowel_memory();
        let query = vowel_patterns()[2].corrupted(5, 11);
        let config = RecallConfig {
            max_iterations: 50,
            record_trajectory: true,
        };
        let first = memory.recall_with(&query, &config).unwrap();
        let second = memory.recall_with(&query, &config).unwrap();
        assert_eq!(first.pattern, second.pattern);
        assert_eq!(first.iterations, second.iterations);
        assert_eq!(first.trajectory, second.trajectory);
        assert_eq!(first.trajectory.len(), first.iterations);
    }

    #[test]
    fn test_iterations_never_exceed_bound() {
        let memory = vowel_memory();
        for (seed, pattern) in vowel_patterns().iter().enumerate() {
            let query = pattern.corrupted(8, seed as u64);
            for bound in 1..=3 {
                let outcome = memory
                    .recall_with(&query, &RecallConfig::with_max_iterations(bound))
                    .unwrap();
                assert!(outcome.iterations <= bound);
                assert!(outcome.pattern.is_bipolar());
            }
        }
    }

    #[test]
    fn test_zero_query_breaks_ties_to_positive() {
        let memory = vowel_memory();
        let blank = Pattern::new(vec![0.0; 25]);

        let one_step = memory.recall(&blank, 1).unwrap();
        assert_eq!(one_step, Pattern::from_bipolar(&[1; 25]));

        let outcome = memory.recall_with(&blank, &RecallConfig::default()).unwrap();
        assert!(outcome.converged());
        assert_eq!(outcome.pattern, vowel_patterns()[3]);
    }

    #[test]
    fn test_partial_query_completes_a() {
        let memory = vowel_memory();
        let a = vowel_patterns()[0].clone();
        let mut values = a.values().to_vec();
        values[..5].fill(0.0);
        let outcome = memory
            .recall_with(&Pattern::new(values), &RecallConfig::default())
            .unwrap();
        assert_eq!(outcome.pattern, a);
    }

    #[test]
    fn test_two_cycle_exhausts_bound() {
        let mut memory = AssociativeMemory::new(2).unwrap();
        memory.train(&[Pattern::from_bipolar(&[1, 1])]).unwrap();

        let config = RecallConfig {
            max_iterations: 5,
            record_trajectory: true,
        };
        let outcome = memory
            .recall_with(&Pattern::from_bipolar(&[1, -1]), &config)
            .unwrap();
        assert_eq!(outcome.exit, RecallExit::Exhausted);
        assert_eq!(outcome.iterations, 5);
        assert_eq!(outcome.pattern, Pattern::from_bipolar(&[-1, 1]));
        assert_eq!(outcome.trajectory.len(), 5);
        assert_eq!(outcome.trajectory[1], Pattern::from_bipolar(&[1, -1]));
    }

    #[test]
    fn test_energy_lower_at_stored_pattern() {
        let memory = vowel_memory();
        let a = vowel_patterns()[0].clone();
        let noisy = a.flipped(1).flipped(7);
        assert!(memory.energy(&a).unwrap() < memory.energy(&noisy).unwrap());
        assert!(memory.energy(&Pattern::new(vec![1.0; 3])).is_err());
    }
}
