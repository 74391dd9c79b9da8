//! # hopfield-recall
//!
//! A classical Hopfield associative memory: Hebbian training over bipolar
//! patterns and synchronous sign-relaxation recall to a fixed point.
//!
//! ## Components
//!
//! 1. **Pattern**: fixed-length vector with the sign activation
//! 2. **WeightMatrix**: symmetric, zero-diagonal correlation matrix
//! 3. **AssociativeMemory**: `train` / `recall` over one weight matrix
//! 4. **Glyphs**: text grid codec and the 5×5 vowel catalog
//!
//! ## Example
//!
//! ```rust
//! use hopfield_recall::glyphs::catalog::vowels;
//! use hopfield_recall::memory::associative::AssociativeMemory;
//!
//! let glyphs = vowels();
//! let patterns: Vec<_> = glyphs.iter().map(|g| g.pattern.clone()).collect();
//!
//! let mut memory = AssociativeMemory::new(25).unwrap();
//! memory.train(&patterns).unwrap();
//!
//! let noisy = patterns[0].flipped(1).flipped(7);
//! let recalled = memory.recall(&noisy, 100).unwrap();
//! assert_eq!(recalled, patterns[0]);
//! ```

pub mod core;
pub mod error;
pub mod glyphs;
pub mod memory;

/// Crate-wide constants.
pub mod config {
    /// Default bound on relaxation steps per recall.
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Side length of the built-in glyph grids.
    pub const GLYPH_SIDE: usize = 5;

    /// Pattern size of the built-in glyphs (GLYPH_SIDE × GLYPH_SIDE).
    pub const GLYPH_SIZE: usize = GLYPH_SIDE * GLYPH_SIDE; // 25

    /// Grid cell drawn for +1.
    pub const CELL_ON: char = '#';

    /// Grid cell drawn for -1.
    pub const CELL_OFF: char = '.';

    /// Grid cell for an unknown value (parsed as 0).
    pub const CELL_UNKNOWN: char = '?';
}
