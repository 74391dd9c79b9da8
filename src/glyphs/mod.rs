//! Glyphs: labelled bipolar patterns drawn on square grids.
//!
//! Cells map `#` → +1 (filled), `.` → -1 (blank), `?` → 0 (unknown).

pub mod catalog;
pub mod grid;
