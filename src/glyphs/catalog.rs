//! Built-in vowel glyphs and nearest-glyph classification.

use crate::config::GLYPH_SIZE;
use crate::core::pattern::Pattern;

/// A labelled pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub label: String,
    pub pattern: Pattern,
}

impl Glyph {
    pub fn new(label: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            label: label.into(),
            pattern,
        }
    }
}

/// Closest glyph to a pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphMatch {
    /// Index into the glyph slice.
    pub index: usize,
    pub label: String,
    /// Hamming distance to the glyph.
    pub distance: usize,
}

impl GlyphMatch {
    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }
}

#[rustfmt::skip]
const VOWEL_A: [i8; GLYPH_SIZE] = [
    -1,  1,  1, -1, -1,
     1, -1, -1,  1, -1,
     1,  1,  1,  1, -1,
     1, -1, -1,  1, -1,
     1, -1, -1,  1, -1,
];

#[rustfmt::skip]
const VOWEL_E: [i8; GLYPH_SIZE] = [
     1,  1,  1,  1, -1,
     1, -1, -1, -1, -1,
     1,  1,  1,  1, -1,
     1, -1, -1, -1, -1,
     1,  1,  1,  1, -1,
];

#[rustfmt::skip]
const VOWEL_I: [i8; GLYPH_SIZE] = [
     1,  1,  1,  1,  1,
    -1, -1,  1, -1, -1,
    -1, -1,  1, -1, -1,
    -1, -1,  1, -1, -1,
     1,  1,  1,  1,  1,
];

// O and U share one bitmap in the reference data set.
#[rustfmt::skip]
const VOWEL_O: [i8; GLYPH_SIZE] = [
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1,  1,  1,  1,  1,
];

#[rustfmt::skip]
const VOWEL_U: [i8; GLYPH_SIZE] = [
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1,  1,  1,  1,  1,
];

/// The five 5×5 vowel glyphs A, E, I, O, U.
pub fn vowels() -> Vec<Glyph> {
    [
        ("A", &VOWEL_A),
        ("E", &VOWEL_E),
        ("I", &VOWEL_I),
        ("O", &VOWEL_O),
        ("U", &VOWEL_U),
    ]
    .into_iter()
    .map(|(label, bits)| Glyph::new(label, Pattern::from_bipolar(bits)))
    .collect()
}

/// Nearest glyph by Hamming distance; the first one wins ties.
/// Glyphs of a different length are skipped.
pub fn classify(pattern: &Pattern, glyphs: &[Glyph]) -> Option<GlyphMatch> {
    glyphs
        .iter()
        .enumerate()
        .filter(|(_, g)| g.pattern.len() == pattern.len())
        .map(|(index, g)| (index, g, g.pattern.hamming_distance(pattern)))
        .min_by_key(|&(index, _, distance)| (distance, index))
        .map(|(index, g, distance)| GlyphMatch {
            index,
            label: g.label.clone(),
            distance,
        })
}
