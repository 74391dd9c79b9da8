//! Text grid codec for patterns.
//!
//! A grid is a block of rows, each row a run of cells:
//!
//! ```text
//! .##..
//! #..#.
//! ####.
//! #..#.
//! #..#.
//! ```
//!
//! Rows are read top to bottom and concatenated row-major. Whitespace
//! inside a row is ignored, so `# . #` and `#.#` are the same row.
//!
//! Glyph files hold several labelled grids:
//!
//! ```text
//! // comment
//! > A
//! .##..
//! ...
//! > E
//! ####.
//! ...
//! ```

use anyhow::{bail, Context, Result};

use crate::config::{CELL_OFF, CELL_ON, CELL_UNKNOWN};
use crate::core::pattern::Pattern;
use crate::glyphs::catalog::Glyph;

fn cell_value(c: char) -> Option<f64> {
    match c {
        CELL_ON => Some(1.0),
        CELL_OFF => Some(-1.0),
        CELL_UNKNOWN => Some(0.0),
        _ => None,
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>> {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            cell_value(c).with_context(|| {
                format!("line {}: unexpected cell {:?} (use '#', '.' or '?')", line_no, c)
            })
        })
        .collect()
}

fn rows_to_pattern(rows: &[(usize, Vec<f64>)]) -> Result<Pattern> {
    let Some((_, first)) = rows.first() else {
        bail!("grid has no rows");
    };
    let width = first.len();
    let mut values = Vec::with_capacity(width * rows.len());
    for (line_no, row) in rows {
        if row.len() != width {
            bail!(
                "line {}: row has {} cells, expected {}",
                line_no,
                row.len(),
                width
            );
        }
        values.extend_from_slice(row);
    }
    Ok(Pattern::new(values))
}

/// Parse one grid. Blank lines are skipped.
pub fn parse_grid(text: &str) -> Result<Pattern> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        rows.push((i + 1, parse_row(line, i + 1)?));
    }
    rows_to_pattern(&rows)
}

/// Render a pattern as `side`-wide rows. Values ≥ 0 draw as filled.
pub fn render_grid(pattern: &Pattern, side: usize) -> String {
    let side = side.max(1);
    let cells: Vec<char> = pattern
        .values()
        .iter()
        .map(|&v| if v >= 0.0 { CELL_ON } else { CELL_OFF })
        .collect();
    cells
        .chunks(side)
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a labelled glyph file. All glyphs must have the same length.
pub fn parse_glyph_file(text: &str) -> Result<Vec<Glyph>> {
    let mut glyphs = Vec::new();
    let mut label: Option<String> = None;
    let mut rows: Vec<(usize, Vec<f64>)> = Vec::new();

    let mut finish = |label: Option<String>, rows: &mut Vec<(usize, Vec<f64>)>| -> Result<()> {
        if let Some(label) = label {
            let pattern =
                rows_to_pattern(rows).with_context(|| format!("glyph {:?}", label))?;
            glyphs.push(Glyph::new(label, pattern));
        }
        rows.clear();
        Ok(())
    };

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if let Some(name) = line.strip_prefix('>') {
            let name = name.trim();
            if name.is_empty() {
                bail!("line {}: glyph label is empty", line_no);
            }
            finish(label.take(), &mut rows)?;
            label = Some(name.to_string());
            continue;
        }
        if label.is_none() {
            bail!("line {}: grid row before any '> label' line", line_no);
        }
        rows.push((line_no, parse_row(line, line_no)?));
    }
    finish(label.take(), &mut rows)?;

    if glyphs.is_empty() {
        bail!("glyph file defines no glyphs");
    }
    let size = glyphs[0].pattern.len();
    if let Some(odd) = glyphs.iter().find(|g| g.pattern.len() != size) {
        bail!(
            "glyph {:?} has {} cells, expected {} like {:?}",
            odd.label,
            odd.pattern.len(),
            size,
            glyphs[0].label
        );
    }
    Ok(glyphs)
}
