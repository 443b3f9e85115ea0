//! Renders a solved [`Decoded`] grid back to text. Spec section 6.4; glyphs
//! come from [`crate::geometry::glyph`], the `DIR_LOOKUP` table transcribed
//! from `original_source/constants.py`.

use std::fmt::Write as _;

use crate::decode::Decoded;
use crate::geometry::glyph;
use crate::grid::Grid;

/// Render `decoded` as one line per row: an endpoint cell prints its label
/// character as parsed, a free cell prints the box-drawing glyph for the
/// direction type the solver chose for it, and cells within a row are
/// separated by a single space (spec section 6).
pub fn render(decoded: &Decoded, grid: &Grid) -> String {
    let mut out = String::with_capacity((decoded.width() * 2 + 1) * decoded.height());

    for i in 0..decoded.height() {
        for j in 0..decoded.width() {
            if j > 0 {
                out.push(' ');
            }
            let cell = decoded.get(i, j);
            let ch = match cell.dir_type {
                Some(dir_type) => glyph(dir_type),
                None => grid.label_char(cell.label),
            };
            let _ = write!(out, "{ch}");
        }
        out.push('\n');
    }

    out
}
