//! Grid geometry: direction bits, direction types, and neighbor enumeration.
//!
//! Every iteration order here (direction types, neighbor directions) is
//! fixed and must stay fixed — the variable allocator in [`crate::vars`]
//! depends on it for stable, reproducible numbering across runs.

use itertools::Itertools;

/// A single-bit flag naming one of the four cardinal directions a path can
/// run in. Combined, two of these make up a [`DirType`].
pub type DirBit = u8;

pub const LEFT: DirBit = 1;
pub const RIGHT: DirBit = 2;
pub const TOP: DirBit = 4;
pub const BOTTOM: DirBit = 8;

/// `(direction bit, delta row, delta col)`, in the fixed order LEFT, RIGHT,
/// TOP, BOTTOM. Downstream code must preserve this order for determinism.
pub const DELTAS: [(DirBit, isize, isize); 4] = [
    (LEFT, 0, -1),
    (RIGHT, 0, 1),
    (TOP, -1, 0),
    (BOTTOM, 1, 0),
];

/// Maps a direction bit to its opposite (LEFT<->RIGHT, TOP<->BOTTOM).
pub fn flip(bit: DirBit) -> DirBit {
    match bit {
        LEFT => RIGHT,
        RIGHT => LEFT,
        TOP => BOTTOM,
        BOTTOM => TOP,
        _ => unreachable!("not a single direction bit: {bit}"),
    }
}

/// One of the six shapes a free path cell can take, each the bitwise-or of
/// the two direction bits it connects to. No shape lets a cell connect to
/// more than two neighbors: every path cell has degree exactly two.
pub type DirType = u8;

pub const LR: DirType = LEFT | RIGHT;
pub const TB: DirType = TOP | BOTTOM;
pub const TL: DirType = TOP | LEFT;
pub const TR: DirType = TOP | RIGHT;
pub const BL: DirType = BOTTOM | LEFT;
pub const BR: DirType = BOTTOM | RIGHT;

/// All six direction types, in the fixed iteration order the variable
/// allocator and encoder rely on.
pub const DIR_TYPES: [DirType; 6] = [LR, TB, TL, TR, BL, BR];

/// Glyph used to render a free cell carrying this direction type.
pub fn glyph(dir_type: DirType) -> char {
    match dir_type {
        LR => '─',
        TB => '│',
        TL => '┘',
        TR => '└',
        BL => '┐',
        BR => '┌',
        _ => unreachable!("not a direction type: {dir_type}"),
    }
}

/// All four neighbors of `(i, j)`, in-bounds or not, in the fixed DELTAS
/// order. Indices are returned as signed so callers can cheaply check
/// bounds themselves.
pub fn all_neighbors(i: usize, j: usize) -> [(DirBit, isize, isize); 4] {
    DELTAS.map(|(bit, di, dj)| (bit, i as isize + di, j as isize + dj))
}

/// Whether `(i, j)` lies within a `height`-row by `width`-column grid.
pub fn valid_pos(width: usize, height: usize, i: isize, j: isize) -> bool {
    i >= 0 && (i as usize) < height && j >= 0 && (j as usize) < width
}

/// [`all_neighbors`] filtered down to neighbors actually on the grid.
pub fn valid_neighbors(width: usize, height: usize, i: usize, j: usize) -> Vec<(DirBit, usize, usize)> {
    all_neighbors(i, j)
        .into_iter()
        .filter(|&(_, ni, nj)| valid_pos(width, height, ni, nj))
        .map(|(bit, ni, nj)| (bit, ni as usize, nj as usize))
        .collect()
}

/// The bitwise-or of the direction bits of every in-bounds neighbor of
/// `(i, j)`. A direction type is eligible for this cell iff its bits are a
/// subset of this mask.
pub fn neighbor_mask(width: usize, height: usize, i: usize, j: usize) -> DirBit {
    valid_neighbors(width, height, i, j)
        .into_iter()
        .fold(0, |mask, (bit, _, _)| mask | bit)
}

/// Clauses expressing "at most one of `vars` is true": `(¬a ∨ ¬b)` for every
/// pair `a < b` in iteration order.
pub fn no_two<T: Copy>(vars: &[T]) -> Vec<[T; 2]> {
    vars.iter().copied().tuple_combinations().map(|(a, b)| [a, b]).collect()
}
