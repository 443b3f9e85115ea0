//! The variable allocator: assigns dense, stable SAT variable identifiers
//! to value variables `v(i,j,l)` and direction variables `d(i,j,tau)`.
//!
//! Numbering is fixed at allocation time (spec section 3): value variables
//! occupy a contiguous block of size `H*W*L` first, then direction
//! variables are handed out to free cells in row-major order and, within a
//! cell, in the fixed [`crate::geometry::DIR_TYPES`] order. Every later
//! round of the refinement driver (`crate::solver`) only ever references
//! variables allocated here; it never allocates new ones.

use ndarray::Array2;
use varisat::Var;

use crate::geometry::{neighbor_mask, DirType, DIR_TYPES};
use crate::grid::Grid;

/// Per-cell lookup from direction type to its SAT variable, for free cells.
/// Backed by a fixed-size array rather than a map: at most six entries ever
/// exist (one per [`DIR_TYPES`](crate::geometry::DIR_TYPES) entry), so a
/// small array indexed by position beats hashing.
#[derive(Clone, Copy, Default)]
pub struct CellDirVars {
    slots: [Option<Var>; 6],
}

impl CellDirVars {
    /// The variable for `dir_type` at this cell, if that shape is eligible
    /// here (i.e. every bit it sets corresponds to an in-bounds neighbor).
    pub fn get(&self, dir_type: DirType) -> Option<Var> {
        let idx = DIR_TYPES.iter().position(|&d| d == dir_type)?;
        self.slots[idx]
    }

    /// All `(direction type, variable)` pairs eligible at this cell, in the
    /// fixed `DIR_TYPES` order.
    pub fn iter(&self) -> impl Iterator<Item = (DirType, Var)> + '_ {
        DIR_TYPES.iter().zip(self.slots.iter()).filter_map(|(&dt, slot)| slot.map(|v| (dt, v)))
    }
}

/// The full set of SAT variables allocated for a [`Grid`]: one value
/// variable per `(cell, label)` pair and one direction variable per
/// `(free cell, eligible direction type)` pair.
pub struct VarTable {
    width: usize,
    num_labels: usize,
    value_total: usize,
    dir_vars: Array2<CellDirVars>,
    num_vars: usize,
}

impl VarTable {
    /// Allocate variables for `grid`, following spec section 4.2: value
    /// variables first, then direction variables in row-major/DIR_TYPES
    /// order.
    pub fn allocate(grid: &Grid) -> Self {
        let (width, height, num_labels) = (grid.width(), grid.height(), grid.num_labels());
        let value_total = height * width * num_labels;

        let mut next = value_total;
        let mut dir_vars = Array2::from_elem((height, width), CellDirVars::default());

        for i in 0..height {
            for j in 0..width {
                if !grid.cell(i, j).is_free() {
                    continue;
                }
                let mask = neighbor_mask(width, height, i, j);
                let mut slots = [None; 6];
                for (idx, &dir_type) in DIR_TYPES.iter().enumerate() {
                    if mask & dir_type == dir_type {
                        slots[idx] = Some(Var::from_index(next));
                        next += 1;
                    }
                }
                dir_vars[(i, j)] = CellDirVars { slots };
            }
        }

        Self {
            width,
            num_labels,
            value_total,
            dir_vars,
            num_vars: next,
        }
    }

    /// `v(i,j,l)`, per spec section 3: `(i*W + j)*L + l` (0-based; the
    /// DIMACS form varisat assigns is this plus one).
    pub fn value_var(&self, i: usize, j: usize, label: usize) -> Var {
        debug_assert!(label < self.num_labels);
        Var::from_index((i * self.width + j) * self.num_labels + label)
    }

    /// `d(i,j,tau)`, or `None` if `tau` is not eligible at `(i, j)` (e.g. the
    /// cell is an endpoint, or the shape would run off the grid).
    pub fn dir_var(&self, i: usize, j: usize, dir_type: DirType) -> Option<Var> {
        self.dir_vars[(i, j)].get(dir_type)
    }

    /// All direction variables eligible at a free cell, in `DIR_TYPES`
    /// order.
    pub fn dir_vars_at(&self, i: usize, j: usize) -> impl Iterator<Item = (DirType, Var)> + '_ {
        self.dir_vars[(i, j)].iter()
    }

    /// Size of the grid's label alphabet, `L`.
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// Total number of value variables, `H*W*L`.
    pub fn value_total(&self) -> usize {
        self.value_total
    }

    /// Total number of variables allocated (value and direction).
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;
    use crate::cell::Cell;

    fn grid_2x2_diag() -> Grid {
        let mut cells = Array2::from_elem((2, 2), Cell::Free);
        cells[(0, 0)] = Cell::Endpoint(0);
        cells[(1, 1)] = Cell::Endpoint(0);
        Grid::new(cells, vec!['A'])
    }

    #[test]
    fn value_vars_are_dense_and_stable() {
        let grid = grid_2x2_diag();
        let vars = VarTable::allocate(&grid);
        assert_eq!(vars.value_total(), 2 * 2 * 1);
        assert_eq!(vars.value_var(0, 0, 0).index(), 0);
        assert_eq!(vars.value_var(0, 1, 0).index(), 1);
        assert_eq!(vars.value_var(1, 0, 0).index(), 2);
        assert_eq!(vars.value_var(1, 1, 0).index(), 3);
    }

    #[test]
    fn free_corner_cells_have_two_direction_types() {
        let grid = grid_2x2_diag();
        let vars = VarTable::allocate(&grid);
        // (0,1) and (1,0) are free corners with exactly two in-bounds neighbors:
        // only one direction type (the one matching both) is eligible.
        assert_eq!(vars.dir_vars_at(0, 1).count(), 1);
        assert_eq!(vars.dir_vars_at(1, 0).count(), 1);
    }

    #[test]
    fn endpoints_have_no_direction_variables() {
        let grid = grid_2x2_diag();
        let vars = VarTable::allocate(&grid);
        assert!(vars.dir_vars_at(0, 0).next().is_none());
    }

    #[test]
    fn direction_vars_start_after_value_vars() {
        let grid = grid_2x2_diag();
        let vars = VarTable::allocate(&grid);
        let (_, first_dir_var) = vars.dir_vars_at(0, 1).next().unwrap();
        assert_eq!(first_dir_var.index(), vars.value_total());
    }
}
