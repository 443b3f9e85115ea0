//! The refinement driver: spec section 4.5's INIT/SOLVE/DECODE/CHECK state
//! machine, built around an incremental [`varisat::Solver`] session.
//!
//! The solver session and the growing clause list are confined entirely to
//! [`solve`]; nothing else is permitted to mutate them (spec section 5).

use varisat::{ExtendFormula, Solver};

use crate::decode::{decode, detect_cycles, Decoded};
use crate::encoder::encode;
use crate::error::SolveError;
use crate::grid::Grid;
use crate::vars::VarTable;

/// A solved grid plus how many cycle-elimination rounds it took.
pub struct Solution {
    pub decoded: Decoded,
    pub repairs: usize,
}

/// Solve `grid`, optionally giving up after `repair_budget` cycle-repair
/// rounds (spec section 4.8's optional `BudgetExceeded`). `None` means no
/// limit.
pub fn solve(grid: &Grid, repair_budget: Option<usize>) -> Result<Solution, SolveError> {
    let vars = VarTable::allocate(grid);
    let clauses = encode(grid, &vars);
    log::debug!("encoded {} clauses over {} variables", clauses.len(), vars.num_vars());

    let mut solver = Solver::new();
    for clause in &clauses {
        solver.add_clause(clause);
    }

    let mut repairs = 0usize;

    loop {
        let satisfiable = solver.solve().unwrap_or(false);
        if !satisfiable {
            log::info!("solver reported unsatisfiable after {repairs} repair(s)");
            return Err(SolveError::Unsat);
        }

        let model = solver.model().ok_or(SolveError::Unsat)?;
        let decoded = decode(&model, grid, &vars)?;
        let extra_clauses = detect_cycles(&decoded, grid, &vars)?;

        if extra_clauses.is_empty() {
            log::info!("solved after {repairs} repair(s)");
            return Ok(Solution { decoded, repairs });
        }

        log::debug!("round {repairs}: {} cycle(s) detected, adding blocking clauses", extra_clauses.len());

        if let Some(budget) = repair_budget {
            if repairs >= budget {
                return Err(SolveError::BudgetExceeded { decoded: Box::new(decoded) });
            }
        }

        for clause in &extra_clauses {
            solver.add_clause(clause);
        }
        repairs += 1;
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;
    use crate::cell::Cell;

    fn grid_from_rows(rows: &[&str], labels: &[char]) -> Grid {
        let height = rows.len();
        let width = rows[0].chars().count();
        let mut cells = Array2::from_elem((height, width), Cell::Free);
        for (i, row) in rows.iter().enumerate() {
            for (j, ch) in row.chars().enumerate() {
                if let Some(label) = labels.iter().position(|&c| c == ch) {
                    cells[(i, j)] = Cell::Endpoint(label);
                }
            }
        }
        Grid::new(cells, labels.to_vec())
    }

    #[test]
    fn trivial_2x2_has_zero_repairs() {
        let grid = grid_from_rows(&["A.", ".A"], &['A']);
        let solution = solve(&grid, None).unwrap();
        assert_eq!(solution.repairs, 0);
        assert_eq!(solution.decoded.get(0, 1).label, 0);
        assert_eq!(solution.decoded.get(1, 0).label, 0);
    }

    #[test]
    fn unsolvable_3x3_reports_unsat() {
        // A's endpoints are split by B sitting right between them, and B's other
        // endpoint blocks the only detour around the middle row.
        let grid = grid_from_rows(&["ABA", "...", ".B."], &['A', 'B']);
        let err = solve(&grid, None).unwrap_err();
        assert!(matches!(err, SolveError::Unsat));
    }

    #[test]
    fn two_labels_no_repairs_needed() {
        // Two independent vertical columns: each endpoint's degree-one
        // constraint forces its middle cell to match it, and forces the
        // other column's middle cell off it, so TB is the only way either
        // free cell can satisfy the direction clauses. No cycle is even
        // geometrically possible with two free cells.
        let grid = grid_from_rows(&["AB", "..", "AB"], &['A', 'B']);
        let solution = solve(&grid, None).unwrap();
        assert_eq!(solution.repairs, 0);
        assert_eq!(solution.decoded.get(1, 0).label, 0);
        assert_eq!(solution.decoded.get(1, 1).label, 1);
    }

    #[test]
    fn non_square_grid_keeps_width_and_height_separate() {
        // Seven independent vertical columns, one label apiece: confirms the
        // encoder and decoder keep width and height distinct rather than
        // transposing a non-square grid.
        let grid = grid_from_rows(&["ABCDEFG", ".......", ".......", "ABCDEFG"], &['A', 'B', 'C', 'D', 'E', 'F', 'G']);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.width(), 7);
        let solution = solve(&grid, None).unwrap();
        assert_eq!(solution.decoded.height(), 4);
        assert_eq!(solution.decoded.width(), 7);
    }
}
