//! The CNF encoder: turns a [`Grid`] plus its [`VarTable`] into the three
//! clause families from spec sections 4.3 and 4.4 — value clauses,
//! direction-variable construction (already done by [`VarTable::allocate`]),
//! and direction clauses.

use varisat::Lit;

use crate::cell::Cell;
use crate::geometry::{all_neighbors, no_two, valid_neighbors, valid_pos};
use crate::grid::Grid;
use crate::vars::VarTable;

/// All clauses for `grid` given its already-allocated `vars`. Produces the
/// same clause list on every call for the same `(grid, vars)`, in the same
/// order (spec property V5).
pub fn encode(grid: &Grid, vars: &VarTable) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::new();
    encode_value_clauses(grid, vars, &mut clauses);
    encode_direction_clauses(grid, vars, &mut clauses);
    clauses
}

/// Spec section 4.3: one-hot label per cell, endpoint pins, and the
/// endpoint-neighbor degree-one constraint.
fn encode_value_clauses(grid: &Grid, vars: &VarTable, clauses: &mut Vec<Vec<Lit>>) {
    let (width, height, num_labels) = (grid.width(), grid.height(), vars.num_labels());

    for (i, j, cell) in grid.iter_cells() {
        match cell {
            Cell::Endpoint(label) => {
                clauses.push(vec![vars.value_var(i, j, label).positive()]);
                for other in 0..num_labels {
                    if other != label {
                        clauses.push(vec![vars.value_var(i, j, other).negative()]);
                    }
                }

                let same_label_neighbors: Vec<Lit> = valid_neighbors(width, height, i, j)
                    .into_iter()
                    .map(|(_, ni, nj)| vars.value_var(ni, nj, label).positive())
                    .collect();

                clauses.push(same_label_neighbors.clone());
                clauses.extend(no_two(&same_label_neighbors).into_iter().map(|[a, b]| vec![a, b]));
            }
            Cell::Free => {
                let cell_value_vars: Vec<Lit> = (0..num_labels).map(|label| vars.value_var(i, j, label).positive()).collect();
                clauses.push(cell_value_vars.clone());
                clauses.extend(no_two(&cell_value_vars).into_iter().map(|[a, b]| vec![a, b]));
            }
        }
    }
}

/// Spec section 4.4: one-hot direction per free cell, plus the
/// direction-implies-label-(in)equality biconditionals.
fn encode_direction_clauses(grid: &Grid, vars: &VarTable, clauses: &mut Vec<Vec<Lit>>) {
    let (width, height, num_labels) = (grid.width(), grid.height(), vars.num_labels());

    for (i, j, cell) in grid.iter_cells() {
        if !cell.is_free() {
            continue;
        }

        let cell_dir_vars: Vec<Lit> = vars.dir_vars_at(i, j).map(|(_, var)| var.positive()).collect();
        clauses.push(cell_dir_vars.clone());
        clauses.extend(no_two(&cell_dir_vars).into_iter().map(|[a, b]| vec![a, b]));

        for label in 0..num_labels {
            let value_here = vars.value_var(i, j, label);

            for (dir_bit, ni, nj) in all_neighbors(i, j) {
                for (dir_type, dir_var) in vars.dir_vars_at(i, j) {
                    if dir_type & dir_bit != 0 {
                        // in-bounds by construction: dir_type is only eligible when every
                        // bit it sets has an in-bounds neighbor (see VarTable::allocate).
                        let value_there = vars.value_var(ni as usize, nj as usize, label);
                        clauses.push(vec![dir_var.negative(), value_here.negative(), value_there.positive()]);
                        clauses.push(vec![dir_var.negative(), value_here.positive(), value_there.negative()]);
                    } else if valid_pos(width, height, ni, nj) {
                        let value_there = vars.value_var(ni as usize, nj as usize, label);
                        clauses.push(vec![dir_var.negative(), value_here.negative(), value_there.negative()]);
                    }
                }
            }
        }
    }
}
