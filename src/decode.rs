//! The decoder and cycle detector: spec sections 4.6 and 4.7.
//!
//! [`decode`] reads a satisfying assignment back into a per-cell
//! `(label, direction type)` grid. [`detect_cycles`] then walks that grid
//! from each label's endpoints and reports, as blocking clauses, any
//! connected component that never touches an endpoint.

use ndarray::Array2;
use varisat::{Lit, Var};

use crate::cell::Cell;
use crate::geometry::{flip, valid_neighbors, DirType};
use crate::grid::Grid;
use crate::error::SolveError;
use crate::vars::VarTable;

/// One decoded cell: its label, and (for free cells only) the direction
/// type the solver chose for it.
#[derive(Clone, Copy, Debug)]
pub struct DecodedCell {
    pub label: usize,
    pub dir_type: Option<DirType>,
}

/// The grid as read back out of a satisfying SAT assignment.
#[derive(Clone, Debug)]
pub struct Decoded {
    cells: Array2<DecodedCell>,
}

impl Decoded {
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> DecodedCell {
        self.cells[(i, j)]
    }
}

/// Spec section 4.6: for each cell, exactly one value variable and (if
/// free) exactly one direction variable must be true in `model`. Violation
/// of that invariant is a bug in the encoder, not a malformed puzzle, so it
/// is surfaced as [`SolveError::EncoderInvariant`] rather than silently
/// picking a variable.
pub fn decode(model: &[Lit], grid: &Grid, vars: &VarTable) -> Result<Decoded, SolveError> {
    let true_vars: std::collections::HashSet<Var> = model.iter().filter(|lit| lit.is_positive()).map(|lit| lit.var()).collect();

    let mut cells = Array2::from_elem((grid.height(), grid.width()), DecodedCell { label: 0, dir_type: None });

    for (i, j, cell) in grid.iter_cells() {
        let mut label = None;
        for l in 0..grid.num_labels() {
            if true_vars.contains(&vars.value_var(i, j, l)) {
                if label.is_some() {
                    return Err(SolveError::EncoderInvariant { reason: format!("cell ({i},{j}) has more than one true value variable") });
                }
                label = Some(l);
            }
        }
        let label = label.ok_or_else(|| SolveError::EncoderInvariant { reason: format!("cell ({i},{j}) has no true value variable") })?;

        let dir_type = if cell.is_free() {
            let mut found = None;
            for (dir_type, var) in vars.dir_vars_at(i, j) {
                if true_vars.contains(&var) {
                    if found.is_some() {
                        return Err(SolveError::EncoderInvariant { reason: format!("free cell ({i},{j}) has more than one true direction variable") });
                    }
                    found = Some(dir_type);
                }
            }
            Some(found.ok_or_else(|| SolveError::EncoderInvariant { reason: format!("free cell ({i},{j}) has no true direction variable") })?)
        } else {
            None
        };

        cells[(i, j)] = DecodedCell { label, dir_type };
    }

    Ok(Decoded { cells })
}

/// Whether `cur` is connected, along the decoded path shapes, to the
/// neighbor reached via `dir_bit`. See spec section 4.7.
fn connected_via(cur: DecodedCell, neighbor: DecodedCell, dir_bit: u8) -> bool {
    match cur.dir_type {
        Some(dt) => dt & dir_bit != 0,
        None => matches!(neighbor.dir_type, Some(n_dt) if n_dt & flip(dir_bit) != 0),
    }
}

/// Follow the implicit path starting at `(start_i, start_j)`, per spec
/// section 4.7's `walk`. Returns the run of visited cells and whether it
/// closed into a cycle.
fn walk(decoded: &Decoded, visited: &mut Array2<bool>, start_i: usize, start_j: usize) -> Result<(Vec<(usize, usize)>, bool), SolveError> {
    let (width, height) = (decoded.width(), decoded.height());
    let mut run = Vec::new();
    let mut prev: Option<(usize, usize)> = None;
    let mut cur = (start_i, start_j);
    let mut is_cycle = false;

    loop {
        let (cur_i, cur_j) = cur;
        visited[(cur_i, cur_j)] = true;
        run.push(cur);

        let cell = decoded.get(cur_i, cur_j);
        let mut advanced = false;

        for (dir_bit, ni, nj) in valid_neighbors(width, height, cur_i, cur_j) {
            if Some((ni, nj)) == prev {
                continue;
            }

            let neighbor = decoded.get(ni, nj);
            if !connected_via(cell, neighbor, dir_bit) {
                continue;
            }

            if neighbor.label != cell.label {
                return Err(SolveError::CycleDetectorInvariant {
                    reason: format!("connected cells ({cur_i},{cur_j}) and ({ni},{nj}) carry different labels"),
                });
            }

            if visited[(ni, nj)] {
                is_cycle = true;
            } else {
                prev = Some(cur);
                cur = (ni, nj);
                advanced = true;
            }
            break;
        }

        if !advanced {
            break;
        }
    }

    Ok((run, is_cycle))
}

/// Spec section 4.7: trace every label's path from one of its endpoints,
/// then walk every still-unvisited cell — each such run must be a cycle,
/// which is forbidden by a blocking clause over its direction variables.
pub fn detect_cycles(decoded: &Decoded, grid: &Grid, vars: &VarTable) -> Result<Vec<Vec<Lit>>, SolveError> {
    let (width, height) = (decoded.width(), decoded.height());
    let mut visited = Array2::from_elem((height, width), false);

    for label in 0..grid.num_labels() {
        let (i, j) = grid
            .iter_cells()
            .find(|&(_, _, cell)| cell.label() == Some(label))
            .map(|(i, j, _)| (i, j))
            .ok_or_else(|| SolveError::EncoderInvariant { reason: format!("label {label} has no endpoint cell") })?;

        let (_, is_cycle) = walk(decoded, &mut visited, i, j)?;
        if is_cycle {
            return Err(SolveError::CycleDetectorInvariant { reason: format!("walk from endpoint of label {label} closed a cycle without reaching its partner") });
        }
    }

    let mut extra_clauses = Vec::new();

    for i in 0..height {
        for j in 0..width {
            if visited[(i, j)] {
                continue;
            }

            let (run, is_cycle) = walk(decoded, &mut visited, i, j)?;
            if !is_cycle {
                return Err(SolveError::CycleDetectorInvariant { reason: format!("walk from unreached cell ({i},{j}) neither reached an endpoint nor closed a cycle") });
            }

            let clause = run
                .iter()
                .map(|&(ri, rj)| {
                    let dir_type = decoded.get(ri, rj).dir_type.expect("cycle cells are always free");
                    vars.dir_var(ri, rj, dir_type).expect("decoded direction type is always eligible here").negative()
                })
                .collect();
            extra_clauses.push(clause);
        }
    }

    Ok(extra_clauses)
}
