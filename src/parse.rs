//! Parses the dense-row puzzle text format into a [`Grid`]. Spec section 6.1;
//! the scan itself mirrors `original_source/utils.py::parse_puzzle`.

use std::collections::HashMap;

use ndarray::Array2;
use thiserror::Error;

use crate::cell::Cell;
use crate::grid::Grid;

/// Failure reasons for [`parse`]. Each corresponds to a check
/// `original_source/utils.py::parse_puzzle` already performs.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("puzzle text has no rows")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("label {label:?} appears more than twice")]
    TooManyEndpoints { label: char },

    #[error("label {label:?} has only one endpoint")]
    UnpairedEndpoint { label: char },
}

/// Parse `text` as a dense-row puzzle: one character per cell, no separators.
/// An alphanumeric character is a flow endpoint; everything else (`.`, ` `,
/// `-`, ...) is a free cell. The first two occurrences of a label are its
/// endpoints; a third occurrence, or only one ever appearing, is an error.
///
/// Blank lines are dropped before measuring row width, so a trailing
/// newline at end of file does not register as a ragged last row.
pub fn parse(text: &str) -> Result<Grid, ParseError> {
    let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    let height = rows.len();
    let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
    if height == 0 || width == 0 {
        return Err(ParseError::EmptyGrid);
    }

    let mut cells = Array2::from_elem((height, width), Cell::Free);
    let mut label_chars: Vec<char> = Vec::new();
    let mut label_index: HashMap<char, usize> = HashMap::new();
    let mut paired: Vec<bool> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(ParseError::RaggedRow { row: i, expected: width, found });
        }

        for (j, ch) in row.chars().enumerate() {
            if !ch.is_alphanumeric() {
                continue;
            }

            let label = match label_index.get(&ch) {
                Some(&label) => {
                    if paired[label] {
                        return Err(ParseError::TooManyEndpoints { label: ch });
                    }
                    paired[label] = true;
                    label
                }
                None => {
                    let label = label_chars.len();
                    label_chars.push(ch);
                    label_index.insert(ch, label);
                    paired.push(false);
                    label
                }
            };

            cells[(i, j)] = Cell::Endpoint(label);
        }
    }

    if let Some(label) = paired.iter().position(|&done| !done) {
        return Err(ParseError::UnpairedEndpoint { label: label_chars[label] });
    }

    Ok(Grid::new(cells, label_chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_trivial_grid() {
        let grid = parse("A.\n.A\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.cell(0, 0), Cell::Endpoint(0));
        assert_eq!(grid.cell(1, 1), Cell::Endpoint(0));
        assert_eq!(grid.cell(0, 1), Cell::Free);
        assert_eq!(grid.label_char(0), 'A');
    }

    #[test]
    fn assigns_labels_in_first_occurrence_order() {
        let grid = parse("B.A\n...\nA.B\n").unwrap();
        assert_eq!(grid.label_char(0), 'B');
        assert_eq!(grid.label_char(1), 'A');
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse("A.\n.A.\n").unwrap_err();
        assert!(matches!(err, ParseError::RaggedRow { row: 1, expected: 2, found: 3 }));
    }

    #[test]
    fn rejects_a_third_occurrence_of_a_label() {
        let err = parse("A.A\n.A.\n...\n").unwrap_err();
        assert!(matches!(err, ParseError::TooManyEndpoints { label: 'A' }));
    }

    #[test]
    fn rejects_a_label_with_only_one_endpoint() {
        let err = parse("A.\n..\n").unwrap_err();
        assert!(matches!(err, ParseError::UnpairedEndpoint { label: 'A' }));
    }

    #[test]
    fn rejects_empty_text() {
        assert!(matches!(parse(""), Err(ParseError::EmptyGrid)));
    }

    #[test]
    fn non_alnum_markers_are_all_free() {
        let grid = parse("A.-\n- A\n").unwrap();
        assert_eq!(grid.cell(0, 1), Cell::Free);
        assert_eq!(grid.cell(0, 2), Cell::Free);
        assert_eq!(grid.cell(1, 0), Cell::Free);
        assert_eq!(grid.cell(1, 1), Cell::Free);
    }
}
