//! The [`Cell`] type: what a grid square is before solving.

/// A single grid square as read from the puzzle, before any solving has
/// happened. Endpoints carry the index of their label into the grid's label
/// alphabet; free cells carry nothing until the solver assigns one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cell {
    /// A flow endpoint labeled with the given index into the grid's label
    /// alphabet. Must have graph-degree one in any solution.
    Endpoint(usize),
    /// An unlabeled cell. Must have graph-degree two in any solution.
    Free,
}

impl Cell {
    /// The label index of this cell, if it is an endpoint.
    pub fn label(&self) -> Option<usize> {
        match self {
            Cell::Endpoint(label) => Some(*label),
            Cell::Free => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }
}
