#![warn(missing_docs)]

//! # `numberlink-sat`
//!
//! A solver for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) and
//! its Flow Free variants, built by reducing a puzzle instance to a Boolean
//! satisfiability problem. Parse a puzzle with [`parse::parse`], hand the
//! resulting [`grid::Grid`] to [`solver::solve`], then render the decoded
//! result with [`render::render`].
//!
//! # Internals
//!
//! Earlier work in this space, such as
//! [Matt Zucker's approach](https://mzucker.github.io/2016/09/02/eating-sat-flavored-crow.html),
//! encodes each cell's local path shape directly rather than routing through
//! an affiliation graph. That's the approach taken here:
//!
//! 1. Every cell gets one *value* variable per label it could carry, pinned
//!    for endpoints and one-hot for everything else ([`encoder`]).
//! 2. Every free cell also gets one *direction* variable per path shape
//!    (`─`, `│`, or one of the four elbows) it could take, one-hot, with
//!    biconditionals tying the chosen shape to whether each neighbor shares
//!    its label ([`encoder`]).
//! 3. The resulting CNF is hard to free of unwanted cycles up front — a
//!    satisfying assignment may still decode to a closed loop untouched by
//!    any endpoint — so [`solver::solve`] runs an incremental refinement
//!    loop: solve, decode ([`decode::decode`]), look for cycles
//!    ([`decode::detect_cycles`]), and if any are found, add a blocking
//!    clause per cycle and solve again.
//!
//! The loop terminates either because a cycle-free model was found, or
//! because the accumulated blocking clauses make the instance unsatisfiable.

pub use decode::Decoded;
pub use error::SolveError;
pub use grid::Grid;
pub use parse::{parse, ParseError};
pub use render::render;
pub use solver::{solve, Solution};

pub mod cell;
pub mod decode;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod parse;
pub mod render;
pub mod solver;
pub mod vars;

mod tests;
