//! Error types for the solving pipeline. Spec section 4.8 and section 7.

use thiserror::Error;

use crate::decode::Decoded;

/// Failure reasons surfaced by the refinement driver, decoder, or cycle
/// detector. See spec sections 4.8 and 7.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The SAT instance, after whatever blocking clauses have accumulated so
    /// far, has no model: the puzzle is unsolvable under this encoding.
    #[error("puzzle is unsolvable")]
    Unsat,

    /// The solver returned a model that violates the "exactly one true
    /// value/direction variable per cell" invariant. This indicates a bug
    /// in the encoder, not a malformed puzzle.
    #[error("encoder invariant violated: {reason}")]
    EncoderInvariant { reason: String },

    /// A walk from an endpoint did not terminate at its paired endpoint, or
    /// a walk from an unreached cell did not close a cycle — in both cases
    /// a fork the encoding was supposed to preclude. See spec section 9's
    /// ambiguity (b).
    #[error("cycle detector invariant violated: {reason}")]
    CycleDetectorInvariant { reason: String },

    /// The refinement loop used up its caller-supplied repair budget before
    /// converging. The decoded grid from the last round is attached so the
    /// caller can inspect how far the solver got.
    #[error("refinement exceeded its repair budget")]
    BudgetExceeded { decoded: Box<Decoded> },
}
