//! Ways building, solving and verifying can fail.

use thiserror::Error;

use crate::location::Location;

/// Reasons a [`Solver`](crate::search::Solver) may fail to produce a path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Every branch was explored and none satisfied all constraints.
    #[error("no path satisfies every constraint")]
    NoSolution,
    /// The time limit passed or the search was cancelled before it finished.
    #[error("search aborted before completion")]
    Aborted,
    /// The puzzle is malformed; no search was attempted.
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(#[from] InvalidPuzzle),
}

/// Structural problems found before a search begins.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum InvalidPuzzle {
    /// There is nowhere for a path to begin.
    #[error("puzzle has no start node")]
    NoStart,
    /// Paths can only leave the puzzle through its outer boundary.
    #[error("exit {0} is not on the boundary")]
    ExitNotOnBoundary(Location),
}

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A feature was placed outside the bounds specified by `dims` on a builder.
    #[error("feature placed out of bounds")]
    FeatureOutOfBounds,
    /// A block was given an area or bounds its layout does not have.
    #[error("block metadata does not match its layout")]
    ShapeMismatch,
    /// Fewer than two nodes along some axis, leaving no cells.
    #[error("puzzle needs at least 2x2 nodes")]
    DimensionsTooSmall,
}
