#![warn(missing_docs)]

//! # `lattice-path`
//!
//! A solver for lattice path puzzles in the style of The Witness: draw a single path along the edges of a grid,
//! from a start node to an exit on the boundary, such that the regions of cells the path carves out obey the rules drawn in them.
//! Begin by building a puzzle with a [`PuzzleBuilder`], convert it to a [`Puzzle`], then call [`solve()`](Puzzle::solve)
//! or drive a [`Solver`] directly for control over time limits, cancellation and statistics.
//!
//! # Rules
//! - The path may only walk edges that are present, and never visits a node twice.
//! - Required nodes and required edges must all lie on the path.
//! - Once the path is drawn, every maximal region of cells it separates is an *area*.
//!   An area may not contain colored squares of two different colors.
//! - If an area contains any blocks (polyominoes), the blocks together must tile the area exactly.
//!   Rotatable blocks may be turned by any multiple of 90°; others keep their drawn orientation.
//!
//! # Internals
//! The search is a depth-first backtracking walk from each start node. Brute force alone is hopeless even for small grids,
//! so areas are carved out *while* the path is being drawn: whenever the path leaves the boundary, crosses the interior and touches
//! the boundary again, the cells on one side are sealed off for good and checked immediately. A partial path whose sealed area
//! already breaks a rule is abandoned without extending it further.
//!
//! Two squares of different colors sharing an edge can only be split by walking that edge, so both of its endpoints are treated as required.
//! Required neighbors are tried first, which tends to find solutions sooner without changing which puzzles are solvable.
//!
//! Checking a single area for packing is an exact cover problem and is itself solved by a small backtracking search in [`packing`].

pub use builder::PuzzleBuilder;
pub use cancel::CancellationToken;
pub use cell::{CellKind, Color, EdgeKind, NodeKind};
pub use error::{BuilderInvalidReason, InvalidPuzzle, SolverFailure};
pub use location::{Dimension, Location};
pub use path::Path;
pub use polyomino::Polyomino;
pub use puzzle::Puzzle;
pub use search::{SearchStats, Solver, SolverConfig};
pub use step::{EdgeId, Orientation, SquareStep};

/// Incremental partitioning of cells into areas.
pub mod area;
/// Puzzle construction.
pub mod builder;
/// Stopping a search from outside.
pub mod cancel;
pub(crate) mod cell;
/// Failure types.
pub mod error;
pub(crate) mod location;
/// Fitting blocks into an area.
pub mod packing;
pub(crate) mod path;
/// Blocks and their placements.
pub mod polyomino;
pub(crate) mod puzzle;
/// Nodes and edges every path must cover.
pub mod requirements;
/// The path search itself.
pub mod search;
pub(crate) mod step;
mod tests;
/// Area rules and whole-path verification.
pub mod validate;
#[cfg(feature = "wasm")]
/// Bindings for the browser editor.
pub mod wasm;
