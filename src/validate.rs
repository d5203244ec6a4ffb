//! Rules an area of cells must satisfy, and a full check of a finished path against every constraint.

use std::collections::HashSet;

use itertools::Itertools;
use strum::VariantArray;
use thiserror::Error;

use crate::area::{Area, Partition};
use crate::cell::NodeKind;
use crate::location::Location;
use crate::packing;
use crate::path::Path;
use crate::polyomino::Polyomino;
use crate::puzzle::Puzzle;
use crate::requirements::Requirements;
use crate::step::EdgeId;

/// Ways a single area can break the cell rules.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, VariantArray, Error)]
pub enum AreaViolation {
    /// Squares of more than one color share the area.
    #[error("squares of different colors share an area")]
    Segregation,
    /// The area holds blocks whose combined size differs from its own.
    #[error("block area does not match the area's size")]
    PackingArea,
    /// The blocks add up to the right size but cannot be arranged to fill the area.
    #[error("blocks cannot be arranged to fill the area")]
    PackingFit,
}

/// Whether all colored squares in `area` share one color.
pub fn segregated(puzzle: &Puzzle, area: &Area) -> bool {
    area.iter()
        .filter_map(|cell| puzzle.cell(*cell)?.color())
        .all_equal()
}

/// The blocks drawn in `area`'s cells.
pub fn blocks_in(puzzle: &Puzzle, area: &Area) -> Vec<Polyomino> {
    area.iter()
        .filter_map(|cell| puzzle.cell(*cell)?.polyomino().copied())
        .collect_vec()
}

/// Check one area: colors first, then the cheap size test, then the packing search.
pub fn check_area(puzzle: &Puzzle, area: &Area) -> Result<(), AreaViolation> {
    if !segregated(puzzle, area) {
        return Err(AreaViolation::Segregation);
    }

    let blocks = blocks_in(puzzle, area);
    let total = blocks.iter().map(Polyomino::area).sum::<usize>();
    if total == 0 {
        return Ok(());
    }
    if total != area.len() {
        return Err(AreaViolation::PackingArea);
    }

    if packing::fits(area, &blocks) {
        Ok(())
    } else {
        Err(AreaViolation::PackingFit)
    }
}

/// The first rule a path breaks, as found by [`verify_path`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    /// The path has no nodes.
    #[error("path is empty")]
    Empty,
    /// The first node is not a start node.
    #[error("path does not begin on a start node")]
    NotFromStart,
    /// The last node is not an exit.
    #[error("path does not end on an exit")]
    NotAtExit,
    /// The path crosses itself at this node.
    #[error("path visits {0} more than once")]
    RepeatedNode(Location),
    /// Consecutive nodes are not joined by a usable edge.
    #[error("no traversable edge joins {0} and {1}")]
    Untraversable(Location, Location),
    /// A required node is never visited.
    #[error("required node {0} is never visited")]
    MissingNode(Location),
    /// A required edge is never walked.
    #[error("required edge {0} is never walked")]
    MissingEdge(EdgeId),
    /// An area of the finished path breaks a rule.
    #[error(transparent)]
    Area(#[from] AreaViolation),
}

/// Check a complete path against every rule of `puzzle`, independently of how it was found.
pub fn verify_path(puzzle: &Puzzle, path: &Path) -> Result<(), Violation> {
    let nodes = path.nodes();
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Err(Violation::Empty);
    };

    if puzzle.node(first) != Some(NodeKind::Start) {
        return Err(Violation::NotFromStart);
    }
    if puzzle.node(last) != Some(NodeKind::Exit) {
        return Err(Violation::NotAtExit);
    }

    let mut seen = HashSet::with_capacity(nodes.len());
    if let Some(repeat) = nodes.iter().find(|node| !seen.insert(**node)) {
        return Err(Violation::RepeatedNode(*repeat));
    }

    if let Some((a, b)) = nodes.iter().tuple_windows().find(|(a, b)| !puzzle.is_traversable(**a, **b)) {
        return Err(Violation::Untraversable(*a, *b));
    }

    let requirements = Requirements::derive(puzzle);
    if let Some(node) = requirements.missing_node(nodes) {
        return Err(Violation::MissingNode(node));
    }
    if let Some(edge) = requirements.missing_edge(nodes) {
        return Err(Violation::MissingEdge(edge));
    }

    let mut partition = Partition::new(puzzle);
    for (a, b) in nodes.iter().tuple_windows() {
        partition.advance(puzzle, *a, *b)?;
    }
    let previous = nodes.len().checked_sub(2).map(|i| nodes[i]);
    partition.close(puzzle, previous, last)?;

    Ok(())
}
