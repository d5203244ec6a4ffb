use std::fmt::{Display, Formatter};

use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::location::Location;

/// A single move between two adjacent nodes of the lattice.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards larger `x`.
    Right,
    /// Towards smaller `x`.
    Left,
    /// Towards larger `y`.
    Down,
    /// Towards smaller `y`.
    Up,
}

impl SquareStep {
    /// The node one step away from `location`. It may lie outside the puzzle; callers check it against the grid they index.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// Whether this step walks a horizontal or a vertical edge.
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Up | Self::Down => Orientation::Vertical,
        }
    }

    /// The cells on the left and on the right of the edge walked by this step when starting at `from`, in that order.
    ///
    /// "Left" is relative to the direction of travel with `y` growing downwards.
    /// Either cell may be outside the cell grid when the edge lies on the boundary.
    pub fn flanking_cells(&self, from: Location) -> (Location, Location) {
        let to = self.attempt_from(from);
        match self {
            Self::Right => (from.offset_by((0, -1)), from),
            Self::Left => (to, to.offset_by((0, -1))),
            Self::Down => (from, from.offset_by((-1, 0))),
            Self::Up => (to.offset_by((-1, 0)), to),
        }
    }
}

/// The two ways an edge may lie between lattice nodes.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Orientation {
    /// Connects `(x, y)` to `(x + 1, y)`.
    Horizontal,
    /// Connects `(x, y)` to `(x, y + 1)`.
    Vertical,
}

/// Identifies an edge by its top or left endpoint and its orientation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct EdgeId {
    /// The top or left endpoint.
    pub location: Location,
    /// Which way the edge runs from [`Self::location`].
    pub orientation: Orientation,
}

impl EdgeId {
    /// The edge from `(x, y)` to `(x + 1, y)`.
    pub fn horizontal(x: usize, y: usize) -> Self {
        Self { location: Location(x, y), orientation: Orientation::Horizontal }
    }

    /// The edge from `(x, y)` to `(x, y + 1)`.
    pub fn vertical(x: usize, y: usize) -> Self {
        Self { location: Location(x, y), orientation: Orientation::Vertical }
    }

    /// The edge joining two adjacent nodes, in either order.
    pub fn between(a: Location, b: Location) -> Option<Self> {
        let direction = SquareStep::direction_to(a, b)?;
        let location = match direction {
            SquareStep::Right | SquareStep::Down => a,
            SquareStep::Left | SquareStep::Up => b,
        };

        Some(Self { location, orientation: direction.orientation() })
    }

    /// The two nodes this edge connects.
    pub fn endpoints(&self) -> UnorderedPair<Location> {
        let other = match self.orientation {
            Orientation::Horizontal => SquareStep::Right.attempt_from(self.location),
            Orientation::Vertical => SquareStep::Down.attempt_from(self.location),
        };

        UnorderedPair(self.location, other)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => "hor",
            Orientation::Vertical => "ver",
        };
        write!(f, "{}{}", tag, self.location)
    }
}
