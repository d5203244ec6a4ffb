use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A width or height of a puzzle, counted in nodes.
pub type Dimension = NonZero<Coord>;

/// A location `(x, y)` on a puzzle. The top left corner is `Location(0, 0)`.
///
/// The same type addresses nodes and cells; cell `(x, y)` is bounded by nodes `(x, y)` and `(x + 1, y + 1)`.
/// Locations are plain values, so two locations with equal coordinates are interchangeable in any set or map.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    // stepping off the top or left wraps to a huge coordinate, which no grid lookup will accept
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
