use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::location::Location;

/// An ordered sequence of nodes walked from a start node.
///
/// A path returned by a successful solve is simple, starts on a start node and ends on an exit.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Path(pub(crate) Vec<Location>);

impl Path {
    /// Nodes in walking order, start node first.
    pub fn nodes(&self) -> &[Location] {
        &self.0
    }

    /// Number of nodes, one more than the number of edges walked.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The start node.
    pub fn first(&self) -> Option<Location> {
        self.0.first().copied()
    }

    /// The exit the path ends on.
    pub fn last(&self) -> Option<Location> {
        self.0.last().copied()
    }

    /// Whether the path visits `location`.
    pub fn contains(&self, location: Location) -> bool {
        self.0.contains(&location)
    }

    /// Every edge walked, as the pair of nodes it joins.
    pub fn edges(&self) -> impl Iterator<Item=UnorderedPair<Location>> + '_ {
        self.0.iter().tuple_windows().map(|(a, b)| UnorderedPair(*a, *b))
    }

    /// The leading part of this path used as a partial hint: the first `ceil(len * fraction)` nodes.
    ///
    /// `fraction` is clamped to `(0, 1]`, so a non-empty path always reveals at least its start.
    pub fn hint(&self, fraction: f64) -> &[Location] {
        let fraction = if fraction.is_nan() { 1.0 } else { fraction.clamp(f64::MIN_POSITIVE, 1.0) };
        let shown = (self.0.len() as f64 * fraction).ceil() as usize;
        &self.0[..shown.min(self.0.len())]
    }
}

impl From<Vec<Location>> for Path {
    fn from(value: Vec<Location>) -> Self {
        Self(value)
    }
}
