//! What every path must cover, explicitly or implied by neighboring cells.

use std::collections::HashSet;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::cell::{EdgeKind, NodeKind};
use crate::location::Location;
use crate::puzzle::Puzzle;
use crate::step::{EdgeId, SquareStep};

/// Nodes and edges every valid path must pass through.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Requirements {
    /// Explicitly required nodes and auxiliary ones.
    pub nodes: HashSet<Location>,
    /// Explicitly required edges.
    pub edges: HashSet<EdgeId>,
}

impl Requirements {
    /// Collect explicit requirements and the auxiliary nodes implied by incompatible neighboring cells.
    pub fn derive(puzzle: &Puzzle) -> Self {
        let mut nodes = auxiliary_nodes(puzzle);
        nodes.extend(puzzle.nodes_of_kind(NodeKind::Required));

        Self {
            nodes,
            edges: puzzle.edges_of_kind(EdgeKind::Required).into_iter().collect(),
        }
    }

    /// Whether `location` is a required node.
    pub fn is_required(&self, location: Location) -> bool {
        self.nodes.contains(&location)
    }

    /// A required node the walk over `nodes` never visits, if any.
    pub fn missing_node(&self, nodes: &[Location]) -> Option<Location> {
        self.nodes.iter()
            .sorted()
            .find(|node| !nodes.contains(node))
            .copied()
    }

    /// A required edge the walk over `nodes` never takes, if any.
    pub fn missing_edge(&self, nodes: &[Location]) -> Option<EdgeId> {
        if self.edges.is_empty() {
            return None;
        }

        let walked: HashSet<_> = nodes.iter()
            .tuple_windows()
            .map(|(a, b)| UnorderedPair(*a, *b))
            .collect();
        self.edges.iter()
            .sorted()
            .find(|edge| !walked.contains(&edge.endpoints()))
            .copied()
    }

    /// Whether a walk over `nodes` covers every requirement.
    pub fn satisfied_by(&self, nodes: &[Location]) -> bool {
        self.missing_node(nodes).is_none() && self.missing_edge(nodes).is_none()
    }
}

/// Endpoints of every edge separating two cells that may not share an area.
///
/// The path has to walk such an edge to put the two cells in different areas, so both endpoints are required.
pub fn auxiliary_nodes(puzzle: &Puzzle) -> HashSet<Location> {
    let mut aux = HashSet::new();

    for cell in puzzle.cells() {
        let Some(kind) = puzzle.cell(cell) else { continue };

        for step in [SquareStep::Right, SquareStep::Down] {
            let neighbor = step.attempt_from(cell);
            let Some(other) = puzzle.cell(neighbor) else { continue };
            if kind.compatible_with(other) {
                continue;
            }

            // the shared edge starts at the neighbor's top left node and runs along the step's perpendicular
            let shared = match step {
                SquareStep::Right => EdgeId::vertical(neighbor.0, neighbor.1),
                _ => EdgeId::horizontal(neighbor.0, neighbor.1),
            };
            let ends = shared.endpoints();
            aux.insert(ends.0);
            aux.insert(ends.1);
        }
    }

    aux
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::builder::PuzzleBuilder;
    use crate::cell::{Color, EdgeKind, NodeKind};
    use crate::location::Location;
    use crate::path::Path;
    use crate::requirements::{auxiliary_nodes, Requirements};
    use crate::step::EdgeId;

    fn builder() -> PuzzleBuilder {
        PuzzleBuilder::with_dims((NonZero::new(4).unwrap(), NonZero::new(3).unwrap()))
    }

    #[test]
    fn differing_colors_require_shared_edge() {
        let puzzle = builder()
            .set_square(Location(0, 0), Color::Black)
            .set_square(Location(1, 0), Color::White)
            .build()
            .unwrap();

        let aux = auxiliary_nodes(&puzzle);
        assert_eq!(aux.len(), 2);
        assert!(aux.contains(&Location(1, 0)));
        assert!(aux.contains(&Location(1, 1)));
    }

    #[test]
    fn vertical_neighbors_and_same_colors() {
        let puzzle = builder()
            .set_square(Location(2, 0), Color::Red)
            .set_square(Location(2, 1), Color::Blue)
            .set_square(Location(0, 0), Color::Red)
            .set_square(Location(0, 1), Color::Red)
            .set_polyomino(Location(1, 0), &[(0, 0)], false)
            .build()
            .unwrap();

        let aux = auxiliary_nodes(&puzzle);
        assert_eq!(aux.len(), 2);
        assert!(aux.contains(&Location(2, 1)));
        assert!(aux.contains(&Location(3, 1)));
    }

    #[test]
    fn explicit_requirements_are_checked_against_path() {
        let puzzle = builder()
            .set_node(Location(1, 1), NodeKind::Required)
            .set_edge(EdgeId::horizontal(2, 2), EdgeKind::Required)
            .build()
            .unwrap();

        let requirements = Requirements::derive(&puzzle);
        assert!(requirements.is_required(Location(1, 1)));
        assert_eq!(requirements.edges.len(), 1);

        let path = Path::from(vec![Location(0, 0), Location(0, 1), Location(1, 1), Location(1, 2), Location(2, 2), Location(3, 2)]);
        assert!(requirements.satisfied_by(path.nodes()));

        let short = Path::from(vec![Location(0, 0), Location(0, 1), Location(1, 1), Location(1, 2), Location(2, 2)]);
        assert_eq!(requirements.missing_edge(short.nodes()), Some(EdgeId::horizontal(2, 2)));
        assert_eq!(requirements.missing_node(short.nodes()), None);
    }
}
