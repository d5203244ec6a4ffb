use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::cell::{CellKind, EdgeKind, NodeKind};
use crate::error::{InvalidPuzzle, SolverFailure};
use crate::location::{Dimension, Location};
use crate::path::Path;
use crate::polyomino::Polyomino;
use crate::search::{Solver, SolverConfig};
use crate::step::{EdgeId, Orientation};

/// A lattice path puzzle: a grid of nodes joined by edges, with cells between them.
///
/// Puzzles are built with a [`PuzzleBuilder`](crate::builder::PuzzleBuilder) and never change afterwards;
/// solving only reads them, so one puzzle may be solved from several threads at once.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) nodes: Array2<NodeKind>,
    pub(crate) hor_edges: Array2<EdgeKind>,
    pub(crate) ver_edges: Array2<EdgeKind>,
    pub(crate) cells: Array2<CellKind>,
    // traversable edges only
    pub(crate) graph: UnGraphMap<Location, EdgeId>,
}

impl Puzzle {
    pub(crate) fn new(
        dims: (Dimension, Dimension),
        nodes: Array2<NodeKind>,
        hor_edges: Array2<EdgeKind>,
        ver_edges: Array2<EdgeKind>,
        cells: Array2<CellKind>,
    ) -> Self {
        let mut graph = UnGraphMap::with_capacity(nodes.len(), hor_edges.len() + ver_edges.len());

        for (index, _) in nodes.indexed_iter() {
            graph.add_node(Location::from(index));
        }

        for (orientation, grid) in [(Orientation::Horizontal, &hor_edges), (Orientation::Vertical, &ver_edges)] {
            for (index, kind) in grid.indexed_iter() {
                if !kind.is_traversable() {
                    continue;
                }

                let id = EdgeId { location: Location::from(index), orientation };
                let ends = id.endpoints();
                graph.add_edge(ends.0, ends.1, id);
            }
        }

        Self { dims, nodes, hor_edges, ver_edges, cells, graph }
    }

    /// Width and height, in nodes.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Number of node columns.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of node rows.
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// The kind of node at `location`, or [`None`] off the lattice.
    pub fn node(&self, location: Location) -> Option<NodeKind> {
        self.nodes.get(location.as_index()).copied()
    }

    /// The kind of edge `id`, or [`None`] off the lattice.
    pub fn edge(&self, id: EdgeId) -> Option<EdgeKind> {
        match id.orientation {
            Orientation::Horizontal => self.hor_edges.get(id.location.as_index()).copied(),
            Orientation::Vertical => self.ver_edges.get(id.location.as_index()).copied(),
        }
    }

    /// The constraint in the cell whose top-left node is `location`.
    pub fn cell(&self, location: Location) -> Option<&CellKind> {
        self.cells.get(location.as_index())
    }

    /// Every node of the given kind, in row-major order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<Location> {
        self.nodes.indexed_iter()
            .filter(|(_, k)| **k == kind)
            .map(|(index, _)| Location::from(index))
            .collect_vec()
    }

    /// Every edge of the given kind, horizontal edges first.
    pub fn edges_of_kind(&self, kind: EdgeKind) -> Vec<EdgeId> {
        let hor = self.hor_edges.indexed_iter()
            .filter(|(_, k)| **k == kind)
            .map(|(index, _)| EdgeId { location: Location::from(index), orientation: Orientation::Horizontal });
        let ver = self.ver_edges.indexed_iter()
            .filter(|(_, k)| **k == kind)
            .map(|(index, _)| EdgeId { location: Location::from(index), orientation: Orientation::Vertical });

        hor.chain(ver).collect_vec()
    }

    /// Whether `location` is a node on the outer boundary of the lattice.
    pub fn is_outer(&self, location: Location) -> bool {
        location.0 == 0 || location.1 == 0 || location.0 == self.width() - 1 || location.1 == self.height() - 1
    }

    /// Nodes reachable from `location` over one traversable edge.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item=Location> + '_ {
        self.graph.neighbors(location)
    }

    /// Whether `a` and `b` are joined by an edge a path may walk.
    pub fn is_traversable(&self, a: Location, b: Location) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Every cell location, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item=Location> + '_ {
        self.cells.indexed_iter().map(|(index, _)| Location::from(index))
    }

    /// Cells carrying a block, with the block.
    pub fn polyomino_cells(&self) -> impl Iterator<Item=(Location, &Polyomino)> + '_ {
        self.cells.indexed_iter().filter_map(|(index, kind)| Some((Location::from(index), kind.polyomino()?)))
    }

    /// Check the structural rules a search relies on.
    pub fn validate(&self) -> Result<(), InvalidPuzzle> {
        if self.nodes_of_kind(NodeKind::Start).is_empty() {
            return Err(InvalidPuzzle::NoStart);
        }

        match self.nodes_of_kind(NodeKind::Exit).into_iter().find(|exit| !self.is_outer(*exit)) {
            Some(exit) => Err(InvalidPuzzle::ExitNotOnBoundary(exit)),
            None => Ok(()),
        }
    }

    /// Solve this puzzle with the default [`SolverConfig`].
    ///
    /// Returns according to the result of [`Solver::solve`].
    pub fn solve(&self) -> Result<Path, SolverFailure> {
        Solver::new(self, SolverConfig::default()).solve()
    }

    /// Render the puzzle as ASCII with `path` drawn over it.
    pub fn render_with_path(&self, path: &Path) -> String {
        let mut canvas = self.canvas();

        for node in path.nodes() {
            if self.node(*node) == Some(NodeKind::Normal) {
                canvas[(2 * node.1, 2 * node.0)] = '*';
            }
        }

        for (a, b) in path.nodes().iter().tuple_windows() {
            canvas[(a.1 + b.1, a.0 + b.0)] = '*';
        }

        print(canvas)
    }

    // nodes sit on even coordinates, edges between them and cells in the middle of four nodes
    fn canvas(&self) -> Array2<char> {
        let mut canvas = Array2::from_elem((2 * self.height() - 1, 2 * self.width() - 1), ' ');

        for (index, kind) in self.nodes.indexed_iter() {
            canvas[(2 * index.0, 2 * index.1)] = match kind {
                NodeKind::Normal => '.',
                NodeKind::Start => 'S',
                NodeKind::Required => 'R',
                NodeKind::Exit => 'E',
            };
        }

        for (index, kind) in self.hor_edges.indexed_iter() {
            canvas[(2 * index.0, 2 * index.1 + 1)] = match kind {
                EdgeKind::Normal => '-',
                EdgeKind::Required => '~',
                EdgeKind::Obstacle => ' ',
            };
        }

        for (index, kind) in self.ver_edges.indexed_iter() {
            canvas[(2 * index.0 + 1, 2 * index.1)] = match kind {
                EdgeKind::Normal => '|',
                EdgeKind::Required => ':',
                EdgeKind::Obstacle => ' ',
            };
        }

        for (index, kind) in self.cells.indexed_iter() {
            canvas[(2 * index.0 + 1, 2 * index.1 + 1)] = kind.glyph();
        }

        canvas
    }
}

fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(self.canvas()))
    }
}
