//! Assembling a [`Puzzle`] piece by piece.

use std::num::NonZero;

use ndarray::{Array2, AssignElem};
use unordered_pair::UnorderedPair;

use crate::cell::{CellKind, Color, EdgeKind, NodeKind};
use crate::error::BuilderInvalidReason;
use crate::location::{Dimension, Location};
use crate::polyomino::{Bounds, Layout, Polyomino};
use crate::puzzle::Puzzle;
use crate::step::{EdgeId, Orientation};

/// A builder for [`Puzzle`]s, standing in for the editor that owns a puzzle's mutable definition.
///
/// A new builder has every edge present, every node [`Normal`](NodeKind::Normal) and every cell empty.
/// Edits chain through `&mut Self`; clone a builder to keep a snapshot of the editor state.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    // width, height in nodes
    dims: (Dimension, Dimension),
    nodes: Array2<NodeKind>,
    hor_edges: Array2<EdgeKind>,
    ver_edges: Array2<EdgeKind>,
    cells: Array2<CellKind>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

const DEFAULT_SIDE: Dimension = match NonZero::new(5) {
    Some(side) => side,
    None => NonZero::<usize>::MIN,
};

impl Default for PuzzleBuilder {
    fn default() -> Self {
        Self::with_dims((DEFAULT_SIDE, DEFAULT_SIDE))
    }
}

impl PuzzleBuilder {
    /// Construct a new [`Self`] with the specified dimensions in nodes, specified in `(x, y)` order.
    ///
    /// Fewer than two nodes along either axis leaves no cells and puts the builder in a
    /// [`DimensionsTooSmall`](BuilderInvalidReason::DimensionsTooSmall) invalid state.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        let (w, h) = (dims.0.get(), dims.1.get());
        let mut invalid_reasons = Vec::new();
        if w < 2 || h < 2 {
            invalid_reasons.push(BuilderInvalidReason::DimensionsTooSmall);
        }

        Self {
            dims,
            nodes: Array2::from_shape_simple_fn((h, w), NodeKind::default),
            hor_edges: Array2::from_shape_simple_fn((h, w.saturating_sub(1)), EdgeKind::default),
            ver_edges: Array2::from_shape_simple_fn((h.saturating_sub(1), w), EdgeKind::default),
            cells: Array2::from_shape_simple_fn((h.saturating_sub(1), w.saturating_sub(1)), CellKind::default),
            invalid_reasons,
        }
    }

    /// Set the kind of the node at `location`.
    ///
    /// A location off the node grid records [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds).
    /// Ignored once the builder is invalid.
    pub fn set_node(&mut self, location: Location, kind: NodeKind) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.nodes.get_mut(location.as_index()) {
            Some(node) => node.assign_elem(kind),
            None => self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds),
        }

        self
    }

    /// Set the kind of the edge `id`. An edge the grid does not have records
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds); ignored once the builder is invalid.
    pub fn set_edge(&mut self, id: EdgeId, kind: EdgeKind) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let grid = match id.orientation {
            Orientation::Horizontal => &mut self.hor_edges,
            Orientation::Vertical => &mut self.ver_edges,
        };

        match grid.get_mut(id.location.as_index()) {
            Some(edge) => edge.assign_elem(kind),
            None => self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds),
        }

        self
    }

    /// Put an obstacle on the edge joining `locations`. Non-adjacent pairs are silently skipped.
    pub fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        match EdgeId::between(locations.0, locations.1) {
            Some(id) => self.set_edge(id, EdgeKind::Obstacle),
            None => self,
        }
    }

    /// Set the constraint carried by the cell at `location`.
    pub fn set_cell(&mut self, location: Location, kind: CellKind) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.cells.get_mut(location.as_index()) {
            Some(cell) => cell.assign_elem(kind),
            None => self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds),
        }

        self
    }

    /// Shorthand for [`Self::set_cell`] with a colored square.
    pub fn set_square(&mut self, location: Location, color: Color) -> &mut Self {
        self.set_cell(location, CellKind::Square(color))
    }

    /// Shorthand for [`Self::set_cell`] with a block occupying `squares` of its 4×4 layout.
    ///
    /// A square off that layout records [`ShapeMismatch`](BuilderInvalidReason::ShapeMismatch).
    pub fn set_polyomino(&mut self, location: Location, squares: &[(usize, usize)], rotatable: bool) -> &mut Self {
        match Polyomino::from_squares(squares, rotatable) {
            Ok(block) => self.set_cell(location, CellKind::Polyomino(block)),
            Err(_) => self.invalidate(BuilderInvalidReason::ShapeMismatch),
        }
    }

    /// Place a block whose area and bounds were stored alongside its layout, as a persisted puzzle carries them.
    ///
    /// Metadata that disagrees with `layout` records [`ShapeMismatch`](BuilderInvalidReason::ShapeMismatch).
    pub fn set_polyomino_declared(&mut self, location: Location, layout: Layout, area: usize, bounds: Option<Bounds>, rotatable: bool) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match Polyomino::with_declared(layout, area, bounds, rotatable) {
            Ok(block) => self.set_cell(location, CellKind::Polyomino(block)),
            Err(_) => self.invalidate(BuilderInvalidReason::ShapeMismatch),
        }
    }

    // first problem wins; later edits are ignored
    pub(crate) fn invalidate(&mut self, reason: BuilderInvalidReason) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.invalid_reasons.push(reason);
        }
        self
    }

    /// Every problem recorded so far, or `None` while the builder is still valid.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Freeze the current state into a [`Puzzle`], or return the recorded problems.
    pub fn build(&self) -> Result<Puzzle, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(Puzzle::new(
            self.dims,
            self.nodes.clone(),
            self.hor_edges.clone(),
            self.ver_edges.clone(),
            self.cells.clone(),
        ))
    }
}
