use strum::VariantArray;

use crate::polyomino::Polyomino;

/// The role a lattice node plays for the path.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum NodeKind {
    /// A plain node.
    #[default]
    Normal,
    /// The path may begin here.
    Start,
    /// The path must pass through here.
    Required,
    /// The path may end here. Only boundary nodes may be exits.
    Exit,
}

/// What lies on the edge between two adjacent nodes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum EdgeKind {
    /// Present and traversable.
    #[default]
    Normal,
    /// Present and part of every solution.
    Required,
    /// Absent; never traversable.
    Obstacle,
}

impl EdgeKind {
    /// Whether a path may walk an edge of this kind.
    pub fn is_traversable(&self) -> bool {
        *self != Self::Obstacle
    }
}

/// Colors a [`CellKind::Square`] may carry. Squares of different colors may not share an area.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Color {
    /// Black squares, the usual counterpart to white.
    Black,
    /// White squares.
    White,
    /// Red squares.
    Red,
    /// Green squares.
    Green,
    /// Blue squares.
    Blue,
    /// Yellow squares.
    Yellow,
}

impl Color {
    pub(crate) fn glyph(&self) -> char {
        match self {
            Self::Black => 'k',
            Self::White => 'w',
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Blue => 'b',
            Self::Yellow => 'y',
        }
    }
}

/// The constraint carried by a cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CellKind {
    /// No constraint.
    #[default]
    None,
    /// A colored square; no other color may share its area.
    Square(Color),
    /// A block that must be packed into this cell's area.
    Polyomino(Polyomino),
}

impl CellKind {
    /// The color of a square, or [`None`] for any other cell.
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Square(color) => Some(*color),
            _ => None,
        }
    }

    /// The block carried by this cell, unless the block is degenerate.
    pub fn polyomino(&self) -> Option<&Polyomino> {
        match self {
            Self::Polyomino(block) if block.area() > 0 => Some(block),
            _ => None,
        }
    }

    /// Two cells may share an area unless both are squares of differing colors.
    pub fn compatible_with(&self, other: &CellKind) -> bool {
        match (self.color(), other.color()) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }

    pub(crate) fn glyph(&self) -> char {
        match self {
            Self::None => ' ',
            Self::Square(color) => color.glyph(),
            Self::Polyomino(block) if block.rotatable => 'P',
            Self::Polyomino(_) => 'p',
        }
    }
}
