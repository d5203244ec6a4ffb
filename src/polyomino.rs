//! Blocks drawn on a small local grid, and the placements they may take.

use itertools::Itertools;
use strum::VariantArray;

use crate::location::Location;

/// Side length of the local grid a block is drawn in.
pub const LAYOUT_SIZE: usize = 4;

/// Occupancy of a block's local grid, indexed `[x][y]`.
pub type Layout = [[bool; LAYOUT_SIZE]; LAYOUT_SIZE];

/// Quarter turns a rotatable block may be placed in.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Rotation {
    /// As drawn.
    None,
    /// Turned 90° clockwise.
    Quarter,
    /// Turned 180°.
    Half,
    /// Turned 90° anticlockwise.
    ThreeQuarter,
}

impl Rotation {
    fn apply(&self, (x, y): (isize, isize)) -> (isize, isize) {
        // clockwise with y growing downwards
        match self {
            Self::None => (x, y),
            Self::Quarter => (-y, x),
            Self::Half => (-x, -y),
            Self::ThreeQuarter => (y, -x),
        }
    }
}

/// Tight bounding box of the occupied part of a layout, inclusive on both corners.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Bounds {
    /// Top-left occupied corner.
    pub min: Location,
    /// Bottom-right occupied corner.
    pub max: Location,
}

/// A block of a packing constraint, drawn on a 4×4 grid local to its cell.
///
/// The cell that carries the block says nothing about where it is placed;
/// every block in an area must be placed somewhere inside that area.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Polyomino {
    /// Occupied squares of the local grid.
    pub layout: Layout,
    /// Whether the block may be placed turned.
    pub rotatable: bool,
}

/// A declared `area` or `bounds` disagrees with the layout it was declared for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ShapeMismatch;

impl Polyomino {
    /// A block occupying the `true` squares of `layout`.
    pub fn new(layout: Layout, rotatable: bool) -> Self {
        Self { layout, rotatable }
    }

    /// Build a block from the `(x, y)` squares it occupies, all of which must lie on the 4×4 grid.
    pub fn from_squares(squares: &[(usize, usize)], rotatable: bool) -> Result<Self, ShapeMismatch> {
        let mut layout = [[false; LAYOUT_SIZE]; LAYOUT_SIZE];
        for &(x, y) in squares {
            *layout.get_mut(x).and_then(|column| column.get_mut(y)).ok_or(ShapeMismatch)? = true;
        }

        Ok(Self { layout, rotatable })
    }

    /// Accept a layout along with the area and bounds an editor stored for it, rejecting inconsistent metadata.
    ///
    /// `declared_bounds` is `None` exactly when the layout is empty.
    pub fn with_declared(layout: Layout, declared_area: usize, declared_bounds: Option<Bounds>, rotatable: bool) -> Result<Self, ShapeMismatch> {
        let block = Self::new(layout, rotatable);
        if block.area() != declared_area || block.bounds() != declared_bounds {
            return Err(ShapeMismatch);
        }

        Ok(block)
    }

    fn squares(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        (0..LAYOUT_SIZE)
            .cartesian_product(0..LAYOUT_SIZE)
            .filter(move |&(x, y)| self.layout[x][y])
    }

    /// Number of occupied squares.
    pub fn area(&self) -> usize {
        self.squares().count()
    }

    /// The tight bounding box of the occupied squares, or [`None`] for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let (xs, ys): (Vec<usize>, Vec<usize>) = self.squares().unzip();
        Some(Bounds {
            min: Location(*xs.iter().min()?, *ys.iter().min()?),
            max: Location(*xs.iter().max()?, *ys.iter().max()?),
        })
    }

    /// Rotations this block may be placed in.
    pub fn rotations(&self) -> &'static [Rotation] {
        if self.rotatable {
            Rotation::VARIANTS
        } else {
            &[Rotation::None]
        }
    }

    /// Every distinct placement pattern of this block, as offsets from an anchor.
    ///
    /// Each pattern is shifted so its first square in row-major order sits on the anchor `(0, 0)`,
    /// so every placement covering some cell `c` with that square is found by anchoring at `c`.
    pub fn placements(&self) -> Vec<Vec<(isize, isize)>> {
        self.rotations()
            .iter()
            .filter_map(|rotation| {
                let turned = self.squares()
                    .map(|(x, y)| rotation.apply((x as isize, y as isize)))
                    .sorted_by_key(|&(x, y)| (y, x))
                    .collect_vec();
                let &(ox, oy) = turned.first()?;
                Some(turned.into_iter().map(|(x, y)| (x - ox, y - oy)).collect_vec())
            })
            .unique()
            .collect_vec()
    }
}
