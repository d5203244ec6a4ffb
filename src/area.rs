//! Splitting the cells into areas while the path is still being built.
//!
//! A path cuts the puzzle only where it runs from the boundary, through the interior, and back to the
//! boundary. Each such run seals off the cells on one side of it; those cells can never change area
//! again, so they are checked immediately and a doomed partial path is abandoned early.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::rc::Rc;

use strum::VariantArray;

use crate::location::Location;
use crate::puzzle::Puzzle;
use crate::step::SquareStep;
use crate::validate::{check_area, AreaViolation};

/// A set of cells the path separates from every other cell.
pub type Area = BTreeSet<Location>;

/// The running partition of cells for one partial path.
///
/// `areas` is a stack whose top entry is the area the path is currently inside. A split pushes two
/// entries and finalizes the lower one; finalized areas are dropped once checked.
///
/// Clones share their areas until one of them splits, so branching the search costs only the segment.
#[derive(Clone, Debug)]
pub struct Partition {
    areas: Vec<Rc<Area>>,
    // nodes walked since the path last touched the boundary, starting with that boundary node
    segment: Vec<Location>,
}

impl Partition {
    /// A single area holding every cell of `puzzle`.
    pub fn new(puzzle: &Puzzle) -> Self {
        Self {
            areas: vec![Rc::new(puzzle.cells().collect())],
            segment: Vec::new(),
        }
    }

    /// The area the path is currently inside.
    pub fn open_area(&self) -> Option<&Area> {
        self.areas.last().map(Rc::as_ref)
    }

    /// Record that the path walked through `last` and is about to step to `next`.
    ///
    /// If `last` closes a boundary-to-boundary run, the side of the run the path does not continue into
    /// is finalized and checked, and its violation returned.
    pub fn advance(&mut self, puzzle: &Puzzle, last: Location, next: Location) -> Result<(), AreaViolation> {
        if !puzzle.is_outer(last) {
            if !self.segment.is_empty() {
                self.segment.push(last);
            }
            return Ok(());
        }

        // a single step between two boundary nodes still cuts the grid when it runs along an interior line
        let cuts = match self.segment.as_slice() {
            [] => false,
            [only] => on_interior_line(puzzle, *only, last),
            _ => true,
        };

        if !cuts {
            self.segment = vec![last];
            return Ok(());
        }

        let finalized = self.split(last, next);
        self.segment = vec![last];
        check_area(puzzle, &finalized)
    }

    /// Finalize and check whatever is left once the path ends on `exit`, having come from `previous`.
    pub fn close(mut self, puzzle: &Puzzle, previous: Option<Location>, exit: Location) -> Result<(), AreaViolation> {
        if let Some(previous) = previous {
            if self.segment.len() > 1 || on_interior_line(puzzle, exit, previous) {
                // step onto the exit once more so the final run is split off like any other
                self.advance(puzzle, exit, exit)?;
            }
        }

        match self.open_area() {
            Some(area) => check_area(puzzle, area),
            None => Ok(()),
        }
    }

    // returns the finalized area, leaving the open one on top of the stack
    fn split(&mut self, last: Location, next: Location) -> Area {
        let mut left = Vec::with_capacity(self.segment.len());
        let mut right = HashSet::with_capacity(self.segment.len());

        for (i, from) in self.segment.iter().enumerate() {
            let to = self.segment.get(i + 1).copied().unwrap_or(last);
            if let Some(step) = SquareStep::direction_to(*from, to) {
                let (l, r) = step.flanking_cells(*from);
                left.push(l);
                right.insert(r);
            }
        }

        let mut remaining = self.areas.pop().map(Rc::unwrap_or_clone).unwrap_or_default();
        let mut sealed = Area::new();
        let mut queue = VecDeque::from(left);

        // flood the left side; the right-hand cells of the run act as the wall
        while let Some(cell) = queue.pop_front() {
            if right.contains(&cell) || !remaining.remove(&cell) {
                continue;
            }

            sealed.insert(cell);
            queue.extend(SquareStep::VARIANTS.iter().map(|step| step.attempt_from(cell)));
        }

        let continues_in_remaining = SquareStep::direction_to(last, next)
            .map(|step| {
                let (l, r) = step.flanking_cells(last);
                remaining.contains(&l) || remaining.contains(&r)
            })
            .unwrap_or(false);

        let (finalized, open) = if continues_in_remaining { (sealed, remaining) } else { (remaining, sealed) };
        self.areas.push(Rc::new(open));
        finalized
    }
}

/// Whether the edge between adjacent nodes `a` and `b` runs along a line through the interior of the grid.
fn on_interior_line(puzzle: &Puzzle, a: Location, b: Location) -> bool {
    let interior_row = b.1 > 0 && b.1 < puzzle.height() - 1;
    let interior_col = b.0 > 0 && b.0 < puzzle.width() - 1;
    (a.0 != b.0 && interior_row) || (a.1 != b.1 && interior_col)
}
