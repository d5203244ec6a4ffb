//! Packing blocks into an area.
//!
//! Deciding whether a set of polyominoes tiles a region is NP-complete, so checking even a finished
//! path is exponential in the number of blocks of its largest area. The search here is a plain
//! backtracking exact cover; blocks go largest first so that dead ends show up near the root.

use std::cmp::Reverse;

use itertools::Itertools;

use crate::area::Area;
use crate::polyomino::Polyomino;

type Pattern = Vec<(isize, isize)>;

/// Whether every block in `blocks` can be placed inside `region` without overlapping another.
///
/// A rotatable block may be turned by any multiple of 90°. Combined with the validator's check that the
/// blocks' total area equals the region's size, a successful placement covers the region exactly.
pub fn fits(region: &Area, blocks: &[Polyomino]) -> bool {
    if blocks.iter().map(Polyomino::area).sum::<usize>() > region.len() {
        return false;
    }

    let patterns = blocks.iter()
        .filter(|block| block.area() > 0)
        .sorted_by_key(|block| Reverse(block.area()))
        .map(Polyomino::placements)
        .collect_vec();

    place(region, &patterns)
}

fn place(remaining: &Area, blocks: &[Vec<Pattern>]) -> bool {
    let Some((patterns, rest)) = blocks.split_first() else {
        return true;
    };

    for anchor in remaining {
        for pattern in patterns {
            let covered = pattern.iter().map(|offset| anchor.offset_by(*offset)).collect_vec();
            if !covered.iter().all(|cell| remaining.contains(cell)) {
                continue;
            }

            let mut next = remaining.clone();
            for cell in &covered {
                next.remove(cell);
            }

            if place(&next, rest) {
                return true;
            }
        }
    }

    false
}
