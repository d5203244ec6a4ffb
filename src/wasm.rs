//! Browser bindings for the puzzle editor.
//!
//! Kinds cross the boundary as small integers in declaration order, e.g. node kind `3` is
//! [`NodeKind::Exit`] and color `1` is [`Color::White`]. Unknown codes fall back to the default kind.

use std::num::NonZero;

use js_sys::Array;
use strum::VariantArray;
use wasm_bindgen::prelude::*;

use crate::builder::PuzzleBuilder;
use crate::cell::{Color, EdgeKind, NodeKind};
use crate::error::BuilderInvalidReason;
use crate::location::Location;
use crate::path::Path;
use crate::step::EdgeId;

fn decode<T: VariantArray + Default + Copy>(code: u8) -> T {
    T::VARIANTS.get(code as usize).copied().unwrap_or_default()
}

fn to_js(nodes: &[Location]) -> JsValue {
    nodes.iter()
        .map(|node| Array::of2(&JsValue::from(node.0 as u32), &JsValue::from(node.1 as u32)))
        .collect::<Array>()
        .into()
}

/// A puzzle under construction in the editor.
#[wasm_bindgen]
pub struct WasmPuzzle {
    builder: PuzzleBuilder,
}

#[wasm_bindgen]
impl WasmPuzzle {
    /// An open grid of `width` by `height` nodes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize) -> WasmPuzzle {
        let dim = |n: usize| NonZero::new(n).unwrap_or(NonZero::<usize>::MIN);
        WasmPuzzle { builder: PuzzleBuilder::with_dims((dim(width), dim(height))) }
    }

    /// Set node `(x, y)` to a [`NodeKind`] code.
    pub fn set_node(&mut self, x: usize, y: usize, kind: u8) {
        self.builder.set_node(Location(x, y), decode::<NodeKind>(kind));
    }

    /// Set an [`EdgeKind`] code on the edge leaving node `(x, y)` rightwards if `horizontal`, else downwards.
    pub fn set_edge(&mut self, horizontal: bool, x: usize, y: usize, kind: u8) {
        let id = if horizontal { EdgeId::horizontal(x, y) } else { EdgeId::vertical(x, y) };
        self.builder.set_edge(id, decode::<EdgeKind>(kind));
    }

    /// Put a [`Color`] code on cell `(x, y)`. Codes past the last color are ignored.
    pub fn set_square(&mut self, x: usize, y: usize, color: u8) {
        if let Some(color) = Color::VARIANTS.get(color as usize) {
            self.builder.set_square(Location(x, y), *color);
        }
    }

    /// Place a block at cell `(x, y)`. `squares` holds flattened `x, y` pairs on the block's 4×4 grid.
    ///
    /// An odd number of bytes, or a pair off that grid, leaves the puzzle invalid.
    pub fn set_polyomino(&mut self, x: usize, y: usize, squares: &[u8], rotatable: bool) {
        if squares.len() % 2 != 0 {
            self.builder.invalidate(BuilderInvalidReason::ShapeMismatch);
            return;
        }

        let squares = squares.chunks_exact(2)
            .map(|pair| (pair[0] as usize, pair[1] as usize))
            .collect::<Vec<_>>();
        self.builder.set_polyomino(Location(x, y), &squares, rotatable);
    }

    /// Whether every edit so far was accepted.
    pub fn is_valid(&self) -> bool {
        self.builder.is_valid().is_none()
    }

    /// The solution as an array of `[x, y]` node pairs, or `null` if there is none.
    pub fn solve(&self) -> JsValue {
        match self.solution() {
            Some(path) => to_js(path.nodes()),
            None => JsValue::NULL,
        }
    }

    /// The leading `fraction` of the solution, or `null` if there is none.
    pub fn hint(&self, fraction: f64) -> JsValue {
        match self.solution() {
            Some(path) => to_js(path.hint(fraction)),
            None => JsValue::NULL,
        }
    }

    /// The puzzle drawn as text, or `null` while the editor state is invalid.
    pub fn render(&self) -> Option<String> {
        self.builder.build().ok().map(|puzzle| puzzle.to_string())
    }
}

impl WasmPuzzle {
    fn solution(&self) -> Option<Path> {
        self.builder.build().ok()?.solve().ok()
    }
}
