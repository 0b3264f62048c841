//! Foundational primitives for raster boundary extraction.
//!
//! ## Coordinate Convention
//! Grids are row-major and indexed as `(i, j)` = `(row, column)`. The vertex
//! lattice of an `H x W` pixel grid has `(H+1) x (W+1)` positions: vertex
//! `(i, j)` is the corner shared by pixels `(i-1, j-1)`, `(i-1, j)`,
//! `(i, j-1)` and `(i, j)`.
//!
//! ## Binary Grids
//! Occupancy and boundary grids are `Grid<u8>`; a cell is set iff its value
//! is non-zero.

mod error;
mod geom;
mod grid;

pub use error::Error;
pub use geom::{Dir, Polyline, Segment, Vertex};
pub use grid::Grid;
