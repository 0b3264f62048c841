//! Boundary classification: raster pixels to boundary lattice vertices.
//!
//! Two pure steps over `mv-core` grids:
//! - [`occupancy_grid`]: a pixel is occupied iff any channel is non-zero.
//! - [`boundary_grid`]: a lattice vertex is a boundary vertex iff the 2x2
//!   pixel neighborhood sharing that corner is a mix of occupied and empty.
//!
//! Image decoding is left to callers; the classifier consumes a borrowed
//! [`RasterView`] over an interleaved channel buffer.

mod boundary;
mod occupancy;

pub use boundary::{boundary_from_raster, boundary_grid};
pub use occupancy::{RasterView, occupancy_grid};
