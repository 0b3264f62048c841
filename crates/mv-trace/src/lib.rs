//! Branch-aware tracing of boundary grids into polylines.
//!
//! The tracer walks a boundary vertex grid (see `mv-raster`) and emits one
//! [`mv_core::Polyline`] per connected boundary component it reaches,
//! clearing vertices in a private working copy as it goes. Straight runs
//! become single segments; 90 degree corners and branches are followed with
//! an explicit stack rather than recursion, so stack depth is independent
//! of boundary length.

mod tracer;

pub use tracer::trace_boundaries;
