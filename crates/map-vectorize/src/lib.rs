//! Umbrella crate for the `map-vectorize` workspace.
//!
//! Re-exports the pipeline stages and provides the end-to-end entry point
//! in [`pipeline`]: occupancy classification, boundary tracing, and corner
//! simplification in strict order.

mod pipeline;

pub use mv_core::*;
pub use mv_raster::*;
pub use mv_simplify::*;
pub use mv_trace::*;
pub use pipeline::{PipelineConfig, extract_boundaries, extract_from_channels};
