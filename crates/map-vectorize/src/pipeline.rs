use log::debug;
use mv_core::{Error, Polyline};
use mv_raster::{RasterView, boundary_from_raster};
use mv_simplify::cut_all_corners;
use mv_trace::trace_boundaries;

/// Knobs for the raster-to-polyline pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Merge threshold for corner cutting: two consecutive segments whose
    /// combined Euclidean length is at or below this are fused. `0.0`
    /// disables simplification of unit-step boundaries.
    pub min_corner_dist: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_corner_dist: 2.0,
        }
    }
}

/// Runs the full pipeline on a validated raster view.
///
/// Each stage is a pure function of the previous stage's output; no state
/// survives the call, so independent invocations may run in parallel.
/// Output coordinates are unscaled lattice integers.
pub fn extract_boundaries(raster: &RasterView<'_>, cfg: &PipelineConfig) -> Vec<Polyline> {
    let boundary = boundary_from_raster(raster);
    let traced = trace_boundaries(&boundary);
    let lines = cut_all_corners(&traced, cfg.min_corner_dist);

    debug!(
        "pipeline: {} traced segments simplified to {}",
        traced.iter().map(Polyline::len).sum::<usize>(),
        lines.iter().map(Polyline::len).sum::<usize>()
    );
    lines
}

/// Convenience entry over a raw interleaved `height x width x channels`
/// buffer; fails on shape mismatch or zero-area input.
pub fn extract_from_channels(
    width: usize,
    height: usize,
    channels: usize,
    data: &[u8],
    cfg: &PipelineConfig,
) -> Result<Vec<Polyline>, Error> {
    let raster = RasterView::new(width, height, channels, data)?;
    Ok(extract_boundaries(&raster, cfg))
}
