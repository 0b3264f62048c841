//! Example: extract collision polylines from a painted map image.
//!
//! Loads a raster (any format the `image` crate decodes; non-zero pixels are
//! occupied), runs the classify/trace/simplify pipeline, and writes the
//! resulting polylines to a JSON file next to the input. Per-stage timing is
//! printed to stdout.
//!
//! Downstream consumers place the geometry themselves, so the pipeline
//! emits raw lattice coordinates; `--scale` / `--offset-x` / `--offset-y`
//! apply that consumer-side transform to the JSON output for convenience.
//!
//! Run from the workspace root:
//!   cargo run -p map-vectorize --example trace_map -- --help
//!   cargo run -p map-vectorize --example trace_map -- --input track.png --min-dist 20

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use map_vectorize::{
    PipelineConfig, RasterView, boundary_from_raster, cut_all_corners, trace_boundaries,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Extract boundary polylines from an occupancy map image")]
struct Args {
    /// Path to the map image (default: data/track.png)
    #[arg(long, default_value = "data/track.png")]
    input: String,

    /// Corner-cut threshold: consecutive segments whose combined length is
    /// at or below this merge into one
    #[arg(long, default_value_t = PipelineConfig::default().min_corner_dist)]
    min_dist: f32,

    /// Scale applied to output coordinates
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Offset added to output x (column) coordinates, after scaling
    #[arg(long, default_value_t = 0.0)]
    offset_x: f32,

    /// Offset added to output y (row) coordinates, after scaling
    #[arg(long, default_value_t = 0.0)]
    offset_y: f32,

    /// Output JSON path (default: <input stem>_lines.json next to input)
    #[arg(long)]
    out: Option<String>,
}

#[derive(Serialize)]
struct SegmentDto {
    a: [f32; 2],
    b: [f32; 2],
}

#[derive(Serialize)]
struct LineDto {
    segments: Vec<SegmentDto>,
}

#[derive(Serialize)]
struct ResultDto {
    width: usize,
    height: usize,
    min_dist: f32,
    scale: f32,
    lines: Vec<LineDto>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let img_path = &args.input;
    let out_path = args.out.unwrap_or_else(|| {
        let p = std::path::Path::new(img_path);
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        let dir = p.parent().unwrap_or(std::path::Path::new("."));
        dir.join(format!("{stem}_lines.json"))
            .to_string_lossy()
            .into_owned()
    });

    let rgb = ImageReader::open(img_path)
        .with_context(|| format!("opening {img_path}"))?
        .decode()
        .with_context(|| format!("decoding {img_path}"))?
        .into_rgb8();

    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let raster = RasterView::new(width, height, 3, rgb.as_raw())
        .context("building raster view over decoded image")?;

    println!("loaded {img_path}: {width}x{height}, min_dist={:.1}", args.min_dist);

    let t0 = Instant::now();
    let boundary = boundary_from_raster(&raster);
    let classify_ms = t0.elapsed().as_secs_f64() * 1e3;

    let t1 = Instant::now();
    let traced = trace_boundaries(&boundary);
    let trace_ms = t1.elapsed().as_secs_f64() * 1e3;

    let t2 = Instant::now();
    let lines = cut_all_corners(&traced, args.min_dist);
    let simplify_ms = t2.elapsed().as_secs_f64() * 1e3;

    let traced_segments: usize = traced.iter().map(|l| l.len()).sum();
    let kept_segments: usize = lines.iter().map(|l| l.len()).sum();
    println!("  classify: {classify_ms:.2} ms");
    println!("  trace:    {trace_ms:.2} ms  ({} lines, {traced_segments} segments)", traced.len());
    println!("  simplify: {simplify_ms:.2} ms  ({kept_segments} segments kept)");

    let place = |v: map_vectorize::Vertex| {
        [
            v.j as f32 * args.scale + args.offset_x,
            v.i as f32 * args.scale + args.offset_y,
        ]
    };
    let line_dtos = lines
        .iter()
        .map(|line| LineDto {
            segments: line
                .segments
                .iter()
                .map(|s| SegmentDto {
                    a: place(s.a),
                    b: place(s.b),
                })
                .collect(),
        })
        .collect();

    let out_file =
        std::fs::File::create(&out_path).with_context(|| format!("creating {out_path}"))?;
    serde_json::to_writer_pretty(
        out_file,
        &ResultDto {
            width,
            height,
            min_dist: args.min_dist,
            scale: args.scale,
            lines: line_dtos,
        },
    )
    .with_context(|| format!("writing JSON to {out_path}"))?;

    println!("polylines written to {out_path}");
    Ok(())
}
