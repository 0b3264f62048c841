use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, Rgb, RgbImage};
use log::info;
use map_vectorize::{PipelineConfig, extract_boundaries};
use mv_core::{Grid, Polyline};
use mv_raster::{RasterView, boundary_grid, occupancy_grid};
use mv_trace::trace_boundaries;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "mv_gallery")]
#[command(about = "Run map-vectorize stages on image fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump the binary occupancy grid
    #[command(name = "occupancy")]
    Occupancy(OccupancyArgs),
    /// Dump the boundary vertex grid
    #[command(name = "boundary")]
    Boundary(BoundaryArgs),
    /// Trace raw (unsimplified) polylines
    #[command(name = "trace")]
    Trace(TraceArgs),
    /// Full pipeline with corner simplification and an overlay render
    #[command(name = "pipeline")]
    Pipeline(PipelineArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct OccupancyArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct BoundaryArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct TraceArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct PipelineArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 2.0)]
    min_dist: f32,
}

#[derive(Debug, Clone, Serialize)]
struct SegmentDto {
    a: [usize; 2],
    b: [usize; 2],
}

#[derive(Debug, Clone, Serialize)]
struct LineDto {
    segments: Vec<SegmentDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaOccupancy {
    width: usize,
    height: usize,
    channels: usize,
    occupied: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaBoundary {
    lattice_width: usize,
    lattice_height: usize,
    boundary_vertices: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaTrace {
    line_count: usize,
    segment_count: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaPipeline {
    min_dist: f32,
    line_count: usize,
    segment_count: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Occupancy(args) => run_occupancy(args),
        Command::Boundary(args) => run_boundary(args),
        Command::Trace(args) => run_trace(args),
        Command::Pipeline(args) => run_pipeline(args),
    }
}

fn run_occupancy(args: OccupancyArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "occupancy")?;
    let rgb = load_input_rgb(&args.common.input)?;
    let raster = raster_view(&rgb)?;

    let occ = occupancy_grid(&raster);
    let occupied = occ.data().iter().filter(|&&c| c != 0).count();
    save_mask_png(case_dir.join("occupancy.png"), &occ)?;

    write_json(
        case_dir.join("meta.json"),
        &MetaOccupancy {
            width: occ.width(),
            height: occ.height(),
            channels: raster.channels(),
            occupied,
        },
    )?;

    Ok(())
}

fn run_boundary(args: BoundaryArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "boundary")?;
    let rgb = load_input_rgb(&args.common.input)?;
    let raster = raster_view(&rgb)?;

    let boundary = boundary_grid(&occupancy_grid(&raster));
    let marked = boundary.data().iter().filter(|&&c| c != 0).count();
    save_mask_png(case_dir.join("boundary.png"), &boundary)?;

    write_json(
        case_dir.join("meta.json"),
        &MetaBoundary {
            lattice_width: boundary.width(),
            lattice_height: boundary.height(),
            boundary_vertices: marked,
        },
    )?;

    Ok(())
}

fn run_trace(args: TraceArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "trace")?;
    let rgb = load_input_rgb(&args.common.input)?;
    let raster = raster_view(&rgb)?;

    let boundary = boundary_grid(&occupancy_grid(&raster));
    let lines = trace_boundaries(&boundary);

    write_json(case_dir.join("lines.json"), &line_dtos(&lines))?;
    write_json(
        case_dir.join("meta.json"),
        &MetaTrace {
            line_count: lines.len(),
            segment_count: lines.iter().map(Polyline::len).sum(),
        },
    )?;

    Ok(())
}

fn run_pipeline(args: PipelineArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "pipeline")?;
    let rgb = load_input_rgb(&args.common.input)?;
    let raster = raster_view(&rgb)?;

    let cfg = PipelineConfig {
        min_corner_dist: args.min_dist,
    };
    let lines = extract_boundaries(&raster, &cfg);

    write_json(case_dir.join("lines.json"), &line_dtos(&lines))?;
    write_json(
        case_dir.join("meta.json"),
        &MetaPipeline {
            min_dist: args.min_dist,
            line_count: lines.len(),
            segment_count: lines.iter().map(Polyline::len).sum(),
        },
    )?;

    let overlay = render_overlay(&rgb, &lines);
    overlay
        .save(case_dir.join("overlay.png"))
        .context("writing pipeline overlay.png")?;

    Ok(())
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    info!(
        "{case_name}: {} -> {}",
        common.input.display(),
        case_dir.display()
    );
    Ok(case_dir)
}

fn load_input_rgb(path: &Path) -> Result<RgbImage> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    Ok(dyn_img.to_rgb8())
}

fn raster_view(rgb: &RgbImage) -> Result<RasterView<'_>> {
    RasterView::new(rgb.width() as usize, rgb.height() as usize, 3, rgb.as_raw())
        .context("building raster view over decoded image")
}

fn line_dtos(lines: &[Polyline]) -> Vec<LineDto> {
    lines
        .iter()
        .map(|line| LineDto {
            segments: line
                .segments
                .iter()
                .map(|s| SegmentDto {
                    a: [s.a.i, s.a.j],
                    b: [s.b.i, s.b.j],
                })
                .collect(),
        })
        .collect()
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing JSON for {}", path.display()))?;
    fs::write(&path, json).with_context(|| format!("writing JSON {}", path.display()))
}

fn save_mask_png(path: PathBuf, mask: &Grid<u8>) -> Result<()> {
    let data: Vec<u8> = mask
        .data()
        .iter()
        .map(|&c| if c != 0 { 255 } else { 0 })
        .collect();
    let gray = GrayImage::from_raw(mask.width() as u32, mask.height() as u32, data)
        .context("constructing GrayImage from mask")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn render_overlay(input: &RgbImage, lines: &[Polyline]) -> RgbImage {
    let mut rgb = input.clone();
    for line in lines {
        for seg in &line.segments {
            draw_segment(
                &mut rgb,
                (seg.a.j as f32, seg.a.i as f32),
                (seg.b.j as f32, seg.b.i as f32),
                Rgb([255, 64, 64]),
            );
        }
    }
    rgb
}

/// Stamps the segment into the image by stepping along its longer axis.
fn draw_segment(img: &mut RgbImage, a: (f32, f32), b: (f32, f32), color: Rgb<u8>) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let steps = dx.abs().max(dy.abs()).ceil() as usize;

    for step in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            step as f32 / steps as f32
        };
        draw_dot(img, a.0 + dx * t, a.1 + dy * t, color);
    }
}

fn draw_dot(img: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let xi = x.round() as i32;
    let yi = y.round() as i32;
    if xi < 0 || yi < 0 {
        return;
    }
    let (ux, uy) = (xi as u32, yi as u32);
    if ux >= img.width() || uy >= img.height() {
        return;
    }
    img.put_pixel(ux, uy, color);
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
