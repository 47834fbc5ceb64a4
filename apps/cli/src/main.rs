// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! planvec - floor plan analysis driver.
//!
//! Analyzes a raster scan or DXF drawing and writes the artifact the
//! external 3D synthesis stage consumes: a scene JSON for raster input,
//! a plan parameter JSON for vector input. The pipeline is selected by
//! file extension.

use anyhow::{anyhow, bail, Context, Result};
use image::GrayImage;
use planvec_raster::{image_ops, RasterConfig};
use planvec_scene::write_json;
use planvec_vector::ReconstructConfig;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let input = PathBuf::from(&args[1]);
    let options = Options::parse(&args[2..])?;

    let is_dxf = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("dxf"))
        .unwrap_or(false);

    if is_dxf {
        run_vector(&input, &options)
    } else {
        run_raster(&input, &options)
    }
}

#[derive(Debug, Default)]
struct Options {
    output: Option<PathBuf>,
    debug_dir: Option<PathBuf>,
    footprint_out: Option<PathBuf>,
    min_area: Option<f64>,
    wall_thickness: Option<f64>,
    wall_height: Option<f64>,
    scale_factor: Option<f64>,
    target_size: Option<f64>,
    floors: Option<u32>,
    floor_height: Option<f64>,
    slab_thickness: Option<f64>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--output" => {
                    options.output = Some(PathBuf::from(value(args, &mut i, "--output")?));
                }
                "--debug-dir" => {
                    options.debug_dir = Some(PathBuf::from(value(args, &mut i, "--debug-dir")?));
                }
                "--footprint-out" => {
                    options.footprint_out =
                        Some(PathBuf::from(value(args, &mut i, "--footprint-out")?));
                }
                "--min-area" => {
                    options.min_area = Some(parse_value(args, &mut i, "--min-area")?);
                }
                "--wall-thickness" => {
                    options.wall_thickness =
                        Some(parse_value(args, &mut i, "--wall-thickness")?);
                }
                "--wall-height" => {
                    options.wall_height = Some(parse_value(args, &mut i, "--wall-height")?);
                }
                "--scale-factor" => {
                    options.scale_factor = Some(parse_value(args, &mut i, "--scale-factor")?);
                }
                "--target-size" => {
                    options.target_size = Some(parse_value(args, &mut i, "--target-size")?);
                }
                "--floors" => {
                    options.floors = Some(parse_value(args, &mut i, "--floors")?);
                }
                "--floor-height" => {
                    options.floor_height = Some(parse_value(args, &mut i, "--floor-height")?);
                }
                "--slab-thickness" => {
                    options.slab_thickness =
                        Some(parse_value(args, &mut i, "--slab-thickness")?);
                }
                other => {
                    bail!("unknown option: {other} (run with --help for usage)");
                }
            }
            i += 1;
        }
        Ok(options)
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .with_context(|| format!("missing value for {flag}"))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T> {
    let raw = value(args, i, flag)?;
    raw.parse()
        .map_err(|_| anyhow!("invalid value for {flag}: {raw}"))
}

fn run_raster(input: &Path, options: &Options) -> Result<()> {
    let mut config = RasterConfig::default();
    if let Some(v) = options.min_area {
        config.min_region_area = v;
    }
    if let Some(v) = options.wall_thickness {
        config.wall_thickness = v;
    }
    if let Some(v) = options.wall_height {
        config.wall_height = v;
    }
    if let Some(v) = options.scale_factor {
        config.scale_factor = v;
    }

    tracing::info!(input = %input.display(), "analyzing raster plan");

    // The debug path decodes up front so the mask stages can be dumped
    let scene = match &options.debug_dir {
        Some(dir) => {
            let image = image::open(input)
                .with_context(|| format!("cannot open image '{}'", input.display()))?;
            let grayscale = image.to_luma8();
            dump_mask_stages(&grayscale, &config, dir)?;
            planvec_raster::analyze_grayscale(&grayscale, &config)?
        }
        None => planvec_raster::analyze_image(input, &config)
            .with_context(|| format!("cannot analyze image '{}'", input.display()))?,
    };

    tracing::info!(
        width = scene.image_width,
        height = scene.image_height,
        walls = scene.walls.len(),
        doors = scene.doors.len(),
        windows = scene.windows.len(),
        rooms = scene.rooms.len(),
        "classification complete"
    );

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| input.with_extension("scene.json"));
    write_json(&output, &scene)?;
    println!("{}", output.display());
    Ok(())
}

fn run_vector(input: &Path, options: &Options) -> Result<()> {
    let mut config = ReconstructConfig::default();
    if let Some(v) = options.wall_thickness {
        config.wall_thickness = v;
    }
    if let Some(v) = options.wall_height {
        config.wall_height = v;
    }
    if let Some(v) = options.target_size {
        config.target_size = v;
    }
    if let Some(v) = options.floors {
        config.floors = v;
    }
    if let Some(v) = options.floor_height {
        config.floor_height = v;
    }
    if let Some(v) = options.slab_thickness {
        config.slab_thickness = v;
    }

    tracing::info!(input = %input.display(), "reconstructing vector plan");

    let (footprint, plan) = planvec_vector::analyze_dxf(input, &config)?;
    tracing::info!(
        quads = footprint.quads.len(),
        floors = footprint.levels.len(),
        scale = footprint.scale,
        width = footprint.bounds.width(),
        height = footprint.bounds.height(),
        "footprint reconstructed"
    );

    if let Some(path) = &options.footprint_out {
        write_json(path, &footprint)?;
        tracing::debug!(path = %path.display(), "footprint dump saved");
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| input.with_extension("plan.json"));
    write_json(&output, &plan)?;
    println!("{}", output.display());
    Ok(())
}

/// Save the intermediate mask stages for pipeline tuning
fn dump_mask_stages(grayscale: &GrayImage, config: &RasterConfig, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create debug dir '{}'", dir.display()))?;

    let blurred = image_ops::gaussian_blur(
        grayscale,
        image_ops::sigma_for_kernel(config.blur_kernel_size),
    );
    let binary =
        image_ops::mean_offset_threshold(&blurred, config.threshold_block_size, config.threshold_c);
    let mask = image_ops::structure_mask(grayscale, config);

    for (name, stage) in [("blurred.png", &blurred), ("binary.png", &binary), ("mask.png", &mask)] {
        let path = dir.join(name);
        stage
            .save(&path)
            .with_context(|| format!("cannot save debug image '{}'", path.display()))?;
        tracing::debug!(stage = name, path = %path.display(), "debug stage saved");
    }
    Ok(())
}

fn print_usage() {
    println!(
        r#"Floor Plan Analyzer
===================

Analyzes a floor plan and writes the artifact consumed by the external
3D synthesis stage.

Raster images run the full vectorization pipeline and produce a scene
JSON with classified walls, doors, windows and a room envelope. DXF
drawings run the wall footprint reconstruction and produce a plan
parameter JSON.

USAGE:
  planvec <input> [OPTIONS]

ARGUMENTS:
  <input>                   Floor plan image (PNG, JPEG) or DXF drawing

COMMON OPTIONS:
  --output <path>           Artifact path (default: <input>.scene.json
                            for images, <input>.plan.json for DXF)
  --wall-height <m>         Wall extrusion height (default: 3.0)
  -h, --help                Show this help message

RASTER OPTIONS:
  --min-area <px2>          Minimum traced region area (default: 400)
  --wall-thickness <frac>   Normalized wall thickness (default: 0.02)
  --scale-factor <m/px>     Meters-per-pixel hint for the consumer (default: 0.02)
  --debug-dir <dir>         Save mask stages (blurred, binary, mask) as PNGs

VECTOR OPTIONS:
  --target-size <m>         World size of the footprint's longer axis (default: 30)
  --wall-thickness <units>  Wall thickness in plan units (default: 0.2)
  --floors <n>              Storeys to replicate (default: 1)
  --floor-height <m>        Vertical storey spacing (default: 3.0)
  --slab-thickness <m>      Floor slab thickness (default: 0.3)
  --footprint-out <path>    Also dump the reconstructed footprint geometry

EXAMPLES:
  # Vectorize a scanned plan
  planvec scan.png

  # Tune the noise floor and inspect the mask stages
  planvec scan.png --min-area 250 --debug-dir debug/

  # Reconstruct a 3-storey footprint from CAD lines
  planvec drawing.dxf --target-size 40 --floors 3
"#
    );
}
