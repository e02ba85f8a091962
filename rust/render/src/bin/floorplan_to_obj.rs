// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Convert a saved room list into a 3D floor (OBJ + MTL output)
//!
//! Usage:
//!   floorplan-to-obj <rooms.json> [options]

use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use floorplan_core::{rooms_from_json, WallConfig};
use floorplan_geometry::OverlayUnion;
use floorplan_render::{build_scene, write_mtl, write_obj, ObjExport, Theme, WallCache};

struct Args {
    input: PathBuf,
    output: PathBuf,
    theme: Theme,
}

fn parse_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(None);
    }

    let mut input = None;
    let mut output = PathBuf::from("floorplan.obj");
    let mut theme = Theme::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                output = iter.next().context("--output needs a path")?.into();
            }
            "--theme" => {
                let value = iter.next().context("--theme needs a value")?;
                theme = value.parse().map_err(anyhow::Error::msg)?;
            }
            flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => bail!("Unexpected argument: {}", extra),
        }
    }

    let input = input.context("missing <rooms.json>")?;
    Ok(Some(Args { input, output, theme }))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,floorplan_render=debug,floorplan_geometry=debug".into()),
        )
        .init();

    let Some(args) = parse_args()? else {
        print_usage();
        return Ok(());
    };

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read '{}'", args.input.display()))?;
    let rooms = rooms_from_json(&json)
        .with_context(|| format!("Cannot parse rooms from '{}'", args.input.display()))?;

    let config = WallConfig::from_env();
    let mut cache = WallCache::new(config);
    let walls = cache
        .get(&rooms, &OverlayUnion)
        .context("Wall geometry failed")?;
    let scene = build_scene(&rooms, walls, &config, args.theme);
    let export = ObjExport::from_scene(&scene);

    let mtl_path = args.output.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned);

    let mut obj = BufWriter::new(create(&args.output)?);
    write_obj(&mut obj, &export.groups(), mtl_name.as_deref())
        .with_context(|| format!("Cannot write '{}'", args.output.display()))?;

    let mut mtl = BufWriter::new(create(&mtl_path)?);
    write_mtl(&mut mtl, export.materials())
        .with_context(|| format!("Cannot write '{}'", mtl_path.display()))?;

    tracing::info!(
        rooms = rooms.len(),
        groups = export.groups().len(),
        output = %args.output.display(),
        theme = %args.theme,
        "Wrote floor plan"
    );
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Cannot create '{}'", path.display()))
}

fn print_usage() {
    println!(
        r#"Floor Plan to OBJ
=================

Builds wall solids, caps and floor slabs for a saved room list and writes
them as a Wavefront OBJ with a companion MTL file.

USAGE:
  floorplan-to-obj <rooms.json> [OPTIONS]

ARGUMENTS:
  <rooms.json>              JSON array of rooms (id, name, x, y, width, length, color)

OPTIONS:
  -o, --output <path>       Output OBJ path (default: floorplan.obj)
  --theme <light|dark>      Material theme (default: light)
  -h, --help                Show this help message

ENVIRONMENT:
  FLOORPLAN_FULL_WALL_HEIGHT, FLOORPLAN_STUB_WALL_HEIGHT,
  FLOORPLAN_WALL_THICKNESS, FLOORPLAN_FLOOR_ELEVATION,
  FLOORPLAN_CAP_THRESHOLD   Override wall parameters
  RUST_LOG                  Log filter (default: info)
"#
    );
}
