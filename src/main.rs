use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use geoplate::config::{FileConfig, ModelConfig, OutputType, parse_color};
use geoplate::domain::FeatureKind;
use geoplate::geojson::parse_feature_collection;
use geoplate::mesh::{estimate_stl_size, scrub_mesh, write_mtl, write_obj, write_stl};
use geoplate::model::{ModelGroup, build_model};

/// Convert GeoJSON vector data into 3D mesh files
///
/// Examples:
///   # Extrude every feature of a dataset into an OBJ model
///   geoplate regions.geojson
///
///   # Flat outline rendering of polygon borders, written as STL
///   geoplate regions.geojson -o borders.stl --output-type plane-outline
///
///   # Only large polygons, simplified, with custom colors
///   geoplate world.geojson --min-polygon-area 1e9 --simplify 0.01 --color "#336699"
///
///   # Use a config file
///   geoplate --config plate.toml
#[derive(Parser, Debug)]
#[command(name = "geoplate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input GeoJSON file (FeatureCollection)
    input: Option<PathBuf>,

    /// Path to a TOML config file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file path (defaults to the input name with the format extension)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format; inferred from the output extension when omitted
    #[arg(short = 'f', long)]
    format: Option<Format>,

    /// Output type: <geom>-<shape> where geom is extrude, plane, or side
    /// and shape is surface or outline
    #[arg(short = 't', long)]
    output_type: Option<String>,

    /// Extrusion depth in meters
    #[arg(long)]
    depth: Option<f64>,

    /// Stroke width for lines and outlines, in meters
    #[arg(long)]
    line_width: Option<f64>,

    /// World-to-model scale factor
    #[arg(long)]
    scale: Option<f64>,

    /// Skip polygons below this geodesic area in square meters
    #[arg(long)]
    min_polygon_area: Option<f64>,

    /// Simplification tolerance in degrees (off by default)
    #[arg(long)]
    simplify: Option<f64>,

    /// Fill color as hex, e.g. "#00bbdd"
    #[arg(long)]
    color: Option<String>,

    /// Side-wall color as hex
    #[arg(long)]
    side_color: Option<String>,

    /// Geometry types to include (defaults to all four)
    #[arg(long, value_delimiter = ',')]
    feature_types: Option<Vec<String>>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Obj,
    Stl,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    init_logging(args.verbose);

    let file_config = match &args.config {
        Some(config_path) => {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        }
        None => FileConfig::default(),
    };

    let Some(input) = args.input.clone().or(file_config.input.clone()) else {
        bail!("No input file given; pass a GeoJSON path or set `input` in the config file");
    };

    let output_type = args
        .output_type
        .as_deref()
        .or(file_config.output_type.as_deref())
        .map(OutputType::parse)
        .unwrap_or_default();

    let mut config = ModelConfig::default().with_output_type(output_type);
    if let Some(depth) = args.depth.or(file_config.depth) {
        config.depth = depth;
    }
    if let Some(line_width) = args.line_width.or(file_config.line_width) {
        config.line_width = line_width;
    }
    if let Some(scale) = args.scale.or(file_config.scale) {
        config.scale = scale;
    }
    if let Some(min_area) = args.min_polygon_area.or(file_config.min_polygon_area) {
        config.min_polygon_area = min_area;
    }
    config.simplify_tolerance = args.simplify.or(file_config.simplify_tolerance);
    if let Some(color) = args.color.as_deref().or(file_config.color.as_deref()) {
        config.color = parse_color(color)
            .with_context(|| format!("Invalid color: {:?} (expected hex like #00bbdd)", color))?;
    }
    if let Some(color) = args
        .side_color
        .as_deref()
        .or(file_config.side_color.as_deref())
    {
        config.side_color = parse_color(color)
            .with_context(|| format!("Invalid side color: {:?}", color))?;
    }
    if let Some(names) = args.feature_types.as_ref().or(file_config.feature_types.as_ref()) {
        config.feature_kinds = parse_feature_kinds(names)?;
    }

    let output = args
        .output
        .clone()
        .or(file_config.output.clone())
        .unwrap_or_else(|| input.with_extension("obj"));
    let format = match args.format {
        Some(format) => format,
        None => infer_format(&output)?,
    };

    let spinner = create_spinner("Parsing GeoJSON...");
    let start = Instant::now();
    let contents = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let collection = parse_feature_collection(&contents)
        .with_context(|| format!("Failed to parse GeoJSON: {}", input.display()))?;
    spinner.finish_with_message(format!(
        "Parsed {} features [{:.1}s]",
        collection.features.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Building model...");
    let start = Instant::now();
    let mut group = build_model(&collection, &config);
    let removed = scrub_group(&mut group);
    spinner.finish_with_message(format!(
        "Built {} meshes, {} triangles ({} scrubbed) [{:.1}s]",
        group.meshes.len(),
        group.triangle_count(),
        removed,
        start.elapsed().as_secs_f32()
    ));

    if group.is_empty() {
        bail!(
            "No geometry produced; check --feature-types and --min-polygon-area against the input"
        );
    }

    let spinner = create_spinner("Writing output...");
    let start = Instant::now();
    let written = match format {
        Format::Obj => {
            let mtl_path = output.with_extension("mtl");
            let mtl_name = mtl_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            write_obj(&output, &group, mtl_name.as_deref())
                .context("Failed to write OBJ file")?;
            write_mtl(&mtl_path, &group).context("Failed to write MTL file")?;
            format!("{} + {}", output.display(), mtl_path.display())
        }
        Format::Stl => {
            let triangles = group.all_triangles();
            write_stl(&output, &triangles).context("Failed to write STL file")?;
            format!(
                "{} ({:.1} KB)",
                output.display(),
                estimate_stl_size(triangles.len()) as f64 / 1024.0
            )
        }
    };
    spinner.finish_with_message(format!(
        "Wrote {} [{:.1}s]",
        written,
        start.elapsed().as_secs_f32()
    ));

    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn parse_feature_kinds(names: &[String]) -> Result<Vec<FeatureKind>> {
    names
        .iter()
        .map(|name| {
            FeatureKind::from_type_name(name).with_context(|| {
                format!(
                    "Unknown feature type: {:?} (expected Polygon, MultiPolygon, LineString, or MultiLineString)",
                    name
                )
            })
        })
        .collect()
}

fn infer_format(output: &Path) -> Result<Format> {
    match output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => Ok(Format::Obj),
        Some(ext) if ext.eq_ignore_ascii_case("stl") => Ok(Format::Stl),
        _ => bail!(
            "Cannot infer format from output path {:?}; pass --format obj or --format stl",
            output
        ),
    }
}

/// Drop degenerate triangles from every part, returning the removed count
fn scrub_group(group: &mut ModelGroup) -> usize {
    let mut removed = 0;
    for mesh in &mut group.meshes {
        for part in &mut mesh.parts {
            let (cleaned, report) = scrub_mesh(std::mem::take(&mut part.triangles));
            removed += report.removed();
            part.triangles = cleaned;
        }
    }
    removed
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
