//! Per-invocation pipeline configuration and the CLI config file.
//!
//! Configuration never hard-fails: unknown output-type tokens fall back to
//! the defaults per axis, mirroring the pipeline's tolerance for messy
//! input data.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::{Feature, FeatureKind};

/// How a planar shape becomes 3D geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeomKind {
    /// Extruded volume: caps plus side walls
    #[default]
    Extrude,
    /// Flat tessellated surface, no depth
    Plane,
    /// Vertical wall quads only, no caps
    Side,
}

impl GeomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeomKind::Extrude => "extrude",
            GeomKind::Plane => "plane",
            GeomKind::Side => "side",
        }
    }
}

/// Which planar shape a polygon produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    /// Filled ring with holes
    #[default]
    Surface,
    /// Stroked ribbon of the outer ring; holes are ignored
    Outline,
}

/// Output mode: two independent axes parsed from a
/// `"<geom>-<shape>"` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputType {
    pub geom: GeomKind,
    pub shape: ShapeKind,
}

impl OutputType {
    pub fn new(geom: GeomKind, shape: ShapeKind) -> OutputType {
        OutputType { geom, shape }
    }

    /// Parse an output-type string like "extrude-surface" or
    /// "plane-outline". Unknown tokens fall back per axis to the
    /// defaults instead of failing.
    pub fn parse(input: &str) -> OutputType {
        let lower = input.to_ascii_lowercase();
        let mut tokens = lower.splitn(2, '-');

        let geom = match tokens.next().unwrap_or_default() {
            "extrude" | "" => GeomKind::Extrude,
            "plane" => GeomKind::Plane,
            "side" => GeomKind::Side,
            other => {
                warn!(token = other, "unknown geometry type, using extrude");
                GeomKind::Extrude
            }
        };

        let shape = match tokens.next() {
            Some("surface") | None => ShapeKind::Surface,
            Some("outline") => ShapeKind::Outline,
            Some(other) => {
                warn!(token = other, "unknown shape type, using surface");
                ShapeKind::Surface
            }
        };

        OutputType { geom, shape }
    }
}

/// Feature veto predicate, applied on top of the kind whitelist
pub type FeatureFilter = Box<dyn Fn(&Feature) -> bool + Send + Sync>;

/// Pipeline configuration. `depth` and `line_width` are in projection
/// input units (meters at the equator) and get multiplied by `scale`
/// alongside the geometry, so the defaults keep their meaning at any
/// output scale.
pub struct ModelConfig {
    /// Eligible feature kinds, defaults to all four
    pub feature_kinds: Vec<FeatureKind>,
    pub output_type: OutputType,
    /// Fill color for caps and planes, 0xRRGGBB
    pub color: u32,
    /// Side-wall color, 0xRRGGBB
    pub side_color: u32,
    /// Extrusion depth before scaling
    pub depth: f64,
    /// Full stroke width before scaling
    pub line_width: f64,
    /// World-to-model scale factor
    pub scale: f64,
    /// Minimum geographic polygon area in square meters; 0 disables
    pub min_polygon_area: f64,
    /// Simplification tolerance in degrees; `None` disables
    pub simplify_tolerance: Option<f64>,
    /// A single-polygon MultiPolygon with more rings than this is
    /// re-read as independent single-ring polygons. Dataset-specific
    /// repair heuristic, not a domain truth.
    pub multipolygon_repair_threshold: usize,
    /// Miter clamp for stroked joints
    pub miter_limit: f64,
    /// Disable to reproduce legacy constant-width joints
    pub scaled_miter_joins: bool,
    pub feature_filter: Option<FeatureFilter>,
}

impl Default for ModelConfig {
    fn default() -> ModelConfig {
        ModelConfig {
            feature_kinds: FeatureKind::ALL.to_vec(),
            output_type: OutputType::default(),
            color: 0x00bbdd,
            side_color: 0xffffff,
            depth: 1e5,
            line_width: 1.5e4,
            scale: 1e-3,
            min_polygon_area: 0.0,
            simplify_tolerance: None,
            multipolygon_repair_threshold: 10,
            miter_limit: 4.0,
            scaled_miter_joins: true,
            feature_filter: None,
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("feature_kinds", &self.feature_kinds)
            .field("output_type", &self.output_type)
            .field("color", &format_args!("{:#08x}", self.color))
            .field("side_color", &format_args!("{:#08x}", self.side_color))
            .field("depth", &self.depth)
            .field("line_width", &self.line_width)
            .field("scale", &self.scale)
            .field("min_polygon_area", &self.min_polygon_area)
            .field("simplify_tolerance", &self.simplify_tolerance)
            .field(
                "multipolygon_repair_threshold",
                &self.multipolygon_repair_threshold,
            )
            .field("miter_limit", &self.miter_limit)
            .field("scaled_miter_joins", &self.scaled_miter_joins)
            .field("feature_filter", &self.feature_filter.is_some())
            .finish()
    }
}

impl ModelConfig {
    pub fn with_output_type(mut self, output_type: OutputType) -> ModelConfig {
        self.output_type = output_type;
        self
    }

    pub fn with_feature_kinds(mut self, kinds: impl Into<Vec<FeatureKind>>) -> ModelConfig {
        self.feature_kinds = kinds.into();
        self
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(&Feature) -> bool + Send + Sync + 'static,
    ) -> ModelConfig {
        self.feature_filter = Some(Box::new(filter));
        self
    }

    pub fn accepts_kind(&self, kind: FeatureKind) -> bool {
        self.feature_kinds.contains(&kind)
    }
}

/// Optional TOML config for the CLI, merged under command-line flags
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub output_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub side_color: Option<String>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub line_width: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub min_polygon_area: Option<f64>,
    #[serde(default)]
    pub simplify_tolerance: Option<f64>,
    #[serde(default)]
    pub feature_types: Option<Vec<String>>,
}

/// Parse a color string: "#00bbdd", "0x00bbdd", or bare hex digits
pub fn parse_color(input: &str) -> Option<u32> {
    let digits = input
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x");
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
