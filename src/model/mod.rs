//! Model assembly: turn a feature collection into per-feature meshes under
//! one shared projection.

pub mod filter;

pub use filter::{is_eligible, normalized_paths, normalized_polygons, passes_area_filter};

use tracing::{debug, info};

use crate::config::{GeomKind, ModelConfig, ShapeKind};
use crate::domain::{Feature, FeatureCollection};
use crate::geometry::{GeoBounds, Projection, simplify_collection};
use crate::mesh::{Triangle, extrude_shape, plane_shape, side_walls};
use crate::shape::{
    PlanarShape, StrokeOptions, polygon_to_shape, ring_to_contour, stroke_path, stroke_ring,
};

/// Triangles sharing one material
#[derive(Debug, Clone)]
pub struct MeshPart {
    pub color: u32,
    pub triangles: Vec<Triangle>,
}

/// The mesh of one input feature, named after it
#[derive(Debug, Clone)]
pub struct FeatureMesh {
    pub name: String,
    pub kind: GeomKind,
    /// The planar shapes the parts were built from
    pub shapes: Vec<PlanarShape>,
    pub parts: Vec<MeshPart>,
}

impl FeatureMesh {
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.triangles.len()).sum()
    }
}

/// The full model: one mesh per surviving feature plus the projection they
/// share, kept so callers can place extra geometry in the same space.
#[derive(Debug, Clone)]
pub struct ModelGroup {
    pub meshes: Vec<FeatureMesh>,
    pub projection: Projection,
}

impl ModelGroup {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(FeatureMesh::triangle_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.iter().all(|m| m.parts.iter().all(|p| p.triangles.is_empty()))
    }

    /// Every triangle of every part, flattened for single-material export
    pub fn all_triangles(&self) -> Vec<Triangle> {
        self.meshes
            .iter()
            .flat_map(|m| m.parts.iter())
            .flat_map(|p| p.triangles.iter().copied())
            .collect()
    }
}

/// Build the model for a feature collection.
///
/// The projection is fit to the bounding box of the eligible features only,
/// so filtered-out geometry cannot shift or rescale the output. Features
/// whose geometry produces no shapes (all polygons under the area
/// threshold, empty paths) yield an empty mesh rather than being dropped,
/// keeping output object order aligned with the input.
pub fn build_model(collection: &FeatureCollection, config: &ModelConfig) -> ModelGroup {
    let simplified;
    let collection = match config.simplify_tolerance {
        Some(tolerance) => {
            simplified = simplify_collection(collection, tolerance);
            &simplified
        }
        None => collection,
    };

    let eligible: Vec<&Feature> = collection
        .features
        .iter()
        .filter(|f| is_eligible(f, config))
        .collect();
    debug!(
        total = collection.features.len(),
        eligible = eligible.len(),
        "selected features"
    );

    let bounds = GeoBounds::from_features(eligible.iter().copied()).unwrap_or(GeoBounds::ZERO);
    let projection = Projection::new(&bounds, config.scale);

    let depth = config.depth * config.scale;
    let stroke = StrokeOptions {
        width: config.line_width * config.scale,
        miter_limit: config.miter_limit,
        scaled_joins: config.scaled_miter_joins,
    };

    let mut meshes = Vec::with_capacity(eligible.len());
    for feature in eligible {
        let shapes = feature_shapes(feature, config, &projection, &stroke);
        let parts = shapes_to_parts(&shapes, config, depth);
        meshes.push(FeatureMesh {
            name: feature.display_name().to_string(),
            kind: config.output_type.geom,
            shapes,
            parts,
        });
    }

    let group = ModelGroup { meshes, projection };
    info!(
        meshes = group.meshes.len(),
        triangles = group.triangle_count(),
        "model built"
    );
    group
}

/// Planar shapes for one feature: polygons become surfaces or stroked
/// outlines, lines always become stroked ribbons.
fn feature_shapes(
    feature: &Feature,
    config: &ModelConfig,
    projection: &Projection,
    stroke: &StrokeOptions,
) -> Vec<PlanarShape> {
    if feature.kind().is_polygonal() {
        let polygons = normalized_polygons(feature, config.multipolygon_repair_threshold);
        let mut shapes = Vec::with_capacity(polygons.len());
        for rings in polygons {
            if !passes_area_filter(&rings, config.min_polygon_area) {
                continue;
            }
            let shape = match config.output_type.shape {
                ShapeKind::Surface => polygon_to_shape(&rings, projection),
                // outline strokes the outer boundary; holes are ignored
                ShapeKind::Outline => {
                    let Some(outer) = rings.first() else { continue };
                    let contour = ring_to_contour(outer, projection);
                    PlanarShape::from_contour(stroke_ring(&contour, stroke))
                }
            };
            if !shape.outer.is_empty() {
                shapes.push(shape);
            }
        }
        shapes
    } else {
        normalized_paths(feature)
            .iter()
            .map(|path| {
                let contour = projection.project_points(path);
                PlanarShape::from_contour(stroke_path(&contour, stroke))
            })
            .filter(|s| !s.outer.is_empty())
            .collect()
    }
}

/// Apply the geometry strategy, splitting extrusions into fill and side
/// parts so the two materials survive export.
fn shapes_to_parts(shapes: &[PlanarShape], config: &ModelConfig, depth: f64) -> Vec<MeshPart> {
    match config.output_type.geom {
        GeomKind::Plane => {
            let triangles: Vec<Triangle> = shapes.iter().flat_map(plane_shape).collect();
            vec![MeshPart {
                color: config.color,
                triangles,
            }]
        }
        GeomKind::Extrude => {
            let mut caps = Vec::new();
            let mut walls = Vec::new();
            for shape in shapes {
                let (c, w) = extrude_shape(shape, depth);
                caps.extend(c);
                walls.extend(w);
            }
            vec![
                MeshPart {
                    color: config.color,
                    triangles: caps,
                },
                MeshPart {
                    color: config.side_color,
                    triangles: walls,
                },
            ]
        }
        GeomKind::Side => {
            let triangles: Vec<Triangle> = shapes
                .iter()
                .flat_map(|s| side_walls(&s.outer, depth))
                .collect();
            vec![MeshPart {
                color: config.side_color,
                triangles,
            }]
        }
    }
}
