//! Ramer-Douglas-Peucker simplification of geographic geometry, applied
//! before projection. Tolerance is in degrees.
//!
//! A ring that would collapse below validity keeps its original points;
//! simplification degrades to a no-op instead of dropping the feature.

use geo::{LineString, Simplify};
use tracing::debug;

use crate::domain::{Feature, FeatureCollection, Geometry, Ring};

pub fn simplify_path(points: &[(f64, f64)], tolerance: f64) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let line: LineString<f64> = points
        .iter()
        .map(|&(lon, lat)| geo::coord! { x: lon, y: lat })
        .collect();

    let simplified = line.simplify(&tolerance);

    simplified.0.into_iter().map(|c| (c.x, c.y)).collect()
}

/// Simplify a closed ring, preserving at least a valid triangle
pub fn simplify_ring(ring: &[(f64, f64)], tolerance: f64) -> Vec<(f64, f64)> {
    if ring.len() < 5 {
        return ring.to_vec();
    }

    let simplified = simplify_path(ring, tolerance);

    if simplified.len() < 4 {
        debug!(
            original = ring.len(),
            simplified = simplified.len(),
            "simplification collapsed ring, keeping original points"
        );
        return ring.to_vec();
    }

    simplified
}

pub fn simplify_feature(feature: &Feature, tolerance: f64) -> Feature {
    let geometry = match &feature.geometry {
        Geometry::Polygon(rings) => Geometry::Polygon(simplify_rings(rings, tolerance)),
        Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
            polygons
                .iter()
                .map(|rings| simplify_rings(rings, tolerance))
                .collect(),
        ),
        Geometry::LineString(path) => Geometry::LineString(simplify_path(path, tolerance)),
        Geometry::MultiLineString(paths) => Geometry::MultiLineString(
            paths.iter().map(|p| simplify_path(p, tolerance)).collect(),
        ),
    };

    Feature {
        geometry,
        name: feature.name.clone(),
    }
}

/// Simplify every feature of a collection
pub fn simplify_collection(collection: &FeatureCollection, tolerance: f64) -> FeatureCollection {
    FeatureCollection {
        features: collection
            .features
            .iter()
            .map(|f| simplify_feature(f, tolerance))
            .collect(),
    }
}

fn simplify_rings(rings: &[Ring], tolerance: f64) -> Vec<Ring> {
    rings.iter().map(|r| simplify_ring(r, tolerance)).collect()
}
