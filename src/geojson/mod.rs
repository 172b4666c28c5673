//! GeoJSON document parsing
//!
//! Converts a FeatureCollection document into domain features. Geometry
//! kinds outside the four supported ones, null geometries, and malformed
//! coordinate arrays are skipped rather than failing the whole document:
//! real-world boundary datasets are messy and one bad feature must not
//! prevent the rest from converting.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Feature, FeatureCollection, Geometry, Position, Ring};

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("failed to parse GeoJSON document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, found \"{0}\"")]
    NotACollection(String),
}

/// Raw document shape; coordinates stay untyped until the geometry
/// kind is known.
#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

/// Parse a GeoJSON FeatureCollection into domain features
pub fn parse_feature_collection(input: &str) -> Result<FeatureCollection, GeoJsonError> {
    let raw: RawCollection = serde_json::from_str(input)?;
    if raw.type_ != "FeatureCollection" {
        return Err(GeoJsonError::NotACollection(raw.type_));
    }

    let mut features = Vec::with_capacity(raw.features.len());
    for raw_feature in raw.features {
        let name = raw_feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .map(str::to_string);

        let Some(raw_geometry) = raw_feature.geometry else {
            debug!(?name, "skipping feature with null geometry");
            continue;
        };

        match convert_geometry(&raw_geometry) {
            Some(geometry) => features.push(Feature { geometry, name }),
            None => debug!(
                kind = %raw_geometry.type_,
                ?name,
                "skipping unsupported or malformed geometry"
            ),
        }
    }

    Ok(FeatureCollection { features })
}

fn convert_geometry(raw: &RawGeometry) -> Option<Geometry> {
    match raw.type_.as_str() {
        "Polygon" => Some(Geometry::Polygon(rings(&raw.coordinates)?)),
        "MultiPolygon" => Some(Geometry::MultiPolygon(polygons(&raw.coordinates)?)),
        "LineString" => Some(Geometry::LineString(path(&raw.coordinates)?)),
        "MultiLineString" => Some(Geometry::MultiLineString(rings(&raw.coordinates)?)),
        _ => None,
    }
}

/// A GeoJSON position: [lon, lat] or [lon, lat, alt]. Altitude is ignored.
fn position(value: &serde_json::Value) -> Option<Position> {
    let coords = value.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    Some((coords[0].as_f64()?, coords[1].as_f64()?))
}

fn path(value: &serde_json::Value) -> Option<Ring> {
    value.as_array()?.iter().map(position).collect()
}

fn rings(value: &serde_json::Value) -> Option<Vec<Ring>> {
    value.as_array()?.iter().map(path).collect()
}

fn polygons(value: &serde_json::Value) -> Option<Vec<Vec<Ring>>> {
    value.as_array()?.iter().map(rings).collect()
}
