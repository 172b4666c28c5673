//! geoplate - Convert GeoJSON vector data into planar shapes and 3D meshes
//!
//! The pipeline runs in stages: parse a GeoJSON feature collection, fit a
//! Mercator projection to its bounding box (tolerating antimeridian-crossing
//! and over-wrapped longitudes), turn each feature into planar shapes
//! (filled polygons with holes, or stroked ribbons for lines and outlines),
//! and tessellate those shapes into triangle meshes as flat planes,
//! extruded volumes, or bare side walls.

pub mod config;
pub mod domain;
pub mod geojson;
pub mod geometry;
pub mod mesh;
pub mod model;
pub mod shape;
