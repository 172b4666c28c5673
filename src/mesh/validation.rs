//! Mesh scrubbing before export: degenerate triangles, NaN/Inf
//! coordinates, stale normals

use super::Triangle;
use super::builder::calculate_normal;

/// Area below which a triangle counts as degenerate
const MIN_TRIANGLE_AREA: f32 = 1e-10;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub total: usize,
    pub degenerate: usize,
    pub invalid_coords: usize,
}

impl ValidationReport {
    pub fn removed(&self) -> usize {
        self.degenerate + self.invalid_coords
    }
}

/// Recompute normals and drop degenerate or non-finite triangles.
///
/// Ribbons of self-overlapping strokes and collapsed rings routinely
/// produce slivers of zero area; they render as artifacts in most viewers
/// and are simply dropped.
pub fn scrub_mesh(triangles: Vec<Triangle>) -> (Vec<Triangle>, ValidationReport) {
    let mut report = ValidationReport {
        total: triangles.len(),
        ..Default::default()
    };

    let mut cleaned = Vec::with_capacity(triangles.len());
    for mut tri in triangles {
        if has_invalid_coords(&tri) {
            report.invalid_coords += 1;
            continue;
        }
        if triangle_area(&tri.vertices) < MIN_TRIANGLE_AREA {
            report.degenerate += 1;
            continue;
        }
        tri.normal = calculate_normal(tri.vertices[0], tri.vertices[1], tri.vertices[2]);
        cleaned.push(tri);
    }

    (cleaned, report)
}

fn has_invalid_coords(tri: &Triangle) -> bool {
    tri.vertices
        .iter()
        .flatten()
        .chain(tri.normal.iter())
        .any(|c| !c.is_finite())
}

fn triangle_area(vertices: &[[f32; 3]; 3]) -> f32 {
    let [v0, v1, v2] = vertices;

    let a = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let b = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    let cx = a[1] * b[2] - a[2] * b[1];
    let cy = a[2] * b[0] - a[0] * b[2];
    let cz = a[0] * b[1] - a[1] * b[0];

    0.5 * (cx * cx + cy * cy + cz * cz).sqrt()
}
