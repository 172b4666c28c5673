//! The three shape-to-mesh strategies: flat plane, extruded volume, and
//! bare side walls.

use super::Triangle;
use super::triangulation::triangulate_shape;
use crate::shape::{Contour, PlanarShape};

/// Flat tessellated surface at z=0
pub fn plane_shape(shape: &PlanarShape) -> Vec<Triangle> {
    let (points, indices) = triangulate_shape(shape);

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for tri in indices.chunks(3) {
        if tri.len() != 3 {
            continue;
        }
        triangles.push(Triangle::flat(
            points[tri[0]],
            points[tri[1]],
            points[tri[2]],
            0.0,
        ));
    }
    triangles
}

/// Extrude a shape into a closed volume between z=0 and z=depth.
///
/// Returns (caps, walls) separately so the dispatcher can assign the fill
/// and side materials: caps are the tessellated top and bottom faces,
/// walls cover the outer contour and every hole.
pub fn extrude_shape(shape: &PlanarShape, depth: f64) -> (Vec<Triangle>, Vec<Triangle>) {
    let (points, indices) = triangulate_shape(shape);

    let mut caps = Vec::with_capacity(indices.len() / 3 * 2);
    for tri in indices.chunks(3) {
        if tri.len() != 3 {
            continue;
        }
        let p0 = points[tri[0]];
        let p1 = points[tri[1]];
        let p2 = points[tri[2]];

        caps.push(Triangle::flat(p0, p1, p2, depth));
        // bottom face winds the other way so it faces outward
        caps.push(Triangle::flat(p0, p2, p1, 0.0));
    }

    let mut walls = Vec::new();
    add_walls(&mut walls, &shape.outer, depth, false);
    for hole in &shape.holes {
        add_walls(&mut walls, hole, depth, true);
    }

    (caps, walls)
}

/// Only the vertical wall quads of a contour, between z=0 and z=depth,
/// with no caps
pub fn side_walls(contour: &Contour, depth: f64) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    add_walls(&mut triangles, contour, depth, false);
    triangles
}

/// Two triangles per contour edge, wrapping back to the first vertex when
/// the contour doesn't already close on itself
fn add_walls(triangles: &mut Vec<Triangle>, contour: &Contour, depth: f64, reversed: bool) {
    for (v1, v2) in contour_edges(contour) {
        let b1 = [v1.0 as f32, v1.1 as f32, 0.0];
        let b2 = [v2.0 as f32, v2.1 as f32, 0.0];
        let t1 = [v1.0 as f32, v1.1 as f32, depth as f32];
        let t2 = [v2.0 as f32, v2.1 as f32, depth as f32];

        if reversed {
            triangles.push(Triangle::new(b1, t2, b2));
            triangles.push(Triangle::new(b1, t1, t2));
        } else {
            triangles.push(Triangle::new(b1, b2, t2));
            triangles.push(Triangle::new(b1, t2, t1));
        }
    }
}

fn contour_edges(contour: &Contour) -> Vec<((f64, f64), (f64, f64))> {
    let mut edges: Vec<_> = contour.windows(2).map(|w| (w[0], w[1])).collect();

    if let (Some(&first), Some(&last)) = (contour.first(), contour.last())
        && contour.len() > 2
        && ((first.0 - last.0).abs() > 1e-9 || (first.1 - last.1).abs() > 1e-9)
    {
        edges.push((last, first));
    }

    edges
}
