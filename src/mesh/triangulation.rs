//! Tessellation of planar shapes, delegated to earcut

use earcutr::earcut;

use crate::shape::PlanarShape;

/// Triangulate a shape with holes.
///
/// Returns the concatenated vertex list (outer contour followed by hole
/// contours) and triangle indices into it. Degenerate shapes yield no
/// indices rather than an error.
pub fn triangulate_shape(shape: &PlanarShape) -> (Vec<(f64, f64)>, Vec<usize>) {
    let mut points: Vec<(f64, f64)> = shape.outer.clone();
    for hole in &shape.holes {
        points.extend(hole.iter().copied());
    }

    if shape.outer.len() < 3 {
        return (points, Vec::new());
    }

    let mut vertices: Vec<f64> = Vec::with_capacity(points.len() * 2);
    let mut hole_indices: Vec<usize> = Vec::with_capacity(shape.holes.len());

    for &(x, y) in &shape.outer {
        vertices.push(x);
        vertices.push(y);
    }

    for hole in &shape.holes {
        hole_indices.push(vertices.len() / 2);
        for &(x, y) in hole {
            vertices.push(x);
            vertices.push(y);
        }
    }

    let indices = earcut(&vertices, &hole_indices, 2).unwrap_or_default();
    (points, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangulate_square() {
        let shape = PlanarShape::from_contour(vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ]);
        let (points, indices) = triangulate_shape(&shape);
        assert_eq!(points.len(), 4);
        assert_eq!(indices.len(), 6);
    }

    #[test]
    fn test_triangulate_empty() {
        let (points, indices) = triangulate_shape(&PlanarShape::default());
        assert!(points.is_empty());
        assert!(indices.is_empty());
    }

    #[test]
    fn test_triangulate_with_hole() {
        let shape = PlanarShape {
            outer: vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            holes: vec![vec![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]],
        };
        let (points, indices) = triangulate_shape(&shape);
        assert_eq!(points.len(), 8);
        assert!(!indices.is_empty());
        assert_eq!(indices.len() % 3, 0);
        // hole indices must be referenced
        assert!(indices.iter().any(|&i| i >= 4));
    }
}
