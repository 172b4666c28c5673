//! Planar shapes: projected closed contours and polygons with holes

pub mod stroke;

pub use stroke::{StrokeOptions, stroke_path, stroke_ring};

use crate::domain::Ring;
use crate::geometry::Projection;

/// One closed planar outline, ordered, in projection output units
pub type Contour = Vec<(f64, f64)>;

/// A filled planar shape: an outer contour plus subtracted holes.
/// Holes are assumed nested inside the outer contour; that invariant is
/// the data source's responsibility, not validated here.
#[derive(Debug, Clone, Default)]
pub struct PlanarShape {
    pub outer: Contour,
    pub holes: Vec<Contour>,
}

impl PlanarShape {
    pub fn from_contour(outer: Contour) -> PlanarShape {
        PlanarShape {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }
}

/// Project a geographic ring into a planar contour, point by point.
/// Order is preserved and winding is left untouched; interpreting winding
/// is the mesh consumer's concern.
pub fn ring_to_contour(ring: &Ring, projection: &Projection) -> Contour {
    projection.project_points(ring)
}

/// Project a polygon ring set: first ring is the outer boundary, the rest
/// are holes.
pub fn polygon_to_shape(rings: &[Ring], projection: &Projection) -> PlanarShape {
    let Some((outer, holes)) = rings.split_first() else {
        return PlanarShape::default();
    };

    PlanarShape {
        outer: ring_to_contour(outer, projection),
        holes: holes.iter().map(|h| ring_to_contour(h, projection)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeoBounds;

    fn test_projection() -> Projection {
        let bounds = GeoBounds {
            min_lon: -10.0,
            min_lat: -10.0,
            max_lon: 10.0,
            max_lat: 10.0,
        };
        Projection::new(&bounds, 1e-3)
    }

    #[test]
    fn test_ring_to_contour_preserves_order() {
        let projection = test_projection();
        let ring = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)];
        let contour = ring_to_contour(&ring, &projection);

        assert_eq!(contour.len(), 4);
        assert_eq!(contour[0], contour[3]);
        assert!(contour[1].0 > contour[0].0);
    }

    #[test]
    fn test_polygon_to_shape_splits_holes() {
        let projection = test_projection();
        let rings = vec![
            vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)],
            vec![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 0.5)],
        ];
        let shape = polygon_to_shape(&rings, &projection);

        assert_eq!(shape.outer.len(), 5);
        assert_eq!(shape.holes.len(), 1);
        assert_eq!(shape.holes[0].len(), 4);
        assert_eq!(shape.point_count(), 9);
    }

    #[test]
    fn test_polygon_to_shape_empty() {
        let projection = test_projection();
        let shape = polygon_to_shape(&[], &projection);
        assert!(shape.outer.is_empty());
        assert!(shape.holes.is_empty());
    }
}
