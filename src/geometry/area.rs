//! Geographic polygon area, used by the minimum-area filter.
//!
//! Computed on the WGS84 ellipsoid in the source lon/lat domain, independent
//! of the projection, so the filter threshold keeps a physical meaning
//! (square meters) regardless of the configured output scale.

use geo::{GeodesicArea, LineString, Polygon};

use crate::domain::Ring;

/// Geodesic area in square meters of a polygon ring set (outer ring minus
/// holes). `None` when the geometry is too degenerate to measure: rings
/// with fewer than 4 positions or non-finite coordinates.
pub fn polygon_area(rings: &[Ring]) -> Option<f64> {
    let outer = rings.first()?;
    if outer.len() < 4 {
        return None;
    }
    for ring in rings {
        if ring
            .iter()
            .any(|&(lon, lat)| !lon.is_finite() || !lat.is_finite())
        {
            return None;
        }
    }

    let exterior = to_line_string(outer);
    let interiors = rings[1..].iter().map(|r| to_line_string(r)).collect();
    let area = Polygon::new(exterior, interiors).geodesic_area_unsigned();
    area.is_finite().then_some(area)
}

fn to_line_string(ring: &Ring) -> LineString<f64> {
    ring.iter()
        .map(|&(lon, lat)| geo::coord! { x: lon, y: lat })
        .collect()
}
