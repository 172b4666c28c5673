use std::f64::consts::FRAC_PI_4;

use crate::domain::Feature;

/// Equatorial Earth radius in meters; the scale basis for the projection
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Geographic bounding box in degrees.
///
/// Longitudes may legitimately leave [-180, 180]: datasets stitched across
/// the antimeridian carry values like 190 or 370. The span can even exceed
/// 360 degrees for malformed globally-wrapping data; `Projection` handles
/// both cases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    pub const ZERO: GeoBounds = GeoBounds {
        min_lon: 0.0,
        min_lat: 0.0,
        max_lon: 0.0,
        max_lat: 0.0,
    };

    /// Bounding box of a point set, `None` when empty
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<GeoBounds> {
        let mut bounds: Option<GeoBounds> = None;
        for (lon, lat) in points {
            match &mut bounds {
                Some(b) => {
                    b.min_lon = b.min_lon.min(lon);
                    b.max_lon = b.max_lon.max(lon);
                    b.min_lat = b.min_lat.min(lat);
                    b.max_lat = b.max_lat.max(lat);
                }
                None => {
                    bounds = Some(GeoBounds {
                        min_lon: lon,
                        min_lat: lat,
                        max_lon: lon,
                        max_lat: lat,
                    });
                }
            }
        }
        bounds
    }

    /// Bounding box of every coordinate in the given features
    pub fn from_features<'a>(
        features: impl IntoIterator<Item = &'a Feature>,
    ) -> Option<GeoBounds> {
        let mut points = Vec::new();
        for feature in features {
            feature.geometry.for_each_point(&mut |p| points.push(p));
        }
        GeoBounds::from_points(points)
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// Deterministic lon/lat to planar projection, built once per dataset.
///
/// A Mercator projection centered at the (rotated) south-west corner of the
/// bounding box. Three adjustments keep the output space continuous for
/// messy real-world data:
///
/// - when the box leaves the canonical [-180, 180] longitude domain, the
///   whole sphere is rotated by `-180 - min_lon` so the western edge lands
///   back in range;
/// - output is re-translated so geographic (0, 0) maps to planar (0, 0),
///   making results independent of the projection center;
/// - when the box spans more than 360 degrees of longitude, points beyond
///   `wrap_longitude` would be silently wrapped into the wrong branch by
///   the canonical-domain reduction; their X is respliced by adding
///   `wrap_offset_x`.
///
/// Planar Y grows northward (the raw projection's Y is negated).
#[derive(Debug, Clone)]
pub struct Projection {
    /// Projection scale: `EARTH_RADIUS * scale`
    k: f64,
    /// Degrees added to longitude before the canonical-domain reduction
    rotate_lon: f64,
    /// Raw Mercator coordinates of the rotated south-west corner, radians
    center_x: f64,
    center_y: f64,
    /// Planar image of geographic (0, 0) before re-translation
    origin_x: f64,
    origin_y: f64,
    wrap_longitude: Option<f64>,
    wrap_offset_x: f64,
}

impl Projection {
    pub fn new(bounds: &GeoBounds, scale: f64) -> Projection {
        let rotate_lon = if bounds.max_lon > 180.0 || bounds.min_lon < -180.0 {
            -180.0 - bounds.min_lon
        } else {
            0.0
        };

        // Center at the rotated south-west corner
        let center_lon = bounds.min_lon + rotate_lon;
        let mut projection = Projection {
            k: EARTH_RADIUS * scale,
            rotate_lon,
            center_x: wrap_degrees(center_lon).to_radians(),
            center_y: mercator_y(bounds.min_lat.to_radians()),
            origin_x: 0.0,
            origin_y: 0.0,
            wrap_longitude: None,
            wrap_offset_x: 0.0,
        };

        let (origin_x, origin_y) = projection.project_raw(0.0, 0.0);
        projection.origin_x = origin_x;
        projection.origin_y = origin_y;

        if bounds.lon_span() > 360.0 {
            let wrap_longitude = bounds.min_lon + 360.0;
            projection.wrap_offset_x = projection.project_unspliced(wrap_longitude, 0.0).0;
            projection.wrap_longitude = Some(wrap_longitude);
        }

        projection
    }

    /// Project a lon/lat point into planar model space
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (mut x, y) = self.project_unspliced(lon, lat);
        if let Some(wrap_longitude) = self.wrap_longitude
            && lon > wrap_longitude
        {
            x += self.wrap_offset_x;
        }
        // flip to y-up for 3D
        (x, -y)
    }

    /// Project a slice of lon/lat points
    pub fn project_points(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|&(lon, lat)| self.project(lon, lat))
            .collect()
    }

    /// Longitude beyond which source coordinates get respliced, set only
    /// when the bounding box spans more than 360 degrees
    pub fn wrap_longitude(&self) -> Option<f64> {
        self.wrap_longitude
    }

    /// Planar X width of a full 360-degree wrap
    pub fn wrap_offset_x(&self) -> f64 {
        self.wrap_offset_x
    }

    /// Origin-normalized projection without the wrap resplice or Y flip
    fn project_unspliced(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = self.project_raw(lon, lat);
        (x - self.origin_x, y - self.origin_y)
    }

    /// Rotated, canonical-domain Mercator with screen-convention Y (down)
    fn project_raw(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = wrap_degrees(lon + self.rotate_lon).to_radians();
        let x = self.k * (lambda - self.center_x);
        let y = -self.k * (mercator_y(lat.to_radians()) - self.center_y);
        (x, y)
    }
}

/// Spherical Mercator Y for a latitude in radians
fn mercator_y(phi: f64) -> f64 {
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}

/// Reduce a longitude into the canonical [-180, 180] domain. A single
/// correction, and +180 stays +180. This is the silent wraparound the
/// resplice in `Projection::project` compensates for.
fn wrap_degrees(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn world_bounds() -> GeoBounds {
        GeoBounds {
            min_lon: -180.0,
            min_lat: -60.0,
            max_lon: 180.0,
            max_lat: 80.0,
        }
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = GeoBounds::from_points(vec![(3.0, -2.0), (-1.0, 5.0), (2.0, 1.0)]).unwrap();
        assert_eq!(bounds.min_lon, -1.0);
        assert_eq!(bounds.max_lon, 3.0);
        assert_eq!(bounds.min_lat, -2.0);
        assert_eq!(bounds.max_lat, 5.0);
        assert!(GeoBounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_origin_maps_to_origin() {
        let projection = Projection::new(&world_bounds(), 1e-3);
        let (x, y) = projection.project(0.0, 0.0);
        assert!(x.abs() < EPS);
        assert!(y.abs() < EPS);
    }

    #[test]
    fn test_projection_deterministic() {
        let projection = Projection::new(&world_bounds(), 1e-3);
        let a = projection.project(121.47, 31.23);
        let b = projection.project(121.47, 31.23);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_wrap_within_360_span() {
        let projection = Projection::new(&world_bounds(), 1.0);
        assert!(projection.wrap_longitude().is_none());
    }

    #[test]
    fn test_corner_bbox_non_negative() {
        let bounds = GeoBounds {
            min_lon: 70.0,
            min_lat: 15.0,
            max_lon: 135.0,
            max_lat: 54.0,
        };
        let projection = Projection::new(&bounds, 1e-3);

        let corners = [
            projection.project(bounds.min_lon, bounds.min_lat),
            projection.project(bounds.max_lon, bounds.min_lat),
            projection.project(bounds.max_lon, bounds.max_lat),
            projection.project(bounds.min_lon, bounds.max_lat),
        ];
        let planar = GeoBounds::from_points(corners).unwrap();
        assert!(planar.lon_span() >= 0.0);
        assert!(planar.lat_span() >= 0.0);
    }

    #[test]
    fn test_rotation_for_out_of_domain_east_edge() {
        // Box crossing the antimeridian eastward: a point at lon 190 must
        // land east of one at 170, not wrap to the far west.
        let bounds = GeoBounds {
            min_lon: 150.0,
            min_lat: -10.0,
            max_lon: 200.0,
            max_lat: 10.0,
        };
        let projection = Projection::new(&bounds, 1e-3);
        let (west_x, _) = projection.project(170.0, 0.0);
        let (east_x, _) = projection.project(190.0, 0.0);
        assert!(east_x > west_x);
    }

    #[test]
    fn test_wrap_longitude_set_beyond_360_span() {
        let bounds = GeoBounds {
            min_lon: -180.0,
            min_lat: -60.0,
            max_lon: 190.0,
            max_lat: 80.0,
        };
        let projection = Projection::new(&bounds, 1e-3);
        assert_eq!(projection.wrap_longitude(), Some(180.0));
    }

    #[test]
    fn test_wrap_resplices_by_exact_offset() {
        let bounds = GeoBounds {
            min_lon: -180.0,
            min_lat: -60.0,
            max_lon: 190.0,
            max_lat: 80.0,
        };
        let projection = Projection::new(&bounds, 1e-3);
        let wrap_longitude = projection.wrap_longitude().unwrap();

        let lon = wrap_longitude + 5.0;
        let (patched_x, _) = projection.project(lon, 10.0);
        let (unpatched_x, _) = projection.project_unspliced(lon, 10.0);
        assert!((patched_x - (unpatched_x + projection.wrap_offset_x())).abs() < EPS);

        // At or below the wrap longitude no resplice happens
        let (at_x, _) = projection.project(wrap_longitude, 10.0);
        let (at_unpatched_x, _) = projection.project_unspliced(wrap_longitude, 10.0);
        assert!((at_x - at_unpatched_x).abs() < EPS);
    }

    #[test]
    fn test_wrapped_branch_is_continuous() {
        // A dataset rotated into the [0, 360] domain with stray geometry
        // past 360 (the case the resplice exists for): X stays monotonic
        // across the wrap boundary instead of jumping a full world width.
        let bounds = GeoBounds {
            min_lon: 0.0,
            min_lat: -60.0,
            max_lon: 365.0,
            max_lat: 80.0,
        };
        let projection = Projection::new(&bounds, 1e-3);
        assert_eq!(projection.wrap_longitude(), Some(360.0));

        let (before_x, _) = projection.project(359.0, 0.0);
        let (after_x, _) = projection.project(361.0, 0.0);
        assert!(after_x > before_x);
        assert!(after_x - before_x < projection.wrap_offset_x().abs() / 10.0);
    }

    #[test]
    fn test_y_grows_northward() {
        let projection = Projection::new(&world_bounds(), 1e-3);
        let (_, south_y) = projection.project(0.0, -30.0);
        let (_, north_y) = projection.project(0.0, 30.0);
        assert!(north_y > south_y);
    }

    #[test]
    fn test_scale_is_linear() {
        let bounds = world_bounds();
        let coarse = Projection::new(&bounds, 1e-3);
        let fine = Projection::new(&bounds, 2e-3);
        let (cx, cy) = coarse.project(45.0, 20.0);
        let (fx, fy) = fine.project(45.0, 20.0);
        assert!((fx - 2.0 * cx).abs() < 1e-6);
        assert!((fy - 2.0 * cy).abs() < 1e-6);
    }
}
