//! Feature eligibility and geometry normalization ahead of projection:
//! kind whitelist, custom veto predicate, MultiPolygon repair, and the
//! minimum-area filter.

use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::domain::{Feature, Geometry, Ring};
use crate::geometry::polygon_area;

/// Whether a feature participates in the model at all: its kind must be
/// whitelisted and the custom filter, when present, must accept it.
pub fn is_eligible(feature: &Feature, config: &ModelConfig) -> bool {
    if !config.accepts_kind(feature.kind()) {
        return false;
    }
    match &config.feature_filter {
        Some(filter) => filter(feature),
        None => true,
    }
}

/// Read a polygonal feature as a flat list of polygons (ring sets).
///
/// Some exporters flatten what should be many single-ring polygons into
/// one MultiPolygon entry with dozens of rings, which would punch every
/// ring after the first out as a hole. A single-polygon MultiPolygon with
/// more rings than `repair_threshold` is re-read as independent
/// single-ring polygons. Returns an empty list for line features.
pub fn normalized_polygons(feature: &Feature, repair_threshold: usize) -> Vec<Vec<Ring>> {
    match &feature.geometry {
        Geometry::Polygon(rings) => vec![rings.clone()],
        Geometry::MultiPolygon(polygons) => {
            if polygons.len() == 1 && polygons[0].len() > repair_threshold {
                warn!(
                    name = feature.display_name(),
                    rings = polygons[0].len(),
                    "suspicious single-polygon MultiPolygon, splitting rings into polygons"
                );
                return polygons[0].iter().map(|ring| vec![ring.clone()]).collect();
            }
            polygons.clone()
        }
        Geometry::LineString(_) | Geometry::MultiLineString(_) => Vec::new(),
    }
}

/// Read a line feature as a flat list of paths; empty for polygonal kinds
pub fn normalized_paths(feature: &Feature) -> Vec<Ring> {
    match &feature.geometry {
        Geometry::LineString(path) => vec![path.clone()],
        Geometry::MultiLineString(paths) => paths.clone(),
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Vec::new(),
    }
}

/// Minimum-area gate for one polygon: included when its geodesic area
/// strictly exceeds `min_area` square meters. A zero threshold disables
/// the filter; unmeasurable polygons are excluded while it is active.
pub fn passes_area_filter(rings: &[Ring], min_area: f64) -> bool {
    if min_area <= 0.0 {
        return true;
    }
    match polygon_area(rings) {
        Some(area) => area > min_area,
        None => {
            debug!("polygon area unmeasurable, excluded by area filter");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureKind;

    fn square_ring() -> Ring {
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
    }

    fn polygon_feature(name: &str) -> Feature {
        Feature {
            geometry: Geometry::Polygon(vec![square_ring()]),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_eligibility_by_kind() {
        let config = ModelConfig::default().with_feature_kinds(vec![FeatureKind::LineString]);
        assert!(!is_eligible(&polygon_feature("a"), &config));

        let line = Feature {
            geometry: Geometry::LineString(vec![(0.0, 0.0), (1.0, 1.0)]),
            name: None,
        };
        assert!(is_eligible(&line, &config));
    }

    #[test]
    fn test_eligibility_custom_filter() {
        let config = ModelConfig::default().with_filter(|f: &Feature| f.display_name() != "skip");
        assert!(is_eligible(&polygon_feature("keep"), &config));
        assert!(!is_eligible(&polygon_feature("skip"), &config));
    }

    #[test]
    fn test_multipolygon_repair_splits_rings() {
        let rings: Vec<Ring> = (0..12)
            .map(|i| {
                let offset = i as f64 * 2.0;
                vec![
                    (offset, 0.0),
                    (offset + 1.0, 0.0),
                    (offset + 1.0, 1.0),
                    (offset, 0.0),
                ]
            })
            .collect();
        let feature = Feature {
            geometry: Geometry::MultiPolygon(vec![rings]),
            name: None,
        };

        let polygons = normalized_polygons(&feature, 10);
        assert_eq!(polygons.len(), 12);
        assert!(polygons.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn test_multipolygon_at_threshold_untouched() {
        let rings: Vec<Ring> = (0..10).map(|_| square_ring()).collect();
        let feature = Feature {
            geometry: Geometry::MultiPolygon(vec![rings]),
            name: None,
        };

        // exactly at the threshold: rings stay one polygon with holes
        let polygons = normalized_polygons(&feature, 10);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].len(), 10);
    }

    #[test]
    fn test_multipolygon_with_several_polygons_untouched() {
        let rings: Vec<Ring> = (0..20).map(|_| square_ring()).collect();
        let feature = Feature {
            geometry: Geometry::MultiPolygon(vec![rings.clone(), rings]),
            name: None,
        };

        let polygons = normalized_polygons(&feature, 10);
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn test_normalized_paths() {
        let multi = Feature {
            geometry: Geometry::MultiLineString(vec![
                vec![(0.0, 0.0), (1.0, 0.0)],
                vec![(0.0, 1.0), (1.0, 1.0)],
            ]),
            name: None,
        };
        assert_eq!(normalized_paths(&multi).len(), 2);
        assert!(normalized_paths(&polygon_feature("a")).is_empty());
    }

    #[test]
    fn test_area_filter() {
        // a 1x1 degree square is ~1.23e10 m^2
        let rings = vec![square_ring()];
        assert!(passes_area_filter(&rings, 0.0));
        assert!(passes_area_filter(&rings, 1e10));
        assert!(!passes_area_filter(&rings, 1e11));
    }

    #[test]
    fn test_area_filter_excludes_unmeasurable() {
        let degenerate = vec![vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]];
        assert!(passes_area_filter(&degenerate, 0.0));
        assert!(!passes_area_filter(&degenerate, 1.0));
    }
}
