/// A geographic coordinate pair as (lon, lat) degrees
pub type Position = (f64, f64);

/// An ordered coordinate sequence: a closed polygon ring or an open path
pub type Ring = Vec<Position>;

/// The four geometry kinds the pipeline converts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Polygon,
    MultiPolygon,
    LineString,
    MultiLineString,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 4] = [
        FeatureKind::Polygon,
        FeatureKind::MultiPolygon,
        FeatureKind::LineString,
        FeatureKind::MultiLineString,
    ];

    /// Map a GeoJSON `geometry.type` string to a kind
    pub fn from_type_name(name: &str) -> Option<FeatureKind> {
        match name {
            "Polygon" => Some(FeatureKind::Polygon),
            "MultiPolygon" => Some(FeatureKind::MultiPolygon),
            "LineString" => Some(FeatureKind::LineString),
            "MultiLineString" => Some(FeatureKind::MultiLineString),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Polygon => "Polygon",
            FeatureKind::MultiPolygon => "MultiPolygon",
            FeatureKind::LineString => "LineString",
            FeatureKind::MultiLineString => "MultiLineString",
        }
    }

    pub fn is_polygonal(&self) -> bool {
        matches!(self, FeatureKind::Polygon | FeatureKind::MultiPolygon)
    }
}

/// Geometry with its GeoJSON coordinate nesting:
/// `Polygon` is `[ring, hole, ...]`, `MultiPolygon` one level deeper,
/// line kinds carry bare paths.
#[derive(Debug, Clone)]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    LineString(Ring),
    MultiLineString(Vec<Ring>),
}

impl Geometry {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Geometry::Polygon(_) => FeatureKind::Polygon,
            Geometry::MultiPolygon(_) => FeatureKind::MultiPolygon,
            Geometry::LineString(_) => FeatureKind::LineString,
            Geometry::MultiLineString(_) => FeatureKind::MultiLineString,
        }
    }

    /// Visit every coordinate of the geometry, in document order
    pub fn for_each_point(&self, f: &mut impl FnMut(Position)) {
        match self {
            Geometry::Polygon(rings) => {
                for ring in rings {
                    ring.iter().copied().for_each(&mut *f);
                }
            }
            Geometry::MultiPolygon(polygons) => {
                for rings in polygons {
                    for ring in rings {
                        ring.iter().copied().for_each(&mut *f);
                    }
                }
            }
            Geometry::LineString(path) => path.iter().copied().for_each(&mut *f),
            Geometry::MultiLineString(paths) => {
                for path in paths {
                    path.iter().copied().for_each(&mut *f);
                }
            }
        }
    }
}

/// One input feature: geometry plus the display name used to tag its mesh.
/// Source-owned and read-only to the pipeline.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry,
    pub name: Option<String>,
}

impl Feature {
    pub fn kind(&self) -> FeatureKind {
        self.geometry.kind()
    }

    /// Display name, empty when the source had none
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_type_name() {
        assert_eq!(
            FeatureKind::from_type_name("Polygon"),
            Some(FeatureKind::Polygon)
        );
        assert_eq!(
            FeatureKind::from_type_name("MultiLineString"),
            Some(FeatureKind::MultiLineString)
        );
        assert_eq!(FeatureKind::from_type_name("Point"), None);
        assert_eq!(FeatureKind::from_type_name("polygon"), None);
    }

    #[test]
    fn test_for_each_point_covers_holes() {
        let geometry = Geometry::Polygon(vec![
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)],
            vec![(0.2, 0.2), (0.4, 0.2), (0.4, 0.4), (0.2, 0.2)],
        ]);

        let mut count = 0;
        geometry.for_each_point(&mut |_| count += 1);
        assert_eq!(count, 8);
    }

    #[test]
    fn test_display_name_default() {
        let feature = Feature {
            geometry: Geometry::LineString(vec![(0.0, 0.0), (1.0, 1.0)]),
            name: None,
        };
        assert_eq!(feature.display_name(), "");
    }
}
