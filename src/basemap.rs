use crate::error::{FigureError, Result};

use serde::Deserialize;
use std::path::Path;

/// Low-resolution world outline bundled with the crate, used when no
/// external map file is given. Same coordinate system as the input CSVs
/// (`epsg:4326`, plain lat/long degrees).
const BUILTIN_WORLD_OUTLINE: &str = include_str!("../assets/world_outline.geojson");

/// World boundary geometry, reduced to bare polylines.
///
/// Rings come from the line and polygon geometries of a GeoJSON document;
/// everything else about the source features (properties, point geometries)
/// is irrelevant for drawing boundaries and is dropped on load.
#[derive(Debug, Clone)]
pub struct Basemap {
    rings: Vec<Vec<(f64, f64)>>,
}

type Position = Vec<f64>;

// Untagged variant order matters: a lone Feature would also satisfy
// `Single` for collection documents, so the more specific shapes go first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeoJsonDoc {
    Collection(FeatureCollection),
    Bare(Geometry),
    Single(Feature),
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point {},
    MultiPoint {},
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Basemap {
    /// The bundled coarse world outline.
    pub fn builtin() -> Result<Self> {
        Self::from_geojson_str(BUILTIN_WORLD_OUTLINE)
    }

    /// Loads boundaries from an external GeoJSON file, e.g. a Natural Earth
    /// countries export.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&content)
    }

    pub fn from_geojson_str(content: &str) -> Result<Self> {
        let doc: GeoJsonDoc = serde_json::from_str(content)?;

        let mut rings = Vec::new();
        match doc {
            GeoJsonDoc::Collection(fc) => {
                for feature in fc.features {
                    if let Some(geometry) = feature.geometry {
                        collect_rings(&geometry, &mut rings);
                    }
                }
            }
            GeoJsonDoc::Bare(geometry) => collect_rings(&geometry, &mut rings),
            GeoJsonDoc::Single(feature) => {
                if let Some(geometry) = feature.geometry {
                    collect_rings(&geometry, &mut rings);
                }
            }
        }

        if rings.is_empty() {
            return Err(FigureError::Basemap(
                "no line or polygon geometry found in GeoJSON".to_string(),
            ));
        }
        Ok(Self { rings })
    }

    /// Boundary polylines as `(longitude, latitude)` sequences.
    pub fn rings(&self) -> &[Vec<(f64, f64)>] {
        &self.rings
    }

    /// Bounding extent over every ring: `(minx, miny, maxx, maxy)`.
    pub fn total_bounds(&self) -> (f64, f64, f64, f64) {
        let mut minx = f64::INFINITY;
        let mut miny = f64::INFINITY;
        let mut maxx = f64::NEG_INFINITY;
        let mut maxy = f64::NEG_INFINITY;
        for ring in &self.rings {
            for &(x, y) in ring {
                minx = minx.min(x);
                miny = miny.min(y);
                maxx = maxx.max(x);
                maxy = maxy.max(y);
            }
        }
        (minx, miny, maxx, maxy)
    }
}

fn collect_rings(geometry: &Geometry, rings: &mut Vec<Vec<(f64, f64)>>) {
    match geometry {
        Geometry::Point {} | Geometry::MultiPoint {} => {}
        Geometry::LineString { coordinates } => push_ring(coordinates, rings),
        Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
            for line in coordinates {
                push_ring(line, rings);
            }
        }
        Geometry::MultiPolygon { coordinates } => {
            for polygon in coordinates {
                for ring in polygon {
                    push_ring(ring, rings);
                }
            }
        }
        Geometry::GeometryCollection { geometries } => {
            for geometry in geometries {
                collect_rings(geometry, rings);
            }
        }
    }
}

/// Keeps the first two elements of each position; altitude is ignored.
/// Positions with fewer than two elements drop the whole ring as malformed.
fn push_ring(positions: &[Position], rings: &mut Vec<Vec<(f64, f64)>>) {
    let mut ring = Vec::with_capacity(positions.len());
    for p in positions {
        match (p.first(), p.get(1)) {
            (Some(&x), Some(&y)) => ring.push((x, y)),
            _ => return,
        }
    }
    if ring.len() >= 2 {
        rings.push(ring);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_outline_loads() {
        let map = Basemap::builtin().unwrap();
        assert!(!map.rings().is_empty());

        let (minx, miny, maxx, maxy) = map.total_bounds();
        // rough world extent in degrees
        assert!(minx < -160.0 && maxx > 160.0);
        assert!(miny < -60.0 && maxy > 70.0);
    }

    #[test]
    fn test_parse_polygon_feature_collection() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "box"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]
                }
            }]
        }"#;
        let map = Basemap::from_geojson_str(geojson).unwrap();
        assert_eq!(map.rings().len(), 1);
        assert_eq!(map.total_bounds(), (0.0, 0.0, 4.0, 2.0));
    }

    #[test]
    fn test_parse_bare_multipolygon() {
        let geojson = r#"{
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
            ]
        }"#;
        let map = Basemap::from_geojson_str(geojson).unwrap();
        assert_eq!(map.rings().len(), 2);
    }

    #[test]
    fn test_three_element_positions() {
        // GeoJSON allows altitude as a third element
        let geojson = r#"{
            "type": "LineString",
            "coordinates": [[0.0, 1.0, 99.0], [2.0, 3.0, 99.0]]
        }"#;
        let map = Basemap::from_geojson_str(geojson).unwrap();
        assert_eq!(map.rings()[0], vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_point_only_document_is_rejected() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
            }]
        }"#;
        let err = Basemap::from_geojson_str(geojson).unwrap_err();
        assert!(matches!(err, FigureError::Basemap(_)));
    }

    #[test]
    fn test_invalid_json_is_a_json_error() {
        assert!(matches!(
            Basemap::from_geojson_str("not json").unwrap_err(),
            FigureError::Json(_)
        ));
    }
}
