//! Minimal GeoJSON FeatureCollection parsing for the boundary layers.
//!
//! Only Polygon and MultiPolygon geometries are kept; anything else in the
//! collection is skipped with a debug log. Rings become closed [`BezPath`]
//! subpaths, so containment falls out of the nonzero winding rule used by
//! [`kurbo::Shape::contains`].

use crate::error::Result;
use crate::types::{Layer, PolygonFeature, UNKNOWN_OWNER};
use kurbo::{BezPath, Point};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Map<String, Value>,
    geometry: Option<Geometry>,
}

/// Positions are `[lon, lat]` or `[lon, lat, alt]`; extra elements are ignored.
type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

/// Parses a raw GeoJSON FeatureCollection into polygon features for `layer`,
/// assigning ids starting at `first_id` (load order within the layer).
pub(crate) fn parse_layer(raw: &str, layer: Layer, first_id: usize) -> Result<Vec<PolygonFeature>> {
    let collection: FeatureCollection = serde_json::from_str(raw)?;

    let mut features = Vec::new();
    for feature in collection.features {
        let rings: Vec<&[Position]> = match &feature.geometry {
            Some(Geometry::Polygon { coordinates }) => {
                coordinates.iter().map(Vec::as_slice).collect()
            }
            Some(Geometry::MultiPolygon { coordinates }) => coordinates
                .iter()
                .flat_map(|polygon| polygon.iter().map(Vec::as_slice))
                .collect(),
            Some(Geometry::Unsupported) | None => {
                log::debug!("Skipping non-polygon feature in {} layer", layer.describe());
                continue;
            }
        };

        let Some(geometry) = rings_to_path(&rings) else {
            log::debug!(
                "Skipping degenerate polygon feature in {} layer",
                layer.describe()
            );
            continue;
        };

        features.push(PolygonFeature {
            id: first_id + features.len(),
            owner_name: owner_name(&feature.properties, layer),
            geometry,
            layer,
        });
    }

    Ok(features)
}

/// First non-empty value among the layer's name attributes, `"?"` otherwise.
/// Numeric ids (common in shapefile exports) are stringified.
fn owner_name(properties: &Map<String, Value>, layer: Layer) -> String {
    for key in layer.name_attributes() {
        match properties.get(*key) {
            Some(Value::String(name)) if !name.trim().is_empty() => return name.clone(),
            Some(Value::Number(id)) => return id.to_string(),
            _ => {}
        }
    }
    UNKNOWN_OWNER.to_string()
}

fn rings_to_path(rings: &[&[Position]]) -> Option<BezPath> {
    let mut path = BezPath::new();
    for ring in rings {
        let points: Vec<Point> = ring
            .iter()
            .filter_map(|position| match position.as_slice() {
                [lon, lat, ..] => Some(Point::new(*lon, *lat)),
                _ => None,
            })
            .collect();
        // A ring needs at least a triangle to enclose anything.
        if points.len() < 3 {
            continue;
        }
        path.move_to(points[0]);
        for point in &points[1..] {
            path.line_to(*point);
        }
        path.close_path();
    }
    if path.elements().is_empty() {
        None
    } else {
        Some(path)
    }
}
