use crate::error::Result;
use crate::geojson;
use crate::types::{Layer, LonLat, PolygonFeature};

/// Holds the two boundary layers plus the single result marker.
///
/// Read-only after load except for marker replacement, which is a
/// last-writer-wins single-slot operation.
#[derive(Debug, Default)]
pub struct FeatureStore {
    bpou: Vec<PolygonFeature>,
    cd: Vec<PolygonFeature>,
    marker: Option<LonLat>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw GeoJSON FeatureCollection into `layer`, appending in
    /// load order, and returns the number of polygon features added.
    ///
    /// Callers treat a failure as a non-fatal load notice; the store is
    /// unchanged for that layer and remains queryable.
    pub fn load(&mut self, layer: Layer, raw: &str) -> Result<usize> {
        let features = geojson::parse_layer(raw, layer, self.features(layer).len())?;
        let count = features.len();
        self.features_mut(layer).extend(features);
        Ok(count)
    }

    /// First feature in load order whose geometry contains `point`.
    ///
    /// Overlapping polygons are not disambiguated further; boundary data is
    /// assumed non-overlapping within a layer, and the load-order tie-break
    /// keeps ambiguous boundary hits deterministic.
    pub fn query(&self, layer: Layer, point: LonLat) -> Option<&PolygonFeature> {
        self.features(layer).iter().find(|f| f.contains(point))
    }

    /// Replaces any existing marker. At most one marker exists at a time.
    pub fn set_marker(&mut self, point: LonLat) {
        self.marker = Some(point);
    }

    pub fn marker(&self) -> Option<LonLat> {
        self.marker
    }

    pub fn len(&self, layer: Layer) -> usize {
        self.features(layer).len()
    }

    pub fn is_empty(&self, layer: Layer) -> bool {
        self.features(layer).is_empty()
    }

    fn features(&self, layer: Layer) -> &Vec<PolygonFeature> {
        match layer {
            Layer::Bpou => &self.bpou,
            Layer::Cd => &self.cd,
        }
    }

    fn features_mut(&mut self, layer: Layer) -> &mut Vec<PolygonFeature> {
        match layer {
            Layer::Bpou => &mut self.bpou,
            Layer::Cd => &mut self.cd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collection(features: &[(&str, [f64; 4])]) -> String {
        let features: Vec<String> = features
            .iter()
            .map(|(name, [x0, y0, x1, y1])| {
                format!(
                    r#"{{"type":"Feature","properties":{{"BPOU_NAME":"{name}"}},
                        "geometry":{{"type":"Polygon","coordinates":[[
                            [{x0},{y0}],[{x1},{y0}],[{x1},{y1}],[{x0},{y1}],[{x0},{y0}]]]}}}}"#
                )
            })
            .collect();
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
    }

    #[test]
    fn query_returns_containing_feature_or_none() {
        let mut store = FeatureStore::new();
        store
            .load(Layer::Bpou, &collection(&[("West", [0.0, 0.0, 5.0, 5.0])]))
            .unwrap();

        let hit = store.query(Layer::Bpou, LonLat::new(2.0, 2.0)).unwrap();
        assert_eq!(hit.owner_name, "West");
        assert!(store.query(Layer::Bpou, LonLat::new(9.0, 9.0)).is_none());
        // The other layer is independent and still empty.
        assert!(store.query(Layer::Cd, LonLat::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn first_loaded_feature_wins_on_overlap() {
        let mut store = FeatureStore::new();
        store
            .load(
                Layer::Bpou,
                &collection(&[
                    ("First", [0.0, 0.0, 10.0, 10.0]),
                    ("Second", [0.0, 0.0, 10.0, 10.0]),
                ]),
            )
            .unwrap();

        for _ in 0..3 {
            let hit = store.query(Layer::Bpou, LonLat::new(5.0, 5.0)).unwrap();
            assert_eq!(hit.owner_name, "First");
        }
    }

    #[test]
    fn load_order_is_preserved_across_calls() {
        let mut store = FeatureStore::new();
        store
            .load(Layer::Bpou, &collection(&[("A", [0.0, 0.0, 10.0, 10.0])]))
            .unwrap();
        store
            .load(Layer::Bpou, &collection(&[("B", [0.0, 0.0, 10.0, 10.0])]))
            .unwrap();

        assert_eq!(store.len(Layer::Bpou), 2);
        let hit = store.query(Layer::Bpou, LonLat::new(5.0, 5.0)).unwrap();
        assert_eq!((hit.owner_name.as_str(), hit.id), ("A", 0));
    }

    #[test]
    fn set_marker_replaces_not_appends() {
        let mut store = FeatureStore::new();
        assert_eq!(store.marker(), None);

        store.set_marker(LonLat::new(1.0, 2.0));
        store.set_marker(LonLat::new(3.0, 4.0));
        store.set_marker(LonLat::new(3.0, 4.0));

        assert_eq!(store.marker(), Some(LonLat::new(3.0, 4.0)));
    }

    #[test]
    fn failed_load_leaves_layer_untouched() {
        let mut store = FeatureStore::new();
        store
            .load(Layer::Cd, &collection(&[("1", [0.0, 0.0, 5.0, 5.0])]))
            .unwrap();

        assert!(store.load(Layer::Cd, "{broken").is_err());
        assert_eq!(store.len(Layer::Cd), 1);
    }
}
