use crate::types::DistrictMatch;
use bpou_geodata::{FeatureStore, Layer, LonLat, UNKNOWN_OWNER};

/// Resolves `point` against both boundary layers.
///
/// Pure and read-only: no marker movement, no state change. Callers that
/// want the resolution side effects (marker, locking) go through
/// [`crate::Session`]; hover previews call this directly.
///
/// `known_bpou` is the click-on-polygon fast path: the host's hit test has
/// already identified the polygon, so the BPOU spatial query is skipped.
/// The CD layer is always queried, independent of the BPOU outcome.
pub fn locate(store: &FeatureStore, point: LonLat, known_bpou: Option<&str>) -> DistrictMatch {
    let bpou_name = match known_bpou {
        Some(name) => Some(name.to_string()),
        None => store
            .query(Layer::Bpou, point)
            .map(|feature| feature.owner_name.clone()),
    };

    let cd_id = store
        .query(Layer::Cd, point)
        .map(|feature| feature.owner_name.clone())
        .unwrap_or_else(|| UNKNOWN_OWNER.to_string());

    DistrictMatch { bpou_name, cd_id }
}
