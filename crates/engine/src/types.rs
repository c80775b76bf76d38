use bpou_geodata::UNKNOWN_OWNER;
use serde::Serialize;

/// The outcome of resolving a point against both boundary layers.
///
/// `bpou_name` is genuinely absent when no BPOU polygon contains the
/// point; `cd_id` is never absent and falls back to the `"?"` sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistrictMatch {
    pub bpou_name: Option<String>,
    pub cd_id: String,
}

impl DistrictMatch {
    /// The no-containment result: null BPOU, sentinel CD.
    pub fn unknown() -> Self {
        Self {
            bpou_name: None,
            cd_id: UNKNOWN_OWNER.to_string(),
        }
    }
}
