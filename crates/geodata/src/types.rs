use kurbo::{BezPath, Shape};

/// A geographic coordinate in WGS84: `x` is longitude, `y` is latitude.
///
/// All core queries work directly in lon/lat. Point-in-polygon containment
/// is invariant under the choice of CRS as long as features and query
/// points share one, so no reprojection happens here; projecting to the
/// map's display coordinates is the host renderer's concern.
pub type LonLat = kurbo::Point;

/// Sentinel owner name used when a feature carries none of its layer's
/// name attributes. Also the default Congressional District id when no
/// polygon contains a query point.
pub const UNKNOWN_OWNER: &str = "?";

/// The two independently loaded boundary layers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Layer {
    /// Basic Political Organizational Unit boundaries (finest-grained).
    Bpou,
    /// Congressional District boundaries.
    Cd,
}

impl Layer {
    /// Property names checked, in order, to derive a feature's owner name.
    /// First non-empty value wins; `"?"` when all are absent.
    pub(crate) fn name_attributes(self) -> &'static [&'static str] {
        match self {
            Self::Bpou => &["BPOU_NAME"],
            Self::Cd => &["DISTRICT", "ID1"],
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Bpou => "BPOU",
            Self::Cd => "Congressional District",
        }
    }
}

/// A single boundary polygon with its owning district's name.
#[derive(Clone, Debug)]
pub struct PolygonFeature {
    /// Position in load order within the layer.
    pub id: usize,
    pub owner_name: String,
    /// One closed subpath per polygon ring.
    pub geometry: BezPath,
    pub layer: Layer,
}

impl PolygonFeature {
    /// Containment test, delegated to the geometry library.
    pub fn contains(&self, point: LonLat) -> bool {
        self.geometry.contains(point)
    }
}
