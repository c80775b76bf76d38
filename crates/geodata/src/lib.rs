//! # BPOU Geodata
//!
//! District boundary and contact data for the BPOU locator widget.
//!
//! ## Features
//!
//! - **Feature store** - two independent polygon layers (BPOU boundaries,
//!   Congressional District boundaries) with load-order containment queries
//!   and a single replaceable marker
//! - **Contact directory** - BPOU-name and CD-id keyed contact tables with
//!   total lookups (misses return an empty record, never an error)
//! - **GeoJSON loading** - Polygon/MultiPolygon feature collections parsed
//!   into [`kurbo::BezPath`] geometry; containment is delegated to
//!   [`kurbo::Shape::contains`]
//! - **Partial-failure loader** - the four data sources (two boundary
//!   layers, two contact tables) are fetched concurrently and each failure
//!   is caught independently, so the widget stays usable with whatever
//!   subset loaded

mod contacts;
mod error;
mod geojson;
mod loader;
mod store;
mod types;

pub use contacts::{ContactDirectory, ContactRecord};
pub use error::{GeodataError, Result};
pub use loader::{
    load_all, DataSources, Fetch, FileFetcher, HttpFetcher, LoadFailure, LoadReport, SourceKind,
};
pub use store::FeatureStore;
pub use types::{Layer, LonLat, PolygonFeature, UNKNOWN_OWNER};
