//! Concurrent, partial-failure-tolerant loading of the four data sources.
//!
//! The two boundary layers and two contact tables are fetched at the same
//! time; each failure is caught independently and recorded, never
//! propagated. The widget stays usable with whatever subset loaded.

use crate::contacts::ContactDirectory;
use crate::store::FeatureStore;
use crate::types::Layer;
use anyhow::Context;
use async_trait::async_trait;

/// Seam between the loader and the transport. `source` is whatever the
/// implementation understands: a URL for [`HttpFetcher`], a filesystem path
/// for [`FileFetcher`].
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, source: &str) -> anyhow::Result<String>;
}

/// Fetches sources over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, source: &str) -> anyhow::Result<String> {
        let body = self
            .client
            .get(source)
            .send()
            .await
            .with_context(|| format!("GET {source} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {source} failed"))?
            .text()
            .await
            .with_context(|| format!("Failed reading body from {source}"))?;
        Ok(body)
    }
}

/// Fetches sources from the local filesystem.
#[derive(Debug, Default)]
pub struct FileFetcher;

#[async_trait]
impl Fetch for FileFetcher {
    async fn fetch(&self, source: &str) -> anyhow::Result<String> {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
    }
}

/// The four independent inputs, in the transport's address space.
#[derive(Clone, Debug)]
pub struct DataSources {
    pub bpou_boundaries: String,
    pub cd_boundaries: String,
    pub bpou_contacts: String,
    pub cd_contacts: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceKind {
    BpouBoundaries,
    CdBoundaries,
    BpouContacts,
    CdContacts,
}

impl SourceKind {
    pub fn describe(self) -> &'static str {
        match self {
            Self::BpouBoundaries => "BPOU map data",
            Self::CdBoundaries => "Congressional District map data",
            Self::BpouContacts => "BPOU contact info",
            Self::CdContacts => "Congressional District contact info",
        }
    }
}

#[derive(Debug)]
pub struct LoadFailure {
    pub source: SourceKind,
    pub error: String,
}

/// Outcome of [`load_all`]: per-source counts plus every failure.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub bpou_features: usize,
    pub cd_features: usize,
    pub bpou_contacts: usize,
    pub cd_contacts: usize,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Single user-visible notice naming every failed source, or `None`
    /// when everything loaded.
    pub fn notice(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let failed: Vec<&str> = self.failures.iter().map(|f| f.source.describe()).collect();
        Some(format!(
            "Failed to load {}. The widget may not work correctly.",
            failed.join(", ")
        ))
    }
}

/// Fetches and parses all four sources concurrently. Each failure is
/// recorded in the report; none cancels the others or fails the call.
pub async fn load_all(fetcher: &dyn Fetch, sources: &DataSources) -> (FeatureStore, ContactDirectory, LoadReport) {
    let (bpou_raw, cd_raw, bpou_contacts_raw, cd_contacts_raw) = tokio::join!(
        fetcher.fetch(&sources.bpou_boundaries),
        fetcher.fetch(&sources.cd_boundaries),
        fetcher.fetch(&sources.bpou_contacts),
        fetcher.fetch(&sources.cd_contacts),
    );

    let mut store = FeatureStore::new();
    let mut directory = ContactDirectory::new();
    let mut report = LoadReport::default();

    match bpou_raw.and_then(|raw| Ok(store.load(Layer::Bpou, &raw)?)) {
        Ok(count) => {
            report.bpou_features = count;
            log::info!("Loaded {count} BPOU boundary features");
        }
        Err(err) => record_failure(&mut report, SourceKind::BpouBoundaries, err),
    }

    match cd_raw.and_then(|raw| Ok(store.load(Layer::Cd, &raw)?)) {
        Ok(count) => {
            report.cd_features = count;
            log::info!("Loaded {count} Congressional District boundary features");
        }
        Err(err) => record_failure(&mut report, SourceKind::CdBoundaries, err),
    }

    match bpou_contacts_raw.and_then(|raw| Ok(directory.load_bpou(&raw)?)) {
        Ok(count) => {
            report.bpou_contacts = count;
            log::info!("Loaded {count} BPOU contact records");
        }
        Err(err) => record_failure(&mut report, SourceKind::BpouContacts, err),
    }

    match cd_contacts_raw.and_then(|raw| Ok(directory.load_cd(&raw)?)) {
        Ok(count) => {
            report.cd_contacts = count;
            log::info!("Loaded {count} Congressional District contact records");
        }
        Err(err) => record_failure(&mut report, SourceKind::CdContacts, err),
    }

    (store, directory, report)
}

fn record_failure(report: &mut LoadReport, source: SourceKind, err: anyhow::Error) {
    log::warn!("Failed to load {}: {err:#}", source.describe());
    report.failures.push(LoadFailure {
        source,
        error: format!("{err:#}"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LonLat;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Serves canned bodies by source name; anything else fails.
    struct StubFetcher {
        bodies: HashMap<&'static str, &'static str>,
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch(&self, source: &str) -> anyhow::Result<String> {
            match self.bodies.get(source) {
                Some(body) => Ok((*body).to_string()),
                None => anyhow::bail!("404 for {source}"),
            }
        }
    }

    fn sources() -> DataSources {
        DataSources {
            bpou_boundaries: "bpou.geojson".into(),
            cd_boundaries: "cd.geojson".into(),
            bpou_contacts: "bpou.json".into(),
            cd_contacts: "cd.json".into(),
        }
    }

    const BPOU_RAW: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
        "properties":{"BPOU_NAME":"Ramsey County"},
        "geometry":{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,10],[0,10],[0,0]]]}}]}"#;

    #[tokio::test]
    async fn loads_all_four_sources() {
        let fetcher = StubFetcher {
            bodies: HashMap::from([
                ("bpou.geojson", BPOU_RAW),
                ("cd.geojson", BPOU_RAW),
                ("bpou.json", r#"{"Ramsey County":{"website":"https://example.org"}}"#),
                ("cd.json", r#"{"4":{"phone":"555-0100"}}"#),
            ]),
        };

        let (store, directory, report) = load_all(&fetcher, &sources()).await;

        assert!(report.failures.is_empty());
        assert_eq!(report.notice(), None);
        assert_eq!(store.len(Layer::Bpou), 1);
        assert_eq!(store.len(Layer::Cd), 1);
        assert_eq!(
            directory.lookup_cd("4").phone.as_deref(),
            Some("555-0100")
        );
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_the_others() {
        let fetcher = StubFetcher {
            bodies: HashMap::from([
                ("cd.geojson", BPOU_RAW),
                ("bpou.json", r#"{}"#),
                ("cd.json", r#"{}"#),
            ]),
        };

        let (store, _directory, report) = load_all(&fetcher, &sources()).await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, SourceKind::BpouBoundaries);
        assert!(store.is_empty(Layer::Bpou));
        assert_eq!(store.len(Layer::Cd), 1);
        assert!(store.query(Layer::Cd, LonLat::new(5.0, 5.0)).is_some());
        assert_eq!(
            report.notice().unwrap(),
            "Failed to load BPOU map data. The widget may not work correctly."
        );
    }

    #[tokio::test]
    async fn all_four_failing_still_returns_usable_empty_state() {
        let fetcher = StubFetcher {
            bodies: HashMap::new(),
        };

        let (store, directory, report) = load_all(&fetcher, &sources()).await;

        assert_eq!(report.failures.len(), 4);
        assert!(store.query(Layer::Bpou, LonLat::new(5.0, 5.0)).is_none());
        assert!(directory.lookup_bpou("anything").is_empty());
        let notice = report.notice().unwrap();
        for kind in [
            "BPOU map data",
            "Congressional District map data",
            "BPOU contact info",
            "Congressional District contact info",
        ] {
            assert!(notice.contains(kind), "notice missing {kind}: {notice}");
        }
    }

    #[tokio::test]
    async fn malformed_geojson_counts_as_load_failure() {
        let fetcher = StubFetcher {
            bodies: HashMap::from([
                ("bpou.geojson", "{not geojson"),
                ("cd.geojson", BPOU_RAW),
                ("bpou.json", r#"{}"#),
                ("cd.json", r#"{}"#),
            ]),
        };

        let (_store, _directory, report) = load_all(&fetcher, &sources()).await;
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, SourceKind::BpouBoundaries);
    }

    #[tokio::test]
    async fn file_fetcher_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bpou.geojson");
        std::fs::write(&path, BPOU_RAW).unwrap();

        let body = FileFetcher.fetch(path.to_str().unwrap()).await.unwrap();
        assert_eq!(body, BPOU_RAW);
        assert!(FileFetcher.fetch("/nonexistent/path.json").await.is_err());
    }
}
