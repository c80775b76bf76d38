use crate::error::{GeocodeError, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Client identifier sent with every request, per the upstream usage
/// policy.
pub const CLIENT_IDENTIFIER: &str = "BPOU-Finder-Widget/1.0 (Minnesota Republican BPOU Locator)";

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Bounding viewbox covering the service area (left,top,right,bottom),
/// applied to structured-derived searches to cut false positives outside
/// Minnesota.
const VIEWBOX: &str = "-97.5,49.5,-89.0,43.0";

/// One outbound search. `constrain_region` is set for structured-derived
/// queries: those additionally carry the country filter and viewbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub constrain_region: bool,
}

/// A candidate match returned by the service; the first hit is the best.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeocodeHit {
    pub lat: f64,
    pub lon: f64,
}

/// Seam between the client and the upstream geocoding endpoint.
#[async_trait]
pub trait GeocodeService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<GeocodeHit>>;
}

/// Nominatim's responses carry coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// The production [`GeocodeService`]: Nominatim free-text search.
pub struct Nominatim {
    http: reqwest::Client,
    endpoint: String,
}

impl Nominatim {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(SEARCH_URL)
    }

    /// Points the client at a self-hosted or test instance.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(CLIENT_IDENTIFIER)
            .build()
            .map_err(|err| GeocodeError::Network(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl GeocodeService for Nominatim {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<GeocodeHit>> {
        let mut outbound = self
            .http
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", request.query.as_str())]);
        if request.constrain_region {
            outbound = outbound.query(&[
                ("countrycodes", "us"),
                ("viewbox", VIEWBOX),
                ("bounded", "1"),
            ]);
        }

        let response = outbound
            .send()
            .await
            .map_err(|err| GeocodeError::Network(format!("request failed: {err}")))?;

        // 429 is checked before anything else so it surfaces intact.
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        let response = response
            .error_for_status()
            .map_err(|err| GeocodeError::Network(format!("request failed: {err}")))?;

        let body = response
            .text()
            .await
            .map_err(|err| GeocodeError::Network(format!("failed reading response: {err}")))?;
        let places: Vec<NominatimPlace> = serde_json::from_str(&body)
            .map_err(|err| GeocodeError::Network(format!("unexpected response: {err}")))?;

        Ok(places
            .into_iter()
            .filter_map(|place| {
                let lat = place.lat.parse().ok()?;
                let lon = place.lon.parse().ok()?;
                Some(GeocodeHit { lat, lon })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nominatim_places_parse_string_coordinates() {
        let body = r#"[{"lat":"44.9537","lon":"-93.0900","display_name":"Saint Paul"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].lat.parse::<f64>().unwrap(), 44.9537);
        assert_eq!(places[0].lon.parse::<f64>().unwrap(), -93.09);
    }

    #[test]
    fn empty_result_body_parses_to_no_hits() {
        let places: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        assert!(places.is_empty());
    }
}
