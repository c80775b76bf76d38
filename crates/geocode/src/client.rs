use crate::error::{GeocodeError, Result};
use crate::service::{GeocodeHit, GeocodeService, SearchRequest};
use crate::variations::{variations, StructuredQuery};
use std::time::Duration;
use tokio::time::Instant;

/// Minimum spacing between any two requests from one client, measured at
/// the point the later request is dispatched.
pub const MIN_REQUEST_SPACING: Duration = Duration::from_millis(1000);

/// Pause between unsuccessful variation attempts (none after the last).
pub const VARIATION_DELAY: Duration = Duration::from_millis(500);

/// Either kind of address input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Text(String),
    Structured(StructuredQuery),
}

/// A resolved coordinate. `used_variation` names the query string that
/// succeeded when a structured search fell back past its first variation,
/// so callers can disclose that a simplified address was used.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    pub lat: f64,
    pub lon: f64,
    pub used_variation: Option<String>,
}

/// Rate-limited wrapper over a [`GeocodeService`].
///
/// The last-dispatch timestamp lives here, not in a process-wide global;
/// the spacing applies across all logical searches made through this
/// client. All waits are suspension points, never blocking sleeps.
pub struct GeocodingClient<S> {
    service: S,
    last_call: Option<Instant>,
}

impl<S: GeocodeService> GeocodingClient<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            last_call: None,
        }
    }

    /// Resolves `query` to a coordinate.
    ///
    /// A text query issues exactly one request. A structured query walks
    /// its variation sequence, stopping at the first non-empty result.
    /// [`GeocodeError::RateLimited`] aborts immediately, with no local
    /// retry and no further variations.
    pub async fn resolve(&mut self, query: &Query) -> Result<Resolved> {
        match query {
            Query::Text(text) => {
                let hits = self
                    .dispatch(&SearchRequest {
                        query: text.clone(),
                        constrain_region: false,
                    })
                    .await?;
                match hits.first() {
                    Some(hit) => Ok(Resolved {
                        lat: hit.lat,
                        lon: hit.lon,
                        used_variation: None,
                    }),
                    None => Err(GeocodeError::NotFound),
                }
            }
            Query::Structured(structured) => self.resolve_structured(structured).await,
        }
    }

    async fn resolve_structured(&mut self, query: &StructuredQuery) -> Result<Resolved> {
        let sequence = variations(query);
        if sequence.is_empty() {
            return Err(GeocodeError::NotFound);
        }

        let last = sequence.len() - 1;
        for (index, variation) in sequence.iter().enumerate() {
            let hits = self
                .dispatch(&SearchRequest {
                    query: variation.clone(),
                    constrain_region: true,
                })
                .await?;

            if let Some(hit) = hits.first() {
                if index > 0 {
                    log::info!("Geocoded with fallback variation: {variation}");
                }
                return Ok(Resolved {
                    lat: hit.lat,
                    lon: hit.lon,
                    used_variation: (index > 0).then(|| variation.clone()),
                });
            }

            log::debug!("No geocode result for variation: {variation}");
            if index < last {
                tokio::time::sleep(VARIATION_DELAY).await;
            }
        }

        Err(GeocodeError::NotFound)
    }

    /// Suspends for any remaining spacing deficit, then issues the request.
    /// The timestamp is taken at dispatch, after the wait.
    async fn dispatch(&mut self, request: &SearchRequest) -> Result<Vec<GeocodeHit>> {
        if let Some(last_call) = self.last_call {
            let elapsed = last_call.elapsed();
            if elapsed < MIN_REQUEST_SPACING {
                tokio::time::sleep(MIN_REQUEST_SPACING - elapsed).await;
            }
        }
        self.last_call = Some(Instant::now());
        self.service.search(request).await
    }
}
