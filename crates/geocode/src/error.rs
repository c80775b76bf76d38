use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeocodeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// The full variation sequence (or the single text query) produced
    /// zero results. User-correctable: prompt for a more general query.
    #[error("no results for the requested address")]
    NotFound,

    /// Upstream HTTP 429. Surfaced intact; the client never retries this
    /// itself and tries no further variations.
    #[error("geocoding service rate limit hit")]
    RateLimited,

    /// Transport or response-parse failure.
    #[error("geocoding network error: {0}")]
    Network(String),
}
