//! # BPOU Geocode
//!
//! Rate-limited, fallback-driven geocoding for the BPOU locator widget.
//!
//! ## Features
//!
//! - **Inter-request spacing** - every request from a client is separated
//!   by at least one second, measured at dispatch, across all logical
//!   searches (the upstream service's usage policy)
//! - **Structured fallback** - structured address input expands into an
//!   ordered, deduplicated sequence of query variations, tried most
//!   specific first, stopping at the first non-empty result
//! - **Honest result codes** - HTTP 429 surfaces as
//!   [`GeocodeError::RateLimited`] with no local retry and no further
//!   variations; zero hits everywhere is [`GeocodeError::NotFound`]
//! - **Service seam** - the upstream endpoint sits behind the
//!   [`GeocodeService`] trait; [`Nominatim`] is the production
//!   implementation

mod client;
mod error;
mod service;
mod variations;

pub use client::{GeocodingClient, Query, Resolved, MIN_REQUEST_SPACING, VARIATION_DELAY};
pub use error::{GeocodeError, Result};
pub use service::{GeocodeHit, GeocodeService, Nominatim, SearchRequest, CLIENT_IDENTIFIER};
pub use variations::{strip_unit_tokens, variations, StructuredQuery, REGION};
