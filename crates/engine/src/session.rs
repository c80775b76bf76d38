//! Glue for one widget instance: owns the data, the geocoder, and the
//! interaction state, and applies the resolution side effects (marker
//! placement, locking) that the pure `locate`/`present` functions do not.

use crate::geolocate::{read_position, GeolocationError, GeolocationSensor};
use crate::interaction::{HoverOutcome, InteractionState, InteractionTracker};
use crate::locate::locate;
use crate::present::{present, present_preview, DisplayContent, PreviewContent};
use crate::types::DistrictMatch;
use bpou_geocode::{GeocodeError, GeocodeService, GeocodingClient, Query, Resolved, StructuredQuery};
use bpou_geodata::{ContactDirectory, FeatureStore, LoadReport, LonLat};
use thiserror::Error;

const MIN_ADDRESS_LEN: usize = 3;
const MAX_ADDRESS_LEN: usize = 200;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("address is shorter than {MIN_ADDRESS_LEN} characters")]
    AddressTooShort,

    #[error("address is longer than {MAX_ADDRESS_LEN} characters")]
    AddressTooLong,

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl SessionError {
    /// User-correctable guidance for each failure. Every path leaves the
    /// widget usable; the host re-enables its controls and shows this.
    pub fn user_guidance(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "Please enter an address.",
            Self::AddressTooShort => "Please enter a valid address (at least 3 characters).",
            Self::AddressTooLong => "Address is too long.",
            Self::Geocode(GeocodeError::NotFound) => {
                "Address not found. Try a more general location such as city, ZIP code, or street and city."
            }
            Self::Geocode(GeocodeError::RateLimited) => {
                "Too many requests. Please wait a moment and try again."
            }
            Self::Geocode(GeocodeError::Network(_)) => {
                "Error searching address. Please check your connection and try again."
            }
            Self::Geolocation(GeolocationError::PermissionDenied) => {
                "Location access was denied. Enter an address instead."
            }
            Self::Geolocation(GeolocationError::Unavailable) => {
                "Your location could not be determined. Enter an address instead."
            }
            Self::Geolocation(GeolocationError::Timeout) => {
                "Finding your location took too long. Try again or enter an address."
            }
            Self::Geolocation(GeolocationError::Unknown(_)) => {
                "Something went wrong reading your location. Enter an address instead."
            }
        }
    }
}

/// One widget session. All state is in-memory and rebuilt per session.
pub struct Session<S> {
    store: FeatureStore,
    directory: ContactDirectory,
    geocoder: GeocodingClient<S>,
    interaction: InteractionTracker,
    load_notice: Option<String>,
}

impl<S: GeocodeService> Session<S> {
    pub fn new(store: FeatureStore, directory: ContactDirectory, service: S) -> Self {
        Self {
            store,
            directory,
            geocoder: GeocodingClient::new(service),
            interaction: InteractionTracker::new(),
            load_notice: None,
        }
    }

    /// Attaches the aggregated data-load notice for the host to surface.
    pub fn with_load_report(mut self, report: &LoadReport) -> Self {
        self.load_notice = report.notice();
        self
    }

    pub fn load_notice(&self) -> Option<&str> {
        self.load_notice.as_deref()
    }

    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Current result marker, for the host renderer.
    pub fn marker(&self) -> Option<LonLat> {
        self.store.marker()
    }

    /// Free-text search. Validates, geocodes (one request), then runs the
    /// full locked-style resolution.
    pub async fn search_text(&mut self, address: &str) -> Result<DisplayContent, SessionError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(SessionError::EmptyAddress);
        }
        let length = address.chars().count();
        if length < MIN_ADDRESS_LEN {
            return Err(SessionError::AddressTooShort);
        }
        if length > MAX_ADDRESS_LEN {
            return Err(SessionError::AddressTooLong);
        }

        let resolved = self.geocoder.resolve(&Query::Text(address.to_string())).await?;
        Ok(self.complete_resolution(resolved))
    }

    /// Structured-field search with variation fallback.
    pub async fn search_structured(
        &mut self,
        query: &StructuredQuery,
    ) -> Result<DisplayContent, SessionError> {
        if query.is_empty() {
            return Err(SessionError::EmptyAddress);
        }

        let resolved = self
            .geocoder
            .resolve(&Query::Structured(query.clone()))
            .await?;
        Ok(self.complete_resolution(resolved))
    }

    /// Resolves the device position, with the bounded sensor timeout.
    pub async fn locate_device(
        &mut self,
        sensor: &dyn GeolocationSensor,
    ) -> Result<DisplayContent, SessionError> {
        let point = read_position(sensor).await?;
        let district = locate(&self.store, point, None);
        Ok(self.finish_resolution(point, district, None))
    }

    /// Map click. `known_bpou` is the fast path when the host's hit test
    /// already identified the clicked polygon.
    ///
    /// A click that resolves to a BPOU always runs the full locked-style
    /// resolution, whether or not the session was already locked. A click
    /// that hits no BPOU is ignored: no state change, no display update.
    pub fn click(&mut self, point: LonLat, known_bpou: Option<&str>) -> Option<DisplayContent> {
        let district = locate(&self.store, point, known_bpou);
        if district.bpou_name.is_none() {
            log::debug!("Ignoring click outside every BPOU polygon");
            return None;
        }
        Some(self.finish_resolution(point, district, None))
    }

    /// Issues a sequence number for a hover resolution about to start.
    /// Hovers may overlap; completions are reconciled in [`Self::hover`].
    pub fn begin_hover(&mut self) -> u64 {
        self.interaction.begin_hover()
    }

    /// Completes the hover resolution started under `seq`. Returns preview
    /// content only when the display should actually change; locked, stale
    /// and same-polygon hovers yield `None`. Never moves the marker.
    pub fn hover(&mut self, seq: u64, point: LonLat) -> Option<PreviewContent> {
        if self.interaction.is_locked() {
            return None;
        }
        let district = locate(&self.store, point, None);
        match self
            .interaction
            .finish_hover(seq, district.bpou_name.as_deref())
        {
            HoverOutcome::Update(_) => Some(present_preview(&district, &self.directory)),
            HoverOutcome::Unchanged | HoverOutcome::Stale | HoverOutcome::Suppressed => None,
        }
    }

    fn complete_resolution(&mut self, resolved: Resolved) -> DisplayContent {
        let point = LonLat::new(resolved.lon, resolved.lat);
        let district = locate(&self.store, point, None);
        self.finish_resolution(point, district, resolved.used_variation.as_deref())
    }

    /// The locked-style tail shared by search, geolocate and click:
    /// replace the marker, lock the machine, build the display value.
    fn finish_resolution(
        &mut self,
        point: LonLat,
        district: DistrictMatch,
        used_fallback: Option<&str>,
    ) -> DisplayContent {
        self.store.set_marker(point);
        self.interaction.lock();
        log::info!(
            "Resolved to BPOU {:?}, CD {}",
            district.bpou_name,
            district.cd_id
        );
        present(&district, &self.directory, used_fallback)
    }
}
