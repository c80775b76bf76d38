//! # BPOU Engine
//!
//! The address-resolution and district lookup core of the BPOU locator
//! widget.
//!
//! ## Architecture
//!
//! ```text
//! user input (text / fields / device position / pointer coordinate)
//!     │
//!     ├──> GeocodingClient (text paths only)
//!     │      └─ rate-limited, variation-fallback resolution
//!     │
//!     ├──> locate() (Lookup Coordinator)
//!     │      ├─ BPOU layer containment (skipped on click fast path)
//!     │      └─ CD layer containment (always)
//!     │
//!     ├──> InteractionTracker
//!     │      ├─ Hovering: redraw suppression + stale-hover discard
//!     │      └─ Locked: terminal, hover ignored for the session
//!     │
//!     └──> present() (Result Presenter)
//!            └─ DisplayContent value the host renders as a pure projection
//! ```
//!
//! The [`Session`] type ties these together for one widget instance and
//! owns the marker and locking side effects; `locate` and `present`
//! themselves are pure.

mod geolocate;
mod interaction;
mod locate;
mod present;
mod session;
mod types;

pub use geolocate::{read_position, GeolocationError, GeolocationSensor, GEOLOCATION_TIMEOUT};
pub use interaction::{HoverOutcome, InteractionState, InteractionTracker};
pub use locate::locate;
pub use present::{
    present, present_preview, BpouSection, CdSection, Channel, ContactChannels, DisplayContent,
    FeedbackPrompt, PreviewContent, BPOU_UNKNOWN_MESSAGE,
};
pub use session::{Session, SessionError};
pub use types::DistrictMatch;
