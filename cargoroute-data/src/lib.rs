//! HTTP provider adapters for the CargoRoute resolution engine.
//!
//! Responsibilities:
//! - Implement the `cargoroute-core` provider traits against Google Maps
//!   Platform, Nominatim, OSRM and BigDataCloud.
//! - Translate every transport, status and payload failure into a
//!   `FallthroughReason` so the cascades can move on.
//! - Assemble the standard tier layout from a [`ProviderConfig`].
//!
//! Boundaries:
//! - Do not encode tier ordering, timeouts or supersession rules (live in
//!   `cargoroute-core`).
//! - Never retry inside an adapter; one call is one tier attempt.
//!
//! Invariants:
//! - Adapters are cheap to clone and share one `reqwest::Client`.
//! - API keys never appear in logs or error messages.

mod bigdatacloud;
mod config;
mod google;
mod http;
mod nominatim;
mod osrm;
mod standard;

pub use bigdatacloud::BigDataCloudProvider;
pub use config::{
    DEFAULT_BIGDATACLOUD_BASE_URL, DEFAULT_GOOGLE_BASE_URL, DEFAULT_NOMINATIM_BASE_URL,
    DEFAULT_OSRM_BASE_URL, DEFAULT_USER_AGENT, ProviderBuildError, ProviderConfig,
};
pub use google::{GoogleMapsProvider, PolylineError, decode_polyline};
pub use nominatim::NominatimProvider;
pub use osrm::OsrmDirectionsProvider;
pub use standard::StandardServices;
