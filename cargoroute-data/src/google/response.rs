//! Google Maps Platform web service response types.
//!
//! Only the fields the adapters read are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// Envelope status shared by the Geocoding and Directions services.
///
/// Common values:
/// - `"OK"` - at least one result
/// - `"ZERO_RESULTS"` - valid request, nothing found
/// - `"OVER_QUERY_LIMIT"`, `"REQUEST_DENIED"`, `"INVALID_REQUEST"`
pub(crate) const STATUS_OK: &str = "OK";
pub(crate) const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub(crate) const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// Geocoding API response, used for both forward and reverse lookups.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) error_message: Option<String>,
    #[serde(default)]
    pub(crate) results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    #[serde(default)]
    pub(crate) formatted_address: String,
    pub(crate) geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub(crate) location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LatLng {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

/// Directions API response.
#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) error_message: Option<String>,
    #[serde(default)]
    pub(crate) routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsRoute {
    #[serde(default)]
    pub(crate) legs: Vec<DirectionsLeg>,
    #[serde(default)]
    pub(crate) overview_polyline: Option<EncodedPolyline>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsLeg {
    pub(crate) distance: Measure,
    pub(crate) duration: Measure,
}

/// `value` is metres for distances and seconds for durations.
#[derive(Debug, Deserialize)]
pub(crate) struct Measure {
    pub(crate) value: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EncodedPolyline {
    pub(crate) points: String,
}
