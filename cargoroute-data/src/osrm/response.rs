//! OSRM API response types for the Route service.
//!
//! The Route service finds the fastest driving route between the supplied
//! coordinates. Geometry is requested as GeoJSON, so positions arrive as
//! `[longitude, latitude]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub(crate) struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the points
    /// - `"InvalidQuery"` - Invalid query parameters
    pub(crate) code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub(crate) message: Option<String>,

    /// Alternative routes, fastest first.
    #[serde(default)]
    pub(crate) routes: Vec<Route>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    pub(crate) fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Whether OSRM answered but found no path.
    pub(crate) fn is_no_route(&self) -> bool {
        self.code == "NoRoute"
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Route {
    /// Metres.
    pub(crate) distance: f64,
    /// Seconds.
    pub(crate) duration: f64,
    pub(crate) geometry: LineString,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LineString {
    #[serde(default)]
    pub(crate) coordinates: Vec<[f64; 2]>,
}
