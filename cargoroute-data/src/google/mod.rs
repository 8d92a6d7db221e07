//! Google Maps Platform adapter: the keyed primary tier.
//!
//! One provider serves all three capabilities through the Geocoding and
//! Directions web services. Without an API key every call falls through
//! with [`FallthroughReason::Unconfigured`] and no request is made.

mod polyline;
mod response;

use async_trait::async_trait;
use cargoroute_core::{
    Address, Coordinate, DirectionsProvider, FallthroughReason, GeocodeProvider, Provider,
    ProviderTier, ReverseGeocodeProvider, RouteLeg,
};
use log::warn;
use reqwest::Client;
use url::Url;

use crate::config::{ProviderBuildError, parse_base_url};
use crate::http::{endpoint, get_json};

pub use polyline::{PolylineError, decode as decode_polyline};
use response::{
    DirectionsResponse, GeocodeResponse, STATUS_NOT_FOUND, STATUS_OK, STATUS_ZERO_RESULTS,
};

const NAME: &str = "google-maps";

/// Geocoding, reverse geocoding and directions from Google Maps Platform.
#[derive(Debug, Clone)]
pub struct GoogleMapsProvider {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl GoogleMapsProvider {
    /// Create a provider rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError`] when `base_url` is unusable.
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: Option<String>,
    ) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// Whether an API key is present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request(&self, service: &str, params: &[(&str, &str)]) -> Result<Url, FallthroughReason> {
        let key = self.api_key.as_deref().ok_or(FallthroughReason::Unconfigured)?;
        let mut url = endpoint(&self.base_url, &[service, "json"]);
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", key);
        Ok(url)
    }

    async fn geocoding(&self, params: &[(&str, &str)]) -> Result<GeocodeResponse, FallthroughReason> {
        let url = self.request("geocode", params)?;
        let response: GeocodeResponse = get_json(&self.client, NAME, url).await?;
        check_status(&response.status, response.error_message.as_deref())?;
        Ok(response)
    }
}

/// Map an envelope status onto the fallthrough taxonomy.
fn check_status(status: &str, message: Option<&str>) -> Result<(), FallthroughReason> {
    match status {
        STATUS_OK => Ok(()),
        STATUS_ZERO_RESULTS | STATUS_NOT_FOUND => Err(FallthroughReason::NotFound),
        other => {
            warn!("{NAME}: status {other}");
            Err(FallthroughReason::provider(match message {
                Some(detail) => format!("{NAME}: {other}: {detail}"),
                None => format!("{NAME}: {other}"),
            }))
        }
    }
}

fn lat_lng(coordinate: Coordinate) -> String {
    format!("{},{}", coordinate.latitude, coordinate.longitude)
}

impl Provider for GoogleMapsProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Primary
    }
}

#[async_trait]
impl GeocodeProvider for GoogleMapsProvider {
    async fn geocode(&self, address: &str) -> Result<Coordinate, FallthroughReason> {
        let response = self.geocoding(&[("address", address)]).await?;
        let location = response
            .results
            .first()
            .map(|result| result.geometry.location)
            .ok_or(FallthroughReason::NotFound)?;
        let coordinate = Coordinate::new(location.lat, location.lng);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(FallthroughReason::provider(format!(
                "{NAME}: coordinate out of range {coordinate}"
            )))
        }
    }
}

#[async_trait]
impl ReverseGeocodeProvider for GoogleMapsProvider {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Address, FallthroughReason> {
        let latlng = lat_lng(coordinate);
        let response = self.geocoding(&[("latlng", latlng.as_str())]).await?;
        response
            .results
            .iter()
            .map(|result| Address::new(&result.formatted_address))
            .find(|address| !address.is_unset())
            .ok_or(FallthroughReason::NotFound)
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMapsProvider {
    async fn directions(
        &self,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<RouteLeg, FallthroughReason> {
        let origin = lat_lng(pickup);
        let destination = lat_lng(dropoff);
        let url = self.request(
            "directions",
            &[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("mode", "driving"),
            ],
        )?;
        let response: DirectionsResponse = get_json(&self.client, NAME, url).await?;
        check_status(&response.status, response.error_message.as_deref())?;

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(FallthroughReason::NotFound)?;
        if route.legs.is_empty() {
            return Err(FallthroughReason::NotFound);
        }
        let distance_metres: f64 = route.legs.iter().map(|leg| leg.distance.value).sum();
        let duration_seconds: f64 = route.legs.iter().map(|leg| leg.duration.value).sum();

        let encoded = route
            .overview_polyline
            .map(|overview| overview.points)
            .unwrap_or_default();
        let mut polyline = decode_polyline(&encoded)
            .map_err(|err| FallthroughReason::provider(format!("{NAME}: {err}")))?;
        if polyline.is_empty() {
            polyline = vec![pickup, dropoff];
        }

        Ok(RouteLeg {
            polyline,
            distance_metres,
            duration_seconds,
        })
    }
}
