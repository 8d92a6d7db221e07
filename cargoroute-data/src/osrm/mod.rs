//! OSRM adapter: the keyless open directions tier.

mod response;

use async_trait::async_trait;
use cargoroute_core::{
    Coordinate, DirectionsProvider, FallthroughReason, Provider, ProviderTier, RouteLeg,
};
use reqwest::Client;
use url::Url;

use crate::config::{ProviderBuildError, parse_base_url};
use crate::http::{endpoint, get_json};
use response::RouteResponse;

const NAME: &str = "osrm";

/// Driving directions from an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmDirectionsProvider {
    client: Client,
    base_url: Url,
}

impl OsrmDirectionsProvider {
    /// Create a provider rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError`] when `base_url` is unusable.
    pub fn new(client: Client, base_url: &str) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn route_url(&self, pickup: Coordinate, dropoff: Coordinate) -> Url {
        let waypoints = format!(
            "{},{};{},{}",
            pickup.longitude, pickup.latitude, dropoff.longitude, dropoff.latitude
        );
        let mut url = endpoint(&self.base_url, &["route", "v1", "driving", waypoints.as_str()]);
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        url
    }
}

fn into_leg(
    response: RouteResponse,
    pickup: Coordinate,
    dropoff: Coordinate,
) -> Result<RouteLeg, FallthroughReason> {
    if response.is_no_route() {
        return Err(FallthroughReason::NotFound);
    }
    if !response.is_ok() {
        return Err(FallthroughReason::provider(format!(
            "{NAME}: {}: {}",
            response.code,
            response.message.as_deref().unwrap_or("no message")
        )));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(FallthroughReason::NotFound)?;

    let mut polyline: Vec<Coordinate> = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[longitude, latitude]| Coordinate::new(latitude, longitude))
        .collect();
    if polyline.is_empty() {
        polyline = vec![pickup, dropoff];
    }

    Ok(RouteLeg {
        polyline,
        distance_metres: route.distance,
        duration_seconds: route.duration,
    })
}

impl Provider for OsrmDirectionsProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Open
    }
}

#[async_trait]
impl DirectionsProvider for OsrmDirectionsProvider {
    async fn directions(
        &self,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<RouteLeg, FallthroughReason> {
        let response: RouteResponse =
            get_json(&self.client, NAME, self.route_url(pickup, dropoff)).await?;
        into_leg(response, pickup, dropoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EMPIRE_STATE: Coordinate = Coordinate::new(40.7484, -73.9857);
    const ROCKEFELLER: Coordinate = Coordinate::new(40.7587, -73.9787);

    fn response(json: &str) -> RouteResponse {
        serde_json::from_str(json).expect("valid fixture")
    }

    #[rstest]
    fn route_url_orders_longitude_first() {
        let provider = OsrmDirectionsProvider::new(Client::new(), "http://osrm.example.com")
            .expect("valid base");
        let url = provider.route_url(EMPIRE_STATE, ROCKEFELLER);
        assert_eq!(
            url.path(),
            "/route/v1/driving/-73.9857,40.7484;-73.9787,40.7587"
        );
        assert_eq!(url.query(), Some("overview=full&geometries=geojson"));
    }

    #[rstest]
    fn geometry_is_flipped_to_latitude_first() {
        let leg = into_leg(
            response(
                r#"{"code": "Ok", "routes": [{"distance": 1770.0, "duration": 420.0,
                    "geometry": {"coordinates": [[-73.9857, 40.7484], [-73.9787, 40.7587]]}}]}"#,
            ),
            EMPIRE_STATE,
            ROCKEFELLER,
        )
        .expect("route");
        assert_eq!(leg.polyline, vec![EMPIRE_STATE, ROCKEFELLER]);
        assert_eq!(leg.distance_metres, 1770.0);
        assert_eq!(leg.duration_seconds, 420.0);
    }

    #[rstest]
    fn empty_geometry_becomes_straight_segment() {
        let leg = into_leg(
            response(
                r#"{"code": "Ok", "routes": [{"distance": 10.0, "duration": 5.0,
                    "geometry": {"coordinates": []}}]}"#,
            ),
            EMPIRE_STATE,
            ROCKEFELLER,
        )
        .expect("route");
        assert_eq!(leg.polyline, vec![EMPIRE_STATE, ROCKEFELLER]);
    }

    #[rstest]
    #[case(r#"{"code": "NoRoute"}"#, FallthroughReason::NotFound)]
    #[case(r#"{"code": "Ok", "routes": []}"#, FallthroughReason::NotFound)]
    #[case(
        r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#,
        FallthroughReason::provider("osrm: InvalidQuery: Query string malformed")
    )]
    fn failures_fall_through(#[case] json: &str, #[case] expected: FallthroughReason) {
        assert_eq!(
            into_leg(response(json), EMPIRE_STATE, ROCKEFELLER),
            Err(expected)
        );
    }
}
