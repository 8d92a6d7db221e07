//! Nominatim adapter: keyless forward and reverse geocoding.

mod response;

use async_trait::async_trait;
use cargoroute_core::{
    Address, Coordinate, FallthroughReason, GeocodeProvider, Provider, ProviderTier,
    ReverseGeocodeProvider,
};
use reqwest::Client;
use url::Url;

use crate::config::{ProviderBuildError, parse_base_url};
use crate::http::{endpoint, get_json};
use response::{ReverseResponse, SearchHit};

const NAME: &str = "nominatim";

/// OpenStreetMap geocoding through a Nominatim instance.
///
/// The public instance allows roughly one request per second and requires
/// an identifying user agent; both are the caller's concern.
#[derive(Debug, Clone)]
pub struct NominatimProvider {
    client: Client,
    base_url: Url,
}

impl NominatimProvider {
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

    fn search_url(&self, address: &str) -> Url {
        let mut url = endpoint(&self.base_url, &["search"]);
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1")
            .append_pair("q", address);
        url
    }

    fn reverse_url(&self, coordinate: Coordinate) -> Url {
        let mut url = endpoint(&self.base_url, &["reverse"]);
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("lat", &coordinate.latitude.to_string())
            .append_pair("lon", &coordinate.longitude.to_string());
        url
    }
}

fn parse_hit(hit: &SearchHit) -> Result<Coordinate, FallthroughReason> {
    let axis = |text: &str| {
        text.trim()
            .parse::<f64>()
            .map_err(|_| FallthroughReason::provider(format!("{NAME}: bad coordinate {text:?}")))
    };
    let coordinate = Coordinate::new(axis(&hit.lat)?, axis(&hit.lon)?);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(FallthroughReason::provider(format!(
            "{NAME}: coordinate out of range {coordinate}"
        )))
    }
}

impl Provider for NominatimProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Open
    }
}

#[async_trait]
impl GeocodeProvider for NominatimProvider {
    async fn geocode(&self, address: &str) -> Result<Coordinate, FallthroughReason> {
        let hits: Vec<SearchHit> = get_json(&self.client, NAME, self.search_url(address)).await?;
        hits.first()
            .ok_or(FallthroughReason::NotFound)
            .and_then(parse_hit)
    }
}

#[async_trait]
impl ReverseGeocodeProvider for NominatimProvider {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Address, FallthroughReason> {
        let response: ReverseResponse =
            get_json(&self.client, NAME, self.reverse_url(coordinate)).await?;
        if response.error.is_some() {
            return Err(FallthroughReason::NotFound);
        }
        response
            .display_name
            .map(Address::new)
            .filter(|address| !address.is_unset())
            .ok_or(FallthroughReason::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn provider() -> NominatimProvider {
        NominatimProvider::new(Client::new(), "https://nominatim.example.com").expect("valid base")
    }

    #[rstest]
    fn search_url_limits_to_one_hit() {
        let url = provider().search_url("350 5th Ave, New York");
        assert_eq!(url.path(), "/search");
        assert_eq!(
            url.query(),
            Some("format=jsonv2&limit=1&q=350+5th+Ave%2C+New+York")
        );
    }

    #[rstest]
    fn reverse_url_carries_both_axes() {
        let url = provider().reverse_url(Coordinate::new(40.758, -73.9855));
        assert_eq!(url.path(), "/reverse");
        assert_eq!(url.query(), Some("format=jsonv2&lat=40.758&lon=-73.9855"));
    }

    #[rstest]
    #[case("40.7484284", "-73.9856546", true)]
    #[case("north", "-73.9856546", false)]
    #[case("91.0", "0.0", false)]
    fn hits_parse_into_valid_coordinates(#[case] lat: &str, #[case] lon: &str, #[case] ok: bool) {
        let hit = SearchHit {
            lat: lat.to_owned(),
            lon: lon.to_owned(),
        };
        assert_eq!(parse_hit(&hit).is_ok(), ok);
    }
}
