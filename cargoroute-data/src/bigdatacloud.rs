//! BigDataCloud adapter: the keyless secondary reverse geocoding tier.
//!
//! The client-side endpoint needs no key but only resolves to locality
//! level, so it ranks after Nominatim.

use async_trait::async_trait;
use cargoroute_core::{
    Address, Coordinate, FallthroughReason, Provider, ProviderTier, ReverseGeocodeProvider,
};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::{ProviderBuildError, parse_base_url};
use crate::http::{endpoint, get_json};

const NAME: &str = "bigdatacloud";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ReverseResponse {
    locality: String,
    city: String,
    principal_subdivision: String,
    country_name: String,
}

impl ReverseResponse {
    /// `locality-or-city, subdivision, country`, skipping blanks and repeats.
    fn display_name(&self) -> String {
        let place = if self.locality.trim().is_empty() {
            &self.city
        } else {
            &self.locality
        };
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        for part in [place, &self.principal_subdivision, &self.country_name] {
            let part = part.trim();
            if !part.is_empty() && !parts.contains(&part) {
                parts.push(part);
            }
        }
        parts.join(", ")
    }
}

/// Locality-level reverse geocoding from BigDataCloud.
#[derive(Debug, Clone)]
pub struct BigDataCloudProvider {
    client: Client,
    base_url: Url,
}

impl BigDataCloudProvider {
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

    fn reverse_url(&self, coordinate: Coordinate) -> Url {
        let mut url = endpoint(&self.base_url, &["data", "reverse-geocode-client"]);
        url.query_pairs_mut()
            .append_pair("latitude", &coordinate.latitude.to_string())
            .append_pair("longitude", &coordinate.longitude.to_string())
            .append_pair("localityLanguage", "en");
        url
    }
}

impl Provider for BigDataCloudProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Secondary
    }
}

#[async_trait]
impl ReverseGeocodeProvider for BigDataCloudProvider {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Address, FallthroughReason> {
        let response: ReverseResponse =
            get_json(&self.client, NAME, self.reverse_url(coordinate)).await?;
        let address = Address::new(response.display_name());
        if address.is_unset() {
            Err(FallthroughReason::NotFound)
        } else {
            Ok(address)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        r#"{"locality": "Manhattan", "city": "New York", "principalSubdivision": "New York", "countryName": "United States of America"}"#,
        "Manhattan, New York, United States of America"
    )]
    #[case(
        r#"{"locality": "", "city": "Paris", "principalSubdivision": "Île-de-France", "countryName": "France"}"#,
        "Paris, Île-de-France, France"
    )]
    #[case(
        r#"{"city": "Singapore", "principalSubdivision": "", "countryName": "Singapore"}"#,
        "Singapore"
    )]
    #[case(r#"{"latitude": 0.0, "longitude": 0.0}"#, "")]
    fn display_name_joins_known_parts(#[case] json: &str, #[case] expected: &str) {
        let response: ReverseResponse = serde_json::from_str(json).expect("valid fixture");
        assert_eq!(response.display_name(), expected);
    }

    #[rstest]
    fn reverse_url_requests_english_names() {
        let provider = BigDataCloudProvider::new(Client::new(), "https://bdc.example.com")
            .expect("valid base");
        let url = provider.reverse_url(Coordinate::new(40.758, -73.9855));
        assert_eq!(url.path(), "/data/reverse-geocode-client");
        assert_eq!(
            url.query(),
            Some("latitude=40.758&longitude=-73.9855&localityLanguage=en")
        );
    }
}
