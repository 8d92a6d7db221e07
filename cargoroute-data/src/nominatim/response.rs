//! Nominatim `jsonv2` response types.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Output/>

use serde::Deserialize;

/// One entry of a `/search` result array.
///
/// Nominatim serialises coordinates as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub(crate) lat: String,
    pub(crate) lon: String,
}

/// `/reverse` response.
///
/// On failure the service still answers 200 with only an `error` field.
#[derive(Debug, Deserialize)]
pub(crate) struct ReverseResponse {
    #[serde(default)]
    pub(crate) display_name: Option<String>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_search_hits() {
        let json = r#"[{
            "place_id": 321,
            "lat": "40.7484284",
            "lon": "-73.9856546",
            "display_name": "Empire State Building, 350, 5th Avenue, Manhattan"
        }]"#;

        let hits: Vec<SearchHit> = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].lat, "40.7484284");
        assert_eq!(hits[0].lon, "-73.9856546");
    }

    #[test]
    fn deserialise_reverse_error() {
        let json = r#"{"error": "Unable to geocode"}"#;

        let response: ReverseResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.display_name.is_none());
        assert_eq!(response.error.as_deref(), Some("Unable to geocode"));
    }
}
