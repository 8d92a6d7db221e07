//! JSON-over-HTTP plumbing shared by the provider adapters.

use cargoroute_core::FallthroughReason;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Append `segments` to the path of `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Bases are validated with `config::parse_base_url`, so this always holds.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Fetch `url` and decode its JSON body.
///
/// Transport failures, HTTP error statuses and undecodable bodies all become
/// [`FallthroughReason::ProviderError`], except client-side timeouts which
/// become [`FallthroughReason::Timeout`].
pub(crate) async fn get_json<T>(client: &Client, provider: &str, url: Url) -> Result<T, FallthroughReason>
where
    T: DeserializeOwned,
{
    debug!("{provider}: GET {}", redacted(&url));
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| convert_reqwest_error(&err, provider))?
        .error_for_status()
        .map_err(|err| convert_reqwest_error(&err, provider))?;

    response.json().await.map_err(|err| {
        FallthroughReason::provider(format!("{provider}: undecodable response: {}", err.without_url()))
    })
}

/// Convert a reqwest error to a [`FallthroughReason`].
///
/// Messages never include the request URL, which may carry an API key.
pub(crate) fn convert_reqwest_error(error: &reqwest::Error, provider: &str) -> FallthroughReason {
    if error.is_timeout() {
        return FallthroughReason::Timeout {
            // reqwest does not report the bound; zero marks "client timeout".
            after: std::time::Duration::ZERO,
        };
    }

    if let Some(status) = error.status() {
        return FallthroughReason::provider(format!("{provider}: HTTP {}", status.as_u16()));
    }

    let detail = if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    FallthroughReason::provider(format!("{provider}: {detail}"))
}

/// `url` with any `key` query parameter masked, for logging.
fn redacted(url: &Url) -> Url {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" { "***".into() } else { value };
            (name.into_owned(), value.into_owned())
        })
        .collect();
    if !pairs.is_empty() {
        masked.query_pairs_mut().clear().extend_pairs(pairs);
    }
    masked
}
