//! Provider configuration and HTTP client construction.

use std::time::Duration;

use cargoroute_core::{DEFAULT_SAFETY_DEADLINE, OPEN_PROVIDER_TIMEOUT};
use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Default user agent sent to every provider.
///
/// Nominatim's usage policy rejects requests without an identifying agent.
pub const DEFAULT_USER_AGENT: &str = "cargoroute/0.1";

/// Default Google Maps Platform web service root.
pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default public Nominatim instance.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default public OSRM demo server.
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";

/// Default BigDataCloud API root.
pub const DEFAULT_BIGDATACLOUD_BASE_URL: &str = "https://api.bigdatacloud.net";

/// Default per-request HTTP timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors raised while assembling providers.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// A base URL did not parse.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL text.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A base URL cannot carry a path, e.g. `mailto:`.
    #[error("base URL {url:?} cannot have path segments")]
    OpaqueBaseUrl {
        /// The rejected URL text.
        url: String,
    },
}

/// Settings shared by the HTTP providers and the standard cascades.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cargoroute_data::ProviderConfig;
///
/// let config = ProviderConfig::new()
///     .with_google_api_key("secret")
///     .with_osrm_base_url("http://localhost:5000")
///     .with_request_timeout(Duration::from_secs(3));
/// assert_eq!(config.google_api_key.as_deref(), Some("secret"));
/// ```
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Google Maps Platform key; the primary tier is skipped without one.
    pub google_api_key: Option<String>,
    /// Google Maps Platform root, e.g. `https://maps.googleapis.com/maps/api`.
    pub google_base_url: String,
    /// Nominatim root.
    pub nominatim_base_url: String,
    /// OSRM root.
    pub osrm_base_url: String,
    /// BigDataCloud root.
    pub bigdatacloud_base_url: String,
    /// Timeout applied by the HTTP client to every request.
    pub request_timeout: Duration,
    /// Cascade bound for the keyless tiers.
    pub open_timeout: Duration,
    /// Router safety deadline.
    pub safety_deadline: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_base_url: DEFAULT_GOOGLE_BASE_URL.to_owned(),
            nominatim_base_url: DEFAULT_NOMINATIM_BASE_URL.to_owned(),
            osrm_base_url: DEFAULT_OSRM_BASE_URL.to_owned(),
            bigdatacloud_base_url: DEFAULT_BIGDATACLOUD_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            open_timeout: OPEN_PROVIDER_TIMEOUT,
            safety_deadline: DEFAULT_SAFETY_DEADLINE,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ProviderConfig {
    /// Configuration pointing at the public services, without a Google key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Google API key. Blank keys count as no key.
    #[must_use]
    pub fn with_google_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.google_api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Override the Google Maps Platform root.
    #[must_use]
    pub fn with_google_base_url(mut self, url: impl Into<String>) -> Self {
        self.google_base_url = url.into();
        self
    }

    /// Override the Nominatim root.
    #[must_use]
    pub fn with_nominatim_base_url(mut self, url: impl Into<String>) -> Self {
        self.nominatim_base_url = url.into();
        self
    }

    /// Override the OSRM root.
    #[must_use]
    pub fn with_osrm_base_url(mut self, url: impl Into<String>) -> Self {
        self.osrm_base_url = url.into();
        self
    }

    /// Override the BigDataCloud root.
    #[must_use]
    pub fn with_bigdatacloud_base_url(mut self, url: impl Into<String>) -> Self {
        self.bigdatacloud_base_url = url.into();
        self
    }

    /// Set the per-request HTTP timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the cascade bound for keyless tiers.
    #[must_use]
    pub fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Set the router safety deadline.
    #[must_use]
    pub fn with_safety_deadline(mut self, deadline: Duration) -> Self {
        self.safety_deadline = deadline;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError::HttpClient`] if the TLS backend fails to
    /// initialise.
    pub fn build_client(&self) -> Result<Client, ProviderBuildError> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.request_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)
    }
}

/// Parse a provider root, rejecting URLs that cannot take path segments.
pub(crate) fn parse_base_url(text: &str) -> Result<Url, ProviderBuildError> {
    let url = Url::parse(text).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        url: text.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ProviderBuildError::OpaqueBaseUrl {
            url: text.to_owned(),
        });
    }
    Ok(url)
}
