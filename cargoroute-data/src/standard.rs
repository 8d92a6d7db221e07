//! Assembly of the standard provider cascades.
//!
//! | Operation       | Primary     | Open        | Secondary    | Terminal        |
//! |-----------------|-------------|-------------|--------------|-----------------|
//! | geocode         | Google Maps | Nominatim   |              | none            |
//! | reverse geocode | Google Maps | Nominatim   | BigDataCloud | coordinate text |
//! | directions      | Google Maps | OSRM        |              | closed form     |
//!
//! Keyless tiers are bounded by [`ProviderConfig::open_timeout`]; the router
//! as a whole by [`ProviderConfig::safety_deadline`].

use std::sync::Arc;

use cargoroute_core::{
    ClickPolicy, GeocodeProvider, Geocoder, ReverseGeocodeProvider, ReverseGeocoder, Router,
    TripResolver,
};
use log::{info, warn};

use crate::{
    BigDataCloudProvider, GoogleMapsProvider, NominatimProvider, OsrmDirectionsProvider,
    ProviderBuildError, ProviderConfig,
};

/// The three resolution services wired to live HTTP providers.
#[derive(Debug, Clone)]
pub struct StandardServices {
    /// Forward geocoding cascade.
    pub geocoder: Geocoder,
    /// Reverse geocoding cascade.
    pub reverse: ReverseGeocoder,
    /// Directions cascade with its safety deadline.
    pub router: Router,
}

impl StandardServices {
    /// Build every provider from `config` and arrange them in tiers.
    ///
    /// A missing Google key is not an error: the primary tier stays in
    /// place and falls through as unconfigured.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError`] if the HTTP client cannot be built or
    /// a base URL is unusable.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = config.build_client()?;
        let google = Arc::new(GoogleMapsProvider::new(
            client.clone(),
            &config.google_base_url,
            config.google_api_key.clone(),
        )?);
        let nominatim = Arc::new(NominatimProvider::new(
            client.clone(),
            &config.nominatim_base_url,
        )?);
        let osrm = Arc::new(OsrmDirectionsProvider::new(
            client.clone(),
            &config.osrm_base_url,
        )?);
        let bigdatacloud = Arc::new(BigDataCloudProvider::new(
            client,
            &config.bigdatacloud_base_url,
        )?);

        if google.is_configured() {
            info!("primary tier: google maps");
        } else {
            warn!("no Google Maps key configured; starting from the open tier");
        }

        let open = config.open_timeout;
        let geocoder = Geocoder::standard(
            Arc::clone(&google) as Arc<dyn GeocodeProvider>,
            Arc::clone(&nominatim) as Arc<dyn GeocodeProvider>,
            open,
        );
        let reverse = ReverseGeocoder::standard(
            Arc::clone(&google) as Arc<dyn ReverseGeocodeProvider>,
            nominatim,
            bigdatacloud,
            open,
        );
        let router = Router::standard(google, osrm, open)
            .with_safety_deadline(config.safety_deadline);

        Ok(Self {
            geocoder,
            reverse,
            router,
        })
    }

    /// Hand the services to a [`TripResolver`] using `policy` for clicks.
    #[must_use]
    pub fn into_resolver(self, policy: ClickPolicy) -> TripResolver {
        TripResolver::with_click_policy(self.geocoder, self.reverse, self.router, policy)
    }
}
