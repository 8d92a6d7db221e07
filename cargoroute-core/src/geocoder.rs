//! Forward geocoding cascade.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::cascade::{Cascade, Exhausted, Tier};
use crate::{Address, Coordinate, GeocodeProvider, TierFailure};

/// Bound applied to keyless tiers when assembling standard cascades.
pub const OPEN_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// The address could not be placed.
///
/// Callers treat this as "no coordinate yet", never as a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// No tier resolved the address.
    #[error("no coordinate found for {address:?}")]
    NotFound {
        /// The address that was looked up.
        address: Address,
        /// Tier failures in cascade order; empty for blank addresses.
        failures: Vec<TierFailure>,
    },
}

/// Resolves address text to a coordinate, first success wins.
///
/// There is no failure-proof terminal tier: an address that nobody can place
/// comes back as [`GeocodeError::NotFound`].
#[derive(Debug, Clone)]
pub struct Geocoder {
    cascade: Arc<Cascade<dyn GeocodeProvider>>,
}

impl Geocoder {
    /// Build a geocoder from ranked tiers.
    #[must_use]
    pub fn new(tiers: Vec<Tier<dyn GeocodeProvider>>) -> Self {
        Self {
            cascade: Arc::new(Cascade::new("geocode", tiers)),
        }
    }

    /// Standard layout: an unbounded primary, then an open tier capped at
    /// `open_timeout` (normally [`OPEN_PROVIDER_TIMEOUT`]).
    #[must_use]
    pub fn standard(
        primary: Arc<dyn GeocodeProvider>,
        open: Arc<dyn GeocodeProvider>,
        open_timeout: Duration,
    ) -> Self {
        Self::new(vec![Tier::new(primary), Tier::bounded(open, open_timeout)])
    }

    /// Resolve `address` to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotFound`] when the address is blank or every
    /// tier fell through.
    pub async fn resolve(&self, address: &Address) -> Result<Coordinate, GeocodeError> {
        if address.is_unset() {
            return Err(GeocodeError::NotFound {
                address: address.clone(),
                failures: Vec::new(),
            });
        }
        let query = address.as_str();
        match self
            .cascade
            .first_success(|provider| provider.geocode(query))
            .await
        {
            Ok(resolved) => Ok(resolved.value),
            Err(Exhausted { failures }) => {
                info!("no geocoder placed {query:?}");
                Err(GeocodeError::NotFound {
                    address: address.clone(),
                    failures,
                })
            }
        }
    }
}
