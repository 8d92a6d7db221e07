//! Reverse geocoding cascade with a formatted-coordinate terminal tier.

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::cascade::{Cascade, Tier};
use crate::{Address, Coordinate, FallthroughReason, ReverseGeocodeProvider};

/// Names coordinates; never fails and never returns a blank address.
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    cascade: Arc<Cascade<dyn ReverseGeocodeProvider>>,
}

impl ReverseGeocoder {
    /// Build a reverse geocoder from ranked tiers.
    #[must_use]
    pub fn new(tiers: Vec<Tier<dyn ReverseGeocodeProvider>>) -> Self {
        Self {
            cascade: Arc::new(Cascade::new("reverse geocode", tiers)),
        }
    }

    /// Standard layout: unbounded primary, then the open and secondary tiers
    /// each capped at `open_timeout`.
    #[must_use]
    pub fn standard(
        primary: Arc<dyn ReverseGeocodeProvider>,
        open: Arc<dyn ReverseGeocodeProvider>,
        secondary: Arc<dyn ReverseGeocodeProvider>,
        open_timeout: Duration,
    ) -> Self {
        Self::new(vec![
            Tier::new(primary),
            Tier::bounded(open, open_timeout),
            Tier::bounded(secondary, open_timeout),
        ])
    }

    /// Name the place at `coordinate`.
    ///
    /// Falls back to the coordinate itself, four decimal places per axis,
    /// when no tier produced a non-blank address.
    pub async fn resolve_address(&self, coordinate: Coordinate) -> Address {
        let outcome = self
            .cascade
            .first_success(|provider| async move {
                let address = provider.reverse_geocode(coordinate).await?;
                if address.is_unset() {
                    Err(FallthroughReason::NotFound)
                } else {
                    Ok(address)
                }
            })
            .await;
        match outcome {
            Ok(resolved) => resolved.value,
            Err(_) => {
                info!("no reverse geocoder named {coordinate}; using the coordinate");
                Address::from_coordinate(coordinate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedReverseGeocodeProvider;
    use crate::{OPEN_PROVIDER_TIMEOUT, ProviderTier};
    use rstest::rstest;

    const TIMES_SQUARE: Coordinate = Coordinate::new(40.7580, -73.9855);

    fn reverse(
        primary: ScriptedReverseGeocodeProvider,
        open: ScriptedReverseGeocodeProvider,
        secondary: ScriptedReverseGeocodeProvider,
    ) -> ReverseGeocoder {
        ReverseGeocoder::standard(
            Arc::new(primary),
            Arc::new(open),
            Arc::new(secondary),
            OPEN_PROVIDER_TIMEOUT,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn secondary_names_the_point_when_earlier_tiers_miss() {
        let geocoder = reverse(
            ScriptedReverseGeocodeProvider::new(ProviderTier::Primary)
                .failing_after(Duration::ZERO, FallthroughReason::Unconfigured),
            ScriptedReverseGeocodeProvider::new(ProviderTier::Open),
            ScriptedReverseGeocodeProvider::new(ProviderTier::Secondary)
                .naming(TIMES_SQUARE, "New York, New York, United States"),
        );

        let address = geocoder.resolve_address(TIMES_SQUARE).await;
        assert_eq!(address.as_str(), "New York, New York, United States");
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn silent_providers_degrade_to_formatted_coordinate() {
        let stall = Duration::from_secs(60);
        let geocoder = reverse(
            ScriptedReverseGeocodeProvider::new(ProviderTier::Primary),
            ScriptedReverseGeocodeProvider::new(ProviderTier::Open)
                .failing_after(stall, FallthroughReason::NotFound),
            ScriptedReverseGeocodeProvider::new(ProviderTier::Secondary)
                .failing_after(stall, FallthroughReason::NotFound),
        );

        let started = tokio::time::Instant::now();
        let address = geocoder.resolve_address(TIMES_SQUARE).await;

        assert_eq!(address.as_str(), "40.7580, -73.9855");
        assert_eq!(started.elapsed(), OPEN_PROVIDER_TIMEOUT * 2);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_answers_fall_through() {
        let geocoder = reverse(
            ScriptedReverseGeocodeProvider::new(ProviderTier::Primary).naming(TIMES_SQUARE, "  "),
            ScriptedReverseGeocodeProvider::new(ProviderTier::Open)
                .naming(TIMES_SQUARE, "Times Square, Manhattan"),
            ScriptedReverseGeocodeProvider::new(ProviderTier::Secondary),
        );

        let address = geocoder.resolve_address(TIMES_SQUARE).await;
        assert_eq!(address.as_str(), "Times Square, Manhattan");
    }
}
