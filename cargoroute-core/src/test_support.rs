//! Scripted providers for exercising cascades without a network.
//!
//! Each provider replays configured outcomes after an optional delay and
//! counts how often it was called. Delays use `tokio::time`, so tests running
//! on a paused clock stay deterministic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Address, Coordinate, DirectionsProvider, FallthroughReason, GeocodeProvider, Provider,
    ProviderTier, ReverseGeocodeProvider, RouteLeg,
};

#[derive(Debug, Clone)]
struct Reply<T> {
    delay: Duration,
    outcome: Result<T, FallthroughReason>,
}

impl<T: Clone> Reply<T> {
    fn immediate(outcome: Result<T, FallthroughReason>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome,
        }
    }

    async fn play(&self) -> Result<T, FallthroughReason> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

/// Build a straight two-point leg with the given metric totals.
#[must_use]
pub fn straight_leg(
    pickup: Coordinate,
    dropoff: Coordinate,
    distance_metres: f64,
    duration_seconds: f64,
) -> RouteLeg {
    RouteLeg {
        polyline: vec![pickup, dropoff],
        distance_metres,
        duration_seconds,
    }
}

/// Geocoder answering from a table of address strings.
///
/// Unknown addresses return [`FallthroughReason::NotFound`] unless a
/// different fallback was set with [`ScriptedGeocodeProvider::failing_with`].
#[derive(Debug)]
pub struct ScriptedGeocodeProvider {
    tier: ProviderTier,
    replies: HashMap<String, Reply<Coordinate>>,
    fallback: Reply<Coordinate>,
    calls: AtomicUsize,
}

impl ScriptedGeocodeProvider {
    /// An empty script occupying `tier`.
    #[must_use]
    pub fn new(tier: ProviderTier) -> Self {
        Self {
            tier,
            replies: HashMap::new(),
            fallback: Reply::immediate(Err(FallthroughReason::NotFound)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer `address` with `coordinate` straight away.
    #[must_use]
    pub fn answering(self, address: &str, coordinate: Coordinate) -> Self {
        self.answering_after(address, Duration::ZERO, coordinate)
    }

    /// Answer `address` with `coordinate` once `delay` has elapsed.
    #[must_use]
    pub fn answering_after(mut self, address: &str, delay: Duration, coordinate: Coordinate) -> Self {
        self.replies.insert(
            address.to_owned(),
            Reply {
                delay,
                outcome: Ok(coordinate),
            },
        );
        self
    }

    /// Fail every unscripted address with `reason`.
    #[must_use]
    pub fn failing_with(mut self, reason: FallthroughReason) -> Self {
        self.fallback = Reply::immediate(Err(reason));
        self
    }

    /// Number of geocode calls received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Provider for ScriptedGeocodeProvider {
    fn name(&self) -> &str {
        "scripted-geocoder"
    }

    fn tier(&self) -> ProviderTier {
        self.tier
    }
}

#[async_trait]
impl GeocodeProvider for ScriptedGeocodeProvider {
    async fn geocode(&self, address: &str) -> Result<Coordinate, FallthroughReason> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .get(address)
            .unwrap_or(&self.fallback)
            .play()
            .await
    }
}

/// Reverse geocoder naming scripted coordinates.
///
/// Lookups match by coordinate equivalence; anything else returns the
/// fallback outcome, [`FallthroughReason::NotFound`] by default.
#[derive(Debug)]
pub struct ScriptedReverseGeocodeProvider {
    tier: ProviderTier,
    replies: Vec<(Coordinate, Reply<Address>)>,
    fallback: Reply<Address>,
    calls: AtomicUsize,
}

impl ScriptedReverseGeocodeProvider {
    /// An empty script occupying `tier`.
    #[must_use]
    pub fn new(tier: ProviderTier) -> Self {
        Self {
            tier,
            replies: Vec::new(),
            fallback: Reply::immediate(Err(FallthroughReason::NotFound)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Name `coordinate` as `address` straight away.
    #[must_use]
    pub fn naming(self, coordinate: Coordinate, address: &str) -> Self {
        self.naming_after(coordinate, Duration::ZERO, address)
    }

    /// Name `coordinate` as `address` once `delay` has elapsed.
    #[must_use]
    pub fn naming_after(mut self, coordinate: Coordinate, delay: Duration, address: &str) -> Self {
        self.replies.push((
            coordinate,
            Reply {
                delay,
                outcome: Ok(Address::new(address)),
            },
        ));
        self
    }

    /// Fail every unscripted coordinate with `reason` after `delay`.
    #[must_use]
    pub fn failing_after(mut self, delay: Duration, reason: FallthroughReason) -> Self {
        self.fallback = Reply {
            delay,
            outcome: Err(reason),
        };
        self
    }

    /// Number of reverse geocode calls received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Provider for ScriptedReverseGeocodeProvider {
    fn name(&self) -> &str {
        "scripted-reverse-geocoder"
    }

    fn tier(&self) -> ProviderTier {
        self.tier
    }
}

#[async_trait]
impl ReverseGeocodeProvider for ScriptedReverseGeocodeProvider {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Address, FallthroughReason> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .iter()
            .find(|(known, _)| known.is_equivalent(&coordinate))
            .map_or(&self.fallback, |(_, reply)| reply)
            .play()
            .await
    }
}

/// Directions provider replaying one outcome for every request.
#[derive(Debug)]
pub struct ScriptedDirectionsProvider {
    tier: ProviderTier,
    reply: Reply<RouteLeg>,
    calls: AtomicUsize,
}

impl ScriptedDirectionsProvider {
    /// Answer every request with `leg`.
    #[must_use]
    pub fn answering(tier: ProviderTier, leg: RouteLeg) -> Self {
        Self::answering_after(tier, Duration::ZERO, leg)
    }

    /// Answer every request with `leg` once `delay` has elapsed.
    #[must_use]
    pub fn answering_after(tier: ProviderTier, delay: Duration, leg: RouteLeg) -> Self {
        Self {
            tier,
            reply: Reply {
                delay,
                outcome: Ok(leg),
            },
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every request with `reason`.
    #[must_use]
    pub fn failing(tier: ProviderTier, reason: FallthroughReason) -> Self {
        Self::failing_after(tier, Duration::ZERO, reason)
    }

    /// Fail every request with `reason` once `delay` has elapsed.
    #[must_use]
    pub fn failing_after(tier: ProviderTier, delay: Duration, reason: FallthroughReason) -> Self {
        Self {
            tier,
            reply: Reply {
                delay,
                outcome: Err(reason),
            },
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of directions calls received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Provider for ScriptedDirectionsProvider {
    fn name(&self) -> &str {
        "scripted-directions"
    }

    fn tier(&self) -> ProviderTier {
        self.tier
    }
}

#[async_trait]
impl DirectionsProvider for ScriptedDirectionsProvider {
    async fn directions(
        &self,
        _pickup: Coordinate,
        _dropoff: Coordinate,
    ) -> Result<RouteLeg, FallthroughReason> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.play().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn geocoder_counts_calls_and_defaults_to_not_found() {
        let provider = ScriptedGeocodeProvider::new(ProviderTier::Open)
            .answering("known", Coordinate::new(1.0, 2.0));

        assert_eq!(
            provider.geocode("known").await,
            Ok(Coordinate::new(1.0, 2.0))
        );
        assert_eq!(
            provider.geocode("unknown").await,
            Err(FallthroughReason::NotFound)
        );
        assert_eq!(provider.calls(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn reverse_geocoder_matches_equivalent_points() {
        let provider = ScriptedReverseGeocodeProvider::new(ProviderTier::Open)
            .naming(Coordinate::new(40.7580, -73.9855), "Times Square");

        let address = provider
            .reverse_geocode(Coordinate::new(40.75805, -73.98552))
            .await
            .expect("equivalent coordinate should match");
        assert_eq!(address.as_str(), "Times Square");
    }
}
