//! Directions cascade raced against a safety deadline.
//!
//! [`Router::route`] never fails. Provider tiers are tried in order and the
//! first leg returned becomes the estimate. If the cascade is exhausted, or
//! nothing has answered when the safety deadline fires, the closed-form
//! [`RouteEstimate::closed_form`] is published instead. The cascade and the
//! deadline settle one [`ResolveOnce`] slot, so exactly one of them wins and
//! a late provider answer is dropped.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::cascade::{Cascade, Tier};
use crate::slot::ResolveOnce;
use crate::{Coordinate, DirectionsProvider, RouteEstimate};

/// Time after which the closed-form estimate is published regardless.
pub const DEFAULT_SAFETY_DEADLINE: Duration = Duration::from_secs(2);

/// Computes a [`RouteEstimate`] for a pickup/drop-off pair.
#[derive(Debug, Clone)]
pub struct Router {
    cascade: Arc<Cascade<dyn DirectionsProvider>>,
    safety_deadline: Duration,
}

impl Router {
    /// Build a router from ranked tiers with the default safety deadline.
    #[must_use]
    pub fn new(tiers: Vec<Tier<dyn DirectionsProvider>>) -> Self {
        Self {
            cascade: Arc::new(Cascade::new("directions", tiers)),
            safety_deadline: DEFAULT_SAFETY_DEADLINE,
        }
    }

    /// Standard layout: unbounded primary, then an open router capped at
    /// `open_timeout` (normally [`crate::OPEN_PROVIDER_TIMEOUT`]).
    #[must_use]
    pub fn standard(
        primary: Arc<dyn DirectionsProvider>,
        open: Arc<dyn DirectionsProvider>,
        open_timeout: Duration,
    ) -> Self {
        Self::new(vec![Tier::new(primary), Tier::bounded(open, open_timeout)])
    }

    /// Replace the safety deadline.
    #[must_use]
    pub const fn with_safety_deadline(mut self, deadline: Duration) -> Self {
        self.safety_deadline = deadline;
        self
    }

    /// Configured safety deadline.
    #[must_use]
    pub const fn safety_deadline(&self) -> Duration {
        self.safety_deadline
    }

    /// Route from `pickup` to `dropoff`.
    ///
    /// Completes no later than the safety deadline. Provider calls still in
    /// flight at that point keep running in the background and their answer
    /// is discarded.
    pub async fn route(&self, pickup: Coordinate, dropoff: Coordinate) -> RouteEstimate {
        let (slot, settled) = ResolveOnce::channel();

        let deadline = tokio::spawn({
            let slot = slot.clone();
            let limit = self.safety_deadline;
            async move {
                tokio::time::sleep(limit).await;
                if slot.settle(RouteEstimate::closed_form(pickup, dropoff)) {
                    warn!("no directions within {limit:?}; published closed-form estimate");
                }
            }
        });

        let cascade = Arc::clone(&self.cascade);
        // Detached: the cascade may outlive this call once the deadline wins.
        drop(tokio::spawn(async move {
            let estimate = match cascade
                .first_success(|provider| provider.directions(pickup, dropoff))
                .await
            {
                Ok(resolved) => RouteEstimate::from_leg(resolved.value, resolved.tier),
                Err(exhausted) => {
                    info!(
                        "all {} directions tiers failed; using closed-form estimate",
                        exhausted.failures.len()
                    );
                    RouteEstimate::closed_form(pickup, dropoff)
                }
            };
            let source = estimate.source;
            if !slot.settle(estimate) {
                debug!("discarded {source} directions that arrived after the safety deadline");
            }
        }));

        let outcome = settled.await;
        deadline.abort();
        outcome.unwrap_or_else(|_| {
            warn!("directions task ended without settling; using closed-form estimate");
            RouteEstimate::closed_form(pickup, dropoff)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedDirectionsProvider, straight_leg};
    use crate::{FallthroughReason, OPEN_PROVIDER_TIMEOUT, ProviderTier};
    use rstest::rstest;
    use tokio::time::Instant;

    const PICKUP: Coordinate = Coordinate::new(40.7484, -73.9857);
    const DROPOFF: Coordinate = Coordinate::new(40.7587, -73.9787);

    fn router(
        primary: &Arc<ScriptedDirectionsProvider>,
        open: &Arc<ScriptedDirectionsProvider>,
    ) -> Router {
        Router::standard(
            Arc::clone(primary) as Arc<dyn DirectionsProvider>,
            Arc::clone(open) as Arc<dyn DirectionsProvider>,
            OPEN_PROVIDER_TIMEOUT,
        )
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn first_successful_tier_sets_the_source() {
        let primary = Arc::new(ScriptedDirectionsProvider::failing(
            ProviderTier::Primary,
            FallthroughReason::provider("OVER_QUERY_LIMIT"),
        ));
        let open = Arc::new(ScriptedDirectionsProvider::answering_after(
            ProviderTier::Open,
            Duration::from_millis(300),
            straight_leg(PICKUP, DROPOFF, 1_609.344, 240.0),
        ));

        let estimate = router(&primary, &open).route(PICKUP, DROPOFF).await;

        assert_eq!(estimate.source, ProviderTier::Open);
        assert!((estimate.distance_miles - 1.0).abs() < 1e-9);
        assert_eq!(estimate.duration_minutes, 4);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn deadline_publishes_estimate_and_drops_late_answer() {
        let primary = Arc::new(ScriptedDirectionsProvider::answering_after(
            ProviderTier::Primary,
            Duration::from_secs(4),
            straight_leg(PICKUP, DROPOFF, 5_000.0, 600.0),
        ));
        let open = Arc::new(ScriptedDirectionsProvider::failing(
            ProviderTier::Open,
            FallthroughReason::NotFound,
        ));

        let started = Instant::now();
        let estimate = router(&primary, &open).route(PICKUP, DROPOFF).await;

        assert_eq!(started.elapsed(), DEFAULT_SAFETY_DEADLINE);
        assert_eq!(estimate, RouteEstimate::closed_form(PICKUP, DROPOFF));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(primary.calls(), 1);
        assert_eq!(open.calls(), 0);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn exhausted_cascade_does_not_wait_for_deadline() {
        let primary = Arc::new(ScriptedDirectionsProvider::failing(
            ProviderTier::Primary,
            FallthroughReason::Unconfigured,
        ));
        let open = Arc::new(ScriptedDirectionsProvider::failing(
            ProviderTier::Open,
            FallthroughReason::provider("NoRoute"),
        ));

        let started = Instant::now();
        let estimate = router(&primary, &open).route(PICKUP, DROPOFF).await;

        assert_eq!(estimate.source, ProviderTier::Estimate);
        assert!(started.elapsed() < DEFAULT_SAFETY_DEADLINE);
        assert_eq!(estimate.polyline, vec![PICKUP, DROPOFF]);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn custom_deadline_is_honoured() {
        let silent = Arc::new(ScriptedDirectionsProvider::answering_after(
            ProviderTier::Primary,
            Duration::from_secs(60),
            straight_leg(PICKUP, DROPOFF, 1.0, 1.0),
        ));
        let open = Arc::new(ScriptedDirectionsProvider::failing(
            ProviderTier::Open,
            FallthroughReason::NotFound,
        ));
        let limit = Duration::from_millis(500);

        let started = Instant::now();
        let estimate = router(&silent, &open)
            .with_safety_deadline(limit)
            .route(PICKUP, DROPOFF)
            .await;

        assert_eq!(started.elapsed(), limit);
        assert_eq!(estimate.source, ProviderTier::Estimate);
    }
}
