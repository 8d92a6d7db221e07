//! Ordered "first success wins" driver shared by every resolution cascade.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::{FallthroughReason, Provider, ProviderTier, TierFailure};

/// One ranked provider attempt, optionally hard-capped in time.
pub struct Tier<P: ?Sized> {
    provider: Arc<P>,
    timeout: Option<Duration>,
}

impl<P: ?Sized> Tier<P> {
    /// A tier with no bound beyond what the provider enforces itself.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            timeout: None,
        }
    }

    /// A tier whose attempt is abandoned after `timeout`.
    pub fn bounded(provider: Arc<P>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout: Some(timeout),
        }
    }
}

impl<P: ?Sized> Clone for Tier<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            timeout: self.timeout,
        }
    }
}

impl<P: Provider + ?Sized> std::fmt::Debug for Tier<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tier")
            .field("provider", &self.provider.name())
            .field("tier", &self.provider.tier())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Result of the first tier that answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// The answer.
    pub value: T,
    /// Tier of the provider that answered.
    pub tier: ProviderTier,
    /// Name of the provider that answered.
    pub provider: String,
}

/// Every tier fell through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exhausted {
    /// One entry per attempted tier, in cascade order.
    pub failures: Vec<TierFailure>,
}

/// Ordered list of provider tiers for one operation.
///
/// Terminal, failure-proof fallbacks are not tiers; callers apply them to
/// an [`Exhausted`] outcome.
pub struct Cascade<P: ?Sized> {
    operation: &'static str,
    tiers: Vec<Tier<P>>,
}

impl<P: ?Sized> std::fmt::Debug for Cascade<P>
where
    P: Provider,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cascade")
            .field("operation", &self.operation)
            .field("tiers", &self.tiers)
            .finish()
    }
}

impl<P: Provider + ?Sized> Cascade<P> {
    /// Build a cascade for `operation` (used in log lines) from ranked tiers.
    pub fn new(operation: &'static str, tiers: Vec<Tier<P>>) -> Self {
        Self { operation, tiers }
    }

    /// Run `attempt` against each tier in order and return the first success.
    ///
    /// Later tiers are not attempted once one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Exhausted`] with every tier's [`FallthroughReason`] when no
    /// tier succeeds.
    pub async fn first_success<'a, T, F, Fut>(&'a self, mut attempt: F) -> Result<Resolved<T>, Exhausted>
    where
        F: FnMut(&'a P) -> Fut,
        Fut: Future<Output = Result<T, FallthroughReason>>,
    {
        let mut failures = Vec::with_capacity(self.tiers.len());
        for tier in &self.tiers {
            let provider: &'a P = tier.provider.as_ref();
            let outcome = match tier.timeout {
                Some(limit) => tokio::time::timeout(limit, attempt(provider))
                    .await
                    .unwrap_or(Err(FallthroughReason::Timeout { after: limit })),
                None => attempt(provider).await,
            };
            match outcome {
                Ok(value) => {
                    debug!(
                        "{} answered by {} ({})",
                        self.operation,
                        provider.name(),
                        provider.tier()
                    );
                    return Ok(Resolved {
                        value,
                        tier: provider.tier(),
                        provider: provider.name().to_owned(),
                    });
                }
                Err(reason) => {
                    debug!(
                        "{} fell through {} ({}): {reason}",
                        self.operation,
                        provider.name(),
                        provider.tier()
                    );
                    failures.push(TierFailure {
                        provider: provider.name().to_owned(),
                        tier: provider.tier(),
                        reason,
                    });
                }
            }
        }
        Err(Exhausted { failures })
    }
}
