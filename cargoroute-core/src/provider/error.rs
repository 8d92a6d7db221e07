use std::time::Duration;

use thiserror::Error;

use crate::ProviderTier;

/// Why a single provider attempt did not produce a result.
///
/// Every variant means "try the next tier"; none of them is surfaced to the
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallthroughReason {
    /// The provider answered but had nothing for the query.
    #[error("no result")]
    NotFound,
    /// The provider did not answer within its bound.
    #[error("timed out after {after:?}")]
    Timeout {
        /// The bound that was exceeded.
        after: Duration,
    },
    /// Network, HTTP, quota, authorisation or decoding failure.
    #[error("provider error: {message}")]
    ProviderError {
        /// Human-readable failure detail for logs.
        message: String,
    },
    /// The provider lacks credentials and was skipped.
    #[error("provider is not configured")]
    Unconfigured,
}

impl FallthroughReason {
    /// Shorthand for [`FallthroughReason::ProviderError`].
    pub fn provider(message: impl Into<String>) -> Self {
        Self::ProviderError {
            message: message.into(),
        }
    }
}

/// A failed tier recorded by the cascade driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierFailure {
    /// Provider name, e.g. `"osrm"`.
    pub provider: String,
    /// Tier the provider occupied.
    pub tier: ProviderTier,
    /// Why the attempt fell through.
    pub reason: FallthroughReason,
}

impl std::fmt::Display for TierFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.provider, self.tier, self.reason)
    }
}
