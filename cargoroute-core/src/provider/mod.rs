//! Provider traits implemented by geocoding and directions services.
//!
//! Each trait method is one tier attempt: it either answers or returns a
//! [`FallthroughReason`] telling the cascade to move on. Implementations must
//! not retry internally; ordering and timeouts belong to
//! [`Cascade`](crate::Cascade).

mod error;

use async_trait::async_trait;

use crate::{Address, Coordinate, ProviderTier, RouteLeg};

pub use error::{FallthroughReason, TierFailure};

/// Identity shared by every provider.
pub trait Provider: Send + Sync {
    /// Short, stable name used in logs.
    fn name(&self) -> &str;

    /// Tier the provider occupies in its cascades.
    fn tier(&self) -> ProviderTier;
}

/// Forward geocoding: address text to coordinate.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use cargoroute_core::{Coordinate, FallthroughReason, GeocodeProvider, Provider, ProviderTier};
///
/// struct TimesSquare;
///
/// impl Provider for TimesSquare {
///     fn name(&self) -> &str { "times-square" }
///     fn tier(&self) -> ProviderTier { ProviderTier::Open }
/// }
///
/// #[async_trait]
/// impl GeocodeProvider for TimesSquare {
///     async fn geocode(&self, address: &str) -> Result<Coordinate, FallthroughReason> {
///         if address.contains("Times Square") {
///             Ok(Coordinate::new(40.7580, -73.9855))
///         } else {
///             Err(FallthroughReason::NotFound)
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait GeocodeProvider: Provider {
    /// Resolve `address` to a coordinate.
    async fn geocode(&self, address: &str) -> Result<Coordinate, FallthroughReason>;
}

/// Reverse geocoding: coordinate to display address.
#[async_trait]
pub trait ReverseGeocodeProvider: Provider {
    /// Name the place at `coordinate`.
    ///
    /// Implementations return [`FallthroughReason::NotFound`] rather than a
    /// blank address.
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Address, FallthroughReason>;
}

/// Driving directions between two coordinates.
#[async_trait]
pub trait DirectionsProvider: Provider {
    /// Fetch a driving route from `pickup` to `dropoff`.
    async fn directions(
        &self,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<RouteLeg, FallthroughReason>;
}
