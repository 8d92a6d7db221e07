//! Route estimates and the closed-form fallback.

use crate::Coordinate;
use crate::coordinate::METRES_PER_MILE;

/// Inflation applied to straight-line distance to approximate road distance.
pub const ROAD_DISTANCE_FACTOR: f64 = 1.25;

/// Minutes of driving assumed per mile by the closed-form estimate.
pub const MINUTES_PER_MILE: f64 = 2.0;

/// Ranked position of the provider that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProviderTier {
    /// Keyed map-provider service.
    Primary,
    /// Keyless open service.
    Open,
    /// Secondary keyless service, used only for reverse geocoding.
    Secondary,
    /// Closed-form estimate that cannot fail.
    Estimate,
}

impl std::fmt::Display for ProviderTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Primary => "primary",
            Self::Open => "open",
            Self::Secondary => "secondary",
            Self::Estimate => "estimate",
        })
    }
}

/// Raw driving route as returned by a directions provider, in metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    /// Route geometry from pickup to drop-off.
    pub polyline: Vec<Coordinate>,
    /// Total driving distance in metres.
    pub distance_metres: f64,
    /// Total driving time in seconds.
    pub duration_seconds: f64,
}

/// Distance, duration and geometry for one pickup/drop-off pair.
///
/// Distance and duration are always produced together by one constructor,
/// so an estimate never mixes values from two providers.
///
/// # Examples
///
/// ```
/// use cargoroute_core::{Coordinate, ProviderTier, RouteEstimate};
///
/// let pickup = Coordinate::new(40.7484, -73.9857);
/// let dropoff = Coordinate::new(40.7587, -73.9787);
/// let estimate = RouteEstimate::closed_form(pickup, dropoff);
/// assert_eq!(estimate.source, ProviderTier::Estimate);
/// assert_eq!(estimate.polyline, vec![pickup, dropoff]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteEstimate {
    /// Ordered route geometry.
    pub polyline: Vec<Coordinate>,
    /// Driving distance in miles, one decimal place.
    pub distance_miles: f64,
    /// Driving time in whole minutes.
    pub duration_minutes: u32,
    /// Tier of the provider that produced the estimate.
    pub source: ProviderTier,
}

impl RouteEstimate {
    /// Convert a provider leg into an estimate tagged with `source`.
    #[must_use]
    pub fn from_leg(leg: RouteLeg, source: ProviderTier) -> Self {
        Self {
            polyline: leg.polyline,
            distance_miles: round_to_tenth(leg.distance_metres / METRES_PER_MILE),
            duration_minutes: whole_minutes(leg.duration_seconds / 60.0),
            source,
        }
    }

    /// Haversine distance inflated for road travel, at a fixed pace.
    ///
    /// The polyline is the straight segment between the two endpoints.
    #[must_use]
    pub fn closed_form(pickup: Coordinate, dropoff: Coordinate) -> Self {
        let distance_miles = round_to_tenth(pickup.haversine_miles(&dropoff) * ROAD_DISTANCE_FACTOR);
        Self {
            polyline: vec![pickup, dropoff],
            distance_miles,
            duration_minutes: whole_minutes(distance_miles * MINUTES_PER_MILE),
            source: ProviderTier::Estimate,
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn whole_minutes(minutes: f64) -> u32 {
    if minutes.is_nan() {
        return 0;
    }
    minutes.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
