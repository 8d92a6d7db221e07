//! Fare pricing for a routed trip.

use crate::{ProviderTier, RouteEstimate};

/// Linear fare schedule in dollars.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareSchedule {
    /// Flat charge per booking.
    pub base: f64,
    /// Charge per mile driven.
    pub per_mile: f64,
    /// Charge per minute of driving.
    pub per_minute: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base: 20.0,
            per_mile: 2.0,
            per_minute: 0.5,
        }
    }
}

impl FareSchedule {
    /// Price `estimate` plus `toll`, rounded to cents.
    ///
    /// # Examples
    ///
    /// ```
    /// use cargoroute_core::{FareSchedule, ProviderTier, RouteEstimate};
    ///
    /// let estimate = RouteEstimate {
    ///     polyline: Vec::new(),
    ///     distance_miles: 3.2,
    ///     duration_minutes: 14,
    ///     source: ProviderTier::Open,
    /// };
    /// assert_eq!(FareSchedule::default().price(&estimate, 0.0), 33.4);
    /// ```
    #[must_use]
    pub fn price(&self, estimate: &RouteEstimate, toll: f64) -> f64 {
        let raw = self.base
            + self.per_mile * estimate.distance_miles
            + self.per_minute * f64::from(estimate.duration_minutes)
            + toll;
        (raw * 100.0).round() / 100.0
    }

    /// Build the booking payload for `estimate`.
    #[must_use]
    pub fn quote(&self, estimate: &RouteEstimate, toll: f64) -> TripQuote {
        TripQuote {
            distance_miles: estimate.distance_miles,
            duration_minutes: estimate.duration_minutes,
            source: estimate.source,
            fare: self.price(estimate, toll),
        }
    }
}

/// Distance, duration and fare handed to booking creation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripQuote {
    /// Driving distance in miles.
    pub distance_miles: f64,
    /// Driving time in whole minutes.
    pub duration_minutes: u32,
    /// Tier that produced the route.
    pub source: ProviderTier,
    /// Total fare in dollars.
    pub fare: f64,
}
