//! Map presentation derived from trip snapshots.
//!
//! Nothing here feeds back into resolution; a renderer reads a [`MapView`]
//! and draws it.

use std::str::FromStr;

use thiserror::Error;

use crate::{Coordinate, EndpointRole, TripSnapshot};

/// Centre used before any endpoint is resolved (lower Manhattan).
pub const DEFAULT_CENTRE: Coordinate = Coordinate::new(40.7128, -74.0060);

/// A labelled endpoint pin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// Endpoint the pin marks.
    pub role: EndpointRole,
    /// Single-letter label, `P` or `D`.
    pub label: char,
    /// Pin position.
    pub position: Coordinate,
}

/// Everything a map renderer needs for one trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapView {
    /// Map centre.
    pub centre: Coordinate,
    /// Pins for resolved endpoints, pickup first.
    pub markers: Vec<Marker>,
    /// Route geometry; empty until a route exists.
    pub polyline: Vec<Coordinate>,
}

impl MapView {
    /// Lay out `snapshot`.
    ///
    /// The centre is the midpoint when both endpoints are resolved, the
    /// single resolved endpoint otherwise, and [`DEFAULT_CENTRE`] when
    /// neither is.
    #[must_use]
    pub fn from_snapshot(snapshot: &TripSnapshot) -> Self {
        let markers: Vec<Marker> = EndpointRole::ALL
            .into_iter()
            .filter_map(|role| {
                snapshot.endpoint(role).coordinate.map(|position| Marker {
                    role,
                    label: role.label(),
                    position,
                })
            })
            .collect();
        let centre = match markers.as_slice() {
            [only] => only.position,
            [first, second] => first.position.midpoint(&second.position),
            _ => DEFAULT_CENTRE,
        };
        Self {
            centre,
            markers,
            polyline: snapshot
                .route
                .as_ref()
                .map(|route| route.polyline.clone())
                .unwrap_or_default(),
        }
    }
}

/// Booking lifecycle states reported by the booking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BookingStatus {
    /// Awaiting a driver.
    Pending,
    /// A driver took the job.
    Accepted,
    /// The driver declined.
    Rejected,
    /// Load is on the move.
    InProgress,
    /// Delivered.
    Completed,
    /// Called off by the customer.
    Cancelled,
}

impl BookingStatus {
    /// Stroke colour for the driver-view route line.
    #[must_use]
    pub const fn route_colour(self) -> &'static str {
        match self {
            Self::Pending => "#f59e0b",
            Self::Accepted => "#2563eb",
            Self::Rejected => "#9ca3af",
            Self::InProgress => "#7c3aed",
            Self::Completed => "#16a34a",
            Self::Cancelled => "#dc2626",
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status string the booking API is not known to send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown booking status {0:?}")]
pub struct ParseBookingStatusError(String);

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseBookingStatusError(value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EndpointSnapshot, ProviderTier, RouteEstimate, TripPhase};
    use rstest::rstest;

    const PICKUP: Coordinate = Coordinate::new(40.7484, -73.9857);
    const DROPOFF: Coordinate = Coordinate::new(40.7587, -73.9787);

    fn snapshot(pickup: Option<Coordinate>, dropoff: Option<Coordinate>) -> TripSnapshot {
        TripSnapshot {
            phase: TripPhase::Idle,
            pickup: EndpointSnapshot {
                coordinate: pickup,
                ..EndpointSnapshot::default()
            },
            dropoff: EndpointSnapshot {
                coordinate: dropoff,
                ..EndpointSnapshot::default()
            },
            route: None,
        }
    }

    #[rstest]
    #[case(None, None, DEFAULT_CENTRE)]
    #[case(Some(PICKUP), None, PICKUP)]
    #[case(None, Some(DROPOFF), DROPOFF)]
    #[case(Some(PICKUP), Some(DROPOFF), Coordinate::new(40.75355, -73.9822))]
    fn centre_tracks_resolved_endpoints(
        #[case] pickup: Option<Coordinate>,
        #[case] dropoff: Option<Coordinate>,
        #[case] expected: Coordinate,
    ) {
        let view = MapView::from_snapshot(&snapshot(pickup, dropoff));
        assert!(view.centre.is_equivalent(&expected), "centre {}", view.centre);
    }

    #[rstest]
    fn markers_and_polyline_follow_snapshot() {
        let mut trip = snapshot(Some(PICKUP), Some(DROPOFF));
        trip.route = Some(RouteEstimate::closed_form(PICKUP, DROPOFF));

        let view = MapView::from_snapshot(&trip);

        let labels: Vec<char> = view.markers.iter().map(|marker| marker.label).collect();
        assert_eq!(labels, vec!['P', 'D']);
        assert_eq!(view.polyline, vec![PICKUP, DROPOFF]);
        assert_eq!(
            trip.route.map(|route| route.source),
            Some(ProviderTier::Estimate)
        );
    }

    #[rstest]
    #[case("pending", BookingStatus::Pending)]
    #[case("In-Progress", BookingStatus::InProgress)]
    #[case("in_progress", BookingStatus::InProgress)]
    #[case(" cancelled ", BookingStatus::Cancelled)]
    fn parses_booking_statuses(#[case] text: &str, #[case] expected: BookingStatus) {
        assert_eq!(text.parse::<BookingStatus>(), Ok(expected));
    }

    #[rstest]
    fn status_round_trips_through_display() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Rejected,
            BookingStatus::InProgress,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<BookingStatus>(), Ok(status));
            assert!(status.route_colour().starts_with('#'));
        }
    }

    #[rstest]
    fn rejects_unknown_status() {
        assert!("lost".parse::<BookingStatus>().is_err());
    }
}
