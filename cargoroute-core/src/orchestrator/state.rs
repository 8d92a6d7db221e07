//! Mutable trip state and the snapshots published from it.

use crate::change::CoordinateCache;
use crate::fare::{FareSchedule, TripQuote};
use crate::{Address, Coordinate, EndpointRole, RouteEstimate};

/// Coarse progress of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TripPhase {
    /// Neither endpoint has a coordinate.
    #[default]
    Idle,
    /// Only the pickup has a coordinate.
    PickupOnly,
    /// Only the drop-off has a coordinate.
    DropoffOnly,
    /// Both endpoints have coordinates.
    Ready,
}

/// Published view of one endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndpointSnapshot {
    /// Address as entered or reverse geocoded; empty while unknown.
    pub address: Address,
    /// Resolved coordinate, if any.
    pub coordinate: Option<Coordinate>,
}

/// Published view of the whole trip.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripSnapshot {
    /// Progress derived from which coordinates are resolved.
    pub phase: TripPhase,
    /// Pickup endpoint.
    pub pickup: EndpointSnapshot,
    /// Drop-off endpoint.
    pub dropoff: EndpointSnapshot,
    /// Route for the current pair, once one has been computed.
    pub route: Option<RouteEstimate>,
}

impl TripSnapshot {
    /// Endpoint for `role`.
    #[must_use]
    pub const fn endpoint(&self, role: EndpointRole) -> &EndpointSnapshot {
        match role {
            EndpointRole::Pickup => &self.pickup,
            EndpointRole::Dropoff => &self.dropoff,
        }
    }

    /// Price the current route, if there is one.
    #[must_use]
    pub fn quote(&self, schedule: &FareSchedule, toll: f64) -> Option<TripQuote> {
        self.route
            .as_ref()
            .map(|estimate| schedule.quote(estimate, toll))
    }
}

#[derive(Debug, Default)]
pub(super) struct EndpointState {
    pub(super) address: Address,
    pub(super) generation: u64,
    /// A typed address is waiting on the geocoder.
    pub(super) geocoding: bool,
}

impl EndpointState {
    /// Record a new input, superseding anything in flight for this role.
    pub(super) fn supersede(&mut self, address: Address) -> u64 {
        self.address = address;
        self.geocoding = false;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Record typed text that still has to be geocoded.
    pub(super) fn supersede_with_text(&mut self, address: Address) -> u64 {
        let generation = self.supersede(address);
        self.geocoding = true;
        generation
    }
}

/// Routing work issued for one pickup/drop-off pair.
#[derive(Debug, Clone, Copy)]
pub(super) struct ResolutionRequest {
    pub(super) generation: u64,
    pub(super) pickup: Coordinate,
    pub(super) dropoff: Coordinate,
}

#[derive(Debug, Default)]
pub(super) struct TripState {
    pickup: EndpointState,
    dropoff: EndpointState,
    pub(super) coordinates: CoordinateCache,
    pub(super) route: Option<RouteEstimate>,
    pub(super) route_generation: u64,
}

impl TripState {
    pub(super) const fn endpoint(&self, role: EndpointRole) -> &EndpointState {
        match role {
            EndpointRole::Pickup => &self.pickup,
            EndpointRole::Dropoff => &self.dropoff,
        }
    }

    pub(super) fn endpoint_mut(&mut self, role: EndpointRole) -> &mut EndpointState {
        match role {
            EndpointRole::Pickup => &mut self.pickup,
            EndpointRole::Dropoff => &mut self.dropoff,
        }
    }

    /// Whether `role` holds an address or a coordinate.
    pub(super) fn is_set(&self, role: EndpointRole) -> bool {
        !self.endpoint(role).address.is_unset() || self.coordinates.get(role).is_some()
    }

    pub(super) fn is_current(&self, role: EndpointRole, generation: u64) -> bool {
        self.endpoint(role).generation == generation
    }

    /// Drop the current route and supersede any routing in flight.
    pub(super) fn invalidate_route(&mut self) {
        self.route = None;
        self.route_generation = self.route_generation.wrapping_add(1);
    }

    /// Invalidate the route and, when both coordinates are known, issue a
    /// request for the new pair.
    pub(super) fn request_route(&mut self) -> Option<ResolutionRequest> {
        self.invalidate_route();
        self.coordinates
            .pair()
            .map(|(pickup, dropoff)| ResolutionRequest {
                generation: self.route_generation,
                pickup,
                dropoff,
            })
    }

    pub(super) const fn phase(&self) -> TripPhase {
        match (
            self.coordinates.get(EndpointRole::Pickup),
            self.coordinates.get(EndpointRole::Dropoff),
        ) {
            (None, None) => TripPhase::Idle,
            (Some(_), None) => TripPhase::PickupOnly,
            (None, Some(_)) => TripPhase::DropoffOnly,
            (Some(_), Some(_)) => TripPhase::Ready,
        }
    }

    pub(super) fn snapshot(&self) -> TripSnapshot {
        let endpoint = |role: EndpointRole| EndpointSnapshot {
            address: self.endpoint(role).address.clone(),
            coordinate: self.coordinates.get(role),
        };
        TripSnapshot {
            phase: self.phase(),
            pickup: endpoint(EndpointRole::Pickup),
            dropoff: endpoint(EndpointRole::Dropoff),
            route: self.route.clone(),
        }
    }
}
