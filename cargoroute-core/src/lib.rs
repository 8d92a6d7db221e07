//! Core of the CargoRoute trip resolution engine.
//!
//! A trip has a pickup and a drop-off, each given as free text or a clicked
//! map point. This crate turns those inputs into coordinates, a driving route
//! and a distance/duration estimate by cascading through ranked providers:
//!
//! - [`Geocoder`] places address text, with no fallback beyond its tiers.
//! - [`ReverseGeocoder`] names clicked points and never fails.
//! - [`Router`] produces a [`RouteEstimate`] within a safety deadline and
//!   never fails.
//! - [`CoordinateCache`] suppresses updates that do not move a coordinate.
//! - [`TripResolver`] wires inputs to the above and discards superseded
//!   results.
//!
//! Provider implementations live outside this crate; they implement
//! [`GeocodeProvider`], [`ReverseGeocodeProvider`] and
//! [`DirectionsProvider`].

mod cascade;
mod change;
mod coordinate;
mod endpoint;
mod fare;
mod geocoder;
mod orchestrator;
mod provider;
mod reverse;
mod route;
mod router;
mod slot;
mod view;

#[doc(hidden)]
pub mod test_support;

pub use cascade::{Cascade, Exhausted, Resolved, Tier};
pub use change::{CoordinateCache, CoordinateChange};
pub use coordinate::{COORDINATE_TOLERANCE, Coordinate, METRES_PER_MILE};
pub use endpoint::{Address, EndpointRole};
pub use fare::{FareSchedule, TripQuote};
pub use geocoder::{GeocodeError, Geocoder, OPEN_PROVIDER_TIMEOUT};
pub use orchestrator::{
    ClickPolicy, EndpointSnapshot, ParseWhenBothSetError, Pending, TripPhase, TripResolver,
    TripSnapshot, WhenBothSet,
};
pub use provider::{
    DirectionsProvider, FallthroughReason, GeocodeProvider, Provider, ReverseGeocodeProvider,
    TierFailure,
};
pub use reverse::ReverseGeocoder;
pub use route::{MINUTES_PER_MILE, ProviderTier, ROAD_DISTANCE_FACTOR, RouteEstimate, RouteLeg};
pub use router::{DEFAULT_SAFETY_DEADLINE, Router};
pub use slot::ResolveOnce;
pub use view::{BookingStatus, DEFAULT_CENTRE, MapView, Marker, ParseBookingStatusError};
