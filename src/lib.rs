//! Facade crate for the CargoRoute trip resolution engine.
//!
//! This crate re-exports the core resolution types and, behind the
//! `providers-http` feature, the HTTP-backed geocoding and routing providers.

#![forbid(unsafe_code)]

pub use cargoroute_core::{
    Address, BookingStatus, ClickPolicy, Coordinate, CoordinateCache, DirectionsProvider,
    EndpointRole, EndpointSnapshot, FallthroughReason, FareSchedule, GeocodeProvider, Geocoder,
    MapView, Marker, Pending, Provider, ProviderTier, ReverseGeocodeProvider, ReverseGeocoder,
    RouteEstimate, RouteLeg, Router, Tier, TripPhase, TripQuote, TripResolver, TripSnapshot,
    WhenBothSet,
};

#[cfg(feature = "providers-http")]
pub use cargoroute_data::{ProviderBuildError, ProviderConfig, StandardServices};
