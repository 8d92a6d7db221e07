//! Scripted services standing in for the HTTP providers.

use std::sync::Arc;

use cargoroute_core::test_support::{
    ScriptedDirectionsProvider, ScriptedGeocodeProvider, ScriptedReverseGeocodeProvider,
    straight_leg,
};
use cargoroute_core::{
    Coordinate, DirectionsProvider, FallthroughReason, GeocodeProvider, Geocoder, ProviderTier,
    ReverseGeocodeProvider, ReverseGeocoder, Router, Tier,
};
use cargoroute_data::{ProviderConfig, StandardServices};

use crate::CliError;
use crate::services::ServicesBuilder;

pub(super) const PICKUP_ADDRESS: &str = "350 5th Ave, New York, NY";
pub(super) const DROPOFF_ADDRESS: &str = "30 Rockefeller Plaza, New York, NY";
pub(super) const EMPIRE_STATE: Coordinate = Coordinate::new(40.7484, -73.9857);
pub(super) const ROCKEFELLER: Coordinate = Coordinate::new(40.7587, -73.9787);
pub(super) const TIMES_SQUARE: Coordinate = Coordinate::new(40.758, -73.9855);

/// Builder that answers from fixed tables instead of the network.
#[derive(Debug, Clone)]
pub(super) struct ScriptedServicesBuilder {
    pub(super) places: Vec<(&'static str, Coordinate)>,
    pub(super) names: Vec<(Coordinate, &'static str)>,
    pub(super) directions_online: bool,
}

impl ScriptedServicesBuilder {
    /// Both Manhattan addresses geocode; Times Square and both landmarks
    /// have names; the open router answers.
    pub(super) fn manhattan() -> Self {
        Self {
            places: vec![(PICKUP_ADDRESS, EMPIRE_STATE), (DROPOFF_ADDRESS, ROCKEFELLER)],
            names: vec![
                (EMPIRE_STATE, "Empire State Building"),
                (ROCKEFELLER, "Rockefeller Center"),
                (TIMES_SQUARE, "Times Square"),
            ],
            directions_online: true,
        }
    }

    pub(super) fn offline_directions(mut self) -> Self {
        self.directions_online = false;
        self
    }
}

impl ServicesBuilder for ScriptedServicesBuilder {
    fn build(&self, config: &ProviderConfig) -> Result<StandardServices, CliError> {
        let geocoder = self.places.iter().fold(
            ScriptedGeocodeProvider::new(ProviderTier::Open),
            |provider, (address, coordinate)| provider.answering(address, *coordinate),
        );
        let reverse = self.names.iter().fold(
            ScriptedReverseGeocodeProvider::new(ProviderTier::Open),
            |provider, (coordinate, name)| provider.naming(*coordinate, name),
        );
        let directions = if self.directions_online {
            ScriptedDirectionsProvider::answering(
                ProviderTier::Open,
                straight_leg(EMPIRE_STATE, ROCKEFELLER, 1_770.0, 420.0),
            )
        } else {
            ScriptedDirectionsProvider::failing(
                ProviderTier::Open,
                FallthroughReason::provider("offline"),
            )
        };

        Ok(StandardServices {
            geocoder: Geocoder::new(vec![Tier::new(
                Arc::new(geocoder) as Arc<dyn GeocodeProvider>
            )]),
            reverse: ReverseGeocoder::new(vec![Tier::new(
                Arc::new(reverse) as Arc<dyn ReverseGeocodeProvider>
            )]),
            router: Router::new(vec![Tier::new(
                Arc::new(directions) as Arc<dyn DirectionsProvider>
            )])
            .with_safety_deadline(config.safety_deadline),
        })
    }
}
