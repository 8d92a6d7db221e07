//! Quote command implementation for the CargoRoute CLI.

use std::io::Write;

use cargoroute_core::{
    Address, ClickPolicy, EndpointRole, EndpointSnapshot, FareSchedule, RouteEstimate,
    TripQuote, TripSnapshot,
};
use cargoroute_data::ProviderConfig;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::services::{HttpServicesBuilder, ProviderArgs, ServicesBuilder, runtime, write_json};
use crate::{ARG_DROPOFF, ARG_PICKUP, ARG_TOLL, CliError, ENV_QUOTE_DROPOFF, ENV_QUOTE_PICKUP};

/// CLI arguments for the `quote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "quote",
    long_about = "Geocode a pickup and a drop-off address, route between \
                 them through the provider cascade and price the trip. \
                 Routing never fails: when every directions provider is \
                 unavailable the closed-form estimate is used.",
    about = "Quote a trip between two addresses"
)]
#[ortho_config(prefix = "CARGOROUTE")]
pub(crate) struct QuoteArgs {
    /// Pickup address.
    #[arg(long = ARG_PICKUP, value_name = "address")]
    #[serde(default)]
    pub(crate) pickup: Option<String>,
    /// Drop-off address.
    #[arg(long = ARG_DROPOFF, value_name = "address")]
    #[serde(default)]
    pub(crate) dropoff: Option<String>,
    /// Toll added to the fare, in dollars.
    #[arg(long = ARG_TOLL, value_name = "dollars")]
    #[serde(default)]
    pub(crate) toll: Option<f64>,
}

impl QuoteArgs {
    pub(crate) fn into_config(self) -> Result<QuoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QuoteConfig::try_from(merged)
    }
}

/// Resolved `quote` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuoteConfig {
    pub(crate) pickup: Address,
    pub(crate) dropoff: Address,
    pub(crate) toll: f64,
}

impl TryFrom<QuoteArgs> for QuoteConfig {
    type Error = CliError;

    fn try_from(args: QuoteArgs) -> Result<Self, Self::Error> {
        let pickup = required_address(args.pickup, ARG_PICKUP, ENV_QUOTE_PICKUP)?;
        let dropoff = required_address(args.dropoff, ARG_DROPOFF, ENV_QUOTE_DROPOFF)?;
        let toll = validate_toll(args.toll)?;
        Ok(Self {
            pickup,
            dropoff,
            toll,
        })
    }
}

fn required_address(
    text: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<Address, CliError> {
    text.map(Address::new)
        .filter(|address| !address.is_unset())
        .ok_or(CliError::MissingArgument { field, env })
}

/// Tolls default to zero and must be finite and non-negative.
pub(crate) fn validate_toll(toll: Option<f64>) -> Result<f64, CliError> {
    match toll {
        None => Ok(0.0),
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Some(value) => Err(CliError::InvalidToll { value }),
    }
}

/// JSON document printed by `quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct QuoteReport {
    pub(crate) pickup: EndpointSnapshot,
    pub(crate) dropoff: EndpointSnapshot,
    pub(crate) route: RouteEstimate,
    pub(crate) quote: TripQuote,
}

impl QuoteReport {
    /// Build a report from a settled trip, naming the first unplaced role.
    pub(crate) fn from_snapshot(snapshot: TripSnapshot, toll: f64) -> Result<Self, CliError> {
        for role in EndpointRole::ALL {
            let endpoint = snapshot.endpoint(role);
            if endpoint.coordinate.is_none() {
                return Err(CliError::Unresolved {
                    role,
                    address: endpoint.address.clone(),
                });
            }
        }
        let route = snapshot.route.ok_or(CliError::Unrouted)?;
        let quote = FareSchedule::default().quote(&route, toll);
        Ok(Self {
            pickup: snapshot.pickup,
            dropoff: snapshot.dropoff,
            route,
            quote,
        })
    }
}

pub(crate) fn run_quote(args: QuoteArgs, providers: ProviderArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_quote_with(args, providers, &HttpServicesBuilder, &mut stdout)
}

pub(crate) fn run_quote_with(
    args: QuoteArgs,
    providers: ProviderArgs,
    builder: &dyn ServicesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_quote(config, &providers.load()?, builder)?;
    write_json(writer, &report)
}

pub(crate) fn execute_quote(
    config: QuoteConfig,
    providers: &ProviderConfig,
    builder: &dyn ServicesBuilder,
) -> Result<QuoteReport, CliError> {
    let services = builder.build(providers)?;
    let resolver = services.into_resolver(ClickPolicy::default());
    let snapshot = runtime()?.block_on(async {
        let pickup = resolver.set_address(EndpointRole::Pickup, config.pickup.as_str());
        let dropoff = resolver.set_address(EndpointRole::Dropoff, config.dropoff.as_str());
        pickup.settled().await;
        dropoff.settled().await;
        resolver.snapshot()
    });
    QuoteReport::from_snapshot(snapshot, config.toll)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QuoteConfig, CliError> {
    let merged = QuoteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QuoteConfig::try_from(merged)
}
