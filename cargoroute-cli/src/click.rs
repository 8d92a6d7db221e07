//! Click command: replay map clicks through the resolver.

use std::io::Write;
use std::str::FromStr;

use cargoroute_core::{
    ClickPolicy, Coordinate, FareSchedule, MapView, TripQuote, TripSnapshot, WhenBothSet,
};
use cargoroute_data::ProviderConfig;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::locate::valid_coordinate;
use crate::quote::validate_toll;
use crate::services::{HttpServicesBuilder, ProviderArgs, ServicesBuilder, runtime, write_json};
use crate::{ARG_POINT, ARG_TOLL, ARG_WHEN_BOTH_SET, CliError, ENV_CLICK_AT};

/// CLI arguments for the `click` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "click",
    long_about = "Replay a sequence of map clicks. The first click sets the \
                 pickup, the second the drop-off; later clicks follow the \
                 --when-both-set policy. Each click is reverse geocoded and \
                 the trip is re-routed whenever a coordinate moves.",
    about = "Build a trip from map clicks"
)]
#[ortho_config(prefix = "CARGOROUTE")]
pub(crate) struct ClickArgs {
    /// Clicked point as `lat,lon`; repeat for each click.
    #[arg(long = ARG_POINT, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) at: Vec<String>,
    /// What a click does once both endpoints are set:
    /// replace-dropoff, replace-pickup or ignore.
    #[arg(long = ARG_WHEN_BOTH_SET, value_name = "policy")]
    #[serde(default)]
    pub(crate) when_both_set: Option<String>,
    /// Toll added to the fare, in dollars.
    #[arg(long = ARG_TOLL, value_name = "dollars")]
    #[serde(default)]
    pub(crate) toll: Option<f64>,
}

impl ClickArgs {
    pub(crate) fn into_config(self) -> Result<ClickConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClickConfig::try_from(merged)
    }
}

/// Resolved `click` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClickConfig {
    pub(crate) points: Vec<Coordinate>,
    pub(crate) policy: ClickPolicy,
    pub(crate) toll: f64,
}

impl TryFrom<ClickArgs> for ClickConfig {
    type Error = CliError;

    fn try_from(args: ClickArgs) -> Result<Self, Self::Error> {
        if args.at.is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_POINT,
                env: ENV_CLICK_AT,
            });
        }
        let points = args
            .at
            .iter()
            .map(|text| parse_point(text))
            .collect::<Result<Vec<_>, _>>()?;
        let when_both_set = args
            .when_both_set
            .as_deref()
            .map(WhenBothSet::from_str)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            points,
            policy: ClickPolicy::new(when_both_set),
            toll: validate_toll(args.toll)?,
        })
    }
}

/// Parse `lat,lon`.
pub(crate) fn parse_point(text: &str) -> Result<Coordinate, CliError> {
    let invalid = || CliError::InvalidPoint {
        text: text.to_owned(),
    };
    let (lat, lon) = text.split_once(',').ok_or_else(invalid)?;
    let latitude = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let longitude = lon.trim().parse::<f64>().map_err(|_| invalid())?;
    valid_coordinate(latitude, longitude)
}

/// JSON document printed by `click`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ClickReport {
    pub(crate) trip: TripSnapshot,
    pub(crate) map: MapView,
    pub(crate) quote: Option<TripQuote>,
}

pub(crate) fn run_click(args: ClickArgs, providers: ProviderArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_click_with(args, providers, &HttpServicesBuilder, &mut stdout)
}

pub(crate) fn run_click_with(
    args: ClickArgs,
    providers: ProviderArgs,
    builder: &dyn ServicesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_click(config, &providers.load()?, builder)?;
    write_json(writer, &report)
}

pub(crate) fn execute_click(
    config: ClickConfig,
    providers: &ProviderConfig,
    builder: &dyn ServicesBuilder,
) -> Result<ClickReport, CliError> {
    let services = builder.build(providers)?;
    let resolver = services.into_resolver(config.policy);
    let trip = runtime()?.block_on(async {
        for point in &config.points {
            resolver.click(*point).settled().await;
        }
        resolver.snapshot()
    });
    Ok(ClickReport {
        map: MapView::from_snapshot(&trip),
        quote: trip.quote(&FareSchedule::default(), config.toll),
        trip,
    })
}
