//! Locate command: name a coordinate through the reverse geocoding cascade.

use std::io::Write;

use cargoroute_core::{Address, Coordinate};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::services::{HttpServicesBuilder, ProviderArgs, ServicesBuilder, runtime, write_json};
use crate::{ARG_LATITUDE, ARG_LONGITUDE, CliError, ENV_LOCATE_LATITUDE, ENV_LOCATE_LONGITUDE};

/// CLI arguments for the `locate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "locate",
    long_about = "Reverse geocode a coordinate. When every provider fails \
                 the coordinate itself is printed as the address.",
    about = "Name the place at a coordinate"
)]
#[ortho_config(prefix = "CARGOROUTE")]
pub(crate) struct LocateArgs {
    /// Latitude in decimal degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude in decimal degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
}

impl LocateArgs {
    pub(crate) fn into_config(self) -> Result<LocateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LocateConfig::try_from(merged)
    }
}

/// Resolved `locate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LocateConfig {
    pub(crate) coordinate: Coordinate,
}

impl TryFrom<LocateArgs> for LocateConfig {
    type Error = CliError;

    fn try_from(args: LocateArgs) -> Result<Self, Self::Error> {
        let latitude = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_LOCATE_LATITUDE,
        })?;
        let longitude = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_LOCATE_LONGITUDE,
        })?;
        Ok(Self {
            coordinate: valid_coordinate(latitude, longitude)?,
        })
    }
}

pub(crate) fn valid_coordinate(latitude: f64, longitude: f64) -> Result<Coordinate, CliError> {
    let coordinate = Coordinate::new(latitude, longitude);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(CliError::InvalidCoordinate {
            latitude,
            longitude,
        })
    }
}

/// JSON document printed by `locate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LocateReport {
    pub(crate) coordinate: Coordinate,
    pub(crate) address: Address,
}

pub(crate) fn run_locate(args: LocateArgs, providers: ProviderArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_locate_with(args, providers, &HttpServicesBuilder, &mut stdout)
}

pub(crate) fn run_locate_with(
    args: LocateArgs,
    providers: ProviderArgs,
    builder: &dyn ServicesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let services = builder.build(&providers.load()?)?;
    let coordinate = config.coordinate;
    let address = runtime()?.block_on(services.reverse.resolve_address(coordinate));
    write_json(
        writer,
        &LocateReport {
            coordinate,
            address,
        },
    )
}
