//! Command-line interface for quoting CargoRoute trips.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod click;
mod error;
mod locate;
mod quote;
mod services;

pub use error::CliError;

use click::{ClickArgs, run_click};
use locate::{LocateArgs, run_locate};
use quote::{QuoteArgs, run_quote};
use services::ProviderArgs;

const ARG_PICKUP: &str = "pickup";
const ARG_DROPOFF: &str = "dropoff";
const ARG_TOLL: &str = "toll";
const ARG_LATITUDE: &str = "lat";
const ARG_LONGITUDE: &str = "lon";
const ARG_POINT: &str = "at";
const ARG_WHEN_BOTH_SET: &str = "when-both-set";
const ARG_GOOGLE_API_KEY: &str = "google-api-key";
const ARG_GOOGLE_BASE_URL: &str = "google-base-url";
const ARG_NOMINATIM_BASE_URL: &str = "nominatim-base-url";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_BIGDATACLOUD_BASE_URL: &str = "bigdatacloud-base-url";
const ARG_USER_AGENT: &str = "user-agent";
const ARG_OPEN_TIMEOUT_MS: &str = "open-timeout-ms";
const ARG_SAFETY_DEADLINE_MS: &str = "safety-deadline-ms";
const ENV_QUOTE_PICKUP: &str = "CARGOROUTE_CMDS_QUOTE_PICKUP";
const ENV_QUOTE_DROPOFF: &str = "CARGOROUTE_CMDS_QUOTE_DROPOFF";
const ENV_LOCATE_LATITUDE: &str = "CARGOROUTE_CMDS_LOCATE_LAT";
const ENV_LOCATE_LONGITUDE: &str = "CARGOROUTE_CMDS_LOCATE_LON";
const ENV_CLICK_AT: &str = "CARGOROUTE_CMDS_CLICK_AT";

/// Run the CargoRoute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, an
/// address cannot be placed, or the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let Cli { providers, command } = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match command {
        Command::Quote(args) => run_quote(args, providers),
        Command::Locate(args) => run_locate(args, providers),
        Command::Click(args) => run_click(args, providers),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cargoroute",
    about = "Resolve cargo-van trips: geocode, route and price",
    version
)]
struct Cli {
    #[command(flatten)]
    providers: ProviderArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quote a trip between two addresses.
    Quote(QuoteArgs),
    /// Name the place at a coordinate.
    Locate(LocateArgs),
    /// Build a trip from a sequence of map clicks.
    Click(ClickArgs),
}

#[cfg(test)]
mod tests;
