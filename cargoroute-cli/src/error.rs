//! Error types emitted by the CargoRoute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use cargoroute_core::{Address, EndpointRole, ParseWhenBothSetError};
use cargoroute_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the CargoRoute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A latitude/longitude pair is outside WGS84 or not a number.
    #[error("invalid coordinate {latitude}, {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// A click point was not written as `lat,lon`.
    #[error("invalid point {text:?} (expected lat,lon)")]
    InvalidPoint { text: String },
    /// Tolls must be finite and non-negative.
    #[error("invalid toll {value}")]
    InvalidToll { value: f64 },
    /// The click policy name was not recognised.
    #[error(transparent)]
    InvalidPolicy(#[from] ParseWhenBothSetError),
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Constructing the HTTP providers failed.
    #[error("failed to build providers: {0}")]
    BuildProviders(#[from] ProviderBuildError),
    /// No geocoder could place an address.
    #[error("could not locate {role} address {address:?}")]
    Unresolved { role: EndpointRole, address: Address },
    /// The trip never reached a routable state.
    #[error("no route between pickup and drop-off")]
    Unrouted,
    /// Serialising the report failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
