//! Provider wiring and output plumbing shared by the subcommands.

use std::io::Write;
use std::time::Duration;

use cargoroute_data::{ProviderConfig, StandardServices};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use crate::{
    ARG_BIGDATACLOUD_BASE_URL, ARG_GOOGLE_API_KEY, ARG_GOOGLE_BASE_URL, ARG_NOMINATIM_BASE_URL,
    ARG_OPEN_TIMEOUT_MS, ARG_OSRM_BASE_URL, ARG_SAFETY_DEADLINE_MS, ARG_USER_AGENT, CliError,
};

/// Provider settings shared by every subcommand.
///
/// Flags are global, so they may follow the subcommand name. Unset fields
/// keep the [`ProviderConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser, Deserialize, Serialize, OrthoConfig)]
#[command(name = "providers")]
#[ortho_config(prefix = "CARGOROUTE")]
pub(crate) struct ProviderArgs {
    /// Google Maps Platform key; without one the open tiers lead.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key", global = true)]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Override the Google Maps Platform root.
    #[arg(long = ARG_GOOGLE_BASE_URL, value_name = "url", global = true)]
    #[serde(default)]
    pub(crate) google_base_url: Option<String>,
    /// Override the Nominatim root.
    #[arg(long = ARG_NOMINATIM_BASE_URL, value_name = "url", global = true)]
    #[serde(default)]
    pub(crate) nominatim_base_url: Option<String>,
    /// Override the OSRM root (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url", global = true)]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Override the BigDataCloud root.
    #[arg(long = ARG_BIGDATACLOUD_BASE_URL, value_name = "url", global = true)]
    #[serde(default)]
    pub(crate) bigdatacloud_base_url: Option<String>,
    /// User agent sent to every provider.
    #[arg(long = ARG_USER_AGENT, value_name = "agent", global = true)]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Bound on each keyless provider attempt.
    #[arg(long = ARG_OPEN_TIMEOUT_MS, value_name = "ms", global = true)]
    #[serde(default)]
    pub(crate) open_timeout_ms: Option<u64>,
    /// Deadline after which the closed-form estimate is used.
    #[arg(long = ARG_SAFETY_DEADLINE_MS, value_name = "ms", global = true)]
    #[serde(default)]
    pub(crate) safety_deadline_ms: Option<u64>,
}

impl ProviderArgs {
    /// Layer configuration files and `CARGOROUTE_*` variables under the flags.
    pub(crate) fn load(self) -> Result<ProviderConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(merged.into_provider_config())
    }

    pub(crate) fn into_provider_config(self) -> ProviderConfig {
        let mut config = ProviderConfig::new();
        if let Some(key) = self.google_api_key {
            config = config.with_google_api_key(key);
        }
        if let Some(url) = self.google_base_url {
            config = config.with_google_base_url(url);
        }
        if let Some(url) = self.nominatim_base_url {
            config = config.with_nominatim_base_url(url);
        }
        if let Some(url) = self.osrm_base_url {
            config = config.with_osrm_base_url(url);
        }
        if let Some(url) = self.bigdatacloud_base_url {
            config = config.with_bigdatacloud_base_url(url);
        }
        if let Some(agent) = self.user_agent {
            config = config.with_user_agent(agent);
        }
        if let Some(ms) = self.open_timeout_ms {
            config = config.with_open_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.safety_deadline_ms {
            config = config.with_safety_deadline(Duration::from_millis(ms));
        }
        config
    }
}

#[cfg(test)]
pub(crate) fn provider_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ProviderConfig, CliError> {
    let merged = ProviderArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(merged.into_provider_config())
}

/// Builds the resolution services for one invocation.
pub(crate) trait ServicesBuilder {
    fn build(&self, config: &ProviderConfig) -> Result<StandardServices, CliError>;
}

/// Live HTTP providers.
pub(crate) struct HttpServicesBuilder;

impl ServicesBuilder for HttpServicesBuilder {
    fn build(&self, config: &ProviderConfig) -> Result<StandardServices, CliError> {
        Ok(StandardServices::from_config(config)?)
    }
}

/// Single-threaded runtime for one command.
pub(crate) fn runtime() -> Result<Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
