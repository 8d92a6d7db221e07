//! Focused unit tests covering the provider flags shared by every command.

use super::*;
use crate::services::{ProviderArgs, provider_config_from_layers_for_test};
use cargoroute_data::{DEFAULT_NOMINATIM_BASE_URL, DEFAULT_OSRM_BASE_URL};
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[case(&["cargoroute", "--safety-deadline-ms", "750", "quote", "--pickup", "a"])]
#[case(&["cargoroute", "quote", "--pickup", "a", "--safety-deadline-ms", "750"])]
fn provider_flags_are_accepted_on_either_side_of_the_command(#[case] argv: &[&str]) {
    let cli = Cli::try_parse_from(argv).expect("arguments parse");

    assert_eq!(cli.providers.safety_deadline_ms, Some(750));
    assert!(matches!(cli.command, Command::Quote(_)));
}

#[rstest]
fn every_command_takes_the_same_provider_flags() {
    for command in ["quote", "locate", "click"] {
        let cli = Cli::try_parse_from([
            "cargoroute",
            command,
            "--google-api-key",
            "cli-key",
            "--open-timeout-ms",
            "1200",
        ])
        .expect("arguments parse");
        assert_eq!(cli.providers.google_api_key.as_deref(), Some("cli-key"));
        assert_eq!(cli.providers.open_timeout_ms, Some(1_200));
    }
}

#[rstest]
fn unset_overrides_keep_the_defaults() {
    let config = ProviderArgs {
        osrm_base_url: Some("http://localhost:5000".to_owned()),
        safety_deadline_ms: Some(1_500),
        ..ProviderArgs::default()
    }
    .into_provider_config();

    assert_eq!(config.osrm_base_url, "http://localhost:5000");
    assert_eq!(config.nominatim_base_url, DEFAULT_NOMINATIM_BASE_URL);
    assert_eq!(config.safety_deadline, Duration::from_millis(1_500));
    assert!(config.google_api_key.is_none());
}

#[rstest]
fn provider_layers_honour_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "google_api_key": "file-key",
            "open_timeout_ms": 3000,
        }),
        None,
    );
    composer.push_environment(json!({ "google_api_key": "env-key" }));
    composer.push_cli(json!({ "open_timeout_ms": 900 }));

    let config =
        provider_config_from_layers_for_test(composer.layers()).expect("merged config builds");
    assert_eq!(config.google_api_key.as_deref(), Some("env-key"));
    assert_eq!(config.open_timeout, Duration::from_millis(900));
    assert_eq!(config.osrm_base_url, DEFAULT_OSRM_BASE_URL);
}
