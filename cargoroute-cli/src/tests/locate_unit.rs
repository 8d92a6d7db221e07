//! Focused unit tests covering the locate command.

use super::helpers::{ScriptedServicesBuilder, TIMES_SQUARE};
use super::*;
use crate::locate::{LocateConfig, LocateReport, run_locate_with};
use crate::services::ProviderArgs;
use rstest::rstest;

fn locate_args(lat: Option<f64>, lon: Option<f64>) -> LocateArgs {
    LocateArgs {
        lat,
        lon,
        ..LocateArgs::default()
    }
}

#[rstest]
#[case(None, Some(-73.9855), ARG_LATITUDE, ENV_LOCATE_LATITUDE)]
#[case(Some(40.758), None, ARG_LONGITUDE, ENV_LOCATE_LONGITUDE)]
fn converting_without_axes_errors(
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let err = LocateConfig::try_from(locate_args(lat, lon)).expect_err("missing axis");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(91.0, 0.0)]
#[case(0.0, -180.5)]
#[case(f64::NAN, 0.0)]
fn converting_rejects_out_of_range_coordinates(#[case] lat: f64, #[case] lon: f64) {
    match LocateConfig::try_from(locate_args(Some(lat), Some(lon))) {
        Err(CliError::InvalidCoordinate { .. }) => {}
        other => panic!("expected InvalidCoordinate, found {other:?}"),
    }
}

#[rstest]
#[case(TIMES_SQUARE.latitude, TIMES_SQUARE.longitude, "Times Square")]
#[case(40.6892, -74.0445, "40.6892, -74.0445")]
fn locate_prints_a_name_or_the_coordinate(
    #[case] lat: f64,
    #[case] lon: f64,
    #[case] expected: &str,
) {
    let mut stdout = Vec::new();
    run_locate_with(
        locate_args(Some(lat), Some(lon)),
        ProviderArgs::default(),
        &ScriptedServicesBuilder::manhattan(),
        &mut stdout,
    )
    .expect("locate should succeed");

    let report: LocateReport = serde_json::from_slice(&stdout).expect("JSON report");
    assert_eq!(report.address.as_str(), expected);
    assert!(stdout.ends_with(b"\n"));
}
