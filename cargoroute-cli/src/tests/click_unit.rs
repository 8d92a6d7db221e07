//! Focused unit tests covering click parsing and replay.

use super::helpers::{EMPIRE_STATE, ROCKEFELLER, ScriptedServicesBuilder, TIMES_SQUARE};
use super::*;
use crate::click::{ClickConfig, execute_click, parse_point};
use cargoroute_core::{ClickPolicy, Coordinate, TripPhase, WhenBothSet};
use cargoroute_data::ProviderConfig;
use rstest::rstest;

#[rstest]
#[case("40.758,-73.9855", Coordinate::new(40.758, -73.9855))]
#[case(" 40.758 , -73.9855 ", Coordinate::new(40.758, -73.9855))]
fn points_parse_as_lat_lon(#[case] text: &str, #[case] expected: Coordinate) {
    assert_eq!(parse_point(text).expect("valid point"), expected);
}

#[rstest]
#[case("40.758")]
#[case("north,west")]
fn malformed_points_are_rejected(#[case] text: &str) {
    match parse_point(text) {
        Err(CliError::InvalidPoint { text: rejected }) => assert_eq!(rejected, text),
        other => panic!("expected InvalidPoint, found {other:?}"),
    }
}

#[rstest]
fn converting_requires_a_point_and_a_known_policy() {
    match ClickConfig::try_from(ClickArgs::default()) {
        Err(CliError::MissingArgument { field, env }) => {
            assert_eq!(field, ARG_POINT);
            assert_eq!(env, ENV_CLICK_AT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }

    let args = ClickArgs {
        at: vec!["40.758,-73.9855".to_owned()],
        when_both_set: Some("swap".to_owned()),
        ..ClickArgs::default()
    };
    match ClickConfig::try_from(args) {
        Err(CliError::InvalidPolicy(_)) => {}
        other => panic!("expected InvalidPolicy, found {other:?}"),
    }
}

fn replay(policy: WhenBothSet) -> crate::click::ClickReport {
    let config = ClickConfig {
        points: vec![EMPIRE_STATE, ROCKEFELLER, TIMES_SQUARE],
        policy: ClickPolicy::new(policy),
        toll: 0.0,
    };
    execute_click(
        config,
        &ProviderConfig::new(),
        &ScriptedServicesBuilder::manhattan(),
    )
    .expect("clicks replay")
}

#[rstest]
#[case(WhenBothSet::ReplaceDropoff, EMPIRE_STATE, TIMES_SQUARE)]
#[case(WhenBothSet::ReplacePickup, TIMES_SQUARE, ROCKEFELLER)]
#[case(WhenBothSet::Ignore, EMPIRE_STATE, ROCKEFELLER)]
fn third_click_follows_the_policy(
    #[case] policy: WhenBothSet,
    #[case] pickup: Coordinate,
    #[case] dropoff: Coordinate,
) {
    let report = replay(policy);

    assert_eq!(report.trip.phase, TripPhase::Ready);
    assert_eq!(report.trip.pickup.coordinate, Some(pickup));
    assert_eq!(report.trip.dropoff.coordinate, Some(dropoff));
    assert_eq!(report.map.markers.len(), 2);
    assert!(report.quote.is_some());
}

#[rstest]
fn clicked_endpoints_are_named() {
    let report = replay(WhenBothSet::ReplaceDropoff);
    assert_eq!(report.trip.pickup.address.as_str(), "Empire State Building");
    assert_eq!(report.trip.dropoff.address.as_str(), "Times Square");
}
