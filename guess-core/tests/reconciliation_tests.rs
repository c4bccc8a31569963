mod common;

use common::*;
use guess_core::{reconcile, validate_guess, Ledger};
use guess_types::{ScoreStatus, BLOCKED_FLIGHT_ID};

#[test]
fn test_destination_guess_scenario() {
    // Rules: destination only. Server scores flight F1 at 80 points.
    let rules = destination_only_rules();
    let ledger = Ledger::new();
    let flight = create_test_flight("F1");
    let points = create_test_points(0, 80);

    let (ledger, status) = reconcile(&ledger, &rules, &flight, &points);

    assert_eq!(status, ScoreStatus::Success);
    assert_eq!(ledger.score, 80);
    assert!(ledger.contains("F1"));
}

#[test]
fn test_same_flight_guessed_again_keeps_score() {
    let rules = destination_only_rules();
    let ledger = create_ledger_with_guesses(80, &["F1"]);
    let flight = create_test_flight("F1");

    // Different point totals on the repeat must not matter.
    let (ledger, status) = reconcile(&ledger, &rules, &flight, &create_test_points(0, 100));

    assert_eq!(status, ScoreStatus::AlreadyGuessed);
    assert_eq!(ledger.score, 80);
    assert_eq!(ledger.guessed_flight_ids.len(), 1);
}

#[test]
fn test_blocked_sentinel_is_inert_under_any_rules() {
    let flight = create_flight_with_airports(
        BLOCKED_FLIGHT_ID,
        Some(create_test_airport("Vilnius Airport", 54.63, 25.28)),
        Some(create_test_airport("Heathrow Airport", 51.47, -0.45)),
    );

    for rules in [destination_only_rules(), both_axes_rules()] {
        let ledger = create_ledger_with_guesses(40, &["F9"]);
        let (next, status) = reconcile(&ledger, &rules, &flight, &create_test_points(50, 50));

        assert_eq!(status, ScoreStatus::PointsUnavailable);
        assert_eq!(next, ledger);
        assert!(!next.contains(BLOCKED_FLIGHT_ID));
    }
}

#[test]
fn test_axisless_flight_blocks_future_scoring_attempts() {
    let rules = both_axes_rules();
    let ledger = Ledger::new();
    let bare = create_flight_with_airports("F7", None, None);

    let (ledger, status) = reconcile(&ledger, &rules, &bare, &create_test_points(0, 0));
    assert_eq!(status, ScoreStatus::PointsUnavailable);
    assert_eq!(ledger.score, 0);
    assert!(ledger.contains("F7"));

    // A later guess for the same flight can never score, even if the
    // provider now returns airport data.
    let enriched = create_test_flight("F7");
    let (ledger, status) = reconcile(&ledger, &rules, &enriched, &create_test_points(40, 40));
    assert_eq!(status, ScoreStatus::AlreadyGuessed);
    assert_eq!(ledger.score, 0);
}

#[test]
fn test_validator_neither_provided_tie_break() {
    let message = validate_guess(&both_axes_rules(), None, None).expect("must fail");
    assert_eq!(message.title, "Neither of the airports were provided");
}

#[test]
fn test_validator_accepts_complete_origin_only_guess() {
    let rules = guess_types::Rules {
        use_origin: true,
        use_destination: false,
    };
    let origin = create_test_airport("Vilnius Airport", 54.63, 25.28);
    assert!(validate_guess(&rules, Some(&origin), None).is_none());
}
