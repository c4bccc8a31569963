use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use guess_types::{Flight, Points, Rules, ScoreStatus};

/// The score and deduplication set tracked per player.
///
/// Invariants: `guessed_flight_ids` never contains the blocked sentinel id,
/// and `score` only increases, at most once per distinct flight id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub score: i64,
    pub guessed_flight_ids: HashSet<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, flight_id: &str) -> bool {
        self.guessed_flight_ids.contains(flight_id)
    }
}

/// Merge one scored flight into a ledger.
///
/// Deterministic and side-effect free: callers own the ledger they pass in
/// and apply the returned ledger atomically. Invoked identically from the
/// singleplayer and multiplayer paths so a flight guessed once in either
/// mode can never be rescored in the other.
pub fn reconcile(
    ledger: &Ledger,
    rules: &Rules,
    flight: &Flight,
    points: &Points,
) -> (Ledger, ScoreStatus) {
    // Blocked flights are never recorded and never scored.
    if flight.is_blocked() {
        debug!(flight_id = %flight.id, "blocked flight, ledger unchanged");
        return (ledger.clone(), ScoreStatus::PointsUnavailable);
    }

    if ledger.contains(&flight.id) {
        debug!(flight_id = %flight.id, "repeat guess, ledger unchanged");
        return (ledger.clone(), ScoreStatus::AlreadyGuessed);
    }

    let points_available = (rules.use_origin && flight.origin.is_some())
        || (rules.use_destination && flight.destination.is_some());

    let mut next = ledger.clone();
    // Recorded either way: an unscorable flight must not become scorable
    // through a later guess.
    next.guessed_flight_ids.insert(flight.id.clone());

    if !points_available {
        return (next, ScoreStatus::PointsUnavailable);
    }

    next.score += i64::from(points.total);
    (next, ScoreStatus::Success)
}
