use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Flight id the data provider uses when no scorable flight is available.
/// Never enters the dedup ledger and never earns points.
pub const BLOCKED_FLIGHT_ID: &str = "Blocked-None-None";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// An airport as presented to the player. Identity is structural: there is
/// no authoritative id, so airports are used only as guess payload and never
/// mutated after selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Airport {
    pub name: String,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Flight {
    pub id: String,
    pub flight_number: Option<String>,
    pub callsign: Option<String>,
    pub airline: Option<String>,
    pub aircraft_type: Option<String>,
    pub aircraft_registration: Option<String>,
    pub image_src: Option<String>,
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    pub position: Option<Position>,
}

impl Flight {
    pub fn is_blocked(&self) -> bool {
        self.id == BLOCKED_FLIGHT_ID
    }
}

/// Provider-computed score for one guess, 0-100 per axis. The client never
/// recomputes `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Points {
    pub origin: i32,
    pub destination: i32,
    pub total: i32,
}
