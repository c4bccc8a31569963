use guess_core::Ledger;
use guess_types::{Airport, Flight, Points, Position, Rules};

/// Creates an airport with a position, the shape guesses normally carry
pub fn create_test_airport(name: &str, lat: f64, lon: f64) -> Airport {
    Airport {
        name: name.to_string(),
        iata: None,
        icao: None,
        country: None,
        city: None,
        position: Some(Position { lat, lon }),
    }
}

/// Creates a flight with both endpoint airports populated
pub fn create_test_flight(id: &str) -> Flight {
    create_flight_with_airports(
        id,
        Some(create_test_airport("Vilnius Airport", 54.63, 25.28)),
        Some(create_test_airport("Heathrow Airport", 51.47, -0.45)),
    )
}

pub fn create_flight_with_airports(
    id: &str,
    origin: Option<Airport>,
    destination: Option<Airport>,
) -> Flight {
    Flight {
        id: id.to_string(),
        flight_number: Some("BA123".to_string()),
        callsign: Some("SPEEDBIRD123".to_string()),
        airline: Some("British Airways".to_string()),
        aircraft_type: Some("A320".to_string()),
        aircraft_registration: Some("G-EUYO".to_string()),
        image_src: None,
        origin,
        destination,
        position: Some(Position { lat: 53.0, lon: 12.0 }),
    }
}

pub fn create_test_points(origin: i32, destination: i32) -> Points {
    Points {
        origin,
        destination,
        total: origin + destination,
    }
}

/// Creates a ledger that has already scored the given flight ids
pub fn create_ledger_with_guesses(score: i64, ids: &[&str]) -> Ledger {
    let mut ledger = Ledger::new();
    ledger.score = score;
    for id in ids {
        ledger.guessed_flight_ids.insert((*id).to_string());
    }
    ledger
}

pub fn destination_only_rules() -> Rules {
    Rules {
        use_origin: false,
        use_destination: true,
    }
}

pub fn both_axes_rules() -> Rules {
    Rules {
        use_origin: true,
        use_destination: true,
    }
}
