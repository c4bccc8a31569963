use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Flight, Points, Position, Rules, ScoreStatus};

/// Body of a singleplayer `POST` guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRequest {
    pub player: Position,
    pub rules: Rules,
    pub origin: Option<Position>,
    pub destination: Option<Position>,
}

/// Successful singleplayer response body, also the value carried by a
/// multiplayer `flight_details` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlightApiResponse {
    pub points: Points,
    pub flight: Flight,
}

/// Failure body for a non-200 singleplayer response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlightApiError {
    pub message: String,
}

/// One player's row on the lobby leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LobbyPlayer {
    pub player_name: String,
    pub score: i64,
    pub guess_count: u32,
}

/// Outbound lobby messages, discriminated by `action` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "action", rename_all = "snake_case")]
#[ts(export)]
pub enum ClientMessage {
    /// Keep-alive, no payload semantics.
    Ping,
    CreateLobby {
        player_name: String,
        rules: Rules,
    },
    JoinLobby {
        player_name: String,
        lobby_id: String,
    },
    HandleGuess {
        lobby_id: String,
        player_name: String,
        player: Position,
        origin: Option<Position>,
        destination: Option<Position>,
    },
}

/// Inbound lobby messages, discriminated by `event` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", rename_all = "snake_case")]
#[ts(export)]
pub enum ServerMessage {
    LobbyJoined {
        lobby: String,
        rules: Rules,
        player_name: String,
        score: i64,
        players: Vec<LobbyPlayer>,
    },
    LobbyUpdate {
        players: Vec<LobbyPlayer>,
    },
    FlightDetails {
        points: Points,
        flight: Flight,
        status: ScoreStatus,
        score: i64,
    },
    LobbyError {
        message: Option<String>,
    },
    FlightError {
        message: Option<String>,
    },
    /// Catch-all the backend emits for unexpected failures.
    Error {
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_wire_shape() {
        let json = serde_json::to_value(&ClientMessage::Ping).unwrap();
        assert_eq!(json, serde_json::json!({ "action": "ping" }));
    }

    #[test]
    fn test_create_lobby_wire_shape() {
        let msg = ClientMessage::CreateLobby {
            player_name: "quiet-falcon".to_string(),
            rules: Rules {
                use_origin: true,
                use_destination: false,
            },
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "create_lobby");
        assert_eq!(json["player_name"], "quiet-falcon");
        assert_eq!(json["rules"]["use_origin"], true);
        assert_eq!(json["rules"]["use_destination"], false);
    }

    #[test]
    fn test_handle_guess_wire_shape() {
        let msg = ClientMessage::HandleGuess {
            lobby_id: "lobby-1".to_string(),
            player_name: "quiet-falcon".to_string(),
            player: Position { lat: 54.6, lon: 25.2 },
            origin: None,
            destination: Some(Position { lat: 51.4, lon: -0.4 }),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "handle_guess");
        assert_eq!(json["lobby_id"], "lobby-1");
        assert!(json["origin"].is_null());
        assert_eq!(json["destination"]["lat"], 51.4);
    }

    #[test]
    fn test_lobby_joined_decodes() {
        let raw = serde_json::json!({
            "event": "lobby_joined",
            "lobby": "lobby-9",
            "rules": { "use_origin": false, "use_destination": true },
            "player_name": "brave-otter",
            "score": 120,
            "players": [
                { "player_name": "brave-otter", "score": 120, "guess_count": 3 }
            ]
        });
        let msg: ServerMessage = serde_json::from_value(raw).unwrap();
        match msg {
            ServerMessage::LobbyJoined { lobby, score, players, .. } => {
                assert_eq!(lobby, "lobby-9");
                assert_eq!(score, 120);
                assert_eq!(players.len(), 1);
            }
            other => panic!("expected lobby_joined, got {:?}", other),
        }
    }

    #[test]
    fn test_flight_details_decodes_with_status() {
        let raw = serde_json::json!({
            "event": "flight_details",
            "points": { "origin": 0, "destination": 80, "total": 80 },
            "flight": {
                "id": "F1",
                "flight_number": "BA123",
                "callsign": null,
                "airline": null,
                "aircraft_type": null,
                "aircraft_registration": null,
                "image_src": null,
                "origin": null,
                "destination": null,
                "position": null
            },
            "status": "Success",
            "score": 80
        });
        let msg: ServerMessage = serde_json::from_value(raw).unwrap();
        match msg {
            ServerMessage::FlightDetails { status, score, flight, .. } => {
                assert_eq!(status, ScoreStatus::Success);
                assert_eq!(score, 80);
                assert_eq!(flight.id, "F1");
            }
            other => panic!("expected flight_details, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_event_fails_to_decode() {
        let raw = serde_json::json!({ "event": "confetti" });
        assert!(serde_json::from_value::<ServerMessage>(raw).is_err());
    }
}
