use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use guess_client::{Config, GameEngine, GameMode, StaticPositionProvider};
use guess_core::Ledger;
use guess_persistence::connection::connect_to_memory_database;
use guess_persistence::repositories::{
    LedgerMode, LedgerRepository, SessionIdentity, SessionRepository,
};
use guess_types::{Flight, FlightApiResponse, Points, Rules, ScoreStatus};

fn test_config() -> Config {
    Config {
        // Nothing listens on these; tests never reach a live server.
        singleplayer_endpoint: "http://127.0.0.1:9/api/guess".to_string(),
        multiplayer_endpoint: "ws://127.0.0.1:9/multiplayer".to_string(),
        airports_endpoint: "http://127.0.0.1:9/api/airports".to_string(),
        request_timeout_seconds: 1,
        lobby_connect_timeout_seconds: 1,
        keepalive_interval_seconds: 180,
        reconnect_grace_ms: 10,
        player_lat: 54.68,
        player_lon: 25.28,
    }
}

async fn test_db() -> DatabaseConnection {
    let db = connect_to_memory_database()
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn test_engine(db: DatabaseConnection) -> (GameEngine, Arc<LedgerRepository>, Arc<SessionRepository>) {
    let ledger_repo = Arc::new(LedgerRepository::new(db.clone()));
    let session_repo = Arc::new(SessionRepository::new(db));
    let config = test_config();
    let position = Arc::new(StaticPositionProvider::new(
        config.player_lat,
        config.player_lon,
    ));
    let engine = GameEngine::new(
        &config,
        position,
        Some(ledger_repo.clone()),
        Some(session_repo.clone()),
    );
    (engine, ledger_repo, session_repo)
}

fn scored_flight(id: &str, total: i32) -> FlightApiResponse {
    FlightApiResponse {
        points: Points {
            origin: 0,
            destination: total,
            total,
        },
        flight: Flight {
            id: id.to_string(),
            flight_number: Some("BA123".to_string()),
            callsign: None,
            airline: None,
            aircraft_type: None,
            aircraft_registration: None,
            image_src: None,
            origin: None,
            destination: None,
            position: None,
        },
    }
}

#[tokio::test]
async fn test_engine_defaults_to_singleplayer() {
    let (engine, _, _) = test_engine(test_db().await);

    assert_eq!(engine.mode().await, GameMode::Singleplayer);
    assert_eq!(engine.rules().await, Rules::default());
    assert!(engine.response().await.result().is_none());
}

#[tokio::test]
async fn test_failed_lobby_connection_keeps_singleplayer_active() {
    let (engine, _, _) = test_engine(test_db().await);

    engine.lobby().init_lobby(None).await;

    // The dead endpoint leaves the lobby in an error state, so the facade
    // still routes everything to singleplayer.
    assert_eq!(engine.mode().await, GameMode::Singleplayer);
}

#[tokio::test]
async fn test_singleplayer_score_survives_restart() {
    let db = test_db().await;

    {
        let (engine, _, _) = test_engine(db.clone());
        let status = engine
            .singleplayer()
            .handle_guess_result(&scored_flight("F1", 80))
            .await;
        assert_eq!(status, ScoreStatus::Success);
    }

    let (engine, ledger_repo, session_repo) = test_engine(db);
    engine
        .restore(Some(&ledger_repo), Some(&session_repo))
        .await;

    assert_eq!(engine.singleplayer().score().await, 80);
    // A restored ledger still dedups the same flight.
    let status = engine
        .singleplayer()
        .handle_guess_result(&scored_flight("F1", 80))
        .await;
    assert_eq!(status, ScoreStatus::AlreadyGuessed);
    assert_eq!(engine.singleplayer().score().await, 80);
}

#[tokio::test]
async fn test_restore_loads_multiplayer_ledger_and_identity() {
    let db = test_db().await;
    let ledger_repo = Arc::new(LedgerRepository::new(db.clone()));
    let session_repo = Arc::new(SessionRepository::new(db.clone()));

    let mut ledger = Ledger::new();
    ledger.score = 45;
    ledger.guessed_flight_ids.insert("F7".to_string());
    ledger_repo
        .save(LedgerMode::Multiplayer, &ledger)
        .await
        .expect("Failed to save ledger");
    session_repo
        .save(&SessionIdentity {
            player_name: "brave-finch".to_string(),
            lobby_id: Some("LOBBY1".to_string()),
            rules: Rules {
                use_origin: true,
                use_destination: true,
            },
        })
        .await
        .expect("Failed to save identity");

    let (engine, ledger_repo, session_repo) = test_engine(db);
    engine
        .restore(Some(&ledger_repo), Some(&session_repo))
        .await;

    assert_eq!(engine.lobby().player_name().await, "brave-finch");
    assert_eq!(
        engine.lobby().last_lobby_id().await.as_deref(),
        Some("LOBBY1")
    );
    let restored = engine.lobby().ledger().await;
    assert_eq!(restored.score, 45);
    assert!(restored.contains("F7"));
    // Multiplayer state never leaks into the singleplayer ledger.
    assert_eq!(engine.singleplayer().score().await, 0);
}

#[tokio::test]
async fn test_leave_lobby_clears_persisted_identity() {
    let db = test_db().await;
    let session_repo = Arc::new(SessionRepository::new(db.clone()));
    session_repo
        .save(&SessionIdentity {
            player_name: "brave-finch".to_string(),
            lobby_id: Some("LOBBY1".to_string()),
            rules: Rules::default(),
        })
        .await
        .expect("Failed to save identity");

    let (engine, ledger_repo, session_repo) = test_engine(db);
    engine
        .restore(Some(&ledger_repo), Some(&session_repo))
        .await;
    engine.lobby().leave_lobby().await;

    let identity = session_repo
        .load()
        .await
        .expect("Failed to load identity")
        .expect("Identity should still exist");
    assert!(identity.lobby_id.is_none());
    assert_ne!(identity.player_name, "brave-finch");
}
