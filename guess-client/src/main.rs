use std::sync::Arc;
use tokio::signal;
use tracing::info;

use guess_client::{airports::fetch_airports, Config, GameEngine, StaticPositionProvider};
use guess_persistence::{
    connection::connect_and_migrate,
    repositories::{LedgerRepository, SessionRepository},
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting guess engine...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let ledger_repository = Arc::new(LedgerRepository::new(db.clone()));
    let session_repository = Arc::new(SessionRepository::new(db));

    let position = Arc::new(StaticPositionProvider::new(
        config.player_lat,
        config.player_lon,
    ));

    let engine = GameEngine::new(
        &config,
        position,
        Some(ledger_repository.clone()),
        Some(session_repository.clone()),
    );
    engine
        .restore(Some(&ledger_repository), Some(&session_repository))
        .await;

    // Warm the airport list; guesses still work if this fails.
    let http = reqwest::Client::new();
    match fetch_airports(&http, &config.airports_endpoint).await {
        Ok(airports) => info!("Loaded {} airports", airports.len()),
        Err(e) => tracing::warn!("Failed to load airport list: {}", e),
    }

    // Rejoin the last lobby, if one is remembered.
    if let Some(lobby_id) = engine.lobby().last_lobby_id().await {
        info!("Rejoining lobby {}", lobby_id);
        engine.lobby().init_lobby(Some(lobby_id)).await;
    }

    info!(
        "Engine ready as '{}' (singleplayer score: {}). Press Ctrl+C to stop.",
        engine.lobby().player_name().await,
        engine.singleplayer().score().await
    );

    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
    }
    info!("Shutting down.");
}
