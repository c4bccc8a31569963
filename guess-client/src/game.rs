use std::sync::Arc;

use guess_persistence::repositories::{
    LedgerMode, LedgerRepository, SessionRepository,
};
use guess_types::{Airport, GuessResponse, Rules};
use tracing::warn;

use crate::config::Config;
use crate::lobby::{ConnectionState, LobbyManager};
use crate::position::PositionProvider;
use crate::singleplayer::SingleplayerGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Singleplayer,
    Multiplayer,
}

/// Mode-dispatching facade over the two game clients.
///
/// Multiplayer wins whenever a lobby connection is `Ready`; everything else
/// falls through to singleplayer. Callers never branch on mode themselves.
pub struct GameEngine {
    singleplayer: Arc<SingleplayerGame>,
    lobby: LobbyManager,
}

impl GameEngine {
    pub fn new(
        config: &Config,
        position: Arc<dyn PositionProvider>,
        ledger_repo: Option<Arc<LedgerRepository>>,
        session_repo: Option<Arc<SessionRepository>>,
    ) -> Self {
        let singleplayer = Arc::new(SingleplayerGame::new(
            config.singleplayer_endpoint.clone(),
            config.request_timeout(),
            position.clone(),
            ledger_repo.clone(),
        ));
        let lobby = LobbyManager::new(
            config.multiplayer_endpoint.clone(),
            config.lobby_connect_timeout(),
            config.keepalive_interval(),
            config.reconnect_grace(),
            singleplayer.clone(),
            position,
            ledger_repo,
            session_repo,
        );

        Self {
            singleplayer,
            lobby,
        }
    }

    /// Load persisted ledgers and lobby identity. Called once at startup.
    pub async fn restore(
        &self,
        ledger_repo: Option<&LedgerRepository>,
        session_repo: Option<&SessionRepository>,
    ) {
        if let Some(repo) = ledger_repo {
            match repo.load(LedgerMode::Singleplayer).await {
                Ok(ledger) => self.singleplayer.restore(ledger).await,
                Err(e) => warn!("Failed to load singleplayer ledger: {}", e),
            }
        }

        let multiplayer_ledger = match ledger_repo {
            Some(repo) => match repo.load(LedgerMode::Multiplayer).await {
                Ok(ledger) => ledger,
                Err(e) => {
                    warn!("Failed to load multiplayer ledger: {}", e);
                    Default::default()
                }
            },
            None => Default::default(),
        };
        let identity = match session_repo {
            Some(repo) => match repo.load().await {
                Ok(identity) => identity,
                Err(e) => {
                    warn!("Failed to load session identity: {}", e);
                    None
                }
            },
            None => None,
        };
        self.lobby.restore(multiplayer_ledger, identity).await;
    }

    pub fn singleplayer(&self) -> &SingleplayerGame {
        &self.singleplayer
    }

    pub fn lobby(&self) -> &LobbyManager {
        &self.lobby
    }

    pub async fn mode(&self) -> GameMode {
        if self.lobby.connection_state().await == ConnectionState::Ready {
            GameMode::Multiplayer
        } else {
            GameMode::Singleplayer
        }
    }

    pub async fn rules(&self) -> Rules {
        match self.mode().await {
            GameMode::Multiplayer => match self.lobby.session().await {
                Some(session) => session.rules,
                None => self.singleplayer.rules().await,
            },
            GameMode::Singleplayer => self.singleplayer.rules().await,
        }
    }

    pub async fn response(&self) -> GuessResponse {
        match self.mode().await {
            GameMode::Multiplayer => self.lobby.response().await,
            GameMode::Singleplayer => self.singleplayer.response().await,
        }
    }

    pub async fn clear_response(&self) {
        match self.mode().await {
            GameMode::Multiplayer => self.lobby.clear_response().await,
            GameMode::Singleplayer => self.singleplayer.clear_response().await,
        }
    }

    /// Route a guess to whichever client is active. The mode is sampled
    /// once, at submission.
    pub async fn make_guess(&self, origin: Option<&Airport>, destination: Option<&Airport>) {
        match self.mode().await {
            GameMode::Multiplayer => self.lobby.make_guess(origin, destination).await,
            GameMode::Singleplayer => self.singleplayer.make_guess(origin, destination).await,
        }
    }
}
