use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use guess_core::{reconcile, validate_guess, Ledger};
use guess_persistence::repositories::{
    LedgerMode, LedgerRepository, SessionIdentity, SessionRepository,
};
use guess_types::{
    Airport, ClientMessage, ErrorStatus, FlightApiResponse, GuessResponse, Message,
    Rules, ServerMessage,
};

use crate::lobby::connection::{ConnectionId, LobbyConnection};
use crate::lobby::session::{ConnectionState, LobbySession};
use crate::names::anonymous_name;
use crate::position::PositionProvider;
use crate::singleplayer::SingleplayerGame;

struct LobbyState {
    connection_state: ConnectionState,
    connection: Option<LobbyConnection>,
    session: Option<LobbySession>,
    player_name: String,
    rules: Rules,
    last_lobby_id: Option<String>,
    ledger: Ledger,
    response: GuessResponse,
    attempt: u64,
}

/// Manages the persistent multiplayer connection and lobby membership.
///
/// Cheap to clone; all clones share the same state. Spawned socket tasks
/// hold a clone so events keep flowing regardless of which handle the
/// caller retains.
#[derive(Clone)]
pub struct LobbyManager {
    url: Arc<String>,
    connect_timeout: Duration,
    keepalive: Duration,
    reconnect_grace: Duration,
    singleplayer: Arc<SingleplayerGame>,
    position: Arc<dyn PositionProvider>,
    ledger_repo: Option<Arc<LedgerRepository>>,
    session_repo: Option<Arc<SessionRepository>>,
    state: Arc<RwLock<LobbyState>>,
}

impl LobbyManager {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        url: String,
        connect_timeout: Duration,
        keepalive: Duration,
        reconnect_grace: Duration,
        singleplayer: Arc<SingleplayerGame>,
        position: Arc<dyn PositionProvider>,
        ledger_repo: Option<Arc<LedgerRepository>>,
        session_repo: Option<Arc<SessionRepository>>,
    ) -> Self {
        Self {
            url: Arc::new(url),
            connect_timeout,
            keepalive,
            reconnect_grace,
            singleplayer,
            position,
            ledger_repo,
            session_repo,
            state: Arc::new(RwLock::new(LobbyState {
                connection_state: ConnectionState::Disconnected,
                connection: None,
                session: None,
                player_name: anonymous_name(),
                rules: Rules::default(),
                last_lobby_id: None,
                ledger: Ledger::new(),
                response: GuessResponse::Ready,
                attempt: 0,
            })),
        }
    }

    /// Restore persisted state. Called once at startup, before any
    /// connection is opened.
    pub async fn restore(&self, ledger: Ledger, identity: Option<SessionIdentity>) {
        let mut state = self.state.write().await;
        state.ledger = ledger;
        if let Some(identity) = identity {
            state.player_name = identity.player_name;
            state.rules = identity.rules;
            state.last_lobby_id = identity.lobby_id;
        }
    }

    pub async fn connection_state(&self) -> ConnectionState {
        self.state.read().await.connection_state
    }

    pub async fn session(&self) -> Option<LobbySession> {
        self.state.read().await.session.clone()
    }

    pub async fn player_name(&self) -> String {
        self.state.read().await.player_name.clone()
    }

    pub async fn set_player_name(&self, name: String) {
        {
            let mut state = self.state.write().await;
            state.player_name = name;
        }
        self.persist_identity().await;
    }

    /// Choose the rules proposed when creating the next lobby. Ignored while
    /// a session is active; after a join the lobby dictates the rules.
    pub async fn set_rules(&self, rules: Rules) {
        let mut state = self.state.write().await;
        if state.session.is_none() {
            state.rules = rules;
        }
    }

    pub async fn last_lobby_id(&self) -> Option<String> {
        self.state.read().await.last_lobby_id.clone()
    }

    pub async fn response(&self) -> GuessResponse {
        self.state.read().await.response.clone()
    }

    pub async fn clear_response(&self) {
        let mut state = self.state.write().await;
        state.response = GuessResponse::Ready;
    }

    pub async fn ledger(&self) -> Ledger {
        self.state.read().await.ledger.clone()
    }

    /// Open a connection and create a lobby (no id) or join an existing one.
    /// Any previous connection is torn down first.
    pub async fn init_lobby(&self, lobby_id: Option<String>) {
        let (my_attempt, player_name, rules) = {
            let mut state = self.state.write().await;
            if let Some(connection) = state.connection.take() {
                connection.close();
            }
            state.connection_state = ConnectionState::Connecting;
            state.session = None;
            state.attempt += 1;
            (state.attempt, state.player_name.clone(), state.rules)
        };

        // Connection attempts that never see a lobby_joined are failed after
        // a deadline rather than left spinning.
        let timeout_manager = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout_manager.connect_timeout).await;
            let mut state = timeout_manager.state.write().await;
            if state.attempt == my_attempt
                && state.connection_state == ConnectionState::Connecting
            {
                warn!("Timed out waiting for lobby server");
                if let Some(connection) = state.connection.take() {
                    connection.close();
                }
                state.connection_state = ConnectionState::Error;
                state.response = GuessResponse::Failed {
                    status: ErrorStatus::ServerError,
                    error: Message::new("Server Error", "Unable to connect to the server"),
                };
            }
        });

        let (connection, mut inbound_rx) =
            match LobbyConnection::open(&self.url, self.keepalive).await {
                Ok(opened) => opened,
                Err(e) => {
                    warn!("Failed to open lobby connection: {}", e);
                    let mut state = self.state.write().await;
                    if state.attempt == my_attempt {
                        state.connection_state = ConnectionState::Error;
                        state.response = GuessResponse::Failed {
                            status: ErrorStatus::ServerError,
                            error: Message::new(
                                "Server Error",
                                "Unable to connect to the server",
                            ),
                        };
                    }
                    return;
                }
            };

        let join = match lobby_id {
            Some(lobby_id) => ClientMessage::JoinLobby {
                player_name,
                lobby_id,
            },
            None => ClientMessage::CreateLobby { player_name, rules },
        };
        if connection.send(join).is_err() {
            let mut state = self.state.write().await;
            if state.attempt == my_attempt {
                state.connection_state = ConnectionState::Error;
                state.response = GuessResponse::Failed {
                    status: ErrorStatus::ServerError,
                    error: Message::new("Server Error", "Unable to connect to the server"),
                };
            }
            return;
        }

        let connection_id = connection.id;
        {
            let mut state = self.state.write().await;
            if state.attempt != my_attempt
                || state.connection_state != ConnectionState::Connecting
            {
                // A newer attempt or the timeout got here first.
                connection.close();
                return;
            }
            state.connection = Some(connection);
        }

        let dispatch_manager = self.clone();
        tokio::spawn(async move {
            while let Some(event) = inbound_rx.recv().await {
                dispatch_manager.dispatch(event).await;
            }
            dispatch_manager.on_connection_closed(connection_id).await;
        });
    }

    /// Submit one guess over the lobby connection. A lost connection gets a
    /// single silent rejoin before the guess is failed.
    pub async fn make_guess(&self, origin: Option<&Airport>, destination: Option<&Airport>) {
        let (rules, lobby_id) = {
            let mut state = self.state.write().await;
            state.response = GuessResponse::Loading;
            (state.rules, state.last_lobby_id.clone())
        };

        if let Some(message) = validate_guess(&rules, origin, destination) {
            self.set_error(ErrorStatus::ValidationError, message).await;
            return;
        }

        let player = match self.position.current_position().await {
            Ok(position) => position,
            Err(e) => {
                self.set_error(
                    ErrorStatus::LocationError,
                    Message::new("Unable to read your location", e.to_string()),
                )
                .await;
                return;
            }
        };

        if self.connection_state().await != ConnectionState::Ready {
            let Some(lobby_id) = lobby_id else {
                self.set_error(
                    ErrorStatus::ClientError,
                    Message::new("Unable to make guess", "Not connected to a server"),
                )
                .await;
                return;
            };
            info!(lobby_id = %lobby_id, "connection lost, attempting to rejoin");
            self.init_lobby(Some(lobby_id)).await;
            tokio::time::sleep(self.reconnect_grace).await;
            if self.connection_state().await != ConnectionState::Ready {
                self.set_error(
                    ErrorStatus::ClientError,
                    Message::new("Unable to make guess", "Not connected to a server"),
                )
                .await;
                return;
            }
            // The rejoin replaced the Loading state with a fresh session;
            // put the in-flight marker back before sending.
            let mut state = self.state.write().await;
            state.response = GuessResponse::Loading;
        }

        let state = self.state.read().await;
        let (Some(session), Some(connection)) = (&state.session, &state.connection) else {
            drop(state);
            self.set_error(
                ErrorStatus::ClientError,
                Message::new("Unable to make guess", "The game state is invalid"),
            )
            .await;
            return;
        };

        let guess = ClientMessage::HandleGuess {
            lobby_id: session.lobby_id.clone(),
            player_name: session.player_name.clone(),
            player,
            origin: origin.and_then(|airport| airport.position),
            destination: destination.and_then(|airport| airport.position),
        };
        if connection.send(guess).is_err() {
            drop(state);
            self.set_error(
                ErrorStatus::ApiError,
                Message::new(
                    "Unable to make guess",
                    "Something went wrong when trying to contact the server",
                ),
            )
            .await;
        }
    }

    /// Leave the current lobby and return to a clean disconnected state
    /// under a fresh anonymous name.
    pub async fn leave_lobby(&self) {
        {
            let mut state = self.state.write().await;
            if let Some(connection) = state.connection.take() {
                connection.close();
            }
            state.connection_state = ConnectionState::Disconnected;
            state.session = None;
            state.last_lobby_id = None;
            state.response = GuessResponse::Ready;
            state.player_name = anonymous_name();
            state.rules = Rules::default();
        }
        self.persist_identity().await;
    }

    async fn dispatch(&self, event: ServerMessage) {
        match event {
            ServerMessage::LobbyJoined {
                lobby,
                rules,
                player_name,
                score,
                players,
            } => {
                info!(lobby_id = %lobby, player_name = %player_name, "joined lobby");
                {
                    let mut state = self.state.write().await;
                    state.connection_state = ConnectionState::Ready;
                    state.rules = rules;
                    state.last_lobby_id = Some(lobby.clone());
                    state.player_name = player_name.clone();
                    state.session = Some(LobbySession {
                        lobby_id: lobby,
                        player_name,
                        rules,
                        players,
                        score,
                    });
                }
                self.persist_identity().await;
            }
            ServerMessage::LobbyUpdate { players } => {
                let mut state = self.state.write().await;
                if let Some(session) = &mut state.session {
                    session.players = players;
                }
            }
            ServerMessage::FlightDetails {
                points,
                flight,
                status,
                score,
            } => {
                let result = FlightApiResponse { points, flight };
                {
                    let mut state = self.state.write().await;
                    let rules = state.rules;
                    let (ledger, local_status) =
                        reconcile(&state.ledger, &rules, &result.flight, &result.points);
                    if local_status != status {
                        debug!(
                            ?local_status,
                            server_status = ?status,
                            flight_id = %result.flight.id,
                            "score status disagrees with server"
                        );
                    }
                    state.ledger = ledger;
                    if let Some(session) = &mut state.session {
                        session.score = score;
                    }
                    state.response = GuessResponse::Scored {
                        status: local_status,
                        result: result.clone(),
                    };
                }
                self.persist_ledger().await;
                self.singleplayer.absorb_remote_result(&result).await;
            }
            ServerMessage::FlightError { message } => {
                self.set_error(
                    ErrorStatus::ApiError,
                    Message::new(
                        "Unable to make guess",
                        message.unwrap_or_else(|| {
                            "The server was unable to process your request".to_string()
                        }),
                    ),
                )
                .await;
            }
            ServerMessage::LobbyError { message } | ServerMessage::Error { message } => {
                warn!("lobby server reported an error: {:?}", message);
                let mut state = self.state.write().await;
                if let Some(connection) = state.connection.take() {
                    connection.close();
                }
                state.connection_state = ConnectionState::Error;
                state.session = None;
                state.response = GuessResponse::Failed {
                    status: ErrorStatus::ServerError,
                    error: Message::new(
                        "Server Error",
                        message.unwrap_or_else(|| {
                            "The server was unable to process your request".to_string()
                        }),
                    ),
                };
            }
        }
    }

    async fn on_connection_closed(&self, connection_id: ConnectionId) {
        let mut state = self.state.write().await;
        let current = state
            .connection
            .as_ref()
            .map(|connection| connection.id == connection_id)
            .unwrap_or(false);
        if !current {
            // A stale reader from an already-replaced connection.
            return;
        }
        if let Some(connection) = state.connection.take() {
            connection.close();
        }
        match state.connection_state {
            ConnectionState::Connecting => {
                state.connection_state = ConnectionState::Error;
                state.response = GuessResponse::Failed {
                    status: ErrorStatus::ServerError,
                    error: Message::new("Server Error", "Unable to connect to the server"),
                };
            }
            ConnectionState::Ready => {
                info!("lobby connection lost");
                state.connection_state = ConnectionState::Disconnected;
                state.session = None;
            }
            _ => {}
        }
    }

    async fn set_error(&self, status: ErrorStatus, error: Message) {
        let mut state = self.state.write().await;
        state.response = GuessResponse::Failed { status, error };
    }

    async fn persist_ledger(&self) {
        let Some(repo) = &self.ledger_repo else {
            return;
        };
        let ledger = self.state.read().await.ledger.clone();
        if let Err(e) = repo.save(LedgerMode::Multiplayer, &ledger).await {
            warn!("Failed to persist multiplayer ledger: {}", e);
        }
    }

    async fn persist_identity(&self) {
        let Some(repo) = &self.session_repo else {
            return;
        };
        let identity = {
            let state = self.state.read().await;
            SessionIdentity {
                player_name: state.player_name.clone(),
                lobby_id: state.last_lobby_id.clone(),
                rules: state.rules,
            }
        };
        if let Err(e) = repo.save(&identity).await {
            warn!("Failed to persist session identity: {}", e);
        }
    }
}
