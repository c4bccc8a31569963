use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use guess_core::{reconcile, validate_guess, Ledger};
use guess_persistence::repositories::{LedgerMode, LedgerRepository};
use guess_types::{
    Airport, ErrorStatus, FlightApiError, FlightApiResponse, GuessRequest, GuessResponse,
    Message, Rules, ScoreStatus,
};

use crate::position::PositionProvider;

struct SingleplayerState {
    rules: Rules,
    ledger: Ledger,
    response: GuessResponse,
}

/// The singleplayer guess client: stateless request/response submission over
/// HTTP, owning the singleplayer score and dedup ledger.
pub struct SingleplayerGame {
    http: reqwest::Client,
    endpoint: String,
    position: Arc<dyn PositionProvider>,
    ledger_repo: Option<Arc<LedgerRepository>>,
    state: RwLock<SingleplayerState>,
}

impl SingleplayerGame {
    pub fn new(
        endpoint: String,
        request_timeout: Duration,
        position: Arc<dyn PositionProvider>,
        ledger_repo: Option<Arc<LedgerRepository>>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint,
            position,
            ledger_repo,
            state: RwLock::new(SingleplayerState {
                rules: Rules::default(),
                ledger: Ledger::new(),
                response: GuessResponse::Ready,
            }),
        }
    }

    /// Restore a ledger loaded from persistence. Called once at startup.
    pub async fn restore(&self, ledger: Ledger) {
        let mut state = self.state.write().await;
        state.ledger = ledger;
    }

    pub async fn rules(&self) -> Rules {
        self.state.read().await.rules
    }

    /// Replace the active rules. Prior scores are never rescaled.
    pub async fn set_rules(&self, rules: Rules) {
        let mut state = self.state.write().await;
        state.rules = rules;
    }

    pub async fn response(&self) -> GuessResponse {
        self.state.read().await.response.clone()
    }

    pub async fn clear_response(&self) {
        let mut state = self.state.write().await;
        state.response = GuessResponse::Ready;
    }

    pub async fn score(&self) -> i64 {
        self.state.read().await.ledger.score
    }

    pub async fn ledger(&self) -> Ledger {
        self.state.read().await.ledger.clone()
    }

    /// Clear the score and dedup ledger only. Rules and any in-flight
    /// response are untouched.
    pub async fn reset(&self) {
        {
            let mut state = self.state.write().await;
            state.ledger = Ledger::new();
        }
        self.persist_ledger().await;
    }

    /// Submit one guess. Exactly one terminal response state is reached per
    /// invocation and no retry happens automatically.
    pub async fn make_guess(&self, origin: Option<&Airport>, destination: Option<&Airport>) {
        // Publish the in-flight state before any suspension point.
        let rules = {
            let mut state = self.state.write().await;
            state.response = GuessResponse::Loading;
            state.rules
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

        let request = GuessRequest {
            player,
            rules,
            origin: origin.and_then(|airport| airport.position),
            destination: destination.and_then(|airport| airport.position),
        };

        match self.http.post(&self.endpoint).json(&request).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<FlightApiResponse>().await {
                    Ok(body) => {
                        self.handle_guess_result(&body).await;
                    }
                    Err(e) => {
                        warn!("Unreadable guess response body: {}", e);
                        self.set_error(
                            ErrorStatus::ApiError,
                            Message::new(
                                "Unable to make guess",
                                "The server returned an unreadable response",
                            ),
                        )
                        .await;
                    }
                }
            }
            Ok(response) => {
                let message = response
                    .json::<FlightApiError>()
                    .await
                    .map(|body| body.message)
                    .unwrap_or_else(|_| {
                        "The server was unable to process your request".to_string()
                    });
                self.set_error(
                    ErrorStatus::ApiError,
                    Message::new("Unable to make guess", message),
                )
                .await;
            }
            Err(e) => {
                warn!("Guess request failed: {}", e);
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
    }

    /// Reconcile a scored flight into the ledger and publish the outcome.
    pub async fn handle_guess_result(&self, result: &FlightApiResponse) -> ScoreStatus {
        let status = {
            let mut state = self.state.write().await;
            let (ledger, status) =
                reconcile(&state.ledger, &state.rules, &result.flight, &result.points);
            state.ledger = ledger;
            state.response = GuessResponse::Scored {
                status,
                result: result.clone(),
            };
            status
        };
        self.persist_ledger().await;
        status
    }

    /// Mirror a multiplayer result into this ledger so lifetime progress is
    /// mode-independent. The singleplayer response state is left alone.
    pub async fn absorb_remote_result(&self, result: &FlightApiResponse) {
        let status = {
            let mut state = self.state.write().await;
            let (ledger, status) =
                reconcile(&state.ledger, &state.rules, &result.flight, &result.points);
            state.ledger = ledger;
            status
        };
        debug!(flight_id = %result.flight.id, ?status, "mirrored multiplayer result");
        self.persist_ledger().await;
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
        if let Err(e) = repo.save(LedgerMode::Singleplayer, &ledger).await {
            warn!("Failed to persist singleplayer ledger: {}", e);
        }
    }
}
