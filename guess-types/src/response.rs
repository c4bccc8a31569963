use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::messages::FlightApiResponse;

/// Outcome of reconciling a scored flight against the player's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ScoreStatus {
    Success,
    AlreadyGuessed,
    PointsUnavailable,
}

/// Error taxonomy for a failed guess.
///
/// `ValidationError` and `LocationError` are always recoverable locally by
/// re-invoking the same action with corrected input. `ClientError` covers
/// internal invariant violations and disconnected-transport conditions.
/// `ApiError` is a remote guess-scoped rejection; `ServerError` is a remote
/// lobby-level failure, terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorStatus {
    ValidationError,
    LocationError,
    ClientError,
    ApiError,
    ServerError,
}

/// Human-facing error payload surfaced verbatim to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Message {
    pub title: String,
    pub message: String,
}

impl Message {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The per-mode guess response consumed by presentation. Exactly one of the
/// scored value or the error payload is populated; `Ready` and `Loading`
/// carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessResponse {
    Ready,
    Loading,
    Scored {
        status: ScoreStatus,
        result: FlightApiResponse,
    },
    Failed {
        status: ErrorStatus,
        error: Message,
    },
}

impl GuessResponse {
    pub fn is_loading(&self) -> bool {
        matches!(self, GuessResponse::Loading)
    }

    pub fn result(&self) -> Option<&FlightApiResponse> {
        match self {
            GuessResponse::Scored { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Message> {
        match self {
            GuessResponse::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Default for GuessResponse {
    fn default() -> Self {
        GuessResponse::Ready
    }
}
