use async_trait::async_trait;
use thiserror::Error;

use guess_types::Position;

/// Reason the position provider could not produce a fix, surfaced verbatim
/// to the player (permission denied, timeout, hardware unavailable).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct PositionError(pub String);

/// Opaque capability producing the player's current position. The engine
/// never inspects how a fix is obtained; a failed acquisition maps to a
/// `LocationError` and the caller may simply retry the guess.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, PositionError>;
}

/// Fixed-position provider for headless runs and tests.
#[derive(Debug, Clone)]
pub struct StaticPositionProvider {
    position: Position,
}

impl StaticPositionProvider {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            position: Position { lat, lon },
        }
    }
}

#[async_trait]
impl PositionProvider for StaticPositionProvider {
    async fn current_position(&self) -> Result<Position, PositionError> {
        Ok(self.position)
    }
}
