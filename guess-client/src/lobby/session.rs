use guess_types::{LobbyPlayer, Rules};

/// Lifecycle of the multiplayer connection.
///
/// `Error` covers connection-level failures (timeout, rejected join, server
/// error events). Guess-level failures never leave `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Ready,
    Error,
}

/// Snapshot of the lobby the client currently belongs to. Only valid while
/// the connection is `Ready`; torn down on disconnect or server error.
#[derive(Debug, Clone, PartialEq)]
pub struct LobbySession {
    pub lobby_id: String,
    pub player_name: String,
    pub rules: Rules,
    pub players: Vec<LobbyPlayer>,
    pub score: i64,
}
