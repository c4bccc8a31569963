pub mod airports;
pub mod config;
pub mod game;
pub mod lobby;
pub mod names;
pub mod position;
pub mod singleplayer;

pub use config::Config;
pub use game::{GameEngine, GameMode};
pub use lobby::{ConnectionState, LobbyManager, LobbySession};
pub use position::{PositionError, PositionProvider, StaticPositionProvider};
pub use singleplayer::SingleplayerGame;
