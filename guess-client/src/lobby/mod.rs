pub mod connection;
pub mod manager;
pub mod session;

pub use connection::LobbyConnection;
pub use manager::LobbyManager;
pub use session::{ConnectionState, LobbySession};
