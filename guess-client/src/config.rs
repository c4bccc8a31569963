use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub singleplayer_endpoint: String,
    pub multiplayer_endpoint: String,
    pub airports_endpoint: String,
    pub request_timeout_seconds: u64,
    pub lobby_connect_timeout_seconds: u64,
    pub keepalive_interval_seconds: u64,
    pub reconnect_grace_ms: u64,
    pub player_lat: f64,
    pub player_lon: f64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            singleplayer_endpoint: env::var("SINGLEPLAYER_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/singleplayer".to_string()),
            multiplayer_endpoint: env::var("MULTIPLAYER_ENDPOINT")
                .unwrap_or_else(|_| "ws://127.0.0.1:8000/multiplayer".to_string()),
            airports_endpoint: env::var("AIRPORTS_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/airports".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("Invalid REQUEST_TIMEOUT_SECONDS"),
            lobby_connect_timeout_seconds: env::var("LOBBY_CONNECT_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("Invalid LOBBY_CONNECT_TIMEOUT_SECONDS"),
            keepalive_interval_seconds: env::var("KEEPALIVE_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "180".to_string())
                .parse()
                .expect("Invalid KEEPALIVE_INTERVAL_SECONDS"),
            reconnect_grace_ms: env::var("RECONNECT_GRACE_MS")
                .unwrap_or_else(|_| "1500".to_string())
                .parse()
                .expect("Invalid RECONNECT_GRACE_MS"),
            player_lat: env::var("PLAYER_LAT")
                .unwrap_or_else(|_| "54.68".to_string())
                .parse()
                .expect("Invalid PLAYER_LAT"),
            player_lon: env::var("PLAYER_LON")
                .unwrap_or_else(|_| "25.28".to_string())
                .parse()
                .expect("Invalid PLAYER_LON"),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn lobby_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.lobby_connect_timeout_seconds)
    }

    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_secs(self.keepalive_interval_seconds)
    }

    pub fn reconnect_grace(&self) -> Duration {
        Duration::from_millis(self.reconnect_grace_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
