use std::fmt;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, warn};
use uuid::Uuid;

use guess_types::{ClientMessage, ServerMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Failed to connect to lobby server: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("Connection closed")]
    Closed,
}

/// One WebSocket connection to the lobby server.
///
/// Owns the socket via three tasks: a writer draining an mpsc channel, a
/// reader decoding server events, and a keepalive pinger. Inbound events are
/// delivered on the receiver returned from [`LobbyConnection::open`]; the
/// receiver closing means the socket is gone.
pub struct LobbyConnection {
    pub id: ConnectionId,
    outbound_tx: mpsc::UnboundedSender<ClientMessage>,
    read_task: JoinHandle<()>,
    write_task: JoinHandle<()>,
    keepalive_task: JoinHandle<()>,
}

impl LobbyConnection {
    pub async fn open(
        url: &str,
        keepalive: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ServerMessage>), ConnectionError> {
        let (ws_stream, _) = connect_async(url).await?;
        let (mut ws_tx, mut ws_rx) = ws_stream.split();

        let id = ConnectionId::new();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<ServerMessage>();

        let write_task = tokio::spawn(async move {
            while let Some(message) = outbound_rx.recv().await {
                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to serialize outbound message: {}", e);
                        continue;
                    }
                };
                if let Err(e) = ws_tx.send(WsMessage::Text(json)).await {
                    warn!("Failed to send message to lobby server: {}", e);
                    break;
                }
            }
        });

        let read_task = tokio::spawn(async move {
            while let Some(frame) = ws_rx.next().await {
                match frame {
                    Ok(WsMessage::Text(text)) => match serde_json::from_str(&text) {
                        Ok(event) => {
                            if inbound_tx.send(event).is_err() {
                                break;
                            }
                        }
                        // Unknown or malformed events are dropped, not fatal.
                        Err(e) => warn!("Unparseable server event: {}", e),
                    },
                    Ok(WsMessage::Close(_)) => {
                        debug!("Lobby server closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Lobby socket error: {}", e);
                        break;
                    }
                }
            }
            // inbound_tx drops here, closing the receiver.
        });

        let keepalive_tx = outbound_tx.clone();
        let keepalive_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(keepalive);
            interval.tick().await;
            loop {
                interval.tick().await;
                if keepalive_tx.send(ClientMessage::Ping).is_err() {
                    break;
                }
            }
        });

        debug!(connection_id = %id, "lobby connection established");

        Ok((
            Self {
                id,
                outbound_tx,
                read_task,
                write_task,
                keepalive_task,
            },
            inbound_rx,
        ))
    }

    pub fn send(&self, message: ClientMessage) -> Result<(), ConnectionError> {
        self.outbound_tx
            .send(message)
            .map_err(|_| ConnectionError::Closed)
    }

    /// Tear down the socket tasks. Safe to call more than once.
    pub fn close(&self) {
        self.read_task.abort();
        self.write_task.abort();
        self.keepalive_task.abort();
    }
}

impl Drop for LobbyConnection {
    fn drop(&mut self) {
        self.close();
    }
}
