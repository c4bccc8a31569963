use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Per-session configuration selecting which guess axes are active.
///
/// Immutable for the duration of a guess. In multiplayer the lobby dictates
/// the rules and the client treats them as read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rules {
    pub use_origin: bool,
    pub use_destination: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            use_origin: false,
            use_destination: true,
        }
    }
}
