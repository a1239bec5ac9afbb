use serde::{Deserialize, Serialize};
use std::fmt;

/// Room used when the user leaves the room code blank.
pub const FALLBACK_ROOM: &str = "default";

/// Prefix of every hosted pub/sub channel name.
pub const CHANNEL_PREFIX: &str = "game-";

/// Normalized room identifier.
///
/// Two clients share a room exactly when their normalized identifiers are
/// equal; there is no other membership check.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Lower-cases `raw`, strips every whitespace character and falls back to
    /// [`FALLBACK_ROOM`] when nothing is left.
    pub fn normalize(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        if normalized.is_empty() {
            Self(FALLBACK_ROOM.to_owned())
        } else {
            Self(normalized)
        }
    }

    /// Accepts a room code received off the wire only if it is already in
    /// normalized form. Rooms match on exact equality; a peer stamping
    /// `"RoomA"` is not in `rooma`.
    pub fn exact(code: &str) -> Option<Self> {
        let room = Self::normalize(code);
        (room.0 == code).then_some(room)
    }

    /// Recovers the room from a hosted channel name. `None` if the name does
    /// not carry [`CHANNEL_PREFIX`] or the rest is not a normalized code.
    pub fn from_channel(channel: &str) -> Option<Self> {
        channel.strip_prefix(CHANNEL_PREFIX).and_then(Self::exact)
    }

    pub fn channel_name(&self) -> String {
        format!("{}{}", CHANNEL_PREFIX, self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self(FALLBACK_ROOM.to_owned())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
