use crate::model::{Color, PeerId, Position};
use serde::{Deserialize, Serialize};

/// Raw socket message. Every envelope names the room it belongs to in
/// `gameCode`; the relay broadcasts to all sockets and clients filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "gameCode")]
    pub game_code: String,

    #[serde(flatten)]
    pub body: EnvelopeBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EnvelopeBody {
    /// Relay snapshot of the peers already announced in the room.
    Init { players: Vec<PlayerSnapshot> },
    Join {
        id: PeerId,
        position: Position,
        color: Color,
    },
    Update {
        id: PeerId,
        position: Position,
    },
    /// Relay notice that a socket dropped without saying goodbye.
    Remove { id: PeerId },
    Leave { id: PeerId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PeerId,
    pub position: Position,
    pub color: Color,
}

impl Envelope {
    pub fn new(game_code: impl Into<String>, body: EnvelopeBody) -> Self {
        Self {
            game_code: game_code.into(),
            body,
        }
    }
}
