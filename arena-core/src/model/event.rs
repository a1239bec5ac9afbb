use crate::error::CodecError;
use crate::model::{Color, PeerId, Position};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JOIN_EVENT: &str = "client-join";
pub const UPDATE_EVENT: &str = "client-update";
pub const LEAVE_EVENT: &str = "client-leave";

/// Peer lifecycle event exchanged between clients of one room.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerEvent {
    Join {
        id: PeerId,
        position: Position,
        color: Color,
    },
    Update {
        id: PeerId,
        position: Position,
    },
    Leave {
        id: PeerId,
    },
}

#[derive(Serialize, Deserialize)]
struct JoinPayload {
    id: PeerId,
    position: Position,
    color: Color,
}

#[derive(Serialize, Deserialize)]
struct UpdatePayload {
    id: PeerId,
    position: Position,
}

#[derive(Serialize, Deserialize)]
struct LeavePayload {
    id: PeerId,
}

impl PeerEvent {
    pub fn peer_id(&self) -> &PeerId {
        match self {
            Self::Join { id, .. } | Self::Update { id, .. } | Self::Leave { id } => id,
        }
    }

    /// Event name used on hosted pub/sub channels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => JOIN_EVENT,
            Self::Update { .. } => UPDATE_EVENT,
            Self::Leave { .. } => LEAVE_EVENT,
        }
    }

    /// Payload carried next to [`PeerEvent::name`].
    pub fn payload(&self) -> Result<Value, CodecError> {
        let value = match self {
            Self::Join {
                id,
                position,
                color,
            } => serde_json::to_value(JoinPayload {
                id: id.clone(),
                position: *position,
                color: *color,
            })?,
            Self::Update { id, position } => serde_json::to_value(UpdatePayload {
                id: id.clone(),
                position: *position,
            })?,
            Self::Leave { id } => serde_json::to_value(LeavePayload { id: id.clone() })?,
        };
        Ok(value)
    }

    pub fn from_named(event: &str, data: Value) -> Result<Self, CodecError> {
        match event {
            JOIN_EVENT => {
                let p: JoinPayload = serde_json::from_value(data)?;
                Ok(Self::Join {
                    id: p.id,
                    position: p.position,
                    color: p.color,
                })
            }
            UPDATE_EVENT => {
                let p: UpdatePayload = serde_json::from_value(data)?;
                Ok(Self::Update {
                    id: p.id,
                    position: p.position,
                })
            }
            LEAVE_EVENT => {
                let p: LeavePayload = serde_json::from_value(data)?;
                Ok(Self::Leave { id: p.id })
            }
            other => Err(CodecError::UnknownEvent(other.to_owned())),
        }
    }
}
