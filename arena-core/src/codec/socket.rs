use crate::codec::{Inbound, WireCodec};
use crate::error::CodecError;
use crate::model::{Envelope, EnvelopeBody, PeerEvent, RoomId};

/// Codec for the raw socket relay. No subscription frames exist: every
/// envelope carries `gameCode` and the receiving client filters on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketCodec;

impl WireCodec for SocketCodec {
    fn subscribe_frame(&self, _room: &RoomId) -> Result<Option<String>, CodecError> {
        Ok(None)
    }

    fn unsubscribe_frame(&self, _room: &RoomId) -> Result<Option<String>, CodecError> {
        Ok(None)
    }

    fn encode(&self, room: &RoomId, event: &PeerEvent) -> Result<String, CodecError> {
        let body = match event.clone() {
            PeerEvent::Join {
                id,
                position,
                color,
            } => EnvelopeBody::Join {
                id,
                position,
                color,
            },
            PeerEvent::Update { id, position } => EnvelopeBody::Update { id, position },
            PeerEvent::Leave { id } => EnvelopeBody::Leave { id },
        };
        Ok(serde_json::to_string(&Envelope::new(room.as_str(), body))?)
    }

    fn decode(&self, text: &str) -> Result<Option<Inbound>, CodecError> {
        let envelope: Envelope = serde_json::from_str(text)?;
        let events = match envelope.body {
            EnvelopeBody::Init { players } => players
                .into_iter()
                .map(|p| PeerEvent::Join {
                    id: p.id,
                    position: p.position,
                    color: p.color,
                })
                .collect(),
            EnvelopeBody::Join {
                id,
                position,
                color,
            } => vec![PeerEvent::Join {
                id,
                position,
                color,
            }],
            EnvelopeBody::Update { id, position } => vec![PeerEvent::Update { id, position }],
            EnvelopeBody::Remove { id } | EnvelopeBody::Leave { id } => {
                vec![PeerEvent::Leave { id }]
            }
        };

        let room = RoomId::exact(&envelope.game_code)
            .ok_or(CodecError::ForeignChannel(envelope.game_code))?;
        Ok(Some(Inbound { room, events }))
    }
}
