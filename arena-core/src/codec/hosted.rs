use crate::codec::{Inbound, WireCodec};
use crate::error::CodecError;
use crate::model::{ClientFrame, PeerEvent, RoomId, ServerFrame};

/// Codec for the hosted pub/sub hub: one channel per room, named events.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostedCodec;

impl WireCodec for HostedCodec {
    fn subscribe_frame(&self, room: &RoomId) -> Result<Option<String>, CodecError> {
        let frame = ClientFrame::Subscribe {
            channel: room.channel_name(),
        };
        Ok(Some(serde_json::to_string(&frame)?))
    }

    fn unsubscribe_frame(&self, room: &RoomId) -> Result<Option<String>, CodecError> {
        let frame = ClientFrame::Unsubscribe {
            channel: room.channel_name(),
        };
        Ok(Some(serde_json::to_string(&frame)?))
    }

    fn encode(&self, room: &RoomId, event: &PeerEvent) -> Result<String, CodecError> {
        let frame = ClientFrame::Publish {
            channel: room.channel_name(),
            event: event.name().to_owned(),
            data: event.payload()?,
        };
        Ok(serde_json::to_string(&frame)?)
    }

    fn decode(&self, text: &str) -> Result<Option<Inbound>, CodecError> {
        match serde_json::from_str::<ServerFrame>(text)? {
            ServerFrame::Event {
                channel,
                event,
                data,
            } => {
                let room = RoomId::from_channel(&channel)
                    .ok_or(CodecError::ForeignChannel(channel))?;
                let event = PeerEvent::from_named(&event, data)?;
                Ok(Some(Inbound {
                    room,
                    events: vec![event],
                }))
            }
            ServerFrame::Subscribed { .. } => Ok(None),
            ServerFrame::Error { message } => Err(CodecError::Rejected(message)),
        }
    }
}
