mod hosted;
mod socket;

pub use hosted::HostedCodec;
pub use socket::SocketCodec;

use crate::error::CodecError;
use crate::model::{PeerEvent, RoomId};

/// Peer events decoded from one inbound frame, tagged with the room they
/// were addressed to.
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub room: RoomId,
    pub events: Vec<PeerEvent>,
}

/// Text framing of [`PeerEvent`]s for one wire variant.
pub trait WireCodec: Send + Sync + 'static {
    /// Frame announcing interest in `room`, if the variant has one.
    fn subscribe_frame(&self, room: &RoomId) -> Result<Option<String>, CodecError>;

    fn unsubscribe_frame(&self, room: &RoomId) -> Result<Option<String>, CodecError>;

    fn encode(&self, room: &RoomId, event: &PeerEvent) -> Result<String, CodecError>;

    /// `Ok(None)` for frames that carry no peer events (acks and the like).
    fn decode(&self, text: &str) -> Result<Option<Inbound>, CodecError>;
}
