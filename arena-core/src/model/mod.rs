mod envelope;
mod event;
mod hub;
mod peer;
mod room;
mod transform;

pub use envelope::{Envelope, EnvelopeBody, PlayerSnapshot};
pub use event::{JOIN_EVENT, LEAVE_EVENT, PeerEvent, UPDATE_EVENT};
pub use hub::{ClientFrame, ServerFrame};
pub use peer::PeerId;
pub use room::{CHANNEL_PREFIX, FALLBACK_ROOM, RoomId};
pub use transform::{Color, Position};
