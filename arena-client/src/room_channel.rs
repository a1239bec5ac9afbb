//! Room channel binding: turns a user-typed room code into a live
//! subscription on a [`Transport`].

use crate::error::{ClientError, TransportError};
use crate::transport::{EventStream, Transport};
use arena_core::{PeerEvent, PeerId, RoomId};
use std::sync::Arc;
use tracing::{info, warn};

/// A live room subscription. Stays subscribed until [`RoomHandle::leave`].
pub struct RoomHandle {
    room: RoomId,
    transport: Arc<dyn Transport>,
    events: Option<EventStream>,
}

/// Normalizes `raw_room` and subscribes to its channel.
pub async fn join(transport: Arc<dyn Transport>, raw_room: &str) -> Result<RoomHandle, ClientError> {
    let room = RoomId::normalize(raw_room);
    let events = transport
        .subscribe(&room)
        .await
        .map_err(ClientError::Subscribe)?;

    info!("Joined room '{}' on {}", room, room.channel_name());

    Ok(RoomHandle {
        room,
        transport,
        events: Some(events),
    })
}

impl RoomHandle {
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn channel_name(&self) -> String {
        self.room.channel_name()
    }

    /// Hands out the inbound event stream. Only the first call succeeds.
    pub fn take_events(&mut self) -> Result<EventStream, ClientError> {
        self.events.take().ok_or(ClientError::StreamTaken)
    }

    pub async fn send(&self, event: &PeerEvent) -> Result<(), TransportError> {
        self.transport.publish(&self.room, event).await
    }

    /// Best-effort leave notice for `local_id`, then unsubscribe. Failures
    /// are logged and otherwise ignored.
    pub async fn leave(self, local_id: &PeerId) {
        let notice = PeerEvent::Leave {
            id: local_id.clone(),
        };
        if let Err(e) = self.transport.publish(&self.room, &notice).await {
            warn!("Leave notice for room '{}' not sent: {}", self.room, e);
        }
        if let Err(e) = self.transport.unsubscribe(&self.room).await {
            warn!("Unsubscribe from room '{}' failed: {}", self.room, e);
        }
        info!("Left room '{}'", self.room);
    }
}
