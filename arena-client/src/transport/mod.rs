mod memory;
mod ws;

pub use memory::{MemoryHub, MemoryTransport};
pub use ws::{HostedTransport, SocketTransport, WsTransport};

use crate::error::TransportError;
use arena_core::{PeerEvent, RoomId};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Inbound peer events for one subscribed room. Ends when the subscription
/// or the underlying connection goes away.
pub type EventStream = mpsc::UnboundedReceiver<PeerEvent>;

/// Broadcast transport underneath a room. Delivery is whatever the backing
/// service provides: no ordering, no acknowledgement, no retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn subscribe(&self, room: &RoomId) -> Result<EventStream, TransportError>;

    /// Sends `event` to every other subscriber of `room`.
    async fn publish(&self, room: &RoomId, event: &PeerEvent) -> Result<(), TransportError>;

    async fn unsubscribe(&self, room: &RoomId) -> Result<(), TransportError>;
}
