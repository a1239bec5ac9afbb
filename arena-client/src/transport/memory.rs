use crate::error::TransportError;
use crate::transport::{EventStream, Transport};
use arena_core::{PeerEvent, RoomId};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::debug;

type Subscribers = Vec<(u64, mpsc::UnboundedSender<PeerEvent>)>;

/// In-process pub/sub hub. Each [`MemoryTransport`] handed out by
/// [`MemoryHub::connect`] acts as one client connection.
#[derive(Clone, Default)]
pub struct MemoryHub {
    channels: Arc<DashMap<String, Subscribers>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self) -> MemoryTransport {
        MemoryTransport {
            hub: self.clone(),
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn subscriber_count(&self, room: &RoomId) -> usize {
        self.channels
            .get(&room.channel_name())
            .map(|subs| subs.len())
            .unwrap_or(0)
    }
}

pub struct MemoryTransport {
    hub: MemoryHub,
    id: u64,
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn subscribe(&self, room: &RoomId) -> Result<EventStream, TransportError> {
        let channel = room.channel_name();
        let mut subs = self.hub.channels.entry(channel.clone()).or_default();
        if subs.iter().any(|(id, _)| *id == self.id) {
            return Err(TransportError::AlreadySubscribed(channel));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        subs.push((self.id, tx));
        debug!("Connection {} subscribed to {}", self.id, channel);
        Ok(rx)
    }

    async fn publish(&self, room: &RoomId, event: &PeerEvent) -> Result<(), TransportError> {
        let Some(subs) = self.hub.channels.get(&room.channel_name()) else {
            return Ok(());
        };
        for (id, tx) in subs.iter() {
            if *id != self.id {
                let _ = tx.send(event.clone());
            }
        }
        Ok(())
    }

    async fn unsubscribe(&self, room: &RoomId) -> Result<(), TransportError> {
        let channel = room.channel_name();
        if let Some(mut subs) = self.hub.channels.get_mut(&channel) {
            subs.retain(|(id, _)| *id != self.id);
        }
        self.hub.channels.remove_if(&channel, |_, subs| subs.is_empty());
        Ok(())
    }
}
