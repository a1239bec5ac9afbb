use crate::connection::ConnectionId;
use arena_core::ServerFrame;
use serde_json::Value;
use tokio::sync::mpsc;

/// Commands a hub connection sends to one channel task.
#[derive(Debug)]
pub enum ChannelCommand {
    /// Start delivering the channel's events to `tx`.
    Subscribe {
        conn: ConnectionId,
        tx: mpsc::UnboundedSender<ServerFrame>,
    },

    Unsubscribe { conn: ConnectionId },

    /// Fan an event out to every subscriber except `conn`.
    Publish {
        conn: ConnectionId,
        event: String,
        data: Value,
    },
}

impl ChannelCommand {
    pub fn is_subscribe(&self) -> bool {
        matches!(self, Self::Subscribe { .. })
    }
}
