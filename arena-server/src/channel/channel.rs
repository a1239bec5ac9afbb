use crate::channel::{ChannelCommand, ChannelManager};
use crate::connection::ConnectionId;
use arena_core::ServerFrame;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// One hosted pub/sub channel. Owns its subscriber list and runs as its own
/// task until the last subscriber leaves.
pub struct Channel {
    name: String,
    subscribers: HashMap<ConnectionId, mpsc::UnboundedSender<ServerFrame>>,
    command_rx: mpsc::Receiver<ChannelCommand>,
    manager: ChannelManager,
}

impl Channel {
    pub fn new(
        name: String,
        command_rx: mpsc::Receiver<ChannelCommand>,
        manager: ChannelManager,
    ) -> Self {
        Self {
            name,
            subscribers: HashMap::new(),
            command_rx,
            manager,
        }
    }

    pub async fn run(mut self) {
        info!("Channel '{}' opened", self.name);

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);

            if self.subscribers.is_empty() {
                break;
            }
        }

        // New senders see a closed channel from here on and the manager
        // spawns a replacement. Anything already queued is settled below.
        self.command_rx.close();
        self.manager.forget_closed(&self.name);
        while let Some(cmd) = self.command_rx.recv().await {
            if cmd.is_subscribe() {
                self.manager.dispatch(&self.name, cmd).await;
            }
        }

        info!("Channel '{}' closed", self.name);
    }

    fn handle_command(&mut self, cmd: ChannelCommand) {
        match cmd {
            ChannelCommand::Subscribe { conn, tx } => {
                let ack = ServerFrame::Subscribed {
                    channel: self.name.clone(),
                };
                if tx.send(ack).is_ok() {
                    self.subscribers.insert(conn, tx);
                    debug!("{} subscribed to '{}'", conn, self.name);
                }
            }

            ChannelCommand::Unsubscribe { conn } => {
                if self.subscribers.remove(&conn).is_some() {
                    debug!("{} unsubscribed from '{}'", conn, self.name);
                }
            }

            ChannelCommand::Publish { conn, event, data } => {
                self.broadcast(conn, event, data);
            }
        }
    }

    fn broadcast(&mut self, from: ConnectionId, event: String, data: Value) {
        let frame = ServerFrame::Event {
            channel: self.name.clone(),
            event,
            data,
        };

        // A closed receiver means the connection is gone; drop it here rather
        // than waiting for its Unsubscribe.
        self.subscribers.retain(|conn, tx| {
            if *conn == from {
                return true;
            }
            tx.send(frame.clone()).is_ok()
        });
    }
}
