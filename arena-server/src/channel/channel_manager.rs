use crate::channel::{Channel, ChannelCommand};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Channel name -> command queue of the task serving it.
#[derive(Clone)]
pub struct ChannelManager {
    channels: Arc<DashMap<String, mpsc::Sender<ChannelCommand>>>,
    capacity: usize,
}

impl ChannelManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
            capacity,
        }
    }

    /// Routes `cmd` to the channel's task. Only a subscribe brings a channel
    /// into existence; other commands for an absent channel are dropped.
    pub async fn dispatch(&self, name: &str, mut cmd: ChannelCommand) {
        loop {
            let tx = if cmd.is_subscribe() {
                self.sender(name)
            } else {
                let Some(tx) = self.channels.get(name).map(|tx| tx.clone()) else {
                    debug!("No channel '{}', dropping command", name);
                    return;
                };
                tx
            };

            match tx.send(cmd).await {
                Ok(()) => return,
                Err(mpsc::error::SendError(rejected)) => {
                    // The task wound down between lookup and send.
                    self.forget_closed(name);
                    if !rejected.is_subscribe() {
                        return;
                    }
                    cmd = rejected;
                }
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels
            .get(name)
            .map(|tx| !tx.is_closed())
            .unwrap_or(false)
    }

    /// Number of channels with a task registered.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Drops `name`'s entry if its task has stopped taking commands. A live
    /// replacement is left alone.
    pub(crate) fn forget_closed(&self, name: &str) {
        self.channels.remove_if(name, |_, tx| tx.is_closed());
    }

    fn sender(&self, name: &str) -> mpsc::Sender<ChannelCommand> {
        let mut entry = self
            .channels
            .entry(name.to_owned())
            .or_insert_with(|| self.spawn(name));

        if entry.is_closed() {
            *entry = self.spawn(name);
        }
        entry.clone()
    }

    fn spawn(&self, name: &str) -> mpsc::Sender<ChannelCommand> {
        info!("Creating new channel: {}", name);
        let (tx, rx) = mpsc::channel(self.capacity);

        let channel = Channel::new(name.to_owned(), rx, self.clone());
        tokio::spawn(channel.run());

        tx
    }
}
