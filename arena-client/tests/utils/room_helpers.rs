use arena_client::{EventStream, MemoryHub, Reconciler, RoomHandle, SessionConfig};
use arena_core::{PeerEvent, PeerId};
use std::sync::Arc;

use super::RecordingScene;

/// A hand-driven client: reconciler, room handle and its inbound stream.
pub struct TestPeer {
    pub reconciler: Reconciler<RecordingScene>,
    pub handle: RoomHandle,
    pub events: EventStream,
}

impl TestPeer {
    pub async fn join(hub: &MemoryHub, id: &str, room: &str) -> Self {
        let mut handle = arena_client::join(Arc::new(hub.connect()), room)
            .await
            .expect("Failed to join room");
        let events = handle.take_events().expect("Event stream already taken");
        let reconciler = Reconciler::with_scene(
            PeerId::from(id),
            SessionConfig::default(),
            RecordingScene::new(),
        );

        Self {
            reconciler,
            handle,
            events,
        }
    }

    pub async fn send(&self, event: Option<PeerEvent>) {
        if let Some(event) = event {
            self.handle.send(&event).await.expect("Failed to publish");
        }
    }

    /// Applies everything already delivered and sends any replies. Returns
    /// the number of events applied.
    pub async fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            let reply = self.reconciler.apply(event);
            self.send(reply).await;
            applied += 1;
        }
        applied
    }
}

/// Drains both peers until neither has anything left to apply.
pub async fn settle(a: &mut TestPeer, b: &mut TestPeer) {
    loop {
        let applied = a.drain().await + b.drain().await;
        if applied == 0 {
            break;
        }
    }
}
