use crate::engine::{InputEvent, Session};
use crate::scene::Scene;
use arena_core::PeerEvent;
use std::time::Instant;
use tracing::warn;

impl<S: Scene> Session<S> {
    /// Applies one inbound peer event and sends back whatever the reconciler
    /// answers with.
    pub async fn handle_peer_event(&mut self, event: PeerEvent) {
        if let Some(reply) = self.reconciler.apply(event) {
            self.send(&reply).await;
        }
    }

    /// Flips key flags. `Quit` is handled by the run loop.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.input.press(key),
            InputEvent::KeyUp(key) => self.input.release(key),
            InputEvent::Quit => {}
        }
    }

    /// One local frame: move the local peer and send an update if the
    /// throttle allows it.
    pub async fn frame(&mut self, now: Instant) {
        if let Some(update) = self.reconciler.tick(&self.input, now) {
            self.send(&update).await;
        }
    }

    async fn send(&self, event: &PeerEvent) {
        if let Err(e) = self.handle.send(event).await {
            warn!("Dropped outbound {}: {}", event.name(), e);
        }
    }
}
