use crate::error::ClientError;
use crate::input::InputState;
use crate::reconciler::Reconciler;
use crate::room_channel::{self, RoomHandle};
use crate::scene::{NullScene, Scene};
use crate::transport::{EventStream, Transport};
use arena_core::{Color, RoomId};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

mod dispatch_impl;
mod run_impl;

/// Raw local input fed into a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    Quit,
}

/// One client in one room.
///
/// Owns everything the client mutates: the reconciler, the input flags and
/// the room subscription. A single task drives it, so none of it is shared.
pub struct Session<S: Scene = NullScene> {
    reconciler: Reconciler<S>,
    handle: RoomHandle,
    input: InputState,
    events: EventStream,
    frame_interval: Duration,
}

impl<S: Scene> Session<S> {
    /// Joins `raw_room`, spawns the local peer and announces it. Frames run
    /// at the reconciler's configured `frame_interval`.
    pub async fn start(
        transport: Arc<dyn Transport>,
        raw_room: &str,
        mut reconciler: Reconciler<S>,
        color: Color,
    ) -> Result<Self, ClientError> {
        let mut handle = room_channel::join(transport, raw_room).await?;
        let events = handle.take_events()?;

        if let Some(join) = reconciler.join_local(color) {
            if let Err(e) = handle.send(&join).await {
                warn!("Join announcement failed: {}", e);
            }
        }

        let frame_interval = reconciler.config().frame_interval;
        Ok(Self {
            reconciler,
            handle,
            input: InputState::new(),
            events,
            frame_interval,
        })
    }

    pub fn reconciler(&self) -> &Reconciler<S> {
        &self.reconciler
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn room(&self) -> &RoomId {
        self.handle.room()
    }
}

/// Random 24-bit color for a freshly spawned local peer.
pub fn random_color() -> Color {
    use rand::Rng;
    Color::new(rand::thread_rng().gen_range(0..=Color::MAX))
}
