use crate::engine::{InputEvent, Session};
use crate::reconciler::Reconciler;
use crate::scene::Scene;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

impl<S: Scene> Session<S> {
    /// Drives the session until input ends, `Quit` arrives or the room
    /// stream closes, then leaves the room.
    ///
    /// Peer events, local input and frame ticks are drained by this one loop
    /// in whatever order they become ready.
    pub async fn run(mut self, mut input_rx: mpsc::Receiver<InputEvent>) -> Reconciler<S> {
        info!("Session loop started in room '{}'", self.room());

        let mut frames = time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                evt = self.events.recv() => {
                    match evt {
                        Some(e) => self.handle_peer_event(e).await,
                        None => {
                            warn!("Room stream closed. Ending session.");
                            break;
                        }
                    }
                }

                input = input_rx.recv() => {
                    match input {
                        Some(InputEvent::Quit) | None => break,
                        Some(i) => self.handle_input(i),
                    }
                }

                _ = frames.tick() => {
                    self.frame(Instant::now().into_std()).await;
                }
            }
        }

        self.shutdown().await
    }

    async fn shutdown(self) -> Reconciler<S> {
        let Session {
            mut reconciler,
            handle,
            ..
        } = self;

        let local_id = reconciler.local_id().clone();
        reconciler.leave_local();
        handle.leave(&local_id).await;

        info!("Session loop finished");
        reconciler
    }
}
