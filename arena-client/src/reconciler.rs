//! Peer state reconciler.
//!
//! Keeps the local view of every peer in a room equal to the last event
//! observed for it. Per observed peer the lifecycle is
//!
//! ```text
//! Unknown --join--> Known --update--> Known --leave--> Unknown
//! ```
//!
//! Inbound events are applied in arrival order with no sequencing: the last
//! message to arrive wins. Two policies are fixed here:
//!
//! - a join for an already known peer is a no-op;
//! - inbound events carrying the local peer's id are ignored.

use crate::config::SessionConfig;
use crate::input::InputState;
use crate::scene::{NullScene, Scene};
use crate::throttle::Throttle;
use arena_core::{Color, PeerEvent, PeerId, Position};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Peer {
    pub id: PeerId,
    pub position: Position,
    pub color: Color,
}

pub struct Reconciler<S: Scene = NullScene> {
    local_id: PeerId,
    local: Option<Peer>,
    peers: HashMap<PeerId, Peer>,
    throttle: Throttle,
    config: SessionConfig,
    scene: S,
}

impl Reconciler<NullScene> {
    pub fn new(local_id: PeerId, config: SessionConfig) -> Self {
        Self::with_scene(local_id, config, NullScene)
    }
}

impl<S: Scene> Reconciler<S> {
    pub fn with_scene(local_id: PeerId, config: SessionConfig, scene: S) -> Self {
        Self {
            local_id,
            local: None,
            peers: HashMap::new(),
            throttle: Throttle::new(config.min_send_interval),
            config,
            scene,
        }
    }

    pub fn local_id(&self) -> &PeerId {
        &self.local_id
    }

    pub fn local(&self) -> Option<&Peer> {
        self.local.as_ref()
    }

    pub fn peer(&self, id: &PeerId) -> Option<&Peer> {
        self.peers.get(id)
    }

    pub fn peers(&self) -> impl Iterator<Item = &Peer> {
        self.peers.values()
    }

    /// Number of known remote peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Spawns the local peer at the configured spawn point. Returns the join
    /// event to broadcast, or `None` if the local peer already exists.
    pub fn join_local(&mut self, color: Color) -> Option<PeerEvent> {
        if self.local.is_some() {
            return None;
        }

        let position = self.config.spawn;
        self.scene.spawn(&self.local_id, position, color);
        self.local = Some(Peer {
            id: self.local_id.clone(),
            position,
            color,
        });
        debug!("Local peer {} joined at {:?}", self.local_id, position);

        Some(PeerEvent::Join {
            id: self.local_id.clone(),
            position,
            color,
        })
    }

    /// Removes the local peer and returns the leave event to broadcast.
    pub fn leave_local(&mut self) -> Option<PeerEvent> {
        let local = self.local.take()?;
        self.scene.despawn(&local.id);
        Some(PeerEvent::Leave { id: local.id })
    }

    /// Applies one inbound event. Returns an event to send back, if any.
    pub fn apply(&mut self, event: PeerEvent) -> Option<PeerEvent> {
        match event {
            PeerEvent::Join {
                id,
                position,
                color,
            } => self.on_join(id, position, color),
            PeerEvent::Update { id, position } => {
                self.on_update(&id, position);
                None
            }
            PeerEvent::Leave { id } => {
                self.on_leave(&id);
                None
            }
        }
    }

    /// Registers a remote peer. When the peer is new and the local peer has
    /// joined, returns the local join so the newcomer learns about us.
    pub fn on_join(&mut self, id: PeerId, position: Position, color: Color) -> Option<PeerEvent> {
        if id == self.local_id {
            debug!("Ignoring join echo for local peer {}", id);
            return None;
        }
        if self.peers.contains_key(&id) {
            debug!("Duplicate join for {}", id);
            return None;
        }

        self.scene.spawn(&id, position, color);
        self.peers.insert(
            id.clone(),
            Peer {
                id: id.clone(),
                position,
                color,
            },
        );
        debug!("Peer {} joined at {:?}", id, position);

        if !self.config.announce_on_join {
            return None;
        }
        self.local.as_ref().map(|local| PeerEvent::Join {
            id: local.id.clone(),
            position: local.position,
            color: local.color,
        })
    }

    /// Overwrites a known peer's position. Unknown ids are dropped.
    pub fn on_update(&mut self, id: &PeerId, position: Position) {
        if *id == self.local_id {
            return;
        }
        let Some(peer) = self.peers.get_mut(id) else {
            debug!("Update for unknown peer {} dropped", id);
            return;
        };
        peer.position = position;
        self.scene.place(id, position);
    }

    pub fn on_leave(&mut self, id: &PeerId) {
        if *id == self.local_id {
            return;
        }
        if self.peers.remove(id).is_some() {
            self.scene.despawn(id);
            debug!("Peer {} left", id);
        }
    }

    /// Advances the local peer by one step per pressed axis and pins it to
    /// the ground. Returns an update once per send interval.
    pub fn tick(&mut self, input: &InputState, now: Instant) -> Option<PeerEvent> {
        let local = self.local.as_mut()?;

        let (dx, dz) = input.axes();
        local.position.x += dx * self.config.step;
        local.position.z += dz * self.config.step;
        local.position.y = self.config.ground_y;
        self.scene.place(&local.id, local.position);

        if !self.throttle.ready(now) {
            return None;
        }
        Some(PeerEvent::Update {
            id: local.id.clone(),
            position: local.position,
        })
    }
}
