use crate::connection::ConnectionId;
use arena_core::{Color, Envelope, EnvelopeBody, PeerId, PlayerSnapshot, Position};
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// What the relay remembers about a peer a socket has announced.
#[derive(Debug, Clone)]
struct Announced {
    game_code: String,
    position: Position,
    color: Color,
}

struct RelayInner {
    sockets: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    announced: DashMap<ConnectionId, HashMap<PeerId, Announced>>,
}

/// Raw socket relay. Every valid envelope goes to every other socket; rooms
/// are only used to build `init` snapshots for newcomers, matching
/// `gameCode` exactly as clients do.
#[derive(Clone)]
pub struct SocketRelay {
    inner: Arc<RelayInner>,
}

impl SocketRelay {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RelayInner {
                sockets: DashMap::new(),
                announced: DashMap::new(),
            }),
        }
    }

    pub fn add_socket(&self, conn: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.sockets.insert(conn, tx);
    }

    pub fn socket_count(&self) -> usize {
        self.inner.sockets.len()
    }

    /// Handles one text frame from `conn`. Malformed envelopes and
    /// relay-only types are dropped.
    pub fn handle_text(&self, conn: ConnectionId, text: &str) {
        let envelope = match serde_json::from_str::<Envelope>(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Invalid envelope from {}: {}", conn, e);
                return;
            }
        };
        let game_code = envelope.game_code.as_str();

        match &envelope.body {
            EnvelopeBody::Init { .. } | EnvelopeBody::Remove { .. } => {
                warn!("{} sent relay-only envelope, dropping", conn);
                return;
            }

            EnvelopeBody::Join {
                id,
                position,
                color,
            } => {
                let known = self
                    .inner
                    .announced
                    .get(&conn)
                    .is_some_and(|announced| announced.contains_key(id));
                if !known {
                    let players = self.snapshot(conn, game_code);
                    self.send_to(conn, &Envelope::new(game_code, EnvelopeBody::Init { players }));
                }
                self.inner.announced.entry(conn).or_default().insert(
                    id.clone(),
                    Announced {
                        game_code: game_code.to_owned(),
                        position: *position,
                        color: *color,
                    },
                );
            }

            EnvelopeBody::Update { id, position } => {
                if let Some(mut announced) = self.inner.announced.get_mut(&conn) {
                    if let Some(peer) = announced.get_mut(id) {
                        peer.position = *position;
                    }
                }
            }

            EnvelopeBody::Leave { id } => {
                if let Some(mut announced) = self.inner.announced.get_mut(&conn) {
                    announced.remove(id);
                }
            }
        }

        self.broadcast_from(conn, text);
    }

    /// Forgets `conn` and tells everyone else to drop the peers it announced
    /// but never took back.
    pub fn remove_socket(&self, conn: ConnectionId) {
        self.inner.sockets.remove(&conn);

        let Some((_, announced)) = self.inner.announced.remove(&conn) else {
            return;
        };
        for (id, peer) in announced {
            debug!("Socket {} dropped, removing {}", conn, id);
            let envelope = Envelope::new(peer.game_code, EnvelopeBody::Remove { id });
            match serde_json::to_string(&envelope) {
                Ok(json) => self.broadcast_from(conn, &json),
                Err(e) => error!("Failed to serialize envelope: {}", e),
            }
        }
    }

    fn snapshot(&self, conn: ConnectionId, game_code: &str) -> Vec<PlayerSnapshot> {
        self.inner
            .announced
            .iter()
            .filter(|entry| *entry.key() != conn)
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|(_, peer)| peer.game_code == game_code)
                    .map(|(id, peer)| PlayerSnapshot {
                        id: id.clone(),
                        position: peer.position,
                        color: peer.color,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn send_to(&self, conn: ConnectionId, envelope: &Envelope) {
        let Some(tx) = self.inner.sockets.get(&conn) else {
            warn!("Attempted to send to disconnected socket {}", conn);
            return;
        };
        match serde_json::to_string(envelope) {
            Ok(json) => {
                if let Err(e) = tx.send(Message::Text(json.into())) {
                    error!("Failed to send to {}: {:?}", conn, e);
                }
            }
            Err(e) => error!("Failed to serialize envelope: {}", e),
        }
    }

    fn broadcast_from(&self, from: ConnectionId, text: &str) {
        for entry in self.inner.sockets.iter() {
            if *entry.key() == from {
                continue;
            }
            // A failed send means that socket is on its way out.
            let _ = entry.value().send(Message::Text(text.to_owned().into()));
        }
    }
}

impl Default for SocketRelay {
    fn default() -> Self {
        Self::new()
    }
}
