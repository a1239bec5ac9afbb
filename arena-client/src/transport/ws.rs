use crate::error::TransportError;
use crate::transport::{EventStream, Transport};
use arena_core::{HostedCodec, PeerEvent, RoomId, SocketCodec, WireCodec};
use async_trait::async_trait;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Transport to the relay's hosted pub/sub endpoint (`/ws`).
pub type HostedTransport = WsTransport<HostedCodec>;

/// Transport to the relay's raw socket endpoint (`/socket`).
pub type SocketTransport = WsTransport<SocketCodec>;

type Routes = DashMap<RoomId, mpsc::UnboundedSender<PeerEvent>>;

/// WebSocket client speaking one [`WireCodec`].
///
/// Inbound frames are decoded on a reader task and routed to the matching
/// room subscription; frames for rooms we are not in are dropped here, which
/// is the only room isolation the raw socket variant has.
pub struct WsTransport<C: WireCodec> {
    codec: Arc<C>,
    outbound: mpsc::UnboundedSender<Message>,
    routes: Arc<Routes>,
    send_task: JoinHandle<()>,
    recv_task: JoinHandle<()>,
}

impl<C: WireCodec> WsTransport<C> {
    pub async fn connect(url: &str, codec: C) -> Result<Self, TransportError> {
        let (stream, _) = tokio_tungstenite::connect_async(url).await?;
        info!("Connected to {}", url);

        let (mut sink, mut source) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let codec = Arc::new(codec);
        let routes: Arc<Routes> = Arc::new(DashMap::new());

        let send_task = tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                if sink.send(msg).await.is_err() {
                    break;
                }
            }
            let _ = sink.close().await;
        });

        let recv_task = tokio::spawn({
            let codec = codec.clone();
            let routes = routes.clone();

            async move {
                while let Some(Ok(msg)) = source.next().await {
                    match msg {
                        Message::Text(text) => route(codec.as_ref(), &routes, text.as_str()),
                        Message::Close(_) => break,
                        _ => {}
                    }
                }

                // Dropping the senders ends every open EventStream.
                routes.clear();
                info!("WebSocket connection closed");
            }
        });

        Ok(Self {
            codec,
            outbound,
            routes,
            send_task,
            recv_task,
        })
    }

    fn send_text(&self, text: String) -> Result<(), TransportError> {
        self.outbound
            .send(Message::Text(text.into()))
            .map_err(|_| TransportError::Closed)
    }
}

fn route<C: WireCodec>(codec: &C, routes: &Routes, text: &str) {
    match codec.decode(text) {
        Ok(Some(inbound)) => {
            let Some(tx) = routes.get(&inbound.room) else {
                debug!("Frame for foreign room {} dropped", inbound.room);
                return;
            };
            for event in inbound.events {
                let _ = tx.send(event);
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Dropping undecodable frame: {}", e),
    }
}

#[async_trait]
impl<C: WireCodec> Transport for WsTransport<C> {
    async fn subscribe(&self, room: &RoomId) -> Result<EventStream, TransportError> {
        if self.send_task.is_finished() {
            return Err(TransportError::Closed);
        }
        if self.routes.contains_key(room) {
            return Err(TransportError::AlreadySubscribed(room.to_string()));
        }

        let frame = self.codec.subscribe_frame(room)?;

        // Routed before the frame goes out so nothing sent right after the
        // subscribe lands is dropped.
        let (tx, rx) = mpsc::unbounded_channel();
        self.routes.insert(room.clone(), tx);

        if let Some(frame) = frame {
            if let Err(e) = self.send_text(frame) {
                self.routes.remove(room);
                return Err(e);
            }
        }
        Ok(rx)
    }

    async fn publish(&self, room: &RoomId, event: &PeerEvent) -> Result<(), TransportError> {
        let text = self.codec.encode(room, event)?;
        self.send_text(text)
    }

    async fn unsubscribe(&self, room: &RoomId) -> Result<(), TransportError> {
        self.routes.remove(room);
        if let Some(frame) = self.codec.unsubscribe_frame(room)? {
            self.send_text(frame)?;
        }
        Ok(())
    }
}

impl<C: WireCodec> Drop for WsTransport<C> {
    fn drop(&mut self) {
        self.recv_task.abort();
        // The send task finishes on its own once `outbound` is dropped, which
        // flushes anything still queued (a trailing leave, typically).
    }
}
