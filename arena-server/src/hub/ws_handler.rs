use crate::AppState;
use crate::channel::{ChannelCommand, ChannelManager};
use crate::connection::ConnectionId;
use arena_core::{ClientFrame, ServerFrame};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use dashmap::DashSet;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Client event names must carry this prefix.
pub const CLIENT_EVENT_PREFIX: &str = "client-";

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.channels))
}

async fn handle_socket(socket: WebSocket, channels: ChannelManager) {
    let conn = ConnectionId::new();
    info!("New hub connection: {}", conn);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerFrame>();
    let subscribed: Arc<DashSet<String>> = Arc::new(DashSet::new());

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize hub frame: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let channels = channels.clone();
        let subscribed = subscribed.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientFrame>(&text) {
                        Ok(frame) => handle_frame(conn, frame, &tx, &channels, &subscribed).await,
                        Err(e) => {
                            warn!("Invalid hub frame from {}: {}", conn, e);
                            reject(&tx, format!("invalid frame: {}", e));
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    let channels_left: Vec<String> = subscribed.iter().map(|c| c.key().clone()).collect();
    for channel in channels_left {
        channels
            .dispatch(&channel, ChannelCommand::Unsubscribe { conn })
            .await;
    }

    info!("Hub connection closed: {}", conn);
}

async fn handle_frame(
    conn: ConnectionId,
    frame: ClientFrame,
    tx: &mpsc::UnboundedSender<ServerFrame>,
    channels: &ChannelManager,
    subscribed: &DashSet<String>,
) {
    match frame {
        ClientFrame::Subscribe { channel } => {
            if channel.is_empty() {
                reject(tx, "channel name must not be empty".into());
                return;
            }
            if !subscribed.insert(channel.clone()) {
                return;
            }
            let cmd = ChannelCommand::Subscribe {
                conn,
                tx: tx.clone(),
            };
            channels.dispatch(&channel, cmd).await;
        }

        ClientFrame::Unsubscribe { channel } => {
            if subscribed.remove(&channel).is_some() {
                channels
                    .dispatch(&channel, ChannelCommand::Unsubscribe { conn })
                    .await;
            }
        }

        ClientFrame::Publish {
            channel,
            event,
            data,
        } => {
            if !event.starts_with(CLIENT_EVENT_PREFIX) {
                reject(
                    tx,
                    format!("event `{}` must start with `{}`", event, CLIENT_EVENT_PREFIX),
                );
                return;
            }
            if !subscribed.contains(&channel) {
                reject(tx, format!("not subscribed to `{}`", channel));
                return;
            }
            let cmd = ChannelCommand::Publish { conn, event, data };
            channels.dispatch(&channel, cmd).await;
        }
    }
}

fn reject(tx: &mpsc::UnboundedSender<ServerFrame>, message: String) {
    let _ = tx.send(ServerFrame::Error { message });
}
