//! Reference backends for the arena sync protocol: a hosted pub/sub hub on
//! `/ws` and a raw socket relay on `/socket`.

pub mod channel;
pub mod config;
pub mod connection;
pub mod hub;
pub mod relay;

pub use channel::{Channel, ChannelCommand, ChannelManager};
pub use config::ServerConfig;
pub use connection::ConnectionId;
pub use hub::{CLIENT_EVENT_PREFIX, ws_handler};
pub use relay::{SocketRelay, socket_handler};

use axum::{Router, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared state handed to both WebSocket endpoints.
#[derive(Clone)]
pub struct AppState {
    pub channels: ChannelManager,
    pub relay: SocketRelay,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            channels: ChannelManager::new(config.channel_capacity),
            relay: SocketRelay::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // Browser clients are served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/socket", get(socket_handler))
        .layer(cors)
        .with_state(state)
}

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.addr).await?;
        Ok(Self {
            listener,
            state: AppState::new(&config),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run(self) -> anyhow::Result<()> {
        info!("Arena server listening on http://{}", self.local_addr()?);
        axum::serve(self.listener, router(self.state)).await?;
        Ok(())
    }
}
