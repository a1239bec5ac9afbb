use arena_core::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport is closed")]
    Closed,

    #[error("already subscribed to `{0}`")]
    AlreadySubscribed(String),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("room subscription failed: {0}")]
    Subscribe(#[source] TransportError),

    #[error("room handle has no event stream left")]
    StreamTaken,
}
