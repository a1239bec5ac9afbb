use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    #[error("channel `{0}` is not a game channel")]
    ForeignChannel(String),

    #[error("hub rejected frame: {0}")]
    Rejected(String),
}
