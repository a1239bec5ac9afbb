use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames a client sends to the hosted pub/sub hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ClientFrame {
    Subscribe {
        channel: String,
    },
    Unsubscribe {
        channel: String,
    },
    Publish {
        channel: String,
        event: String,
        data: Value,
    },
}

/// Frames the hosted pub/sub hub sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ServerFrame {
    Subscribed {
        channel: String,
    },
    Event {
        channel: String,
        event: String,
        data: Value,
    },
    Error {
        message: String,
    },
}
