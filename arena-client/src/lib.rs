//! Client side of the arena peer sync protocol.
//!
//! Every client is the only source of truth for its own peer. Local input
//! moves the local peer, the new position is broadcast to the room, and each
//! receiver overwrites its copy of that peer with whatever arrived last.
//!
//! ```text
//! input -> Reconciler::tick -> RoomHandle::send -> Transport
//!                                                     |
//! Scene <- Reconciler::apply <- EventStream <---------+ (other clients)
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod reconciler;
pub mod room_channel;
pub mod scene;
pub mod throttle;
pub mod transport;

pub use config::SessionConfig;
pub use engine::{InputEvent, Session, random_color};
pub use error::{ClientError, TransportError};
pub use input::InputState;
pub use reconciler::{Peer, Reconciler};
pub use room_channel::{RoomHandle, join};
pub use scene::{NullScene, Scene};
pub use throttle::Throttle;
pub use transport::{
    EventStream, HostedTransport, MemoryHub, MemoryTransport, SocketTransport, Transport,
    WsTransport,
};
