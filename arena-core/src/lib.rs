//! Shared model and wire formats for the arena peer sync protocol.
//!
//! Two mutually exclusive wire variants exist: a hosted pub/sub hub where
//! every room is a named channel ([`codec::HostedCodec`]) and a raw socket
//! relay where every message carries its room code ([`codec::SocketCodec`]).

pub mod codec;
pub mod error;
pub mod model;

pub use codec::{HostedCodec, Inbound, SocketCodec, WireCodec};
pub use error::CodecError;
pub use model::*;
