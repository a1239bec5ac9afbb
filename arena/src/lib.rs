pub use arena_core::model::{PeerEvent, PeerId, RoomId};

pub mod model {
    pub use arena_core::model::*;
}

pub mod codec {
    pub use arena_core::codec::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use arena_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use arena_client::*;
}
