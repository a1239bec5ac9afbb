use std::net::SocketAddr;

/// Listener settings for [`crate::Server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Queue depth of each hosted channel task.
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            channel_capacity: 100,
        }
    }
}
