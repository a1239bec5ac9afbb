use arena_core::Position;
use std::time::Duration;

/// Tunables for one client session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Displacement per tick along each pressed axis. Not scaled by time.
    pub step: f64,
    /// Vertical coordinate the local peer is pinned to.
    pub ground_y: f64,
    pub spawn: Position,
    /// Minimum gap between two outbound updates.
    pub min_send_interval: Duration,
    /// Period of the local input/tick loop. Each tick moves one `step`, so
    /// this also sets movement speed.
    pub frame_interval: Duration,
    /// Re-announce the local peer when an unknown peer joins.
    pub announce_on_join: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            ground_y: 0.5,
            spawn: Position::new(0.0, 0.5, 0.0),
            min_send_interval: Duration::from_millis(100),
            frame_interval: Duration::from_millis(100),
            announce_on_join: true,
        }
    }
}
