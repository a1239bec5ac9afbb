use std::time::{Duration, Instant};

/// Gates outbound sends to at most one per `min_interval`.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_sent: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_sent: None,
        }
    }

    /// Returns `true` and records `now` if a send is allowed. The first call
    /// always passes.
    pub fn ready(&mut self, now: Instant) -> bool {
        let allowed = match self.last_sent {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
        };
        if allowed {
            self.last_sent = Some(now);
        }
        allowed
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn last_sent(&self) -> Option<Instant> {
        self.last_sent
    }
}
