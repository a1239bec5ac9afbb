//! Keyboard state polled once per tick.
//!
//! Raw key-down/key-up events flip flags here; the reconciler reads the
//! flags when it advances the local peer.

use std::collections::HashMap;

pub const UP_KEYS: [&str; 2] = ["ArrowUp", "w"];
pub const DOWN_KEYS: [&str; 2] = ["ArrowDown", "s"];
pub const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "a"];
pub const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "d"];

#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into(), true);
    }

    pub fn release(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into(), false);
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn any_pressed(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_pressed(k))
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Signed unit steps along x and z for the current key set.
    pub fn axes(&self) -> (f64, f64) {
        let mut dx = 0.0;
        let mut dz = 0.0;
        if self.any_pressed(&UP_KEYS) {
            dz -= 1.0;
        }
        if self.any_pressed(&DOWN_KEYS) {
            dz += 1.0;
        }
        if self.any_pressed(&LEFT_KEYS) {
            dx -= 1.0;
        }
        if self.any_pressed(&RIGHT_KEYS) {
            dx += 1.0;
        }
        (dx, dz)
    }
}
