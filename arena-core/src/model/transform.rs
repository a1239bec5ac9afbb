use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// 24-bit RGB display color.
///
/// Accepts any JSON number on input; fractional values are truncated and the
/// result is masked to `0xFFFFFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "u32")]
pub struct Color(u32);

impl Color {
    pub const MAX: u32 = 0xFF_FF_FF;

    pub const fn new(rgb: u32) -> Self {
        Self(rgb & Self::MAX)
    }

    pub const fn rgb(self) -> u32 {
        self.0
    }

    pub const fn channels(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

impl From<f64> for Color {
    fn from(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self::new(value.min(Self::MAX as f64) as u32)
        } else {
            Self(0)
        }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}
