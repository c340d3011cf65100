//! The Electra One control color palette.
//!
//! The device only knows a fixed set of colors, addressed by their RGB hex
//! string in preset files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Control color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Red,
    Orange,
    Blue,
    Green,
    Pink,
}

/// Palette table: color and its RGB hex string as written into presets.
pub const PALETTE: [(Color, &str); 6] = [
    (Color::White, "FFFFFF"),
    (Color::Red, "F45C51"),
    (Color::Orange, "F49500"),
    (Color::Blue, "529DEC"),
    (Color::Green, "03A598"),
    (Color::Pink, "C44795"),
];

impl Color {
    /// Hex RGB string for this color (six digits, no leading `#`).
    pub fn hex(self) -> &'static str {
        match self {
            Color::White => "FFFFFF",
            Color::Red => "F45C51",
            Color::Orange => "F49500",
            Color::Blue => "529DEC",
            Color::Green => "03A598",
            Color::Pink => "C44795",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}
