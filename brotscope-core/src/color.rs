//! Three-stop gradient coloring shared by both renderers.

use crate::config::EXPLORER_CONFIG;
use crate::EscapeResult;
use serde::{Deserialize, Serialize};

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("Expected #rrggbb color, got '{}'", hex));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| format!("Invalid color '{}': {}", hex, e))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels in `[0, 1]`.
    pub fn to_unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Gradient stops: the interior color and the two escape colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStops {
    pub interior: Rgb,
    pub mid: Rgb,
    pub outer: Rgb,
}

impl ColorStops {
    pub fn from_hex(interior: &str, mid: &str, outer: &str) -> Result<Self, String> {
        Ok(Self {
            interior: Rgb::from_hex(interior)?,
            mid: Rgb::from_hex(mid)?,
            outer: Rgb::from_hex(outer)?,
        })
    }
}

impl Default for ColorStops {
    fn default() -> Self {
        let (interior, mid, outer) = EXPLORER_CONFIG.default_colors;
        Self::from_hex(interior, mid, outer).unwrap_or(Self {
            interior: Rgb::new(0x00, 0x2a, 0x00),
            mid: Rgb::new(0x00, 0xbf, 0xff),
            outer: Rgb::new(0xff, 0xff, 0x00),
        })
    }
}

/// Map an escape result to an opaque RGBA pixel.
///
/// Points that never escaped take the interior color. Otherwise
/// `t = smoothed / max_iterations` blends interior -> mid over `[0, 0.5)` and
/// mid -> outer over `[0.5, 1]`. `t` may overshoot 1; each channel is clamped
/// after blending.
pub fn colorize(result: &EscapeResult, max_iterations: u32, stops: &ColorStops) -> [u8; 4] {
    if result.is_interior(max_iterations) {
        return stops.interior.to_rgba();
    }

    let t = result.smoothed / max_iterations as f64;
    let (from, to, s) = if t < 0.5 {
        (stops.interior, stops.mid, t * 2.0)
    } else {
        (stops.mid, stops.outer, (t - 0.5) * 2.0)
    };

    [
        blend_channel(from.r, to.r, s),
        blend_channel(from.g, to.g, s),
        blend_channel(from.b, to.b, s),
        255,
    ]
}

fn blend_channel(from: u8, to: u8, s: f64) -> u8 {
    let a = from as f64 / 255.0;
    let b = to as f64 / 255.0;
    let mixed = (a + (b - a) * s).clamp(0.0, 1.0);
    (mixed * 255.0).round() as u8
}
