//! Colors animated by the demos.
//!
//! Channels are stored the way tweening libraries see them: three `f32` values in
//! `[0, 255]`. Interpolation with overshooting easing curves may leave that range
//! temporarily; conversion to an engine [`Color`] clamps.
//!
//! # Example
//! ```
//! use lumina::palette::{Rgb, DEEP_TONE};
//!
//! let red = Rgb::from_hex("#C7000B").unwrap();
//! assert_eq!(red, DEEP_TONE[0]);
//! assert_eq!(red.hex(), "#c7000b");
//! ```

use kiss3d::color::Color;
use std::fmt;

/// An RGB color with channels in `[0, 255]`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Creates a color from raw channel values.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    pub const fn from_u32(rgb: u32) -> Self {
        Rgb {
            r: ((rgb >> 16) & 0xff) as f32,
            g: ((rgb >> 8) & 0xff) as f32,
            b: (rgb & 0xff) as f32,
        }
    }

    /// Parses `#RRGGBB`, `RRGGBB` or the short `#RGB` notation.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return None;
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_u32),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::from_u32)
            }
            _ => None,
        }
    }

    /// The channels as an array, in `r, g, b` order.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels rounded and clamped to bytes.
    pub fn to_bytes(self) -> [u8; 3] {
        let byte = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }

    /// Lowercase `#rrggbb` representation of the clamped color.
    pub fn hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Converts to the engine color type (opaque, components in `[0, 1]`).
    pub fn to_color(self) -> Color {
        let [r, g, b] = self.to_bytes();
        Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Channel-wise linear interpolation, unclamped.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Color {
        rgb.to_color()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

// ============================================================================
// Deep tones
// ============================================================================

/// <div style="margin:2px 0"><span style="background-color:#C7000B;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep red #C7000B</div>
pub const DEEP_RED: Rgb = Rgb::from_u32(0xC7000B);
/// <div style="margin:2px 0"><span style="background-color:#D28300;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep orange #D28300</div>
pub const DEEP_ORANGE: Rgb = Rgb::from_u32(0xD28300);
/// <div style="margin:2px 0"><span style="background-color:#DFD000;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep yellow #DFD000</div>
pub const DEEP_YELLOW: Rgb = Rgb::from_u32(0xDFD000);
/// <div style="margin:2px 0"><span style="background-color:#7BAA17;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep yellow green #7BAA17</div>
pub const DEEP_YELLOW_GREEN: Rgb = Rgb::from_u32(0x7BAA17);
/// <div style="margin:2px 0"><span style="background-color:#00873C;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep green #00873C</div>
pub const DEEP_GREEN: Rgb = Rgb::from_u32(0x00873C);
/// <div style="margin:2px 0"><span style="background-color:#008A83;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep blue green #008A83</div>
pub const DEEP_BLUE_GREEN: Rgb = Rgb::from_u32(0x008A83);
/// <div style="margin:2px 0"><span style="background-color:#008DCB;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep cyan #008DCB</div>
pub const DEEP_CYAN: Rgb = Rgb::from_u32(0x008DCB);
/// <div style="margin:2px 0"><span style="background-color:#005AA0;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep blue #005AA0</div>
pub const DEEP_BLUE: Rgb = Rgb::from_u32(0x005AA0);
/// <div style="margin:2px 0"><span style="background-color:#181878;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep indigo #181878</div>
pub const DEEP_INDIGO: Rgb = Rgb::from_u32(0x181878);
/// <div style="margin:2px 0"><span style="background-color:#800073;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep purple #800073</div>
pub const DEEP_PURPLE: Rgb = Rgb::from_u32(0x800073);
/// <div style="margin:2px 0"><span style="background-color:#C6006F;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep magenta #C6006F</div>
pub const DEEP_MAGENTA: Rgb = Rgb::from_u32(0xC6006F);
/// <div style="margin:2px 0"><span style="background-color:#C70044;padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Deep crimson #C70044</div>
pub const DEEP_CRIMSON: Rgb = Rgb::from_u32(0xC70044);

/// The deep tone wheel, in hue order.
pub const DEEP_TONE: [Rgb; 12] = [
    DEEP_RED,
    DEEP_ORANGE,
    DEEP_YELLOW,
    DEEP_YELLOW_GREEN,
    DEEP_GREEN,
    DEEP_BLUE_GREEN,
    DEEP_CYAN,
    DEEP_BLUE,
    DEEP_INDIGO,
    DEEP_PURPLE,
    DEEP_MAGENTA,
    DEEP_CRIMSON,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#008DCB"), Some(DEEP_CYAN));
        assert_eq!(Rgb::from_hex("008dcb"), Some(DEEP_CYAN));
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::new(255.0, 255.0, 255.0)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn conversion_clamps_overshoot() {
        let overshoot = Rgb::new(300.0, -20.0, 127.6);
        assert_eq!(overshoot.to_bytes(), [255, 0, 128]);
        assert_eq!(overshoot.hex(), "#ff0080");

        let color = overshoot.to_color();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(DEEP_RED.lerp(DEEP_BLUE, 0.0), DEEP_RED);
        assert_eq!(DEEP_RED.lerp(DEEP_BLUE, 1.0), DEEP_BLUE);
    }
}
