//! Hex <-> RGB conversion and perceptual color metrics.

use crate::error::{ChromaError, ChromaResult};
use serde::{Deserialize, Serialize};

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case insensitive).
    pub fn from_hex(hex: &str) -> ChromaResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        // The ASCII check also guarantees the byte slicing below stays on char boundaries.
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ChromaError::InvalidColorFormat(hex.to_string()));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ChromaError::InvalidColorFormat(hex.to_string()))
        };
        Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        color_to_hex(self.r, self.g, self.b)
    }

    /// Perceptual luma over 0-255 channels.
    pub fn luminance(self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Red-mean weighted distance. Only meaningful for relative comparison.
    pub fn distance(self, other: Rgb8) -> f64 {
        let (r1, g1, b1) = (self.r as f64, self.g as f64, self.b as f64);
        let (r2, g2, b2) = (other.r as f64, other.g as f64, other.b as f64);
        let rmean = (r1 + r2) / 2.0;
        let dr = r1 - r2;
        let dg = g1 - g2;
        let db = b1 - b2;
        ((2.0 + rmean / 256.0) * dr * dr
            + 4.0 * dg * dg
            + (2.0 + (255.0 - rmean) / 256.0) * db * db)
            .sqrt()
    }
}

/// A color with channels normalized to [0, 1], the shape host fill constructors take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    /// Quantize back to 8-bit channels.
    pub fn to_rgb8(self) -> Rgb8 {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb8::new(channel(self.red), channel(self.green), channel(self.blue))
    }

    pub fn to_hex(self) -> String {
        self.to_rgb8().to_hex()
    }
}

impl From<Rgb8> for Color {
    fn from(rgb: Rgb8) -> Self {
        Self {
            red: rgb.r as f64 / 255.0,
            green: rgb.g as f64 / 255.0,
            blue: rgb.b as f64 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        let rgb = color.to_rgb8();
        let alpha = (color.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        peniko::Color::from_rgba8(rgb.r, rgb.g, rgb.b, alpha)
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            alpha: rgba.a as f64 / 255.0,
            ..Self::from(Rgb8::new(rgba.r, rgba.g, rgba.b))
        }
    }
}

/// Decode a 6-digit hex string into a normalized, fully opaque color.
pub fn hex_to_color(hex: &str) -> ChromaResult<Color> {
    Rgb8::from_hex(hex).map(Color::from)
}

/// Format 8-bit channels as `#rrggbb`.
pub fn color_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Red-mean weighted distance between two hex colors.
pub fn color_distance(a: &str, b: &str) -> ChromaResult<f64> {
    Ok(Rgb8::from_hex(a)?.distance(Rgb8::from_hex(b)?))
}

/// Perceptual luma of a hex color over 0-255 channels.
pub fn luminance(hex: &str) -> ChromaResult<f64> {
    Ok(Rgb8::from_hex(hex)?.luminance())
}
