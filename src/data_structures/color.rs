//! sRGB colors as exchanged with the configuration store.
//!
//! Colors travel through the configurator as `#rrggbb` hex strings. [`Color`]
//! keeps the 8-bit sRGB channels so that a value written by the store can be
//! compared bit-for-bit with what ends up in a material.

use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// An opaque 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const MID_GRAY: Color = Color::rgb(0x80, 0x80, 0x80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Parse a hex color, substituting `fallback` for anything malformed.
    pub fn from_hex_or(hex: &str, fallback: Color) -> Self {
        Self::from_hex(hex).unwrap_or_else(|e| {
            log::warn!("{}, using {} instead", e, fallback);
            fallback
        })
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived brightness `(299 r + 587 g + 114 b) / 1000` is above the midpoint.
    pub fn is_light(&self) -> bool {
        let brightness =
            (self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000;
        brightness > 128
    }

    /// Convert a linear RGB factor (as stored in glTF) into 8-bit sRGB.
    pub fn from_linear(linear: [f32; 3]) -> Self {
        let encode = |c: f32| {
            let c = c.clamp(0.0, 1.0);
            let srgb = if c <= 0.003_130_8 {
                c * 12.92
            } else {
                1.055 * c.powf(1.0 / 2.4) - 0.055
            };
            (srgb * 255.0).round() as u8
        };
        Self::rgb(encode(linear[0]), encode(linear[1]), encode(linear[2]))
    }

    /// Linear RGB factors for shading.
    pub fn to_linear(&self) -> [f32; 3] {
        let decode = |c: u8| {
            let c = c as f32 / 255.0;
            if c <= 0.040_45 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [decode(self.r), decode(self.g), decode(self.b)]
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
