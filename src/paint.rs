//! Colors and paints used when issuing draw calls.
//!
//! A [`Paint`] is per-emitter render configuration. Emitters mutate their
//! paints in place every frame (alpha per particle) under the single-writer
//! frame discipline, so paints are never shared between emitters.

use crate::error::ParseColorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Packed 32-bit ARGB color (`0xAARRGGBB`).
///
/// Serializes as a `#AARRGGBB` string and parses both `#RRGGBB` (opaque)
/// and `#AARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const TRANSPARENT: Color = Color(0);

    /// Color from individual channels.
    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Opaque color from RGB channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Same RGB with the alpha channel replaced.
    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Color((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    /// Channels in `[r, g, b, a]` order, as image buffers store them.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color(argb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    /// Interior only (default).
    #[default]
    Fill,
    /// Outline only, `stroke_width` wide.
    Stroke,
    /// Interior plus an outline extending half the stroke width outward.
    FillAndStroke,
}

/// Drawing attributes for one kind of primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Color including its alpha channel.
    pub color: Color,
    /// Fill style.
    pub style: PaintStyle,
    /// Stroke width for outlines and path segments.
    pub stroke_width: f32,
    /// Soften shape edges.
    pub anti_alias: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            anti_alias: false,
        }
    }
}

impl Paint {
    /// Create a paint with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill style.
    pub fn style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the stroke width.
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Enable edge softening.
    pub fn anti_alias(mut self, enabled: bool) -> Self {
        self.anti_alias = enabled;
        self
    }

    /// Replace the color, alpha channel included.
    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Replace only the alpha channel of the current color.
    #[inline]
    pub fn set_alpha(&mut self, alpha: u8) {
        self.color = self.color.with_alpha(alpha);
    }
}
