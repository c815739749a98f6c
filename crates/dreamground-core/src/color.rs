//! 32-bit ARGB colors.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A color with an alpha channel, packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const GREEN: Self = Self(0xFF00_FF00);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xFF, r, g, b)
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(a, self.r(), self.g(), self.b())
    }

    /// Scale the alpha channel by `factor`, clamping the result to `0..=255`.
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = if factor.is_nan() { 0.0 } else { factor };
        let a = (self.a() as f32 * factor).round().clamp(0.0, 255.0) as u8;
        self.with_alpha(a)
    }

    /// Per-channel linear blend from `self` (t = 0) to `other` (t = 1).
    ///
    /// The endpoints are returned exactly; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |from: u8, to: u8| -> u8 {
            let from = from as f32;
            (from + (to as f32 - from) * t).round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            mix(self.a(), other.a()),
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
        )
    }

    /// Composite `self` over `dst` (source-over). The result keeps the
    /// destination alpha combined with the source.
    pub fn over(self, dst: Self) -> Self {
        match self.a() {
            0 => dst,
            255 => self,
            sa => {
                let sa = sa as u32;
                let inv = 255 - sa;
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8;
                let a = sa + (dst.a() as u32 * inv + 127) / 255;
                Self::new(
                    a.min(255) as u8,
                    mix(self.r(), dst.r()),
                    mix(self.g(), dst.g()),
                    mix(self.b(), dst.b()),
                )
            }
        }
    }
}

impl From<Argb> for Color {
    fn from(c: Argb) -> Self {
        Color::Rgb(c.r(), c.g(), c.b())
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Error returned when a color string is not `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(String);

impl FromStr for Argb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        match hex.len() {
            6 => Ok(Self(0xFF00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Argb {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Argb> for String {
    fn from(c: Argb) -> Self {
        c.to_string()
    }
}

/// Convert HSL to an opaque color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Argb {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Argb::rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Argb::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
