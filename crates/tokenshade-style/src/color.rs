// SPDX-License-Identifier: Apache-2.0
//! Color primitives: sRGB triples, alpha-carrying colors, and HSL.
//!
//! Token files spell colors three ways: hex (`#7A8585`, `#FFF`,
//! `#FF000080`), CSS functions (`rgb(1, 2, 3)`, `rgba(255,255,255,0)`), and
//! references to other tokens. This module handles the first two; references
//! belong to the token layer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a literal color.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
    /// Input is not in any recognized color syntax.
    #[error("unrecognized color syntax: {input}")]
    InvalidFormat { input: String },

    /// A hex string had the wrong number of digits.
    #[error("hex color must have 3, 6, or 8 digits: {input}")]
    InvalidHexLength { input: String },

    /// A hex string contained a non-hex character.
    #[error("invalid hex digit in {input}")]
    InvalidHexDigit { input: String },

    /// An `rgb()` channel was not an integer in 0..=255.
    #[error("invalid color channel '{channel}' in {input}")]
    InvalidChannel { input: String, channel: String },

    /// An alpha component was not a number in 0..=1.
    #[error("invalid alpha '{alpha}' in {input}")]
    InvalidAlpha { input: String, alpha: String },
}

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color, ignoring any alpha byte.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        Rgba::from_hex(input).map(|rgba| rgba.rgb)
    }

    /// Normalized uppercase `#RRGGBB` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        Hsl::from(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Rgba>().map(|rgba| rgba.rgb)
    }
}

/// A color with a straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    #[must_use]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// Parse `#RGB`, `#RRGGBB`, or `#RRGGBBAA`.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorParseError::InvalidFormat {
                input: input.to_string(),
            });
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHexDigit {
                input: input.to_string(),
            });
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError::InvalidHexDigit {
                input: input.to_string(),
            })
        };
        let nibble = |index: usize| byte(index..index + 1).map(|n| (n << 4) | n);

        match digits.len() {
            3 => Ok(Self::opaque(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))),
            6 => Ok(Self::opaque(Rgb::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))),
            8 => Ok(Self {
                rgb: Rgb::new(byte(0..2)?, byte(2..4)?, byte(4..6)?),
                alpha: f64::from(byte(6..8)?) / 255.0,
            }),
            _ => Err(ColorParseError::InvalidHexLength {
                input: input.to_string(),
            }),
        }
    }

    /// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    ///
    /// Channels are integers in 0..=255 and alpha is a number in 0..=1.
    /// Whitespace around components is ignored.
    pub fn from_css(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let invalid = || ColorParseError::InvalidFormat {
            input: input.to_string(),
        };

        let body = trimmed
            .strip_prefix("rgba")
            .or_else(|| trimmed.strip_prefix("rgb"))
            .ok_or_else(invalid)?
            .trim_start()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(invalid());
        }

        let channel = |raw: &str| {
            raw.parse::<u8>()
                .map_err(|_| ColorParseError::InvalidChannel {
                    input: input.to_string(),
                    channel: raw.to_string(),
                })
        };
        let rgb = Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
        let alpha = match parts.get(3) {
            Some(raw) => parse_alpha(raw).ok_or_else(|| ColorParseError::InvalidAlpha {
                input: input.to_string(),
                alpha: (*raw).to_string(),
            })?,
            None => 1.0,
        };

        Ok(Self { rgb, alpha })
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else if trimmed.starts_with("rgb") {
            Self::from_css(trimmed)
        } else {
            Err(ColorParseError::InvalidFormat {
                input: s.to_string(),
            })
        }
    }
}

/// Parse an alpha component in `0.0..=1.0`.
#[must_use]
pub fn parse_alpha(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    (value.is_finite() && (0.0..=1.0).contains(&value)).then_some(value)
}

/// HSL color. Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn to_rgb(self) -> Rgb {
        let Self { h, s, l } = self;
        if s <= f64::EPSILON {
            let v = unit_to_channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h / 360.0;

        Rgb::new(
            unit_to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
            unit_to_channel(hue_to_channel(p, q, h)),
            unit_to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
        )
    }
}

impl From<Rgb> for Hsl {
    #[allow(clippy::many_single_char_names)]
    fn from(rgb: Rgb) -> Self {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d.abs() < f64::EPSILON {
            return Self { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self {
            h: (h * 60.0).rem_euclid(360.0),
            s,
            l,
        }
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_six_digits() {
        assert_eq!(Rgb::from_hex("#7A8585").unwrap(), Rgb::new(0x7a, 0x85, 0x85));
        assert_eq!(Rgb::from_hex("#7a8585").unwrap(), Rgb::new(0x7a, 0x85, 0x85));
    }

    #[test]
    fn hex_short_form_expands_nibbles() {
        assert_eq!(Rgb::from_hex("#F0A").unwrap(), Rgb::new(0xff, 0x00, 0xaa));
    }

    #[test]
    fn hex_eight_digits_carries_alpha() {
        let rgba = Rgba::from_hex("#FF000080").unwrap();
        assert_eq!(rgba.rgb, Rgb::new(255, 0, 0));
        assert!((rgba.alpha - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn hex_rejects_bad_length_and_digits() {
        assert!(matches!(
            Rgb::from_hex("#12345"),
            Err(ColorParseError::InvalidHexLength { .. })
        ));
        assert!(matches!(
            Rgb::from_hex("#GGGGGG"),
            Err(ColorParseError::InvalidHexDigit { .. })
        ));
        assert!(matches!(
            Rgb::from_hex("123456"),
            Err(ColorParseError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn to_hex_is_uppercase() {
        assert_eq!(Rgb::new(0xab, 0x01, 0xff).to_hex(), "#AB01FF");
    }

    #[test]
    fn css_rgba_with_spaces() {
        let rgba = Rgba::from_css("rgba(255, 255, 255, 0)").unwrap();
        assert_eq!(rgba.rgb, Rgb::WHITE);
        assert_eq!(rgba.alpha, 0.0);

        let rgba = Rgba::from_css("rgb(1,2,3)").unwrap();
        assert_eq!(rgba.rgb, Rgb::new(1, 2, 3));
        assert_eq!(rgba.alpha, 1.0);
    }

    #[test]
    fn css_rejects_out_of_range() {
        assert!(matches!(
            Rgba::from_css("rgb(256, 0, 0)"),
            Err(ColorParseError::InvalidChannel { .. })
        ));
        assert!(matches!(
            Rgba::from_css("rgba(0, 0, 0, 1.5)"),
            Err(ColorParseError::InvalidAlpha { .. })
        ));
        assert!(matches!(
            Rgba::from_css("rgb(0, 0)"),
            Err(ColorParseError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn from_str_dispatches_by_syntax() {
        assert_eq!("#000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert_eq!("rgb(255,255,255)".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert!("{Olympus.Color.Global.Red1}".parse::<Rgb>().is_err());
    }

    #[test]
    fn hsl_primaries() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert!((red.h - 0.0).abs() < 1e-9);
        assert!((red.s - 1.0).abs() < 1e-9);
        assert!((red.l - 0.5).abs() < 1e-9);

        let blue = Rgb::new(0, 0, 255).to_hsl();
        assert!((blue.h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn hsl_round_trips_sample_colors() {
        for rgb in [
            Rgb::new(0x7a, 0x85, 0x85),
            Rgb::new(0x12, 0x34, 0x56),
            Rgb::new(200, 30, 90),
            Rgb::BLACK,
            Rgb::WHITE,
        ] {
            assert_eq!(rgb.to_hsl().to_rgb(), rgb, "round trip for {rgb}");
        }
    }

    #[test]
    fn hsl_new_clamps() {
        let hsl = Hsl::new(-30.0, 2.0, -1.0);
        assert!((hsl.h - 330.0).abs() < 1e-9);
        assert_eq!(hsl.s, 1.0);
        assert_eq!(hsl.l, 0.0);
    }
}
