// SPDX-License-Identifier: MIT
//
// HSL color triplets and their CSS string form.
//
// Single-character variable names (h, s, l, r, g, b, c, x, m) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

// ─── Rgb ────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create an RGB color from 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ─── Hsl ────────────────────────────────────────────────────────────────────

/// An integer HSL color: hue in degrees, saturation and lightness in percent.
///
/// This is the wire and display format for gradient stops — the same
/// `hsl(H, S%, L%)` string that appears in generated CSS and in persisted
/// favorites. [`Display`](fmt::Display) produces that form and
/// [`Hsl::parse`] accepts it strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    /// Hue angle in degrees, 0–359.
    pub h: u16,
    /// Saturation in percent, 0–100.
    pub s: u8,
    /// Lightness in percent, 0–100.
    pub l: u8,
}

impl Hsl {
    /// Create an HSL color. Hue is normalized into [0, 360); saturation and
    /// lightness are clamped to 100.
    #[must_use]
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self {
            h: h % 360,
            s: if s > 100 { 100 } else { s },
            l: if l > 100 { 100 } else { l },
        }
    }

    /// The hue complement: hue rotated 180°, same saturation and lightness.
    #[inline]
    #[must_use]
    pub const fn complement(self) -> Self {
        Self {
            h: (self.h + 180) % 360,
            ..self
        }
    }

    /// Parse the strict `hsl(H, S%, L%)` form.
    ///
    /// Integer fields only; whitespace is permitted after each comma and
    /// nowhere else. Any other shape yields `None` — callers treat
    /// unparsable colors per their own policy (the contrast check fails
    /// open, see [`crate::contrast`]).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let body = input.strip_prefix("hsl(")?.strip_suffix(')')?;
        let mut parts = body.split(',');

        let h = parse_u16(parts.next()?)?;
        let s = parse_percent(parts.next()?)?;
        let l = parse_percent(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self { h, s, l })
    }

    /// Convert to 8-bit sRGB.
    ///
    /// Standard piecewise HSL → RGB: chroma from saturation and lightness,
    /// intermediate component from the hue sector, channels rounded to the
    /// nearest integer in [0, 255].
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = f64::from(self.h);
        let s = f64::from(self.s) / 100.0;
        let l = f64::from(self.l) / 100.0;

        let c = (1.0 - (2.0f64.mul_add(l, -1.0)).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match self.h {
            0..60 => (c, x, 0.0),
            60..120 => (x, c, 0.0),
            120..180 => (0.0, c, x),
            180..240 => (0.0, x, c),
            240..300 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb {
            r: channel(r + m),
            g: channel(g + m),
            b: channel(b + m),
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl FromStr for Hsl {
    type Err = ParseHslError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(ParseHslError)
    }
}

/// Error returned by the [`FromStr`] impl for [`Hsl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseHslError;

impl fmt::Display for ParseHslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected `hsl(H, S%, L%)`")
    }
}

impl std::error::Error for ParseHslError {}

// Persisted gradients store their stops as the literal CSS strings, so
// Hsl serializes to and from its display form.

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hsl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text)
            .ok_or_else(|| de::Error::custom(format_args!("invalid HSL color `{text}`")))
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Round a normalized channel to 8 bits.
fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parse a bare unsigned integer with no surrounding whitespace.
fn parse_u16(field: &str) -> Option<u16> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse an integer percentage field: optional leading whitespace (the
/// character after a comma), digits, then a literal `%`.
fn parse_percent(field: &str) -> Option<u8> {
    parse_u16(field.trim_start().strip_suffix('%')?).and_then(|v| u8::try_from(v).ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
