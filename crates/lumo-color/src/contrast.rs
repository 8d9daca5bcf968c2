// SPDX-License-Identifier: MIT
//
// WCAG 2.1 contrast math for gradient stops.
//
// Readability is checked in sRGB relative luminance space (the WCAG
// definition): linearize each channel with the piecewise sRGB transfer
// curve, weight by the luminous efficiency coefficients, then compare
// the two luminances with the (L + 0.05) ratio.

use crate::hsl::{Hsl, Rgb};

/// WCAG AA contrast threshold for normal-size text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Channels are normalized to [0, 1] and linearized with the piecewise
/// sRGB curve (linear below 0.03928, power 2.4 above), then combined as
/// `0.2126 R + 0.7152 G + 0.0722 B`. Returns a value in [0.0, 1.0].
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let r = linearize(f64::from(color.r) / 255.0);
    let g = linearize(f64::from(color.g) / 255.0);
    let b = linearize(f64::from(color.b) / 255.0);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]; the lighter luminance always goes in
/// the numerator, so the result is independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    luminance_ratio(relative_luminance(a), relative_luminance(b))
}

/// The contrast ratio `(lighter + 0.05) / (darker + 0.05)` of two
/// relative luminances, in either order.
#[must_use]
pub fn luminance_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether two HSL color strings meet WCAG AA contrast for normal text.
///
/// Fails open: if either string is not a valid `hsl(H, S%, L%)` color,
/// the pair is reported as acceptable. Malformed stored data must never
/// block the UI; the check exists to badge low-contrast pairs, not to
/// gate anything.
#[must_use]
pub fn has_adequate_contrast(color1: &str, color2: &str) -> bool {
    let (Some(a), Some(b)) = (Hsl::parse(color1), Hsl::parse(color2)) else {
        return true;
    };
    contrast_ratio(a.to_rgb(), b.to_rgb()) >= AA_NORMAL_TEXT
}

/// Piecewise sRGB linearization.
fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
