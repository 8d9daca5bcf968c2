// SPDX-License-Identifier: MIT
//
// lumo-color — the color model for lumo.
//
// Gradients are specified and displayed as integer HSL triplets in the
// literal CSS form `hsl(H, S%, L%)`. This crate owns that string form
// (parsing and formatting), the HSL → RGB conversion used for rendering,
// and the WCAG 2.1 contrast math that flags unreadable color pairs.
//
// The contrast check deliberately fails open: a color string that does
// not parse is treated as "contrast is acceptable" rather than as an
// error, so malformed stored data can never block the UI.

pub mod contrast;
pub mod hsl;

pub use contrast::{AA_NORMAL_TEXT, contrast_ratio, has_adequate_contrast, relative_luminance};
pub use hsl::{Hsl, Rgb};
