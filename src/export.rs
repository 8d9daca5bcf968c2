// SPDX-License-Identifier: MIT
//
// PNG export and gradient sampling.
//
// One sampling function serves both surfaces: the exporter rasterizes a
// 400×400 image through it, and the grid view paints terminal swatches
// through it, so what the user sees is what lands in the file.
//
// Export runs synchronously inside the event handler. The frame stalls
// for the write, which keeps concurrent exports impossible without any
// locking.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{Rgba, RgbaImage};
use lumo_color::Rgb;
use lumo_core::{Gradient, GradientKind};

/// Exported image edge length in pixels.
pub const EXPORT_SIZE: u32 = 400;

// ─── Sampling ───────────────────────────────────────────────────────────────

/// Sample the gradient at normalized coordinates `u`, `v` ∈ [0, 1]
/// (origin top-left, `v` growing downward).
///
/// Linear gradients follow the CSS convention: the angle is measured
/// clockwise from "up", so 0° runs bottom-to-top and 90° left-to-right.
/// Radial gradients grow as circles from the center, reaching the end
/// stop at the farthest corner.
#[must_use]
pub fn sample(gradient: &Gradient, u: f64, v: f64) -> Rgb {
    let t = match gradient.kind {
        GradientKind::Linear => linear_position(f64::from(gradient.angle), u, v),
        GradientKind::Radial => radial_position(u, v),
    };
    mix(
        gradient.colors[0].to_rgb(),
        gradient.colors[1].to_rgb(),
        t.clamp(0.0, 1.0),
    )
}

/// Progress along the gradient line for a linear gradient on the unit
/// square.
fn linear_position(angle_deg: f64, u: f64, v: f64) -> f64 {
    let theta = angle_deg.to_radians();
    // Direction of increasing progress, y pointing down.
    let (dx, dy) = (theta.sin(), -theta.cos());
    // The gradient line spans the square's projection onto that direction.
    let span = dx.abs() + dy.abs();
    if span <= f64::EPSILON {
        return 0.0;
    }
    let centered = (u - 0.5) * dx + (v - 0.5) * dy;
    centered / span + 0.5
}

/// Progress for a circle radial gradient: distance from the center,
/// normalized so the end stop lands on the corners.
fn radial_position(u: f64, v: f64) -> f64 {
    let half_diagonal = 0.5 * std::f64::consts::SQRT_2;
    ((u - 0.5).hypot(v - 0.5)) / half_diagonal
}

/// Linear blend of the two stops at `t` ∈ [0, 1].
fn mix(start: Rgb, end: Rgb, t: f64) -> Rgb {
    let channel = |a: u8, b: u8| {
        let blended = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            blended.round().clamp(0.0, 255.0) as u8
        }
    };
    Rgb {
        r: channel(start.r, end.r),
        g: channel(start.g, end.g),
        b: channel(start.b, end.b),
    }
}

// ─── PNG export ─────────────────────────────────────────────────────────────

/// Rasterize the gradient to [`EXPORT_SIZE`]² pixels.
#[must_use]
pub fn render(gradient: &Gradient) -> RgbaImage {
    let edge = f64::from(EXPORT_SIZE - 1);
    RgbaImage::from_fn(EXPORT_SIZE, EXPORT_SIZE, |x, y| {
        let rgb = sample(gradient, f64::from(x) / edge, f64::from(y) / edge);
        Rgba([rgb.r, rgb.g, rgb.b, 0xff])
    })
}

/// File name for the export: display name lowercased and hyphenated,
/// with a `.png` suffix.
#[must_use]
pub fn file_name(gradient: &Gradient) -> String {
    format!("{}.png", gradient.file_stem())
}

/// Render the gradient and write it under `dir`, returning the path
/// written.
///
/// # Errors
///
/// Fails when the directory cannot be created or the PNG encode/write
/// fails.
pub fn write_png(gradient: &Gradient, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join(file_name(gradient));
    render(gradient)
        .save(&path)
        .with_context(|| format!("writing {}", path.display()))?;

    log::info!("exported {} to {}", gradient.name, path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
