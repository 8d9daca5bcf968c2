// SPDX-License-Identifier: MIT
//
// The Gradient value record.
//
// Serde field names match the persisted JSON produced by earlier
// iterations of the studio (`type`, `isLocked`, `isFavorite`,
// `timestamp`, colors as literal HSL strings), so old favorites files
// load unchanged.

use lumo_color::{Hsl, contrast_ratio};
use serde::{Deserialize, Serialize};

// ─── GradientKind ───────────────────────────────────────────────────────────

/// The two-stop transition shape.
///
/// The factory only produces linear gradients; radial exists so that
/// favorites saved by earlier iterations still display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

impl GradientKind {
    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Radial => "radial",
        }
    }
}

// ─── Gradient ───────────────────────────────────────────────────────────────

/// A two-stop color gradient plus display metadata.
///
/// The `colors` pair is ordered: start stop, end stop. `angle` is only
/// meaningful for [`GradientKind::Linear`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    /// Opaque identifier, stable per generation. Random base-36; not
    /// guaranteed collision-free against history.
    pub id: String,

    /// Display name, adjective + noun.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: GradientKind,

    /// Start and end stops, in order.
    pub colors: [Hsl; 2],

    /// Direction in degrees, [0, 360). Linear gradients only.
    pub angle: u16,

    /// Excluded from regeneration while set.
    #[serde(rename = "isLocked")]
    pub locked: bool,

    /// Mirrored into the favorites collection while set.
    #[serde(rename = "isFavorite")]
    pub favorite: bool,

    /// Creation time, milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub created_at: u64,
}

impl Gradient {
    /// The CSS gradient value: `linear-gradient(<angle>deg, <c1>, <c2>)`
    /// or `radial-gradient(circle, <c1>, <c2>)`.
    #[must_use]
    pub fn css(&self) -> String {
        match self.kind {
            GradientKind::Linear => format!(
                "linear-gradient({}deg, {}, {})",
                self.angle, self.colors[0], self.colors[1]
            ),
            GradientKind::Radial => {
                format!("radial-gradient(circle, {}, {})", self.colors[0], self.colors[1])
            }
        }
    }

    /// The copy-to-clipboard payload: a full `background:` declaration.
    #[must_use]
    pub fn css_declaration(&self) -> String {
        format!("background: {};", self.css())
    }

    /// File name stem for exports: the display name lowercased with
    /// whitespace runs replaced by hyphens.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Whether the two stops meet WCAG AA contrast for normal text.
    ///
    /// Low-contrast pairs get a badge in the UI; nothing is blocked.
    #[must_use]
    pub fn adequate_contrast(&self) -> bool {
        contrast_ratio(self.colors[0].to_rgb(), self.colors[1].to_rgb())
            >= lumo_color::AA_NORMAL_TEXT
    }

    /// Short one-line descriptor: `Linear 137°` or `Radial`.
    #[must_use]
    pub fn descriptor(&self) -> String {
        match self.kind {
            GradientKind::Linear => format!("Linear {}°", self.angle),
            GradientKind::Radial => "Radial".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Gradient {
        Gradient {
            id: "abc1234".to_string(),
            name: "Cosmic Sunset".to_string(),
            kind: GradientKind::Linear,
            colors: [Hsl::new(200, 80, 50), Hsl::new(20, 80, 50)],
            angle: 137,
            locked: false,
            favorite: false,
            created_at: 1_700_000_000_000,
        }
    }

    // ── CSS forms ───────────────────────────────────────────────────────

    #[test]
    fn linear_css() {
        assert_eq!(
            sample().css(),
            "linear-gradient(137deg, hsl(200, 80%, 50%), hsl(20, 80%, 50%))"
        );
    }

    #[test]
    fn radial_css_ignores_angle() {
        let mut g = sample();
        g.kind = GradientKind::Radial;
        assert_eq!(
            g.css(),
            "radial-gradient(circle, hsl(200, 80%, 50%), hsl(20, 80%, 50%))"
        );
    }

    #[test]
    fn css_declaration_wraps_background() {
        assert_eq!(
            sample().css_declaration(),
            "background: linear-gradient(137deg, hsl(200, 80%, 50%), hsl(20, 80%, 50%));"
        );
    }

    // ── File stem ───────────────────────────────────────────────────────

    #[test]
    fn file_stem_lowercases_and_hyphenates() {
        assert_eq!(sample().file_stem(), "cosmic-sunset");
    }

    #[test]
    fn file_stem_collapses_whitespace() {
        let mut g = sample();
        g.name = "  Bold   Aurora ".to_string();
        assert_eq!(g.file_stem(), "bold-aurora");
    }

    // ── Contrast badge ──────────────────────────────────────────────────

    #[test]
    fn identical_stops_are_low_contrast() {
        let mut g = sample();
        g.colors = [Hsl::new(0, 80, 50), Hsl::new(0, 80, 50)];
        assert!(!g.adequate_contrast());
    }

    #[test]
    fn black_and_white_stops_pass() {
        let mut g = sample();
        g.colors = [Hsl::new(0, 0, 0), Hsl::new(0, 0, 100)];
        assert!(g.adequate_contrast());
    }

    // ── Descriptor ──────────────────────────────────────────────────────

    #[test]
    fn descriptors() {
        let mut g = sample();
        assert_eq!(g.descriptor(), "Linear 137°");
        g.kind = GradientKind::Radial;
        assert_eq!(g.descriptor(), "Radial");
    }

    // ── Serde compatibility ─────────────────────────────────────────────

    #[test]
    fn serializes_with_legacy_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "linear");
        assert_eq!(json["isLocked"], false);
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["timestamp"], 1_700_000_000_000u64);
        assert_eq!(json["colors"][0], "hsl(200, 80%, 50%)");
    }

    #[test]
    fn deserializes_legacy_record() {
        let json = r#"{
            "id": "k3x9a1z",
            "name": "Dreamy Nebula",
            "type": "radial",
            "colors": ["hsl(300, 90%, 40%)", "hsl(120, 75%, 60%)"],
            "angle": 0,
            "isLocked": true,
            "isFavorite": true,
            "timestamp": 1699999999999
        }"#;
        let g: Gradient = serde_json::from_str(json).unwrap();
        assert_eq!(g.kind, GradientKind::Radial);
        assert!(g.locked);
        assert!(g.favorite);
        assert_eq!(g.colors[1], Hsl::new(120, 75, 60));
    }

    #[test]
    fn round_trips_through_json() {
        let g = sample();
        let json = serde_json::to_string(&g).unwrap();
        let back: Gradient = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
