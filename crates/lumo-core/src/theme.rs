// SPDX-License-Identifier: MIT
//
// UI accent themes.
//
// A theme is purely presentational: a named pair of accent colors used
// to tint the chrome. The selection persists across sessions.

use lumo_color::Rgb;
use serde::{Deserialize, Serialize};

/// The selectable UI themes, each with a primary/secondary accent pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Sunset,
    Ocean,
    Neon,
}

impl Theme {
    /// All themes, in cycle order.
    pub const ALL: [Self; 3] = [Self::Sunset, Self::Ocean, Self::Neon];

    /// The persisted name of this theme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
            Self::Neon => "neon",
        }
    }

    /// Parse a persisted theme name (case-insensitive). Unknown names
    /// yield `None`; callers fall back to the default.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL.into_iter().find(|t| t.name() == lower)
    }

    /// The next theme in the cycle (wraps around).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Sunset => Self::Ocean,
            Self::Ocean => Self::Neon,
            Self::Neon => Self::Sunset,
        }
    }

    /// Primary accent color.
    #[must_use]
    pub const fn primary(self) -> Rgb {
        match self {
            Self::Sunset => Rgb::new(0xf9, 0x73, 0x16),
            Self::Ocean => Rgb::new(0x3b, 0x82, 0xf6),
            Self::Neon => Rgb::new(0x8b, 0x5c, 0xf6),
        }
    }

    /// Secondary accent color.
    #[must_use]
    pub const fn secondary(self) -> Rgb {
        match self {
            Self::Sunset | Self::Neon => Rgb::new(0xec, 0x48, 0x99),
            Self::Ocean => Rgb::new(0x06, 0xb6, 0xd4),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
