// SPDX-License-Identifier: MIT
//
// Gradient display names — one adjective, one noun, a space between.
//
// Both lists are closed 25-entry sets, giving 625 possible names.
// Repeats are possible and deliberately not deduplicated.

use rand::Rng;

/// Adjectives for gradient names.
pub const ADJECTIVES: [&str; 25] = [
    "Cosmic", "Vibrant", "Electric", "Mystic", "Serene",
    "Dreamy", "Bold", "Subtle", "Radiant", "Ethereal",
    "Glowing", "Tranquil", "Dynamic", "Vivid", "Hazy",
    "Luminous", "Crisp", "Neon", "Pastel", "Rich",
    "Soft", "Deep", "Fresh", "Bright", "Gentle",
];

/// Nouns for gradient names.
pub const NOUNS: [&str; 25] = [
    "Sunset", "Ocean", "Aurora", "Horizon", "Nebula",
    "Wave", "Bloom", "Dusk", "Dawn", "Flame",
    "Mist", "Breeze", "Sky", "Galaxy", "Forest",
    "Shadow", "Mirage", "Glow", "Prism", "Cascade",
    "Aura", "Haze", "Cloud", "Dream", "Spark",
];

/// Pick a random adjective + noun pair, uniformly from each list.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{adjective} {noun}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
