// SPDX-License-Identifier: MIT
//
// Randomized gradient generation.
//
// The factory is total: every call yields a gradient, no failure modes.
// Color ranges are deliberately mid-range — saturation 70–99%, lightness
// 35–64% — so random pairs stay vivid and usually readable. Half of all
// gradients get a hue-complement second stop for a harmonious pair.

use std::time::{SystemTime, UNIX_EPOCH};

use lumo_color::Hsl;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::gradient::{Gradient, GradientKind};
use crate::name;

/// Base-36 digits for gradient ids.
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a gradient id. Collisions across a session are possible and
/// accepted; nothing persists long enough for them to matter.
const ID_LEN: usize = 7;

/// Produces random gradients from an owned small RNG.
///
/// The RNG is seedable so tests can pin the exact sequence; production
/// use seeds from the OS.
#[derive(Debug)]
pub struct GradientFactory {
    rng: SmallRng,
}

impl GradientFactory {
    /// Create a factory seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Create a factory with a fixed seed (deterministic output).
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate one random gradient.
    ///
    /// Always linear; angle uniform in [0, 360); first stop uniform in
    /// the mid-range window; second stop is the complement of the first
    /// with probability 0.5, otherwise independent.
    pub fn generate(&mut self) -> Gradient {
        let angle = self.rng.random_range(0..360u16);
        let first = self.random_color();
        let second = if self.rng.random_bool(0.5) {
            first.complement()
        } else {
            self.random_color()
        };

        Gradient {
            id: self.random_id(),
            name: name::random_name(&mut self.rng),
            kind: GradientKind::Linear,
            colors: [first, second],
            angle,
            locked: false,
            favorite: false,
            created_at: now_millis(),
        }
    }

    /// Generate a full set of `n` gradients.
    pub fn generate_set(&mut self, n: usize) -> Vec<Gradient> {
        (0..n).map(|_| self.generate()).collect()
    }

    /// A uniform random mid-range HSL color: hue 0–359, saturation
    /// 70–99%, lightness 35–64%.
    pub fn random_color(&mut self) -> Hsl {
        Hsl {
            h: self.rng.random_range(0..360),
            s: self.rng.random_range(70..100),
            l: self.rng.random_range(35..65),
        }
    }

    /// A random 7-character base-36 id.
    fn random_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_ALPHABET[self.rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for GradientFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds since the Unix epoch. Saturates to zero if the clock is
/// somehow before 1970.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── Value ranges ────────────────────────────────────────────────────

    #[test]
    fn generated_fields_in_range() {
        let mut factory = GradientFactory::seeded(99);
        for _ in 0..10_000 {
            let g = factory.generate();
            assert_eq!(g.colors.len(), 2);
            assert!(g.angle < 360, "angle out of range: {}", g.angle);
            assert_eq!(g.kind, GradientKind::Linear);
            assert!(!g.locked);
            assert!(!g.favorite);
            for color in g.colors {
                assert!(color.h < 360, "hue out of range: {}", color.h);
                assert!((70..100).contains(&color.s), "saturation: {}", color.s);
                assert!((35..65).contains(&color.l), "lightness: {}", color.l);
            }
        }
    }

    #[test]
    fn ids_are_base36_of_fixed_length() {
        let mut factory = GradientFactory::seeded(3);
        for _ in 0..1000 {
            let g = factory.generate();
            assert_eq!(g.id.len(), ID_LEN);
            assert!(
                g.id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()),
                "non-base36 id: {}",
                g.id
            );
        }
    }

    // ── Complement branch ───────────────────────────────────────────────

    #[test]
    fn complement_pairs_appear_about_half_the_time() {
        let mut factory = GradientFactory::seeded(5);
        let complements = (0..2000)
            .filter(|_| {
                let g = factory.generate();
                let [a, b] = g.colors;
                b == a.complement()
            })
            .count();
        // Loose bound: a fair coin over 2000 trials stays well inside.
        assert!(
            (800..1200).contains(&complements),
            "complement count: {complements}"
        );
    }

    #[test]
    fn complement_has_expected_hue() {
        // A first stop at hue 200 must complement to hue 20 with
        // saturation and lightness unchanged.
        let first = Hsl::new(200, 80, 50);
        let second = first.complement();
        assert_eq!(second.h, 20);
        assert_eq!(second.s, first.s);
        assert_eq!(second.l, first.l);
    }

    // ── Determinism ─────────────────────────────────────────────────────

    #[test]
    fn seeded_factories_agree() {
        let mut a = GradientFactory::seeded(1234);
        let mut b = GradientFactory::seeded(1234);
        for _ in 0..50 {
            let (ga, gb) = (a.generate(), b.generate());
            assert_eq!(ga.id, gb.id);
            assert_eq!(ga.name, gb.name);
            assert_eq!(ga.colors, gb.colors);
            assert_eq!(ga.angle, gb.angle);
        }
    }

    #[test]
    fn generate_set_size() {
        let mut factory = GradientFactory::seeded(8);
        assert_eq!(factory.generate_set(8).len(), 8);
        assert!(factory.generate_set(0).is_empty());
    }
}
