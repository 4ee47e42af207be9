//! Dice and the upgrade ladder.
//!
//! Every die sits on a fixed ladder of face counts (d6 → d8 → d10 → d20).
//! Upgrading a die moves it one rung up and rerolls it on the new side
//! count; a die never moves back down except through a global upgrade
//! that says so.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Face counts per die level, from level 1 upward.
pub const LEVEL_SIDES: [u32; 4] = [6, 8, 10, 20];

/// Highest level a die can reach.
pub const MAX_LEVEL: u32 = LEVEL_SIDES.len() as u32;

/// Returns the number of faces for a die level (clamped to the ladder).
pub fn sides_for_level(level: u32) -> u32 {
    let idx = level.clamp(1, MAX_LEVEL) - 1;
    LEVEL_SIDES[idx as usize]
}

/// A single die: the face currently showing and its ladder position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    /// The face currently showing, in `1..=sides_for_level(level)`.
    pub value: u32,
    /// Ladder position, `1..=MAX_LEVEL` (1 = d6, 4 = d20).
    pub level: u32,
}

impl Die {
    /// Roll a fresh die at the given level (clamped to the ladder).
    pub fn roll_new(level: u32, rng: &mut StdRng) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        Self {
            value: rng.random_range(1..=sides_for_level(level)),
            level,
        }
    }

    /// Reroll this die's face on its own side count.
    pub fn reroll(self, rng: &mut StdRng) -> Self {
        Self {
            value: rng.random_range(1..=self.sides()),
            ..self
        }
    }

    /// Move the die one rung up the ladder (capped at the top) and reroll
    /// it on the new side count.
    pub fn upgraded(self, rng: &mut StdRng) -> Self {
        Self::roll_new(self.level + 1, rng)
    }

    /// Whether this die is below the top of the ladder.
    pub fn upgradable(self) -> bool {
        self.level < MAX_LEVEL
    }

    /// Number of faces on this die.
    pub fn sides(self) -> u32 {
        sides_for_level(self.level)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (d{})", self.value, self.sides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn ladder_sides() {
        assert_eq!(sides_for_level(1), 6);
        assert_eq!(sides_for_level(2), 8);
        assert_eq!(sides_for_level(3), 10);
        assert_eq!(sides_for_level(4), 20);
    }

    #[test]
    fn sides_clamped_to_ladder() {
        assert_eq!(sides_for_level(0), 6);
        assert_eq!(sides_for_level(99), 20);
    }

    #[test]
    fn roll_new_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let die = Die::roll_new(1, &mut rng);
            assert!((1..=6).contains(&die.value));
            assert_eq!(die.level, 1);
        }
    }

    #[test]
    fn roll_new_clamps_level() {
        let mut rng = StdRng::seed_from_u64(42);
        let die = Die::roll_new(99, &mut rng);
        assert_eq!(die.level, MAX_LEVEL);
        assert!((1..=20).contains(&die.value));
    }

    #[test]
    fn reroll_keeps_level() {
        let mut rng = StdRng::seed_from_u64(7);
        let die = Die::roll_new(3, &mut rng);
        let rerolled = die.reroll(&mut rng);
        assert_eq!(rerolled.level, 3);
        assert!((1..=10).contains(&rerolled.value));
    }

    #[test]
    fn upgrade_moves_one_rung() {
        let mut rng = StdRng::seed_from_u64(7);
        let die = Die { value: 4, level: 1 };
        let up = die.upgraded(&mut rng);
        assert_eq!(up.level, 2);
        assert!((1..=8).contains(&up.value));
    }

    #[test]
    fn upgrade_caps_at_max_level() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut die = Die { value: 1, level: 1 };
        for _ in 0..10 {
            die = die.upgraded(&mut rng);
        }
        assert_eq!(die.level, MAX_LEVEL);
        assert!(!die.upgradable());
    }

    #[test]
    fn upgradable_below_max() {
        assert!(Die { value: 1, level: 1 }.upgradable());
        assert!(Die { value: 1, level: 3 }.upgradable());
        assert!(!Die { value: 1, level: 4 }.upgradable());
    }

    #[test]
    fn display() {
        assert_eq!(Die { value: 4, level: 1 }.to_string(), "4 (d6)");
        assert_eq!(Die { value: 17, level: 4 }.to_string(), "17 (d20)");
    }

    #[test]
    fn deterministic_with_seed() {
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        for level in 1..=MAX_LEVEL {
            assert_eq!(Die::roll_new(level, &mut rng1), Die::roll_new(level, &mut rng2));
        }
    }
}
