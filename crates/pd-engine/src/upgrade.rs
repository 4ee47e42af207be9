//! The global upgrade catalog and weighted offer selection.
//!
//! Every fifth checkpoint the player picks one of three upgrades drawn
//! from the static catalog, weighted by rarity. The catalog is
//! configuration data: entries are never constructed or mutated at
//! runtime, and actions reference them by id.

use rand::Rng;
use rand::rngs::StdRng;

use crate::dice::Die;
use crate::state::GameState;

/// How many upgrades are offered at once.
pub const OFFER_COUNT: usize = 3;

/// A global upgrade: a named, weighted, pure state transformation.
#[derive(Debug, Clone, Copy)]
pub struct Upgrade {
    /// Stable catalog id, carried by `APPLY_UPGRADE` actions.
    pub id: &'static str,
    /// Player-facing description.
    pub name: &'static str,
    /// Relative selection weight; higher is offered more often.
    pub rarity: u32,
    /// The transformation this upgrade performs. Total: must succeed on
    /// any state.
    pub apply: fn(&GameState, &mut StdRng) -> GameState,
}

/// The full static catalog.
pub const CATALOG: &[Upgrade] = &[
    Upgrade {
        id: "extra_die",
        name: "Gain an extra six-sided die",
        rarity: 1,
        apply: extra_die,
    },
    Upgrade {
        id: "upgrade_two_dice",
        name: "Upgrade two dice by one level",
        rarity: 1,
        apply: upgrade_two_dice,
    },
    Upgrade {
        id: "fresh_start",
        name: "Drop every die to level 1, gain two ten-sided dice",
        rarity: 2,
        apply: fresh_start,
    },
    Upgrade {
        id: "cheaper_dice",
        name: "New dice cost 25% less",
        rarity: 1,
        apply: cheaper_dice,
    },
    Upgrade {
        id: "cheaper_upgrades",
        name: "Die upgrades cost 25% less",
        rarity: 1,
        apply: cheaper_upgrades,
    },
];

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static Upgrade> {
    CATALOG.iter().find(|u| u.id == id)
}

fn extra_die(state: &GameState, rng: &mut StdRng) -> GameState {
    let mut next = state.clone();
    next.dice.push(Die::roll_new(1, rng));
    next
}

fn upgrade_two_dice(state: &GameState, rng: &mut StdRng) -> GameState {
    let mut next = state.clone();
    let mut bumped = 0;
    for die in &mut next.dice {
        if bumped == 2 {
            break;
        }
        if die.upgradable() {
            *die = die.upgraded(rng);
            bumped += 1;
        }
    }
    next
}

fn fresh_start(state: &GameState, rng: &mut StdRng) -> GameState {
    let mut next = state.clone();
    for die in &mut next.dice {
        *die = Die::roll_new(1, rng);
    }
    next.dice.push(Die::roll_new(3, rng));
    next.dice.push(Die::roll_new(3, rng));
    next
}

fn cheaper_dice(state: &GameState, _rng: &mut StdRng) -> GameState {
    let mut next = state.clone();
    next.buy_cost = (next.buy_cost * 3 / 4).max(1);
    next
}

fn cheaper_upgrades(state: &GameState, _rng: &mut StdRng) -> GameState {
    let mut next = state.clone();
    next.upgrade_cost = (next.upgrade_cost * 3 / 4).max(1);
    next
}

/// A draw-without-replacement pool over the catalog, where each entry
/// occupies `rarity` tickets.
struct WeightedPool {
    /// Remaining (catalog index, weight) entries.
    entries: Vec<(usize, u32)>,
}

impl WeightedPool {
    fn over_catalog() -> Self {
        let entries = CATALOG
            .iter()
            .enumerate()
            .filter(|(_, u)| u.rarity > 0)
            .map(|(i, u)| (i, u.rarity))
            .collect();
        Self { entries }
    }

    fn total_weight(&self) -> u32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Draw one entry proportionally to weight and remove it entirely.
    fn draw(&mut self, rng: &mut StdRng) -> Option<usize> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let ticket = rng.random_range(0..total);
        let mut cumulative = 0;
        let pos = self
            .entries
            .iter()
            .position(|(_, w)| {
                cumulative += w;
                ticket < cumulative
            })
            .unwrap_or(self.entries.len() - 1);
        Some(self.entries.swap_remove(pos).0)
    }
}

/// Draw up to `count` distinct upgrades from the catalog, weighted by
/// rarity. Returns fewer when the catalog runs out.
pub fn select_upgrades(rng: &mut StdRng, count: usize) -> Vec<&'static Upgrade> {
    let mut pool = WeightedPool::over_catalog();
    let mut selected = Vec::new();
    while selected.len() < count {
        match pool.draw(rng) {
            Some(i) => selected.push(&CATALOG[i]),
            None => break,
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{INITIAL_BUY_COST, INITIAL_UPGRADE_COST};
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn base_state() -> GameState {
        let mut rng = StdRng::seed_from_u64(1);
        GameState::initial(&mut rng)
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("extra_die").map(|u| u.id), Some("extra_die"));
        assert!(find("nonsense").is_none());
    }

    #[test]
    fn extra_die_adds_a_d6() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = base_state();
        let next = (find("extra_die").unwrap().apply)(&state, &mut rng);
        assert_eq!(next.dice.len(), state.dice.len() + 1);
        let added = next.dice.last().unwrap();
        assert_eq!(added.level, 1);
        assert!((1..=6).contains(&added.value));
    }

    #[test]
    fn upgrade_two_dice_bumps_first_two_eligible() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = base_state();
        state.dice = vec![
            Die { value: 1, level: 4 }, // maxed, skipped
            Die { value: 2, level: 1 },
            Die { value: 3, level: 2 },
            Die { value: 4, level: 1 }, // third eligible, untouched
        ];
        let next = (find("upgrade_two_dice").unwrap().apply)(&state, &mut rng);
        assert_eq!(next.dice[0].level, 4);
        assert_eq!(next.dice[1].level, 2);
        assert_eq!(next.dice[2].level, 3);
        assert_eq!(next.dice[3].level, 1);
        assert_eq!(next.dice[3].value, 4);
    }

    #[test]
    fn upgrade_two_dice_with_all_maxed_is_inert() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = base_state();
        state.dice = vec![Die { value: 9, level: 4 }];
        let next = (find("upgrade_two_dice").unwrap().apply)(&state, &mut rng);
        assert_eq!(next, state);
    }

    #[test]
    fn fresh_start_levels_down_and_adds_two_d10s() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = base_state();
        state.dice = vec![
            Die { value: 19, level: 4 },
            Die { value: 7, level: 2 },
        ];
        let next = (find("fresh_start").unwrap().apply)(&state, &mut rng);
        assert_eq!(next.dice.len(), 4);
        assert!(next.dice[..2].iter().all(|d| d.level == 1));
        assert!(next.dice[2..].iter().all(|d| d.level == 3));
    }

    #[test]
    fn cost_reductions_floor_at_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = base_state();
        assert_eq!(state.buy_cost, INITIAL_BUY_COST);
        assert_eq!(state.upgrade_cost, INITIAL_UPGRADE_COST);

        let next = (find("cheaper_dice").unwrap().apply)(&state, &mut rng);
        assert_eq!(next.buy_cost, INITIAL_BUY_COST * 3 / 4);

        state.buy_cost = 1;
        state.upgrade_cost = 1;
        let next = (find("cheaper_dice").unwrap().apply)(&state, &mut rng);
        assert_eq!(next.buy_cost, 1);
        let next = (find("cheaper_upgrades").unwrap().apply)(&state, &mut rng);
        assert_eq!(next.upgrade_cost, 1);
    }

    #[test]
    fn selection_is_distinct_and_bounded() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let picks = select_upgrades(&mut rng, OFFER_COUNT);
            assert_eq!(picks.len(), OFFER_COUNT.min(CATALOG.len()));
            for (i, a) in picks.iter().enumerate() {
                for b in &picks[i + 1..] {
                    assert_ne!(a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn oversized_count_returns_whole_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks = select_upgrades(&mut rng, CATALOG.len() + 10);
        assert_eq!(picks.len(), CATALOG.len());
    }

    #[test]
    fn selection_deterministic_with_seed() {
        let mut rng1 = StdRng::seed_from_u64(8);
        let mut rng2 = StdRng::seed_from_u64(8);
        let a: Vec<_> = select_upgrades(&mut rng1, 3).iter().map(|u| u.id).collect();
        let b: Vec<_> = select_upgrades(&mut rng2, 3).iter().map(|u| u.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn rarity_biases_selection() {
        // fresh_start has weight 2 of 6; the first draw should land on it
        // roughly a third of the time.
        let mut rng = StdRng::seed_from_u64(9);
        let mut hits = 0;
        let trials = 2000;
        for _ in 0..trials {
            let mut pool = WeightedPool::over_catalog();
            let first = pool.draw(&mut rng).unwrap();
            if CATALOG[first].id == "fresh_start" {
                hits += 1;
            }
        }
        let share = f64::from(hits) / f64::from(trials);
        assert!((0.25..0.42).contains(&share), "share was {share}");
    }

    proptest! {
        #[test]
        fn any_count_never_duplicates(seed in 0u64..1000, count in 0usize..10) {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = select_upgrades(&mut rng, count);
            prop_assert_eq!(picks.len(), count.min(CATALOG.len()));
            for (i, a) in picks.iter().enumerate() {
                for b in &picks[i + 1..] {
                    prop_assert_ne!(a.id, b.id);
                }
            }
        }
    }
}
