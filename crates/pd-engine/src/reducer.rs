//! The game state machine.
//!
//! A pure reducer: `(state, action) -> state`. Every transition returns a
//! fresh [`GameState`]; an action whose precondition is unmet (wrong
//! phase, no rerolls, not enough points) returns the input unchanged.
//! The reducer never fails and touches nothing but the injected RNG.

use rand::Rng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::dice::Die;
use crate::score::analyse_roll;
use crate::state::{
    GameState, Phase, REROLL_BUDGET, ROLLS_PER_CHECK, UPGRADE_INTERVAL, required_for_checkpoint,
};
use crate::upgrade::{self, OFFER_COUNT, select_upgrades};

/// The canonical starting state.
pub fn initial_state(rng: &mut StdRng) -> GameState {
    GameState::initial(rng)
}

/// Advance the game by one action.
pub fn reduce(state: &GameState, action: &Action, rng: &mut StdRng) -> GameState {
    match action {
        Action::Roll => roll(state, rng),
        Action::FinishRoll => finish_roll(state, rng),
        Action::BuyDie => buy_die(state, rng),
        Action::UpgradeDie => upgrade_die(state, rng),
        Action::NextCheckpoint => next_checkpoint(state, rng),
        Action::ApplyUpgrade { upgrade } => apply_upgrade(state, upgrade, rng),
        Action::Reset => initial_state(rng),
        Action::Unknown => state.clone(),
    }
}

fn reroll_all(dice: &[Die], rng: &mut StdRng) -> Vec<Die> {
    dice.iter().map(|d| d.reroll(rng)).collect()
}

fn faces_of(dice: &[Die]) -> Vec<u32> {
    dice.iter().map(|d| d.value).collect()
}

fn roll(state: &GameState, rng: &mut StdRng) -> GameState {
    if state.phase != Phase::Roll || state.rerolls_left == 0 {
        return state.clone();
    }
    let dice = reroll_all(&state.dice, rng);
    let highlights = analyse_roll(&faces_of(&dice)).highlights;
    GameState {
        dice,
        highlights,
        rerolls_left: state.rerolls_left - 1,
        ..state.clone()
    }
}

fn finish_roll(state: &GameState, rng: &mut StdRng) -> GameState {
    if state.phase != Phase::Roll {
        return state.clone();
    }
    let analysis = analyse_roll(&state.faces());
    let points = state.points + analysis.total;

    if state.round == ROLLS_PER_CHECK {
        // Checkpoint evaluation. The dice stay on the table so the player
        // can see the roll that decided it.
        let phase = if points >= state.required {
            Phase::Shop
        } else {
            Phase::Lose
        };
        return GameState {
            points,
            gained: analysis.total,
            base: analysis.base,
            multiplier: analysis.multiplier,
            highlights: analysis.highlights,
            phase,
            ..state.clone()
        };
    }

    let dice = reroll_all(&state.dice, rng);
    let highlights = analyse_roll(&faces_of(&dice)).highlights;
    GameState {
        points,
        gained: analysis.total,
        base: analysis.base,
        multiplier: analysis.multiplier,
        dice,
        highlights,
        rerolls_left: REROLL_BUDGET,
        round: state.round + 1,
        ..state.clone()
    }
}

fn buy_die(state: &GameState, rng: &mut StdRng) -> GameState {
    if state.phase != Phase::Shop || state.points < state.buy_cost {
        return state.clone();
    }
    let mut dice = state.dice.clone();
    dice.push(Die::roll_new(1, rng));
    let highlights = analyse_roll(&faces_of(&dice)).highlights;
    GameState {
        points: state.points - state.buy_cost,
        buy_cost: state.buy_cost * 2,
        dice,
        highlights,
        ..state.clone()
    }
}

fn upgrade_die(state: &GameState, rng: &mut StdRng) -> GameState {
    if state.phase != Phase::Shop || state.points < state.upgrade_cost {
        return state.clone();
    }
    let eligible: Vec<usize> = state
        .dice
        .iter()
        .enumerate()
        .filter(|(_, d)| d.upgradable())
        .map(|(i, _)| i)
        .collect();
    if eligible.is_empty() {
        return state.clone();
    }
    let chosen = eligible[rng.random_range(0..eligible.len())];
    let mut dice = state.dice.clone();
    dice[chosen] = dice[chosen].upgraded(rng);
    let highlights = analyse_roll(&faces_of(&dice)).highlights;
    GameState {
        points: state.points - state.upgrade_cost,
        upgrade_cost: state.upgrade_cost * 2,
        dice,
        highlights,
        ..state.clone()
    }
}

fn next_checkpoint(state: &GameState, rng: &mut StdRng) -> GameState {
    if state.phase != Phase::Shop {
        return state.clone();
    }
    let checkpoint = state.checkpoint + 1;
    let mut next = GameState {
        checkpoint,
        required: required_for_checkpoint(checkpoint),
        round: 1,
        rerolls_left: REROLL_BUDGET,
        gained: 0,
        base: 0,
        multiplier: 1,
        ..state.clone()
    };
    if checkpoint % UPGRADE_INTERVAL == 0 {
        let offers = select_upgrades(rng, OFFER_COUNT)
            .iter()
            .map(|u| u.id.to_string())
            .collect();
        next.phase = Phase::UpgradeSelection { offers };
    } else {
        next.dice = reroll_all(&next.dice, rng);
        next.highlights = analyse_roll(&faces_of(&next.dice)).highlights;
        next.phase = Phase::Roll;
    }
    next
}

fn apply_upgrade(state: &GameState, id: &str, rng: &mut StdRng) -> GameState {
    let Phase::UpgradeSelection { offers } = &state.phase else {
        return state.clone();
    };
    if !offers.iter().any(|o| o == id) {
        return state.clone();
    }
    let Some(chosen) = upgrade::find(id) else {
        return state.clone();
    };
    let mut next = (chosen.apply)(state, rng);
    next.highlights = analyse_roll(&next.faces()).highlights;
    next.phase = Phase::Roll;
    next
}
