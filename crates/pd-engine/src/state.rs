//! Game state and tunable rule constants.
//!
//! [`GameState`] is the single root aggregate handed to hosts. Transitions
//! replace the whole value; nothing in here is mutated in place, so hosts
//! can keep earlier snapshots around for undo or replay.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::score::{Highlights, analyse_roll};

/// Rounds in one checkpoint cycle.
pub const ROLLS_PER_CHECK: u32 = 3;

/// Rerolls granted at the start of every round.
pub const REROLL_BUDGET: u32 = 2;

/// Points required to clear the first checkpoint.
pub const START_CHECKPOINT_POINTS: u64 = 15;

/// Exponential growth of the checkpoint requirement.
pub const CHECK_GROWTH: f64 = 1.6;

/// Every Nth checkpoint offers a pick-one global upgrade instead of going
/// straight back to rolling.
pub const UPGRADE_INTERVAL: u32 = 5;

/// Starting price of a new die.
pub const INITIAL_BUY_COST: u64 = 20;

/// Starting price of a die upgrade.
pub const INITIAL_UPGRADE_COST: u64 = 10;

/// Points required to clear the given checkpoint (1-based).
pub fn required_for_checkpoint(checkpoint: u32) -> u64 {
    let exponent = checkpoint.saturating_sub(1).min(i32::MAX as u32) as i32;
    let required = START_CHECKPOINT_POINTS as f64 * CHECK_GROWTH.powi(exponent);
    required.ceil() as u64
}

/// Which actions are currently legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Dice may be rerolled and then locked in.
    Roll,
    /// A checkpoint was cleared; shop purchases are open.
    Shop,
    /// A global upgrade must be picked from the current offers.
    UpgradeSelection {
        /// Catalog ids of the offered upgrades.
        offers: Vec<String>,
    },
    /// Terminal: the checkpoint was missed. Only `RESET` leaves this.
    Lose,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Roll => write!(f, "ROLL"),
            Self::Shop => write!(f, "SHOP"),
            Self::UpgradeSelection { .. } => write!(f, "UPGRADE_SELECTION"),
            Self::Lose => write!(f, "LOSE"),
        }
    }
}

/// The complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Dice in display order (order carries no scoring meaning).
    pub dice: Vec<Die>,
    /// Duplicate-group colours for the faces currently showing.
    pub highlights: Highlights,
    /// Current phase.
    pub phase: Phase,
    /// Accumulated points.
    pub points: u64,
    /// Rerolls left this round.
    pub rerolls_left: u32,
    /// Checkpoint currently being played (1-based).
    pub checkpoint: u32,
    /// Round within the current checkpoint cycle, `1..=ROLLS_PER_CHECK`.
    pub round: u32,
    /// Points needed to clear the current checkpoint.
    pub required: u64,
    /// Points gained by the last locked-in roll.
    pub gained: u64,
    /// Base sum of the last locked-in roll.
    pub base: u64,
    /// Multiplier of the last locked-in roll.
    pub multiplier: u64,
    /// Price of the next die purchase.
    pub buy_cost: u64,
    /// Price of the next die upgrade.
    pub upgrade_cost: u64,
}

impl GameState {
    /// The canonical starting state: one freshly rolled d6, a full reroll
    /// budget, and the first checkpoint requirement.
    pub fn initial(rng: &mut StdRng) -> Self {
        let dice = vec![Die::roll_new(1, rng)];
        let highlights = analyse_roll(&[dice[0].value]).highlights;
        Self {
            dice,
            highlights,
            phase: Phase::Roll,
            points: 0,
            rerolls_left: REROLL_BUDGET,
            checkpoint: 1,
            round: 1,
            required: required_for_checkpoint(1),
            gained: 0,
            base: 0,
            multiplier: 1,
            buy_cost: INITIAL_BUY_COST,
            upgrade_cost: INITIAL_UPGRADE_COST,
        }
    }

    /// Face values of the dice in display order.
    pub fn faces(&self) -> Vec<u32> {
        self.dice.iter().map(|d| d.value).collect()
    }
}
