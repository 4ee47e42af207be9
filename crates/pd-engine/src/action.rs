//! Player actions — the wire shape hosts dispatch.
//!
//! Serialized form is a tagged object, `{"type": "FINISH_ROLL"}` or
//! `{"type": "APPLY_UPGRADE", "upgrade": "extra_die"}`. Unrecognized type
//! tags deserialize to [`Action::Unknown`] instead of failing, so a host
//! can forward anything and the reducer simply ignores what it does not
//! understand.

use serde::{Deserialize, Serialize};

/// A player action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Reroll every die, spending one reroll.
    Roll,
    /// Lock in the current dice and score them.
    FinishRoll,
    /// Buy one new level-1 die.
    BuyDie,
    /// Upgrade a random eligible die by one level.
    UpgradeDie,
    /// Leave the shop and start the next checkpoint cycle.
    NextCheckpoint,
    /// Take one of the offered global upgrades.
    ApplyUpgrade {
        /// Catalog id of the chosen upgrade.
        upgrade: String,
    },
    /// Start over from the canonical initial state.
    Reset,
    /// Any unrecognized action type; always a no-op.
    #[serde(other)]
    Unknown,
}
