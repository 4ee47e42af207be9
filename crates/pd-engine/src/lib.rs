//! Game core for Pipdream, a push-your-luck dice game.
//!
//! Players roll a pool of dice, reroll up to twice, then lock the roll
//! in. Duplicate faces multiply the score: the multiplier is the product
//! of every duplicate-group size. Every third locked roll is a checkpoint
//! with an exponentially growing point requirement; missing one ends the
//! run. Cleared checkpoints open a shop for more dice and die upgrades,
//! and every fifth checkpoint offers a pick-one global upgrade instead.
//!
//! The crate is a pure state machine: [`reduce`] maps a [`GameState`] and
//! an [`Action`] to the next state, with all randomness drawn from an
//! injected `StdRng`, so a seeded run replays exactly. Actions with unmet
//! preconditions (or unknown types) are inert — the reducer never fails.
//! [`Session`] layers the host conveniences on top: a seeded RNG, a
//! dispatch [`Journal`], and text-command processing.

pub mod action;
pub mod dice;
pub mod error;
pub mod journal;
pub mod reducer;
pub mod score;
pub mod session;
pub mod state;
pub mod upgrade;

pub use action::Action;
pub use dice::{Die, MAX_LEVEL, sides_for_level};
pub use error::{EngineError, EngineResult};
pub use journal::{Journal, JournalEntry};
pub use reducer::{initial_state, reduce};
pub use score::{GroupColour, Highlights, RollAnalysis, analyse_roll};
pub use session::{Session, SessionConfig};
pub use state::{GameState, Phase, required_for_checkpoint};
pub use upgrade::{CATALOG, Upgrade, select_upgrades};
