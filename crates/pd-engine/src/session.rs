//! Interactive game session for line-based hosts.
//!
//! `Session` wraps the pure reducer with everything a host needs: a
//! seeded RNG, the current [`GameState`], and a [`Journal`] appended
//! around every dispatch. `process` additionally maps text commands to
//! actions so a CLI or chat frontend can stay a thin loop.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::error::{EngineError, EngineResult};
use crate::journal::{Journal, JournalEntry};
use crate::reducer::reduce;
use crate::score::GroupColour;
use crate::state::{GameState, Phase, ROLLS_PER_CHECK};
use crate::upgrade;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for a reproducible run.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// An interactive game session.
pub struct Session {
    state: GameState,
    rng: StdRng,
    journal: Journal,
}

impl Session {
    /// Start a fresh session.
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let state = GameState::initial(&mut rng);
        Self {
            state,
            rng,
            journal: Journal::new(),
        }
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Dispatch one action through the reducer, journaling the outcome.
    /// Invalid actions are inert, exactly as in the reducer.
    pub fn dispatch(&mut self, action: &Action) -> &GameState {
        let before = self.state.clone();
        let after = reduce(&before, action, &mut self.rng);
        self.record(action, &before, &after);
        self.state = after;
        &self.state
    }

    fn record(&mut self, action: &Action, before: &GameState, after: &GameState) {
        if before == after {
            // No-ops leave no trace.
            return;
        }
        let now = Utc::now();
        let entry = match action {
            Action::Roll => Some(JournalEntry::Rerolled {
                faces: after.faces(),
                rerolls_left: after.rerolls_left,
                timestamp: now,
            }),
            Action::FinishRoll => Some(JournalEntry::RollScored {
                checkpoint: before.checkpoint,
                round: before.round,
                faces: before.faces(),
                base: after.base,
                multiplier: after.multiplier,
                gained: after.gained,
                timestamp: now,
            }),
            Action::BuyDie => Some(JournalEntry::DieBought {
                cost: before.buy_cost,
                dice: after.dice.len(),
                timestamp: now,
            }),
            Action::UpgradeDie => Some(JournalEntry::DieUpgraded {
                cost: before.upgrade_cost,
                timestamp: now,
            }),
            Action::ApplyUpgrade { upgrade } => Some(JournalEntry::UpgradeTaken {
                id: upgrade.clone(),
                timestamp: now,
            }),
            Action::Reset => Some(JournalEntry::GameReset { timestamp: now }),
            Action::NextCheckpoint | Action::Unknown => None,
        };
        if let Some(entry) = entry {
            self.journal.append(entry);
        }
        // Checkpoint outcomes get their own entries.
        if before.phase == Phase::Roll {
            match after.phase {
                Phase::Shop => self.journal.append(JournalEntry::CheckpointCleared {
                    checkpoint: after.checkpoint,
                    points: after.points,
                    required: after.required,
                    timestamp: now,
                }),
                Phase::Lose => self.journal.append(JournalEntry::GameLost {
                    checkpoint: after.checkpoint,
                    points: after.points,
                    required: after.required,
                    timestamp: now,
                }),
                _ => {}
            }
        }
    }

    /// Process a line of host input and return a text response.
    pub fn process(&mut self, input: &str) -> EngineResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "roll" | "r" => Ok(self.do_action(&Action::Roll)),
            "lock" | "finish" | "l" => Ok(self.do_action(&Action::FinishRoll)),
            "buy" | "b" => Ok(self.do_action(&Action::BuyDie)),
            "upgrade" | "u" => Ok(self.do_action(&Action::UpgradeDie)),
            "next" | "n" => Ok(self.do_action(&Action::NextCheckpoint)),
            "pick" | "p" => self.do_pick(rest),
            "reset" => Ok(self.do_action(&Action::Reset)),
            "status" | "s" => Ok(render_status(&self.state)),
            "journal" => Ok(self.journal.export_text()),
            "help" | "h" => Ok(help_text().to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(EngineError::UnknownCommand(trimmed.to_string())),
        }
    }

    fn do_action(&mut self, action: &Action) -> String {
        let before = self.state.clone();
        self.dispatch(action);
        if self.state == before {
            return format!("Nothing happens. (phase {})", self.state.phase);
        }
        render_transition(action, &before, &self.state)
    }

    fn do_pick(&mut self, rest: &str) -> EngineResult<String> {
        let Phase::UpgradeSelection { offers } = &self.state.phase else {
            return Err(EngineError::InvalidChoice(
                "no upgrades are on offer right now".to_string(),
            ));
        };
        if rest.is_empty() {
            return Err(EngineError::InvalidChoice(
                "usage: pick <number>".to_string(),
            ));
        }
        let id = match rest.parse::<usize>() {
            Ok(n) if (1..=offers.len()).contains(&n) => offers[n - 1].clone(),
            Ok(n) => {
                return Err(EngineError::InvalidChoice(format!(
                    "pick a number between 1 and {}, got {n}",
                    offers.len()
                )));
            }
            Err(_) => {
                let Some(found) = offers.iter().find(|o| o.as_str() == rest) else {
                    return Err(EngineError::InvalidChoice(format!(
                        "'{rest}' is not on offer"
                    )));
                };
                found.clone()
            }
        };
        Ok(self.do_action(&Action::ApplyUpgrade { upgrade: id }))
    }
}

/// Render the dice line, e.g. `[3 (d6)] [5 (d8)]`.
fn render_dice(state: &GameState) -> String {
    let dice: Vec<String> = state.dice.iter().map(|d| format!("[{d}]")).collect();
    dice.join(" ")
}

/// Render the duplicate groups, e.g. `3s x2 (red)`.
fn render_groups(state: &GameState) -> String {
    let mut groups: Vec<(GroupColour, u32, usize)> = Vec::new();
    for (&i, &colour) in &state.highlights {
        let face = state.dice[i].value;
        match groups.iter_mut().find(|(c, f, _)| *c == colour && *f == face) {
            Some((_, _, count)) => *count += 1,
            None => groups.push((colour, face, 1)),
        }
    }
    if groups.is_empty() {
        return "no duplicate groups".to_string();
    }
    let parts: Vec<String> = groups
        .iter()
        .map(|(colour, face, count)| format!("{face}s x{count} ({colour})"))
        .collect();
    parts.join(", ")
}

fn render_status(state: &GameState) -> String {
    let mut out = format!("Phase: {}\n", state.phase);
    out.push_str(&format!("Dice: {}\n", render_dice(state)));
    out.push_str(&format!("Groups: {}\n", render_groups(state)));
    out.push_str(&format!(
        "Points: {} (need {} by round {})\n",
        state.points, state.required, ROLLS_PER_CHECK
    ));
    out.push_str(&format!(
        "Checkpoint {}, round {}/{}, rerolls left {}\n",
        state.checkpoint, state.round, ROLLS_PER_CHECK, state.rerolls_left
    ));
    out.push_str(&format!(
        "Last roll: {} x {} = {}",
        state.base, state.multiplier, state.gained
    ));
    match &state.phase {
        Phase::Shop => {
            out.push_str(&format!(
                "\nShop: new die {} points, die upgrade {} points",
                state.buy_cost, state.upgrade_cost
            ));
        }
        Phase::UpgradeSelection { offers } => {
            out.push('\n');
            out.push_str(&render_offers(offers));
        }
        Phase::Lose => {
            out.push_str("\nGame over. Type 'reset' to try again.");
        }
        Phase::Roll => {}
    }
    out
}

fn render_offers(offers: &[String]) -> String {
    let mut out = String::from("Pick an upgrade:");
    for (i, id) in offers.iter().enumerate() {
        let name = upgrade::find(id).map_or(id.as_str(), |u| u.name);
        out.push_str(&format!("\n  {}. {name}", i + 1));
    }
    out
}

fn render_transition(action: &Action, before: &GameState, after: &GameState) -> String {
    match action {
        Action::Roll => format!(
            "Rerolled: {} | {} | {} rerolls left",
            render_dice(after),
            render_groups(after),
            after.rerolls_left
        ),
        Action::FinishRoll => {
            let mut out = format!(
                "Locked in: {} x {} = +{} points (total {})",
                after.base, after.multiplier, after.gained, after.points
            );
            match &after.phase {
                Phase::Shop => out.push_str(&format!(
                    "\nCheckpoint {} cleared ({}/{})! The shop is open: \
                     'buy' ({}), 'upgrade' ({}), 'next' to move on.",
                    after.checkpoint,
                    after.points,
                    after.required,
                    after.buy_cost,
                    after.upgrade_cost
                )),
                Phase::Lose => out.push_str(&format!(
                    "\nCheckpoint {} failed: needed {}, had {}. Game over.",
                    after.checkpoint, after.required, after.points
                )),
                _ => out.push_str(&format!(
                    "\nRound {}/{}: {} | {}",
                    after.round,
                    ROLLS_PER_CHECK,
                    render_dice(after),
                    render_groups(after)
                )),
            }
            out
        }
        Action::BuyDie => format!(
            "Bought a die for {} points. Dice: {} | next die costs {}",
            before.buy_cost,
            render_dice(after),
            after.buy_cost
        ),
        Action::UpgradeDie => format!(
            "Upgraded a die for {} points. Dice: {} | next upgrade costs {}",
            before.upgrade_cost,
            render_dice(after),
            after.upgrade_cost
        ),
        Action::NextCheckpoint => match &after.phase {
            Phase::UpgradeSelection { offers } => format!(
                "Checkpoint {}: something glimmers...\n{}",
                after.checkpoint,
                render_offers(offers)
            ),
            _ => format!(
                "Checkpoint {}: need {} points within {} rounds.\nDice: {}",
                after.checkpoint,
                after.required,
                ROLLS_PER_CHECK,
                render_dice(after)
            ),
        },
        Action::ApplyUpgrade { upgrade: id } => {
            let name = upgrade::find(id).map_or(id.as_str(), |u| u.name);
            format!(
                "Upgrade taken: {name}\nDice: {} | back to rolling.",
                render_dice(after)
            )
        }
        Action::Reset => format!("Fresh run. Dice: {}", render_dice(after)),
        Action::Unknown => String::new(),
    }
}

fn help_text() -> &'static str {
    "\
Commands:
  roll       Reroll all dice (costs one reroll)
  lock       Lock the dice in and score them
  buy        Shop: buy a new d6
  upgrade    Shop: upgrade a random die
  next       Shop: start the next checkpoint
  pick <n>   Take an offered upgrade
  status     Show the full game state
  journal    Show the run journal
  reset      Start over
  help       This text
  quit       Exit"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Die;

    fn session() -> Session {
        Session::new(SessionConfig::default())
    }

    #[test]
    fn fresh_session_is_at_round_one() {
        let s = session();
        assert_eq!(s.state().checkpoint, 1);
        assert_eq!(s.state().round, 1);
        assert!(s.journal().is_empty());
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = Session::new(SessionConfig::default().with_seed(7));
        let mut b = Session::new(SessionConfig::default().with_seed(7));
        for action in [Action::Roll, Action::Roll, Action::FinishRoll, Action::Roll] {
            a.dispatch(&action);
            b.dispatch(&action);
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn dispatch_journals_rolls() {
        let mut s = session();
        s.dispatch(&Action::Roll);
        s.dispatch(&Action::FinishRoll);
        assert_eq!(s.journal().len(), 2);
    }

    #[test]
    fn noop_dispatch_leaves_no_journal_entry() {
        let mut s = session();
        s.dispatch(&Action::BuyDie); // shop is closed
        s.dispatch(&Action::Unknown);
        assert!(s.journal().is_empty());
    }

    #[test]
    fn process_roll_command() {
        let mut s = session();
        let out = s.process("roll").unwrap();
        assert!(out.contains("Rerolled"));
        assert!(out.contains("1 rerolls left"));
    }

    #[test]
    fn process_rejects_unknown_commands() {
        let mut s = session();
        assert!(matches!(
            s.process("dance"),
            Err(EngineError::UnknownCommand(_))
        ));
    }

    #[test]
    fn process_status_shows_counters() {
        let mut s = session();
        let out = s.process("status").unwrap();
        assert!(out.contains("Phase: ROLL"));
        assert!(out.contains("Checkpoint 1, round 1/3"));
        assert!(out.contains("rerolls left 2"));
    }

    #[test]
    fn exhausted_rerolls_are_inert() {
        let mut s = session();
        s.process("roll").unwrap();
        s.process("roll").unwrap();
        let out = s.process("roll").unwrap();
        assert!(out.contains("Nothing happens"));
        assert_eq!(s.state().rerolls_left, 0);
    }

    #[test]
    fn pick_outside_selection_is_an_error() {
        let mut s = session();
        assert!(matches!(
            s.process("pick 1"),
            Err(EngineError::InvalidChoice(_))
        ));
    }

    #[test]
    fn pick_by_index_takes_the_offer() {
        let mut s = session();
        s.state.phase = Phase::UpgradeSelection {
            offers: vec!["extra_die".to_string(), "cheaper_dice".to_string()],
        };
        let before_dice = s.state.dice.len();
        let out = s.process("pick 1").unwrap();
        assert!(out.contains("Upgrade taken"));
        assert_eq!(s.state().dice.len(), before_dice + 1);
        assert_eq!(s.state().phase, Phase::Roll);
    }

    #[test]
    fn pick_rejects_out_of_range_numbers() {
        let mut s = session();
        s.state.phase = Phase::UpgradeSelection {
            offers: vec!["extra_die".to_string()],
        };
        assert!(matches!(
            s.process("pick 5"),
            Err(EngineError::InvalidChoice(_))
        ));
    }

    #[test]
    fn quit_and_help() {
        let mut s = session();
        assert_eq!(s.process("quit").unwrap(), "Goodbye!");
        assert!(s.process("help").unwrap().contains("Commands:"));
    }

    #[test]
    fn empty_input_is_quietly_ignored() {
        let mut s = session();
        assert_eq!(s.process("   ").unwrap(), "");
    }

    #[test]
    fn groups_rendering_names_faces_and_colours() {
        let mut s = session();
        s.state.dice = vec![
            Die { value: 3, level: 1 },
            Die { value: 3, level: 1 },
            Die { value: 5, level: 1 },
        ];
        s.state.highlights = crate::score::analyse_roll(&s.state.faces()).highlights;
        let status = render_status(&s.state);
        assert!(status.contains("3s x2 (red)"));
    }

    #[test]
    fn checkpoint_outcome_lands_in_journal() {
        let mut s = session();
        s.state.round = ROLLS_PER_CHECK;
        s.state.points = 1000; // guaranteed pass
        s.dispatch(&Action::FinishRoll);
        let text = s.journal().export_text();
        assert!(text.contains("Cleared checkpoint 1"));
    }
}
