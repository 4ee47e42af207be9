//! Chronological journal of a game session.
//!
//! The journal is the observability layer: [`crate::Session`] appends an
//! entry around every dispatch, so a host can show a run history or dump
//! it after the fact. The reducer knows nothing about it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// Dice were rerolled without locking in.
    Rerolled {
        /// The faces after the reroll.
        faces: Vec<u32>,
        /// Rerolls remaining afterwards.
        rerolls_left: u32,
        /// When the reroll happened.
        timestamp: DateTime<Utc>,
    },
    /// A roll was locked in and scored.
    RollScored {
        /// Checkpoint the roll belonged to.
        checkpoint: u32,
        /// Round within the checkpoint cycle.
        round: u32,
        /// The locked-in faces.
        faces: Vec<u32>,
        /// Base sum of the faces.
        base: u64,
        /// Duplicate-group multiplier.
        multiplier: u64,
        /// Points gained (`base * multiplier`).
        gained: u64,
        /// When the roll was locked.
        timestamp: DateTime<Utc>,
    },
    /// A checkpoint was cleared and the shop opened.
    CheckpointCleared {
        /// The checkpoint that was cleared.
        checkpoint: u32,
        /// Points at the time of clearing.
        points: u64,
        /// Points that were required.
        required: u64,
        /// When the checkpoint was cleared.
        timestamp: DateTime<Utc>,
    },
    /// A new die was bought in the shop.
    DieBought {
        /// Points spent.
        cost: u64,
        /// Dice owned after the purchase.
        dice: usize,
        /// When the purchase happened.
        timestamp: DateTime<Utc>,
    },
    /// A die was upgraded in the shop.
    DieUpgraded {
        /// Points spent.
        cost: u64,
        /// When the upgrade happened.
        timestamp: DateTime<Utc>,
    },
    /// A global upgrade was taken.
    UpgradeTaken {
        /// Catalog id of the upgrade.
        id: String,
        /// When it was taken.
        timestamp: DateTime<Utc>,
    },
    /// A checkpoint was missed; the run is over.
    GameLost {
        /// The checkpoint that was missed.
        checkpoint: u32,
        /// Points at the end.
        points: u64,
        /// Points that were required.
        required: u64,
        /// When the run ended.
        timestamp: DateTime<Utc>,
    },
    /// The game was reset to the initial state.
    GameReset {
        /// When the reset happened.
        timestamp: DateTime<Utc>,
    },
}

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as plain text, one line per entry.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Pipdream Run Journal\n====================\n\n");
        for entry in &self.entries {
            out.push_str(&render_line(entry));
            out.push('\n');
        }
        out
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Pipdream Run Journal\n\n");
        for entry in &self.entries {
            out.push_str("- ");
            out.push_str(&render_line(entry));
            out.push('\n');
        }
        out
    }

    /// Export the journal as JSON.
    pub fn export_json(&self) -> String {
        // Entries hold only plain data, so serialization cannot fail.
        serde_json::to_string_pretty(&self.entries).unwrap_or_default()
    }
}

fn render_faces(faces: &[u32]) -> String {
    let values: Vec<String> = faces.iter().map(ToString::to_string).collect();
    format!("[{}]", values.join(", "))
}

fn render_line(entry: &JournalEntry) -> String {
    match entry {
        JournalEntry::Rerolled {
            faces,
            rerolls_left,
            ..
        } => format!(
            "Rerolled to {} ({rerolls_left} rerolls left)",
            render_faces(faces)
        ),
        JournalEntry::RollScored {
            checkpoint,
            round,
            faces,
            base,
            multiplier,
            gained,
            ..
        } => format!(
            "Locked {} on checkpoint {checkpoint} round {round}: {base} x {multiplier} = {gained}",
            render_faces(faces)
        ),
        JournalEntry::CheckpointCleared {
            checkpoint,
            points,
            required,
            ..
        } => format!("Cleared checkpoint {checkpoint} with {points}/{required} points"),
        JournalEntry::DieBought { cost, dice, .. } => {
            format!("Bought a die for {cost} points ({dice} dice now)")
        }
        JournalEntry::DieUpgraded { cost, .. } => {
            format!("Upgraded a die for {cost} points")
        }
        JournalEntry::UpgradeTaken { id, .. } => format!("Took upgrade '{id}'"),
        JournalEntry::GameLost {
            checkpoint,
            points,
            required,
            ..
        } => format!("Lost at checkpoint {checkpoint} with {points}/{required} points"),
        JournalEntry::GameReset { .. } => "Reset to a fresh run".to_string(),
    }
}
