//! Scoring of a locked-in roll.
//!
//! A roll is worth the sum of all faces times a multiplier: the product of
//! the sizes of every duplicate group (two or more dice showing the same
//! face). Each qualifying group is highlighted in its own colour so hosts
//! can show which dice fed the multiplier. Singletons score their face
//! value but contribute no multiplier and no highlight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A highlight colour for a duplicate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupColour {
    /// First group colour.
    Red,
    /// Second group colour.
    Blue,
    /// Third group colour.
    Green,
    /// Fourth group colour.
    Yellow,
    /// Fifth group colour.
    Purple,
}

/// The palette, cycled through in ascending face value of each group.
pub const GROUP_COLOURS: [GroupColour; 5] = [
    GroupColour::Red,
    GroupColour::Blue,
    GroupColour::Green,
    GroupColour::Yellow,
    GroupColour::Purple,
];

impl GroupColour {
    /// CSS hex value for rendering hosts.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#e74c3c",
            Self::Blue => "#3498db",
            Self::Green => "#2ecc71",
            Self::Yellow => "#f1c40f",
            Self::Purple => "#9b59b6",
        }
    }
}

impl std::fmt::Display for GroupColour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Purple => write!(f, "purple"),
        }
    }
}

/// Map from die index (display order) to its duplicate-group colour.
///
/// Indices outside every qualifying group are absent.
pub type Highlights = BTreeMap<usize, GroupColour>;

/// Breakdown of a scored roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollAnalysis {
    /// Sum of every face value.
    pub base: u64,
    /// Product of the sizes of all duplicate groups (1 if none).
    pub multiplier: u64,
    /// `base * multiplier`.
    pub total: u64,
    /// Colour per die index for every die in a duplicate group.
    pub highlights: Highlights,
}

/// Score an ordered sequence of rolled faces.
///
/// Pure and deterministic: hosts call this for live reroll previews and
/// the reducer calls it again on lock-in, both seeing the same answer.
pub fn analyse_roll(faces: &[u32]) -> RollAnalysis {
    let base: u64 = faces.iter().map(|&f| u64::from(f)).sum();

    // Group die indices by face value; BTreeMap iteration gives groups in
    // ascending face value, which fixes the colour assignment order.
    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, &face) in faces.iter().enumerate() {
        groups.entry(face).or_default().push(i);
    }

    let mut multiplier: u64 = 1;
    let mut highlights = Highlights::new();
    let mut colour = 0usize;
    for indices in groups.values() {
        if indices.len() < 2 {
            continue;
        }
        multiplier *= indices.len() as u64;
        let c = GROUP_COLOURS[colour % GROUP_COLOURS.len()];
        colour += 1;
        for &i in indices {
            highlights.insert(i, c);
        }
    }

    RollAnalysis {
        base,
        multiplier,
        total: base * multiplier,
        highlights,
    }
}
