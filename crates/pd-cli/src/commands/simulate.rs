use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use pd_engine::{Action, Phase, Session, SessionConfig, analyse_roll};

/// Stop a run once this many checkpoints are cleared; a decent policy can
/// otherwise snowball forever.
const MAX_CHECKPOINTS: u32 = 20;

/// Outcome of one autoplayed game.
#[derive(Debug, Serialize)]
struct GameSummary {
    seed: u64,
    checkpoints_cleared: u32,
    points: u64,
    dice: usize,
    survived: bool,
}

pub fn run(seed: u64, games: u64, json: bool) -> Result<(), String> {
    if games == 0 {
        return Err("nothing to simulate: --games must be at least 1".into());
    }
    let summaries: Vec<GameSummary> = (0..games).map(|i| play_one(seed + i)).collect();

    if json {
        let out = serde_json::to_string_pretty(&summaries).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} {games} games {}",
        "Simulated".bold(),
        format!("(seeds {seed}..{})", seed + games - 1).dimmed()
    );
    println!();

    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Seed", "Cleared", "Points", "Dice", "Result"]);
    for s in &summaries {
        table.add_row(vec![
            s.seed.to_string(),
            s.checkpoints_cleared.to_string(),
            s.points.to_string(),
            s.dice.to_string(),
            if s.survived { "survived".to_string() } else { "lost".to_string() },
        ]);
    }
    println!("{table}");

    let best = summaries.iter().map(|s| s.checkpoints_cleared).max().unwrap_or(0);
    let survivors = summaries.iter().filter(|s| s.survived).count();
    println!();
    println!("  Best run cleared {best} checkpoints; {survivors}/{games} survived the cap.");

    Ok(())
}

/// Play one full game with a simple policy: reroll while nothing pairs
/// up, upgrade before buying, always take the first offered upgrade.
fn play_one(seed: u64) -> GameSummary {
    let mut session = Session::new(SessionConfig::default().with_seed(seed));

    loop {
        let state = session.state().clone();
        match &state.phase {
            Phase::Roll => {
                let preview = analyse_roll(&state.faces());
                if preview.multiplier == 1 && state.rerolls_left > 0 {
                    session.dispatch(&Action::Roll);
                } else {
                    session.dispatch(&Action::FinishRoll);
                }
            }
            Phase::Shop => {
                if state.checkpoint >= MAX_CHECKPOINTS {
                    break;
                }
                let can_upgrade = state.points >= state.upgrade_cost
                    && state.dice.iter().any(|d| d.upgradable());
                if can_upgrade {
                    session.dispatch(&Action::UpgradeDie);
                } else if state.points >= state.buy_cost {
                    session.dispatch(&Action::BuyDie);
                } else {
                    session.dispatch(&Action::NextCheckpoint);
                }
            }
            Phase::UpgradeSelection { offers } => {
                session.dispatch(&Action::ApplyUpgrade {
                    upgrade: offers[0].clone(),
                });
            }
            Phase::Lose => break,
        }
    }

    let state = session.state();
    let survived = state.phase != Phase::Lose;
    GameSummary {
        seed,
        checkpoints_cleared: if survived {
            state.checkpoint
        } else {
            state.checkpoint - 1
        },
        points: state.points,
        dice: state.dice.len(),
        survived,
    }
}
