use colored::Colorize;

use pd_engine::state::{
    INITIAL_BUY_COST, INITIAL_UPGRADE_COST, REROLL_BUDGET, ROLLS_PER_CHECK, UPGRADE_INTERVAL,
};
use pd_engine::{CATALOG, required_for_checkpoint};

pub fn run() -> Result<(), String> {
    println!("  {}", "Pipdream Rules".bold().underline());
    println!();
    println!("  {}", "Rolling".bold());
    println!("  Each round you may reroll all dice up to {REROLL_BUDGET} times, then lock in.");
    println!("  A locked roll scores its face sum times a multiplier: the product of");
    println!("  each duplicate group size (two 3s and two 5s score x4).");
    println!();
    println!("  {}", "Checkpoints".bold());
    println!("  Every {ROLLS_PER_CHECK} locked rolls your total must clear the checkpoint:");
    for cp in 1..=5 {
        println!("    checkpoint {cp}: {} points", required_for_checkpoint(cp));
    }
    println!("  Miss one and the run ends.");
    println!();
    println!("  {}", "Shop".bold());
    println!("  Clearing a checkpoint opens the shop. A new d6 starts at");
    println!("  {INITIAL_BUY_COST} points, a die upgrade (d6 > d8 > d10 > d20) at");
    println!("  {INITIAL_UPGRADE_COST} points; each purchase doubles its price.");
    println!();
    println!("  {}", "Upgrades".bold());
    println!("  Every {UPGRADE_INTERVAL}th checkpoint offers one of:");
    for upgrade in CATALOG {
        println!("    - {} (weight {})", upgrade.name, upgrade.rarity);
    }

    Ok(())
}
