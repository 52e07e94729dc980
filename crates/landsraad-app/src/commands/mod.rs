//! CLI Commands

pub mod cycle;
pub mod demo;

pub use cycle::CycleCommand;
pub use demo::DemoCommand;

use landsraad_domain::HouseRepository;
use landsraad_usecase::CycleSummary;

use crate::wiring::Landsraad;

fn print_summary(summary: &CycleSummary) {
    println!("Cycle {}", summary.cycle);
    for (house, change) in &summary.balances {
        println!(
            "  {:<12} {:>10.1} -> {:>10.1} ({:+.1})",
            house, change.previous_balance, change.new_balance, change.change
        );
    }
    for deal in &summary.completed_trades {
        println!("  trade {} completed", deal.id);
    }
    for deal in &summary.lapsed_proposals {
        println!("  proposal {} lapsed", deal.id);
    }
    for vote in &summary.expired_votes {
        println!("  vote '{}' expired", vote.title);
    }
}

fn print_ledgers(game: &Landsraad) -> anyhow::Result<()> {
    let houses = game.houses.list_all()?;
    println!("{:<12} {:>10} {:>10} {:>8} {:>8}", "House", "Spice", "Solaris", "Income", "Upkeep");
    for house in &houses {
        let economy = &house.economy;
        println!(
            "{:<12} {:>10.1} {:>10.1} {:>8.1} {:>8.1}",
            house.name,
            economy.spice_reserves,
            economy.solari_balance,
            economy.income_per_cycle,
            economy.expenses_per_cycle
        );
    }
    Ok(())
}
