//! landsraad cycle command

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use landsraad_adapter::{LedgerSeed, SystemClock};
use landsraad_domain::{Actor, UserId};
use serde_json::json;
use shared::GameConfig;
use tracing::info;

use super::{print_ledgers, print_summary};
use crate::wiring::Landsraad;

#[derive(Debug, Args)]
pub struct CycleCommand {
    /// Seed file listing the opening houses (JSON or YAML)
    #[arg(short, long)]
    pub seed: PathBuf,

    /// Number of cycles to run
    #[arg(short = 'n', long, default_value_t = 1)]
    pub cycles: u32,

    /// Print the final ledgers as JSON
    #[arg(long)]
    pub json: bool,
}

impl CycleCommand {
    pub fn run(&self, config: &GameConfig) -> anyhow::Result<()> {
        let seed = LedgerSeed::from_file(&self.seed)?;
        let mut game = Landsraad::in_memory(config, Arc::new(SystemClock));
        let planted = seed.plant(&mut game.houses)?;
        info!(houses = planted.len(), seed = %self.seed.display(), "Seed planted");

        let admin = Actor::Admin(UserId::new("cli"));
        for _ in 0..self.cycles {
            let summary = game.cycles.advance(&admin)?;
            if !self.json {
                print_summary(&summary);
            }
        }

        if self.json {
            let houses = game.economy.game_state()?;
            let report = json!({
                "cycle": game.cycles.current_cycle()?,
                "houses": houses.iter().map(|house| json!({
                    "id": house.id.as_str(),
                    "name": house.name,
                    "spice": house.economy.spice_reserves,
                    "solaris": house.economy.solari_balance,
                    "income": house.economy.income_per_cycle,
                    "expenses": house.economy.expenses_per_cycle,
                    "version": house.version.value(),
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!();
            print_ledgers(&game)?;
        }
        Ok(())
    }
}
