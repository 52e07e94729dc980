//! # Landsraad - Ledger, trade and vote engine for a Dune campaign
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Configuration, logging, dispatch         │
//! │    │                                                            │
//! │    ├── wiring.rs: In-memory repositories (adapter)              │
//! │    │              Economy/Trade/Vote/Event/Roster services      │
//! │    │              Cycle driver (usecase)                        │
//! │    └── commands/: demo, cycle                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   landsraad demo                          - Run a scripted session
//!   landsraad cycle --seed houses.json -n 3 - Load houses and run cycles

mod commands;
mod wiring;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use commands::{CycleCommand, DemoCommand};
use shared::GameConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "landsraad")]
#[command(about = "Landsraad - Ledger, trade and vote engine for a Dune campaign")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON or YAML); defaults plus environment otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session against an in-memory store
    Demo(DemoCommand),
    /// Load houses from a seed file and advance the game
    Cycle(CycleCommand),
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    Ok(config.with_overrides(|key| std::env::var(key).ok()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Demo(cmd) => cmd.run(&config),
        Commands::Cycle(cmd) => cmd.run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parses_cycle() {
        let cli = Cli::parse_from(["landsraad", "cycle", "--seed", "houses.yaml", "-n", "3", "--json"]);
        match cli.command {
            Commands::Cycle(cmd) => {
                assert_eq!(cmd.cycles, 3);
                assert!(cmd.json);
                assert_eq!(cmd.seed, PathBuf::from("houses.yaml"));
            }
            Commands::Demo(_) => panic!("expected the cycle command"),
        }
    }

    #[test]
    fn test_config_file_is_loaded() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "events": {{ "feedLimit": 7 }} }}"#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.events.feed_limit, 7);
    }

    #[test]
    fn test_cycle_command_runs_seed() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "houses": [ {{ "name": "Atreides", "planetaryFief": "Caladan", "solaris": 10, "income": 5 }} ] }}"#
        )
        .unwrap();

        let cmd = CycleCommand {
            seed: file.path().to_path_buf(),
            cycles: 2,
            json: true,
        };
        cmd.run(&GameConfig::default()).unwrap();
    }

    #[test]
    fn test_demo_runs() {
        DemoCommand { cycles: 2 }.run(&GameConfig::default()).unwrap();
    }
}
