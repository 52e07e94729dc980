//! landsraad demo command
//!
//! A scripted session: four houses, a settled trade, a refused one, a
//! Landsraad vote, an attack and two cycles.

use std::collections::BTreeSet;
use std::sync::Arc;

use clap::Args;
use landsraad_adapter::clock::format_timestamp;
use landsraad_adapter::ManualClock;
use landsraad_domain::{
    Actor, ArmyStatus, ArmyUnits, CharacterStats, CharacterStatus, Clock, Decision, EconomyState,
    HouseRepository, NewArmy, NewCharacter, NewHouse, NewTradeDeal, NewVote, Timestamp,
    TradeOffering, UserId, VoteType,
};
use shared::GameConfig;
use tracing::info;

use super::{print_ledgers, print_summary};
use crate::wiring::Landsraad;

/// 10191 A.G., as far as the game clock is concerned
const OPENING: i64 = 1_767_225_600_000;
const HOUR: i64 = 3_600_000;

#[derive(Debug, Args)]
pub struct DemoCommand {
    /// Cycles to run at the end of the session
    #[arg(short = 'n', long, default_value_t = 2)]
    pub cycles: u32,
}

impl DemoCommand {
    pub fn run(&self, config: &GameConfig) -> anyhow::Result<()> {
        let clock = ManualClock::at(Timestamp::from_millis(OPENING));
        let mut game = Landsraad::in_memory(config, Arc::new(clock.clone()));
        let gm = Actor::Admin(UserId::new("game-master"));

        // ========================================
        // Found the houses
        // ========================================

        info!("📋 Founding houses...");
        let mut found = |name: &str, fief: &str, economy: EconomyState, standing: i32| {
            game.houses.create(NewHouse {
                name: name.to_string(),
                planetary_fief: fief.to_string(),
                economy,
                political_standing: standing,
            })
        };
        let atreides = found("Atreides", "Caladan", EconomyState::new(500.0, 1_000.0, 120.0, 80.0), 70)?;
        let harkonnen = found("Harkonnen", "Giedi Prime", EconomyState::new(900.0, 1_500.0, 150.0, 140.0), 40)?;
        let corrino = found("Corrino", "Kaitain", EconomyState::new(300.0, 5_000.0, 400.0, 350.0), 95)?;
        let ordos = found("Ordos", "Sigma Draconis IV", EconomyState::new(50.0, 60.0, 10.0, 40.0), 30)?;
        println!("Opening ledgers ({})", format_timestamp(clock.now()));
        print_ledgers(&game)?;
        println!();

        // ========================================
        // Trade
        // ========================================

        info!("🤝 Negotiating trades...");
        let deal = game.trades.propose_trade(NewTradeDeal {
            vote_id: None,
            from_house_id: harkonnen.id.clone(),
            to_house_id: corrino.id.clone(),
            offering: TradeOffering::spice(200.0),
            requesting: TradeOffering::solaris(450.0),
            duration: Some(2),
            expires_at: Some(clock.now().plus_millis(24 * HOUR)),
        })?;
        clock.advance_millis(HOUR);
        let deal = game.trades.accept_trade(&deal.id, &corrino.id)?;
        println!("Trade {} is {}", deal.id, deal.status);

        let refused = game.trades.propose_trade(NewTradeDeal {
            vote_id: None,
            from_house_id: atreides.id.clone(),
            to_house_id: ordos.id.clone(),
            offering: TradeOffering::solaris(100.0),
            requesting: TradeOffering::spice(80.0),
            duration: None,
            expires_at: None,
        })?;
        if let Err(err) = game.trades.accept_trade(&refused.id, &ordos.id) {
            println!("Ordos cannot accept: {} ({})", err, err.kind());
        }
        game.trades.reject_trade(&refused.id, &ordos.id)?;

        // ========================================
        // Landsraad vote
        // ========================================

        info!("🗳️  Calling a vote...");
        let participants: BTreeSet<_> = [&atreides, &harkonnen, &corrino]
            .iter()
            .map(|house| house.id.clone())
            .collect();
        let vote = game.votes.create_vote(
            NewVote {
                vote_type: VoteType::LandsraadMotion,
                title: "CHOAM directorship for Atreides".to_string(),
                description: "Grant House Atreides a seat on the CHOAM board".to_string(),
                initiator_house_id: atreides.id.clone(),
                required_participants: participants,
                consensus_required: false,
                deadline: Some(clock.now().plus_millis(48 * HOUR)),
            },
            &Actor::House(atreides.id.clone()),
        )?;
        game.votes.cast_vote(&vote.id, &atreides.id, Decision::Approve)?;
        game.votes.cast_vote(&vote.id, &harkonnen.id, Decision::Reject)?;
        let vote = game.votes.cast_vote(&vote.id, &corrino.id, Decision::Approve)?;
        println!("Vote '{}' resolved: {}", vote.title, vote.status);

        // ========================================
        // War
        // ========================================

        info!("⚔️  Raising armies...");
        let legion = game.armies.raise_army(
            &harkonnen.id,
            NewArmy {
                name: "Rabban's Legion".to_string(),
                units: ArmyUnits {
                    infantry: 3_000,
                    ornithopters: 60,
                    ..ArmyUnits::default()
                },
                location: "Carthag".to_string(),
                status: ArmyStatus::Stationed,
                maintenance_cost: 25.0,
                commander_id: None,
            },
        )?;
        let gurney = game.characters.recruit_character(
            &atreides.id,
            NewCharacter {
                name: "Gurney Halleck".to_string(),
                role: "Warmaster".to_string(),
                stats: CharacterStats {
                    combat: 9,
                    intrigue: 4,
                    diplomacy: 3,
                    prescience: 0,
                },
                status: CharacterStatus::Active,
                notes: None,
                portrait_url: None,
            },
        )?;
        game.armies
            .declare_attack(&legion.id, &atreides.id, &Actor::House(harkonnen.id.clone()))?;
        let gurney = game
            .characters
            .set_character_status(&gurney.id, CharacterStatus::Injured, &gm)?;
        println!("{} is {}", gurney.name, gurney.status.as_str());
        game.feed.announce(
            "War of Assassins",
            "Harkonnen forces march on Arrakeen",
            "HIGH",
            Vec::new(),
            &gm,
        )?;

        // ========================================
        // Cycles
        // ========================================

        println!();
        for _ in 0..self.cycles {
            clock.advance_millis(24 * HOUR);
            let summary = game.cycles.advance(&gm)?;
            print_summary(&summary);
        }

        println!();
        print_ledgers(&game)?;

        // ========================================
        // Notification dispatch
        // ========================================

        println!();
        let pending = game.feed.pending_notifications()?;
        println!("Delivering {} notifications", pending.len());
        for event in pending.iter().rev() {
            let audience = if event.is_broadcast() {
                "all houses".to_string()
            } else {
                format!("{} house(s)", event.target_house_ids.len())
            };
            println!("  [{}] {} -> {}", format_timestamp(event.created_at), event.event_type, audience);
            game.feed.mark_notification_sent(&event.id)?;
        }

        let atreides_feed = game.feed.feed(Some(&atreides.id), Some(5))?;
        println!();
        println!("Latest for House Atreides:");
        for event in atreides_feed {
            println!("  {} {:?}", event.event_type, event.payload);
        }
        Ok(())
    }
}
