//! Cycle Driver - One turn of the game
//!
//! A turn runs the economy tick, then the sweeps that depend on elapsed
//! time: trade terms, stale proposals and overdue ballots.

use std::collections::BTreeMap;

use landsraad_domain::model::actor::Actor;
use landsraad_domain::model::trade::TradeDeal;
use landsraad_domain::model::vote::Vote;
use landsraad_domain::repository::clock::{Clock, CycleRepository};
use landsraad_domain::repository::event_repository::EventRepository;
use landsraad_domain::repository::house_repository::HouseRepository;
use landsraad_domain::repository::trade_repository::TradeRepository;
use landsraad_domain::repository::vote_repository::VoteRepository;
use landsraad_domain::service::economy::BalanceChange;
use tracing::info;

use crate::economy::EconomyService;
use crate::error::ServiceResult;
use crate::guard::ensure_admin;
use crate::trade::TradeService;
use crate::vote::VoteService;

/// What one turn changed
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSummary {
    pub cycle: u64,
    /// Keyed by house name
    pub balances: BTreeMap<String, BalanceChange>,
    pub completed_trades: Vec<TradeDeal>,
    pub lapsed_proposals: Vec<TradeDeal>,
    pub expired_votes: Vec<Vote>,
}

#[derive(Debug, Clone)]
pub struct CycleService<Y, H, T, V, E, C> {
    cycles: Y,
    economy: EconomyService<H, E>,
    trades: TradeService<T, H, E, C>,
    votes: VoteService<V, E, C>,
    clock: C,
}

impl<Y, H, T, V, E, C> CycleService<Y, H, T, V, E, C>
where
    Y: CycleRepository,
    H: HouseRepository,
    T: TradeRepository,
    V: VoteRepository,
    E: EventRepository,
    C: Clock,
{
    pub fn new(
        cycles: Y,
        economy: EconomyService<H, E>,
        trades: TradeService<T, H, E, C>,
        votes: VoteService<V, E, C>,
        clock: C,
    ) -> Self {
        Self {
            cycles,
            economy,
            trades,
            votes,
            clock,
        }
    }

    /// The last completed cycle; 0 before the first
    pub fn current_cycle(&self) -> ServiceResult<u64> {
        Ok(self.cycles.current()?)
    }

    /// Run one full turn.
    ///
    /// The counter moves only after the economy batch has committed, so a
    /// `Conflict` leaves the turn to be retried.
    pub fn advance(&mut self, admin: &Actor) -> ServiceResult<CycleSummary> {
        ensure_admin(admin, "advance the game cycle")?;

        let balances = self.economy.execute_cycle(admin)?;
        let cycle = self.cycles.advance()?;
        let now = self.clock.now();
        let completed_trades = self.trades.complete_due_trades(admin)?;
        let lapsed_proposals = self.trades.lapse_expired_proposals(now, admin)?;
        let expired_votes = self.votes.expire_overdue(now)?;

        info!(
            cycle,
            houses = balances.len(),
            completed = completed_trades.len(),
            lapsed = lapsed_proposals.len(),
            expired = expired_votes.len(),
            "Cycle advanced"
        );
        Ok(CycleSummary {
            cycle,
            balances,
            completed_trades,
            lapsed_proposals,
            expired_votes,
        })
    }
}
