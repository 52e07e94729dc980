//! Trade Engine - Proposals, settlement and the term sweep
//!
//! ```text
//!   Proposed ──accept──▶ Active ──term served──▶ Completed
//!      │  │                 │
//!      │  └──reject──▶ Rejected
//!      └────cancel/lapse────┴──▶ Cancelled
//! ```

use landsraad_domain::model::actor::Actor;
use landsraad_domain::model::event::{GameEventType, NewGameEvent};
use landsraad_domain::model::house::{House, HouseId};
use landsraad_domain::model::time::Timestamp;
use landsraad_domain::model::trade::{NewTradeDeal, TradeDeal, TradeId, TradeStatus};
use landsraad_domain::repository::clock::Clock;
use landsraad_domain::repository::event_repository::EventRepository;
use landsraad_domain::repository::house_repository::{EconomyUpdate, HouseRepository};
use landsraad_domain::repository::trade_repository::TradeRepository;
use landsraad_domain::service::settlement::{ensure_offer_covered, Settlement};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct TradeService<T, H, E, C> {
    trades: T,
    houses: H,
    events: E,
    clock: C,
}

impl<T, H, E, C> TradeService<T, H, E, C>
where
    T: TradeRepository,
    H: HouseRepository,
    E: EventRepository,
    C: Clock,
{
    pub fn new(trades: T, houses: H, events: E, clock: C) -> Self {
        Self {
            trades,
            houses,
            events,
            clock,
        }
    }

    // ========== Negotiation ==========

    /// Put a deal on the table.
    ///
    /// Only the proposer's side is checked for funds here; the recipient's
    /// side is checked when they accept.
    pub fn propose_trade(&mut self, proposal: NewTradeDeal) -> ServiceResult<TradeDeal> {
        let from = proposal.from_house_id.clone();
        self.propose(proposal)
            .inspect_err(|err| warn!(from = %from, error = %err, "Trade proposal rejected"))
    }

    fn propose(&mut self, proposal: NewTradeDeal) -> ServiceResult<TradeDeal> {
        let proposer = self.require_house(&proposal.from_house_id)?;
        let recipient = self.require_house(&proposal.to_house_id)?;

        if proposer.id == recipient.id {
            return Err(ServiceError::ValidationFailed(
                "A house cannot trade with itself".to_string(),
            ));
        }
        if proposal.offering.has_invalid_amount() || proposal.requesting.has_invalid_amount() {
            return Err(ServiceError::ValidationFailed(
                "Trade amounts must be finite and non-negative".to_string(),
            ));
        }
        ensure_offer_covered(&proposal.offering, &proposer.economy)?;

        let deal = self.trades.create(proposal)?;
        self.events.append(
            NewGameEvent::new(
                GameEventType::TradeProposed,
                vec![recipient.id.clone()],
                Actor::House(proposer.id.clone()),
            )
            .with("tradeId", &deal.id)
            .with("fromHouse", &proposer.name)
            .with("toHouse", &recipient.name)
            .with("offeringSpice", deal.offering.spice)
            .with("offeringSolaris", deal.offering.solaris),
        )?;

        info!(trade = %deal.id, from = %proposer.id, to = %recipient.id, "Trade proposed");
        Ok(deal)
    }

    /// The recipient accepts: both ledgers move and the deal goes Active,
    /// all in one atomic write.
    pub fn accept_trade(&mut self, trade_id: &TradeId, accepting: &HouseId) -> ServiceResult<TradeDeal> {
        self.accept(trade_id, accepting)
            .inspect_err(|err| warn!(trade = %trade_id, house = %accepting, error = %err, "Trade acceptance rejected"))
    }

    fn accept(&mut self, trade_id: &TradeId, accepting: &HouseId) -> ServiceResult<TradeDeal> {
        let mut deal = self.require_answerable(trade_id, accepting)?;
        if deal.is_lapsed(self.clock.now()) {
            return Err(ServiceError::InvalidState(format!(
                "Trade {} expired before it was accepted",
                deal.id
            )));
        }
        deal.accept()?;

        let proposer = self.require_house(&deal.from_house_id)?;
        let recipient = self.require_house(&deal.to_house_id)?;
        let settlement = Settlement::compute(&deal, &proposer.economy, &recipient.economy)?;

        let (stored, _) = self.trades.settle(
            &deal,
            &[
                EconomyUpdate::for_house(&proposer, settlement.proposer),
                EconomyUpdate::for_house(&recipient, settlement.recipient),
            ],
        )?;

        self.announce_status(&stored, Actor::House(accepting.clone()), "Trade accepted and executed")?;
        info!(trade = %stored.id, "Trade accepted and settled");
        Ok(stored)
    }

    pub fn reject_trade(&mut self, trade_id: &TradeId, rejecting: &HouseId) -> ServiceResult<TradeDeal> {
        self.reject(trade_id, rejecting)
            .inspect_err(|err| warn!(trade = %trade_id, house = %rejecting, error = %err, "Trade rejection refused"))
    }

    fn reject(&mut self, trade_id: &TradeId, rejecting: &HouseId) -> ServiceResult<TradeDeal> {
        let mut deal = self.require_answerable(trade_id, rejecting)?;
        deal.reject()?;
        let stored = self.trades.save(&deal)?;

        self.announce_status(&stored, Actor::House(rejecting.clone()), "Trade rejected")?;
        info!(trade = %stored.id, "Trade rejected");
        Ok(stored)
    }

    /// Either party, or a game master, calls the deal off.
    ///
    /// Resources already exchanged stay where they are.
    pub fn cancel_trade(&mut self, trade_id: &TradeId, actor: &Actor) -> ServiceResult<TradeDeal> {
        self.cancel(trade_id, actor)
            .inspect_err(|err| warn!(trade = %trade_id, actor = %actor, error = %err, "Trade cancellation refused"))
    }

    fn cancel(&mut self, trade_id: &TradeId, actor: &Actor) -> ServiceResult<TradeDeal> {
        let mut deal = self.require_trade(trade_id)?;
        let is_party = actor.house().is_some_and(|house| deal.involves(house));
        if !actor.is_admin() && !is_party {
            return Err(ServiceError::Forbidden(format!(
                "{} is not a party to trade {}",
                actor, deal.id
            )));
        }
        deal.cancel()?;
        let stored = self.trades.save(&deal)?;

        self.announce_status(&stored, actor.clone(), "Trade cancelled")?;
        info!(trade = %stored.id, actor = %actor, "Trade cancelled");
        Ok(stored)
    }

    // ========== Cycle Sweeps ==========

    /// Count one cycle against every Active deal and complete those
    /// whose term has run. Returns the completed deals.
    pub fn complete_due_trades(&mut self, by: &Actor) -> ServiceResult<Vec<TradeDeal>> {
        let mut completed = Vec::new();
        for mut deal in self.trades.find_by_status(TradeStatus::Active)? {
            deal.tick();
            if deal.term_served() {
                deal.complete()?;
                let stored = self.trades.save(&deal)?;
                self.announce_status(&stored, by.clone(), "Trade term completed")?;
                info!(trade = %stored.id, cycles = stored.cycles_active, "Trade completed");
                completed.push(stored);
            } else {
                self.trades.save(&deal)?;
            }
        }
        Ok(completed)
    }

    /// Cancel every proposal nobody answered before it expired
    pub fn lapse_expired_proposals(&mut self, now: Timestamp, by: &Actor) -> ServiceResult<Vec<TradeDeal>> {
        let mut lapsed = Vec::new();
        for mut deal in self.trades.find_by_status(TradeStatus::Proposed)? {
            if !deal.is_lapsed(now) {
                continue;
            }
            deal.cancel()?;
            let stored = self.trades.save(&deal)?;
            self.announce_status(&stored, by.clone(), "Trade proposal expired")?;
            info!(trade = %stored.id, "Trade proposal lapsed");
            lapsed.push(stored);
        }
        Ok(lapsed)
    }

    // ========== Queries ==========

    pub fn trade(&self, trade_id: &TradeId) -> ServiceResult<TradeDeal> {
        self.require_trade(trade_id)
    }

    pub fn trades_for_house(&self, house: &HouseId) -> ServiceResult<Vec<TradeDeal>> {
        let deals = self.trades.find_by_house(house)?;
        debug!(house = %house, count = deals.len(), "Trades listed");
        Ok(deals)
    }

    pub fn trades_with_status(&self, status: TradeStatus) -> ServiceResult<Vec<TradeDeal>> {
        Ok(self.trades.find_by_status(status)?)
    }

    pub fn all_trades(&self) -> ServiceResult<Vec<TradeDeal>> {
        Ok(self.trades.list_all()?)
    }

    // ========== Helpers ==========

    fn require_trade(&self, trade_id: &TradeId) -> ServiceResult<TradeDeal> {
        self.trades
            .find_by_id(trade_id)?
            .ok_or_else(|| ServiceError::not_found("TradeDeal", trade_id))
    }

    fn require_house(&self, house_id: &HouseId) -> ServiceResult<House> {
        self.houses
            .find_by_id(house_id)?
            .ok_or_else(|| ServiceError::not_found("House", house_id))
    }

    /// A deal `house` may accept or reject: it must be the recipient and
    /// the deal must still be Proposed.
    fn require_answerable(&self, trade_id: &TradeId, house: &HouseId) -> ServiceResult<TradeDeal> {
        let deal = self.require_trade(trade_id)?;
        if &deal.to_house_id != house {
            return Err(ServiceError::Forbidden(format!(
                "House {} is not the recipient of trade {}",
                house, deal.id
            )));
        }
        if deal.status != TradeStatus::Proposed {
            return Err(ServiceError::InvalidState(format!(
                "Trade {} is {}, not PROPOSED",
                deal.id, deal.status
            )));
        }
        Ok(deal)
    }

    fn announce_status(&mut self, deal: &TradeDeal, by: Actor, message: &str) -> ServiceResult<()> {
        self.events.append(
            NewGameEvent::new(GameEventType::TradeStatusChanged, deal.parties(), by)
                .with("tradeId", &deal.id)
                .with("newStatus", deal.status)
                .with("message", message),
        )?;
        Ok(())
    }
}
