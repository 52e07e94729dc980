//! In-Memory Ledger Repositories
//!
//! Houses, trades, votes and the cycle counter.
//! Thread-safe implementations using RwLock; clones share the same tables,
//! so several services can be wired over one store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use landsraad_domain::model::house::{House, HouseId, NewHouse, Version};
use landsraad_domain::model::trade::{NewTradeDeal, TradeDeal, TradeId, TradeStatus};
use landsraad_domain::model::vote::{NewVote, Vote, VoteId, VoteStatus};
use landsraad_domain::repository::clock::{Clock, CycleRepository};
use landsraad_domain::repository::error::RepositoryError;
use landsraad_domain::repository::house_repository::{EconomyUpdate, HouseRepository};
use landsraad_domain::repository::trade_repository::TradeRepository;
use landsraad_domain::repository::vote_repository::VoteRepository;
use landsraad_domain::model::time::Timestamp;

use super::{new_id, read_lock, write_lock};
use crate::clock::SystemClock;

type Table<T> = Arc<RwLock<HashMap<String, T>>>;

/// In-memory House Repository
#[derive(Debug, Clone)]
pub struct InMemoryHouseRepository {
    houses: Table<House>,
    clock: Arc<dyn Clock>,
}

impl InMemoryHouseRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            houses: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

impl Default for InMemoryHouseRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Check every update against `houses`, then apply them all
fn apply_economy_updates(
    houses: &mut HashMap<String, House>,
    updates: &[EconomyUpdate],
    now: Timestamp,
) -> Result<Vec<House>, RepositoryError> {
    for update in updates {
        let stored = houses
            .get(update.house_id.as_str())
            .ok_or_else(|| RepositoryError::not_found("House", &update.house_id))?;
        if stored.version != update.expected_version {
            return Err(RepositoryError::stale("House", &update.house_id));
        }
    }

    let mut written = Vec::with_capacity(updates.len());
    for update in updates {
        if let Some(house) = houses.get_mut(update.house_id.as_str()) {
            house.economy = update.economy.clone();
            house.updated_at = now;
            house.version = house.version.next();
            written.push(house.clone());
        }
    }
    Ok(written)
}

impl HouseRepository for InMemoryHouseRepository {
    fn create(&mut self, house: NewHouse) -> Result<House, RepositoryError> {
        let now = self.clock.now();
        let created = House {
            id: HouseId::new(new_id()),
            name: house.name,
            planetary_fief: house.planetary_fief,
            economy: house.economy,
            political_standing: house.political_standing,
            created_at: now,
            updated_at: now,
            version: Version::INITIAL,
        };
        let mut houses = write_lock(&self.houses)?;
        houses.insert(created.id.as_str().to_string(), created.clone());
        Ok(created)
    }

    fn find_by_id(&self, id: &HouseId) -> Result<Option<House>, RepositoryError> {
        let houses = read_lock(&self.houses)?;
        Ok(houses.get(id.as_str()).cloned())
    }

    fn list_all(&self) -> Result<Vec<House>, RepositoryError> {
        let houses = read_lock(&self.houses)?;
        let mut all: Vec<House> = houses.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    fn update_economies(&mut self, updates: &[EconomyUpdate]) -> Result<Vec<House>, RepositoryError> {
        let now = self.clock.now();
        let mut houses = write_lock(&self.houses)?;
        apply_economy_updates(&mut houses, updates, now)
    }
}

/// In-memory Trade Repository
///
/// Shares the house table of the repository it was built from, so that
/// `settle` can write a deal and both ledgers under one pair of locks.
#[derive(Debug, Clone)]
pub struct InMemoryTradeRepository {
    trades: Table<TradeDeal>,
    houses: Table<House>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTradeRepository {
    pub fn new(houses: &InMemoryHouseRepository) -> Self {
        Self {
            trades: Arc::new(RwLock::new(HashMap::new())),
            houses: Arc::clone(&houses.houses),
            clock: Arc::clone(&houses.clock),
        }
    }

    fn collect_where<F>(&self, keep: F) -> Result<Vec<TradeDeal>, RepositoryError>
    where
        F: Fn(&TradeDeal) -> bool,
    {
        let trades = read_lock(&self.trades)?;
        let mut found: Vec<TradeDeal> = trades.values().filter(|t| keep(t)).cloned().collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }
}

fn check_trade_version(
    trades: &HashMap<String, TradeDeal>,
    deal: &TradeDeal,
) -> Result<(), RepositoryError> {
    let stored = trades
        .get(deal.id.as_str())
        .ok_or_else(|| RepositoryError::not_found("TradeDeal", &deal.id))?;
    if stored.version != deal.version {
        return Err(RepositoryError::stale("TradeDeal", &deal.id));
    }
    Ok(())
}

fn store_trade(trades: &mut HashMap<String, TradeDeal>, deal: &TradeDeal) -> TradeDeal {
    let stored = TradeDeal {
        version: deal.version.next(),
        ..deal.clone()
    };
    trades.insert(stored.id.as_str().to_string(), stored.clone());
    stored
}

impl TradeRepository for InMemoryTradeRepository {
    fn create(&mut self, deal: NewTradeDeal) -> Result<TradeDeal, RepositoryError> {
        let created = TradeDeal {
            id: TradeId::new(new_id()),
            vote_id: deal.vote_id,
            from_house_id: deal.from_house_id,
            to_house_id: deal.to_house_id,
            offering: deal.offering,
            requesting: deal.requesting,
            duration: deal.duration,
            status: TradeStatus::Proposed,
            created_at: self.clock.now(),
            expires_at: deal.expires_at,
            cycles_active: 0,
            version: Version::INITIAL,
        };
        let mut trades = write_lock(&self.trades)?;
        trades.insert(created.id.as_str().to_string(), created.clone());
        Ok(created)
    }

    fn find_by_id(&self, id: &TradeId) -> Result<Option<TradeDeal>, RepositoryError> {
        let trades = read_lock(&self.trades)?;
        Ok(trades.get(id.as_str()).cloned())
    }

    fn find_by_house(&self, house: &HouseId) -> Result<Vec<TradeDeal>, RepositoryError> {
        self.collect_where(|t| t.involves(house))
    }

    fn find_by_status(&self, status: TradeStatus) -> Result<Vec<TradeDeal>, RepositoryError> {
        self.collect_where(|t| t.status == status)
    }

    fn list_all(&self) -> Result<Vec<TradeDeal>, RepositoryError> {
        self.collect_where(|_| true)
    }

    fn save(&mut self, deal: &TradeDeal) -> Result<TradeDeal, RepositoryError> {
        let mut trades = write_lock(&self.trades)?;
        check_trade_version(&trades, deal)?;
        Ok(store_trade(&mut trades, deal))
    }

    fn settle(
        &mut self,
        deal: &TradeDeal,
        ledgers: &[EconomyUpdate],
    ) -> Result<(TradeDeal, Vec<House>), RepositoryError> {
        let now = self.clock.now();
        // Lock order: trades, then houses. House-only writes never take
        // the trade lock, so this cannot deadlock.
        let mut trades = write_lock(&self.trades)?;
        let mut houses = write_lock(&self.houses)?;

        check_trade_version(&trades, deal)?;
        let written = apply_economy_updates(&mut houses, ledgers, now)?;
        Ok((store_trade(&mut trades, deal), written))
    }
}

/// In-memory Vote Repository
#[derive(Debug, Clone)]
pub struct InMemoryVoteRepository {
    votes: Table<Vote>,
    clock: Arc<dyn Clock>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            votes: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

impl Default for InMemoryVoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteRepository for InMemoryVoteRepository {
    fn create(&mut self, vote: NewVote) -> Result<Vote, RepositoryError> {
        let created = Vote {
            id: VoteId::new(new_id()),
            vote_type: vote.vote_type,
            title: vote.title,
            description: vote.description,
            initiator_house_id: vote.initiator_house_id,
            required_participants: vote.required_participants,
            votes: Default::default(),
            consensus_required: vote.consensus_required,
            deadline: vote.deadline,
            status: VoteStatus::Pending,
            result: None,
            created_at: self.clock.now(),
            resolved_at: None,
            version: Version::INITIAL,
        };
        let mut votes = write_lock(&self.votes)?;
        votes.insert(created.id.as_str().to_string(), created.clone());
        Ok(created)
    }

    fn find_by_id(&self, id: &VoteId) -> Result<Option<Vote>, RepositoryError> {
        let votes = read_lock(&self.votes)?;
        Ok(votes.get(id.as_str()).cloned())
    }

    fn find_by_status(&self, status: VoteStatus) -> Result<Vec<Vote>, RepositoryError> {
        let votes = read_lock(&self.votes)?;
        let mut found: Vec<Vote> = votes.values().filter(|v| v.status == status).cloned().collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    fn list_all(&self) -> Result<Vec<Vote>, RepositoryError> {
        let votes = read_lock(&self.votes)?;
        let mut all: Vec<Vote> = votes.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    fn save(&mut self, vote: &Vote) -> Result<Vote, RepositoryError> {
        let mut votes = write_lock(&self.votes)?;
        let stored = votes
            .get(vote.id.as_str())
            .ok_or_else(|| RepositoryError::not_found("Vote", &vote.id))?;
        if stored.version != vote.version {
            return Err(RepositoryError::stale("Vote", &vote.id));
        }
        let saved = Vote {
            version: vote.version.next(),
            ..vote.clone()
        };
        votes.insert(saved.id.as_str().to_string(), saved.clone());
        Ok(saved)
    }
}

/// In-memory game cycle counter
#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleRepository {
    cycle: Arc<AtomicU64>,
}

impl InMemoryCycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a saved cycle number
    pub fn starting_at(cycle: u64) -> Self {
        Self {
            cycle: Arc::new(AtomicU64::new(cycle)),
        }
    }
}

impl CycleRepository for InMemoryCycleRepository {
    fn current(&self) -> Result<u64, RepositoryError> {
        Ok(self.cycle.load(Ordering::SeqCst))
    }

    fn advance(&mut self) -> Result<u64, RepositoryError> {
        Ok(self.cycle.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
