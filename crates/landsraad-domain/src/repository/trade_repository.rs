//! Trade Repository - Abstract persistence for trade deals
//!
//! Settlement touches two tables at once (the deal and both house
//! ledgers), so the port exposes it as one call. An SQL adapter would run
//! it in a single transaction; the in-memory adapter holds both locks.

use crate::model::house::{House, HouseId};
use crate::model::trade::{NewTradeDeal, TradeDeal, TradeId, TradeStatus};
use crate::repository::error::RepositoryError;
use crate::repository::house_repository::EconomyUpdate;

pub trait TradeRepository {
    /// Store a new deal as Proposed, version 1
    fn create(&mut self, deal: NewTradeDeal) -> Result<TradeDeal, RepositoryError>;

    fn find_by_id(&self, id: &TradeId) -> Result<Option<TradeDeal>, RepositoryError>;

    /// Deals where `house` is either party
    fn find_by_house(&self, house: &HouseId) -> Result<Vec<TradeDeal>, RepositoryError>;

    fn find_by_status(&self, status: TradeStatus) -> Result<Vec<TradeDeal>, RepositoryError>;

    fn list_all(&self) -> Result<Vec<TradeDeal>, RepositoryError>;

    /// Write `deal` if the stored version still equals `deal.version`.
    ///
    /// Returns the stored deal with its bumped version.
    fn save(&mut self, deal: &TradeDeal) -> Result<TradeDeal, RepositoryError>;

    /// Write the deal and every ledger update atomically.
    ///
    /// Version checks on the deal and on each house happen before any
    /// write; on failure nothing changes.
    fn settle(
        &mut self,
        deal: &TradeDeal,
        ledgers: &[EconomyUpdate],
    ) -> Result<(TradeDeal, Vec<House>), RepositoryError>;
}
