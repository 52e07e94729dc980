//! House Repository - Abstract persistence for house ledgers

use crate::model::house::{EconomyState, House, HouseId, NewHouse, Version};
use crate::repository::error::RepositoryError;

/// A version-checked write of one house's economy
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyUpdate {
    pub house_id: HouseId,
    /// The version the caller read; the write fails if it moved on
    pub expected_version: Version,
    pub economy: EconomyState,
}

impl EconomyUpdate {
    /// Replace `house`'s economy, guarded by the version it was read at
    pub fn for_house(house: &House, economy: EconomyState) -> Self {
        Self {
            house_id: house.id.clone(),
            expected_version: house.version,
            economy,
        }
    }
}

/// House Repository Trait
///
/// Economy writes always name the version they were computed from.
pub trait HouseRepository {
    /// Found a new house at version 1
    fn create(&mut self, house: NewHouse) -> Result<House, RepositoryError>;

    fn find_by_id(&self, id: &HouseId) -> Result<Option<House>, RepositoryError>;

    fn list_all(&self) -> Result<Vec<House>, RepositoryError>;

    /// Apply every update or none of them.
    ///
    /// All versions are checked before anything is written. Returns the
    /// houses as stored, in the order of `updates`.
    fn update_economies(&mut self, updates: &[EconomyUpdate]) -> Result<Vec<House>, RepositoryError>;

    /// Single-house form of `update_economies`
    fn update_economy(&mut self, update: EconomyUpdate) -> Result<House, RepositoryError> {
        let id = update.house_id.clone();
        self.update_economies(std::slice::from_ref(&update))?
            .pop()
            .ok_or_else(|| RepositoryError::not_found("House", id))
    }

    fn exists(&self, id: &HouseId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }
}
