//! Roster Repositories - Armies and characters
//!
//! Plain keyed records without concurrency tokens; only their owning
//! house and the game master edit them.

use crate::model::army::{Army, ArmyId, NewArmy};
use crate::model::character::{Character, CharacterId, NewCharacter};
use crate::model::house::HouseId;
use crate::repository::error::RepositoryError;

pub trait ArmyRepository {
    fn create(&mut self, house: &HouseId, army: NewArmy) -> Result<Army, RepositoryError>;

    fn find_by_id(&self, id: &ArmyId) -> Result<Option<Army>, RepositoryError>;

    fn find_by_house(&self, house: &HouseId) -> Result<Vec<Army>, RepositoryError>;

    /// Overwrite an existing army. `NotFound` if it was disbanded.
    fn save(&mut self, army: &Army) -> Result<(), RepositoryError>;

    fn delete(&mut self, id: &ArmyId) -> Result<(), RepositoryError>;
}

pub trait CharacterRepository {
    fn create(&mut self, house: &HouseId, character: NewCharacter) -> Result<Character, RepositoryError>;

    fn find_by_id(&self, id: &CharacterId) -> Result<Option<Character>, RepositoryError>;

    fn find_by_house(&self, house: &HouseId) -> Result<Vec<Character>, RepositoryError>;

    /// Overwrite an existing character. `NotFound` if it was removed.
    fn save(&mut self, character: &Character) -> Result<(), RepositoryError>;

    fn delete(&mut self, id: &CharacterId) -> Result<(), RepositoryError>;
}
