//! In-Memory Roster Repositories - Armies and characters

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use landsraad_domain::model::army::{Army, ArmyId, NewArmy};
use landsraad_domain::model::character::{Character, CharacterId, NewCharacter};
use landsraad_domain::model::house::HouseId;
use landsraad_domain::repository::error::RepositoryError;
use landsraad_domain::repository::roster_repository::{ArmyRepository, CharacterRepository};

use super::{new_id, read_lock, write_lock};

#[derive(Debug, Clone, Default)]
pub struct InMemoryArmyRepository {
    armies: Arc<RwLock<HashMap<String, Army>>>,
}

impl InMemoryArmyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArmyRepository for InMemoryArmyRepository {
    fn create(&mut self, house: &HouseId, army: NewArmy) -> Result<Army, RepositoryError> {
        let created = Army {
            id: ArmyId::new(new_id()),
            house_id: house.clone(),
            name: army.name,
            units: army.units,
            location: army.location,
            status: army.status,
            maintenance_cost: army.maintenance_cost,
            commander_id: army.commander_id,
        };
        let mut armies = write_lock(&self.armies)?;
        armies.insert(created.id.as_str().to_string(), created.clone());
        Ok(created)
    }

    fn find_by_id(&self, id: &ArmyId) -> Result<Option<Army>, RepositoryError> {
        let armies = read_lock(&self.armies)?;
        Ok(armies.get(id.as_str()).cloned())
    }

    fn find_by_house(&self, house: &HouseId) -> Result<Vec<Army>, RepositoryError> {
        let armies = read_lock(&self.armies)?;
        let mut owned: Vec<Army> = armies.values().filter(|a| &a.house_id == house).cloned().collect();
        owned.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(owned)
    }

    fn save(&mut self, army: &Army) -> Result<(), RepositoryError> {
        let mut armies = write_lock(&self.armies)?;
        let slot = armies
            .get_mut(army.id.as_str())
            .ok_or_else(|| RepositoryError::not_found("Army", &army.id))?;
        *slot = army.clone();
        Ok(())
    }

    fn delete(&mut self, id: &ArmyId) -> Result<(), RepositoryError> {
        let mut armies = write_lock(&self.armies)?;
        armies
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Army", id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCharacterRepository {
    characters: Arc<RwLock<HashMap<String, Character>>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterRepository for InMemoryCharacterRepository {
    fn create(&mut self, house: &HouseId, character: NewCharacter) -> Result<Character, RepositoryError> {
        let created = Character {
            id: CharacterId::new(new_id()),
            house_id: house.clone(),
            name: character.name,
            role: character.role,
            stats: character.stats,
            status: character.status,
            notes: character.notes,
            portrait_url: character.portrait_url,
        };
        let mut characters = write_lock(&self.characters)?;
        characters.insert(created.id.as_str().to_string(), created.clone());
        Ok(created)
    }

    fn find_by_id(&self, id: &CharacterId) -> Result<Option<Character>, RepositoryError> {
        let characters = read_lock(&self.characters)?;
        Ok(characters.get(id.as_str()).cloned())
    }

    fn find_by_house(&self, house: &HouseId) -> Result<Vec<Character>, RepositoryError> {
        let characters = read_lock(&self.characters)?;
        let mut owned: Vec<Character> = characters
            .values()
            .filter(|c| &c.house_id == house)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(owned)
    }

    fn save(&mut self, character: &Character) -> Result<(), RepositoryError> {
        let mut characters = write_lock(&self.characters)?;
        let slot = characters
            .get_mut(character.id.as_str())
            .ok_or_else(|| RepositoryError::not_found("Character", &character.id))?;
        *slot = character.clone();
        Ok(())
    }

    fn delete(&mut self, id: &CharacterId) -> Result<(), RepositoryError> {
        let mut characters = write_lock(&self.characters)?;
        characters
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Character", id))
    }
}
