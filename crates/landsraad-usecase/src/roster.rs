//! Roster - The armies and characters each house fields

use landsraad_domain::model::actor::Actor;
use landsraad_domain::model::army::{Army, ArmyId, ArmyPatch, ArmyStatus, NewArmy};
use landsraad_domain::model::character::{
    Character, CharacterId, CharacterPatch, CharacterStatus, NewCharacter,
};
use landsraad_domain::model::event::{GameEvent, GameEventType, NewGameEvent};
use landsraad_domain::model::house::{House, HouseId};
use landsraad_domain::repository::event_repository::EventRepository;
use landsraad_domain::repository::house_repository::HouseRepository;
use landsraad_domain::repository::roster_repository::{ArmyRepository, CharacterRepository};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::guard::{ensure_admin, ensure_owner_or_admin};

fn ensure_upkeep(cost: f64) -> ServiceResult<()> {
    if cost < 0.0 {
        return Err(ServiceError::ValidationFailed(
            "Maintenance cost cannot be negative".to_string(),
        ));
    }
    Ok(())
}

fn require_house<H: HouseRepository>(houses: &H, house_id: &HouseId) -> ServiceResult<House> {
    houses
        .find_by_id(house_id)?
        .ok_or_else(|| ServiceError::not_found("House", house_id))
}

// ========== Armies ==========

#[derive(Debug, Clone)]
pub struct ArmyService<A, H, E> {
    armies: A,
    houses: H,
    events: E,
}

impl<A, H, E> ArmyService<A, H, E>
where
    A: ArmyRepository,
    H: HouseRepository,
    E: EventRepository,
{
    pub fn new(armies: A, houses: H, events: E) -> Self {
        Self {
            armies,
            houses,
            events,
        }
    }

    pub fn raise_army(&mut self, house_id: &HouseId, army: NewArmy) -> ServiceResult<Army> {
        require_house(&self.houses, house_id)?;
        ensure_upkeep(army.maintenance_cost)?;
        let raised = self.armies.create(house_id, army)?;
        info!(army = %raised.id, house = %house_id, units = raised.units.total(), "Army raised");
        Ok(raised)
    }

    pub fn update_army(&mut self, army_id: &ArmyId, patch: ArmyPatch) -> ServiceResult<Army> {
        if let Some(cost) = patch.maintenance_cost {
            ensure_upkeep(cost)?;
        }
        let mut army = self.require_army(army_id)?;
        army.apply(patch);
        self.armies.save(&army)?;
        info!(army = %army.id, status = army.status.as_str(), "Army updated");
        Ok(army)
    }

    pub fn disband_army(&mut self, army_id: &ArmyId) -> ServiceResult<()> {
        self.armies.delete(army_id)?;
        info!(army = %army_id, "Army disbanded");
        Ok(())
    }

    pub fn armies_of(&self, house_id: &HouseId) -> ServiceResult<Vec<Army>> {
        let armies = self.armies.find_by_house(house_id)?;
        debug!(house = %house_id, count = armies.len(), "Armies listed");
        Ok(armies)
    }

    pub fn army(&self, army_id: &ArmyId) -> ServiceResult<Army> {
        self.require_army(army_id)
    }

    /// Send an army against another house.
    ///
    /// The army is marked Deployed and both houses are told.
    pub fn declare_attack(
        &mut self,
        army_id: &ArmyId,
        target: &HouseId,
        actor: &Actor,
    ) -> ServiceResult<GameEvent> {
        let mut army = self.require_army(army_id)?;
        ensure_owner_or_admin(actor, &army.house_id, "declare an attack")?;
        let defender = require_house(&self.houses, target)?;
        if defender.id == army.house_id {
            warn!(army = %army.id, "Rejected: attack on own house");
            return Err(ServiceError::ValidationFailed(
                "A house cannot attack itself".to_string(),
            ));
        }

        army.status = ArmyStatus::Deployed;
        self.armies.save(&army)?;

        let event = self.events.append(
            NewGameEvent::new(
                GameEventType::AttackDeclared,
                vec![army.house_id.clone(), defender.id.clone()],
                actor.clone(),
            )
            .with("armyId", &army.id)
            .with("armyName", &army.name)
            .with("attacker", &army.house_id)
            .with("defender", &defender.id)
            .with("defenderName", &defender.name)
            .with("location", &army.location)
            .with("units", army.units.total()),
        )?;
        info!(army = %army.id, defender = %defender.id, "Attack declared");
        Ok(event)
    }

    fn require_army(&self, army_id: &ArmyId) -> ServiceResult<Army> {
        self.armies
            .find_by_id(army_id)?
            .ok_or_else(|| ServiceError::not_found("Army", army_id))
    }
}

// ========== Characters ==========

#[derive(Debug, Clone)]
pub struct CharacterService<R, H, E> {
    characters: R,
    houses: H,
    events: E,
}

impl<R, H, E> CharacterService<R, H, E>
where
    R: CharacterRepository,
    H: HouseRepository,
    E: EventRepository,
{
    pub fn new(characters: R, houses: H, events: E) -> Self {
        Self {
            characters,
            houses,
            events,
        }
    }

    pub fn recruit_character(&mut self, house_id: &HouseId, character: NewCharacter) -> ServiceResult<Character> {
        require_house(&self.houses, house_id)?;
        let recruited = self.characters.create(house_id, character)?;
        info!(character = %recruited.id, house = %house_id, "Character recruited");
        Ok(recruited)
    }

    pub fn update_character(&mut self, character_id: &CharacterId, patch: CharacterPatch) -> ServiceResult<Character> {
        let mut character = self.require_character(character_id)?;
        character.apply(patch);
        self.characters.save(&character)?;
        info!(character = %character.id, "Character updated");
        Ok(character)
    }

    /// Change a character's fate. The owning house hears about it when the
    /// status actually changes.
    pub fn set_character_status(
        &mut self,
        character_id: &CharacterId,
        status: CharacterStatus,
        actor: &Actor,
    ) -> ServiceResult<Character> {
        ensure_admin(actor, "change a character's status")?;
        let mut character = self.require_character(character_id)?;
        let previous = character.status;
        if previous == status {
            return Ok(character);
        }

        character.status = status;
        self.characters.save(&character)?;
        self.events.append(
            NewGameEvent::new(
                GameEventType::CharacterStatusChange,
                vec![character.house_id.clone()],
                actor.clone(),
            )
            .with("characterId", &character.id)
            .with("characterName", &character.name)
            .with("previousStatus", previous.as_str())
            .with("newStatus", status.as_str()),
        )?;
        info!(character = %character.id, from = previous.as_str(), to = status.as_str(), "Character status changed");
        Ok(character)
    }

    pub fn remove_character(&mut self, character_id: &CharacterId) -> ServiceResult<()> {
        self.characters.delete(character_id)?;
        info!(character = %character_id, "Character removed");
        Ok(())
    }

    pub fn characters_of(&self, house_id: &HouseId) -> ServiceResult<Vec<Character>> {
        Ok(self.characters.find_by_house(house_id)?)
    }

    pub fn character(&self, character_id: &CharacterId) -> ServiceResult<Character> {
        self.require_character(character_id)
    }

    fn require_character(&self, character_id: &CharacterId) -> ServiceResult<Character> {
        self.characters
            .find_by_id(character_id)?
            .ok_or_else(|| ServiceError::not_found("Character", character_id))
    }
}
