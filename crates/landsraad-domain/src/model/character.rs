//! Character - A named person serving a house

use super::house::HouseId;

/// Unique identifier for a Character
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterStats {
    pub combat: i32,
    pub intrigue: i32,
    pub diplomacy: i32,
    pub prescience: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterStatus {
    Active,
    Injured,
    Captured,
    Deceased,
}

impl CharacterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterStatus::Active => "ACTIVE",
            CharacterStatus::Injured => "INJURED",
            CharacterStatus::Captured => "CAPTURED",
            CharacterStatus::Deceased => "DECEASED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCharacter {
    pub name: String,
    pub role: String,
    pub stats: CharacterStats,
    pub status: CharacterStatus,
    pub notes: Option<String>,
    pub portrait_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub stats: Option<CharacterStats>,
    pub notes: Option<String>,
    pub portrait_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    pub house_id: HouseId,
    pub name: String,
    pub role: String,
    pub stats: CharacterStats,
    pub status: CharacterStatus,
    pub notes: Option<String>,
    pub portrait_url: Option<String>,
}

impl Character {
    pub fn apply(&mut self, patch: CharacterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(stats) = patch.stats {
            self.stats = stats;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(url) = patch.portrait_url {
            self.portrait_url = Some(url);
        }
    }
}
