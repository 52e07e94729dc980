//! Army - A house's field force

use super::character::CharacterId;
use super::house::HouseId;

/// Unique identifier for an Army
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArmyId(String);

impl ArmyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ArmyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArmyUnits {
    pub infantry: u32,
    pub sardaukar: u32,
    pub fremen: u32,
    pub ornithopters: u32,
}

impl ArmyUnits {
    /// Head count across all unit kinds; widened so full musters cannot overflow
    pub fn total(&self) -> u64 {
        [self.infantry, self.sardaukar, self.fremen, self.ornithopters]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmyStatus {
    Stationed,
    Deployed,
    InCombat,
    Retreating,
}

impl ArmyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArmyStatus::Stationed => "STATIONED",
            ArmyStatus::Deployed => "DEPLOYED",
            ArmyStatus::InCombat => "IN_COMBAT",
            ArmyStatus::Retreating => "RETREATING",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewArmy {
    pub name: String,
    pub units: ArmyUnits,
    pub location: String,
    pub status: ArmyStatus,
    pub maintenance_cost: f64,
    pub commander_id: Option<CharacterId>,
}

/// Partial update; `None` leaves a field untouched.
///
/// `commander_id: Some(None)` removes the commander.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArmyPatch {
    pub name: Option<String>,
    pub units: Option<ArmyUnits>,
    pub location: Option<String>,
    pub status: Option<ArmyStatus>,
    pub maintenance_cost: Option<f64>,
    pub commander_id: Option<Option<CharacterId>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Army {
    pub id: ArmyId,
    pub house_id: HouseId,
    pub name: String,
    pub units: ArmyUnits,
    pub location: String,
    pub status: ArmyStatus,
    pub maintenance_cost: f64,
    pub commander_id: Option<CharacterId>,
}

impl Army {
    pub fn apply(&mut self, patch: ArmyPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(units) = patch.units {
            self.units = units;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(cost) = patch.maintenance_cost {
            self.maintenance_cost = cost;
        }
        if let Some(commander) = patch.commander_id {
            self.commander_id = commander;
        }
    }
}
