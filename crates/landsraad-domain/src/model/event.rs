//! GameEvent - Append-only record of things that happened in the game
//!
//! The only field that changes after creation is `notification_sent`,
//! flipped once the push layer confirms delivery.

use std::collections::BTreeMap;

use super::actor::Actor;
use super::house::HouseId;
use super::time::Timestamp;

/// Unique identifier for a GameEvent
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventType {
    EconomyUpdate,
    VoteStarted,
    VoteResolved,
    TradeProposed,
    TradeStatusChanged,
    AttackDeclared,
    CharacterStatusChange,
    AdminAnnouncement,
    Custom,
}

impl GameEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEventType::EconomyUpdate => "ECONOMY_UPDATE",
            GameEventType::VoteStarted => "VOTE_STARTED",
            GameEventType::VoteResolved => "VOTE_RESOLVED",
            GameEventType::TradeProposed => "TRADE_PROPOSED",
            GameEventType::TradeStatusChanged => "TRADE_STATUS_CHANGED",
            GameEventType::AttackDeclared => "ATTACK_DECLARED",
            GameEventType::CharacterStatusChange => "CHARACTER_STATUS_CHANGE",
            GameEventType::AdminAnnouncement => "ADMIN_ANNOUNCEMENT",
            GameEventType::Custom => "CUSTOM",
        }
    }
}

impl core::fmt::Display for GameEventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loosely-typed event body
pub type Payload = BTreeMap<String, String>;

/// An event before the log assigns it an id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewGameEvent {
    pub event_type: GameEventType,
    /// Empty means broadcast to every house
    pub target_house_ids: Vec<HouseId>,
    pub payload: Payload,
    pub requires_notification: bool,
    pub created_by: Actor,
}

impl NewGameEvent {
    /// A notifying event with an empty payload
    pub fn new(event_type: GameEventType, targets: Vec<HouseId>, created_by: Actor) -> Self {
        Self {
            event_type,
            target_house_ids: targets,
            payload: Payload::new(),
            requires_notification: true,
            created_by,
        }
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.payload.insert(key.to_string(), value.to_string());
        self
    }

    pub fn silent(mut self) -> Self {
        self.requires_notification = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameEvent {
    pub id: EventId,
    pub event_type: GameEventType,
    pub target_house_ids: Vec<HouseId>,
    pub payload: Payload,
    pub requires_notification: bool,
    pub notification_sent: bool,
    pub created_at: Timestamp,
    pub created_by: Actor,
}

impl GameEvent {
    pub fn is_broadcast(&self) -> bool {
        self.target_house_ids.is_empty()
    }

    /// Whether `house` should see this event in its feed
    pub fn is_visible_to(&self, house: &HouseId) -> bool {
        self.is_broadcast() || self.target_house_ids.contains(house)
    }

    pub fn awaits_delivery(&self) -> bool {
        self.requires_notification && !self.notification_sent
    }
}
