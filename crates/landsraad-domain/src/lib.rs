//! # Landsraad Domain Layer
//!
//! Houses, their ledgers, the trades between them and the votes they hold.
//! Pure business logic with zero external dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  repository/- Ports: storage, event log, clock              ││
//! │  │  service/   - Rules: economy cycle, settlement, vote tally  ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids and timestamps are assigned by the adapter that stores a record.

pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    actor::{Actor, UserId},
    army::{Army, ArmyId, ArmyPatch, ArmyStatus, ArmyUnits, NewArmy},
    character::{
        Character, CharacterId, CharacterPatch, CharacterStats, CharacterStatus, NewCharacter,
    },
    event::{EventId, GameEvent, GameEventType, NewGameEvent, Payload},
    house::{EconomyState, House, HouseId, NewHouse, Version},
    time::Timestamp,
    trade::{NewTradeDeal, TradeDeal, TradeId, TradeOffering, TradeStatus},
    vote::{Decision, NewVote, Vote, VoteDecision, VoteId, VoteOutcome, VoteResult, VoteStatus, VoteType},
};

pub use repository::{
    clock::{Clock, CycleRepository},
    error::RepositoryError,
    event_repository::EventRepository,
    house_repository::{EconomyUpdate, HouseRepository},
    roster_repository::{ArmyRepository, CharacterRepository},
    trade_repository::TradeRepository,
    vote_repository::VoteRepository,
};

pub use service::{
    economy::{BalanceChange, EconomyAdjustment},
    settlement::{Settlement, SettlementError},
    tally::Tally,
};
