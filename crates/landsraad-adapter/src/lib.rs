//! # Landsraad Adapter Layer
//!
//! Implementations of the domain ports (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `clock` - System and hand-driven clocks
//! - `repository/` - Persistence implementations
//! - `seed` - Loading an initial set of houses from a file

pub mod clock;
pub mod repository;
pub mod seed;

pub use clock::{ManualClock, SystemClock};
pub use repository::event_log::InMemoryEventRepository;
pub use repository::in_memory::{
    InMemoryCycleRepository, InMemoryHouseRepository, InMemoryTradeRepository,
    InMemoryVoteRepository,
};
pub use repository::roster::{InMemoryArmyRepository, InMemoryCharacterRepository};
pub use seed::{HouseSeed, LedgerSeed};
