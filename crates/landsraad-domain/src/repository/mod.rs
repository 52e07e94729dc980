//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to persist data,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait HouseRepo       │  InMemoryHouseRepository
//!   fn update_economies │  (SQL, behind a transaction)
//! trait TradeRepo       │  InMemoryTradeRepository
//!   fn settle()         │
//! ```

pub mod clock;
pub mod error;
pub mod event_repository;
pub mod house_repository;
pub mod roster_repository;
pub mod trade_repository;
pub mod vote_repository;
