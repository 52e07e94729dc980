//! # Landsraad Use Case Layer
//!
//! Application-specific business rules.
//! Each service orchestrates domain rules over the repository ports and
//! records what happened in the event log.
//!
//! - `economy` - Cycle ticks and manual adjustments
//! - `trade` - Proposals, settlement, term sweep
//! - `vote` - Ballots and their resolution
//! - `event` - Announcements, feeds, notification queue
//! - `roster` - Armies and characters
//! - `cycle` - One full turn across all of the above

pub mod cycle;
pub mod economy;
pub mod error;
pub mod event;
mod guard;
pub mod roster;
pub mod trade;
pub mod vote;

pub use landsraad_domain;

pub use cycle::{CycleService, CycleSummary};
pub use economy::EconomyService;
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use roster::{ArmyService, CharacterService};
pub use trade::TradeService;
pub use vote::VoteService;
