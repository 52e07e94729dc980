//! Event Repository - The append-only game log
//!
//! Listings are newest first.

use crate::model::event::{EventId, GameEvent, GameEventType, NewGameEvent};
use crate::model::house::HouseId;
use crate::repository::error::RepositoryError;

pub trait EventRepository {
    /// Append an event; it starts with `notification_sent = false`
    fn append(&mut self, event: NewGameEvent) -> Result<GameEvent, RepositoryError>;

    fn find_by_id(&self, id: &EventId) -> Result<Option<GameEvent>, RepositoryError>;

    fn list_recent(&self, limit: usize, offset: usize) -> Result<Vec<GameEvent>, RepositoryError>;

    /// Broadcasts plus events that target `house`
    fn list_for_house(&self, house: &HouseId, limit: usize) -> Result<Vec<GameEvent>, RepositoryError>;

    fn list_by_type(&self, event_type: GameEventType) -> Result<Vec<GameEvent>, RepositoryError>;

    /// Events the push layer still owes someone
    fn pending_notifications(&self) -> Result<Vec<GameEvent>, RepositoryError>;

    /// Flip `notification_sent`. Fails with `NotFound` for unknown ids.
    fn mark_notification_sent(&mut self, id: &EventId) -> Result<(), RepositoryError>;
}
