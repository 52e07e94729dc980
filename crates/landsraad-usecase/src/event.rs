//! Event feed - Announcements, house feeds and the notification queue

use landsraad_domain::model::actor::Actor;
use landsraad_domain::model::event::{EventId, GameEvent, GameEventType, NewGameEvent};
use landsraad_domain::model::house::HouseId;
use landsraad_domain::repository::event_repository::EventRepository;
use tracing::{debug, info};

use crate::error::ServiceResult;
use crate::guard::ensure_admin;

/// Feed size when the caller names no limit
pub const DEFAULT_FEED_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct EventService<E> {
    events: E,
    feed_limit: usize,
}

impl<E: EventRepository> EventService<E> {
    pub fn new(events: E) -> Self {
        Self::with_feed_limit(events, DEFAULT_FEED_LIMIT)
    }

    pub fn with_feed_limit(events: E, feed_limit: usize) -> Self {
        Self { events, feed_limit }
    }

    /// A game master's message; no targets means every house
    pub fn announce(
        &mut self,
        title: &str,
        message: &str,
        priority: &str,
        targets: Vec<HouseId>,
        admin: &Actor,
    ) -> ServiceResult<GameEvent> {
        ensure_admin(admin, "send announcements")?;
        let event = self.events.append(
            NewGameEvent::new(GameEventType::AdminAnnouncement, targets, admin.clone())
                .with("title", title)
                .with("message", message)
                .with("priority", priority),
        )?;
        info!(event = %event.id, broadcast = event.is_broadcast(), "Announcement sent");
        Ok(event)
    }

    /// Newest events first. With a house, only what that house may see.
    pub fn feed(&self, house: Option<&HouseId>, limit: Option<usize>) -> ServiceResult<Vec<GameEvent>> {
        let limit = limit.unwrap_or(self.feed_limit);
        let events = match house {
            Some(house) => self.events.list_for_house(house, limit)?,
            None => self.events.list_recent(limit, 0)?,
        };
        debug!(count = events.len(), "Feed read");
        Ok(events)
    }

    /// One page of the full log, newest first
    pub fn page(&self, limit: usize, offset: usize) -> ServiceResult<Vec<GameEvent>> {
        Ok(self.events.list_recent(limit, offset)?)
    }

    pub fn events_of_type(&self, event_type: GameEventType) -> ServiceResult<Vec<GameEvent>> {
        Ok(self.events.list_by_type(event_type)?)
    }

    /// Events still owed to the push layer
    pub fn pending_notifications(&self) -> ServiceResult<Vec<GameEvent>> {
        Ok(self.events.pending_notifications()?)
    }

    pub fn mark_notification_sent(&mut self, event_id: &EventId) -> ServiceResult<()> {
        self.events.mark_notification_sent(event_id)?;
        debug!(event = %event_id, "Notification delivered");
        Ok(())
    }
}
