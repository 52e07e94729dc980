//! In-Memory Event Log
//!
//! Events are kept in append order; every listing walks the log backwards
//! so the newest entry comes first.

use std::sync::{Arc, RwLock};

use landsraad_domain::model::event::{EventId, GameEvent, GameEventType, NewGameEvent};
use landsraad_domain::model::house::HouseId;
use landsraad_domain::repository::clock::Clock;
use landsraad_domain::repository::error::RepositoryError;
use landsraad_domain::repository::event_repository::EventRepository;

use super::{new_id, read_lock, write_lock};
use crate::clock::SystemClock;

#[derive(Debug, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<GameEvent>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(read_lock(&self.events)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn newest_first<F>(&self, keep: F, skip: usize, limit: usize) -> Result<Vec<GameEvent>, RepositoryError>
    where
        F: Fn(&GameEvent) -> bool,
    {
        let events = read_lock(&self.events)?;
        Ok(events
            .iter()
            .rev()
            .filter(|e| keep(e))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRepository for InMemoryEventRepository {
    fn append(&mut self, event: NewGameEvent) -> Result<GameEvent, RepositoryError> {
        let stored = GameEvent {
            id: EventId::new(new_id()),
            event_type: event.event_type,
            target_house_ids: event.target_house_ids,
            payload: event.payload,
            requires_notification: event.requires_notification,
            notification_sent: false,
            created_at: self.clock.now(),
            created_by: event.created_by,
        };
        let mut events = write_lock(&self.events)?;
        events.push(stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: &EventId) -> Result<Option<GameEvent>, RepositoryError> {
        let events = read_lock(&self.events)?;
        Ok(events.iter().find(|e| &e.id == id).cloned())
    }

    fn list_recent(&self, limit: usize, offset: usize) -> Result<Vec<GameEvent>, RepositoryError> {
        self.newest_first(|_| true, offset, limit)
    }

    fn list_for_house(&self, house: &HouseId, limit: usize) -> Result<Vec<GameEvent>, RepositoryError> {
        self.newest_first(|e| e.is_visible_to(house), 0, limit)
    }

    fn list_by_type(&self, event_type: GameEventType) -> Result<Vec<GameEvent>, RepositoryError> {
        self.newest_first(|e| e.event_type == event_type, 0, usize::MAX)
    }

    fn pending_notifications(&self) -> Result<Vec<GameEvent>, RepositoryError> {
        self.newest_first(GameEvent::awaits_delivery, 0, usize::MAX)
    }

    fn mark_notification_sent(&mut self, id: &EventId) -> Result<(), RepositoryError> {
        let mut events = write_lock(&self.events)?;
        let event = events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| RepositoryError::not_found("GameEvent", id))?;
        event.notification_sent = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use landsraad_domain::model::actor::{Actor, UserId};
    use landsraad_domain::model::time::Timestamp;

    fn gm() -> Actor {
        Actor::Admin(UserId::new("gm"))
    }

    #[test]
    fn test_listings_are_newest_first() {
        let clock = ManualClock::at(Timestamp::from_millis(0));
        let mut log = InMemoryEventRepository::with_clock(Arc::new(clock.clone()));

        for n in 0..3 {
            clock.advance_millis(10);
            log.append(NewGameEvent::new(GameEventType::Custom, vec![], gm()).with("n", n))
                .unwrap();
        }

        let recent = log.list_recent(2, 0).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].payload["n"], "2");
        assert_eq!(recent[1].payload["n"], "1");
        assert!(recent[0].created_at > recent[1].created_at);

        let paged = log.list_recent(10, 2).unwrap();
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].payload["n"], "0");
    }

    #[test]
    fn test_house_feed_includes_broadcasts() {
        let mut log = InMemoryEventRepository::new();
        let fremen = HouseId::new("fremen");
        log.append(NewGameEvent::new(GameEventType::AdminAnnouncement, vec![], gm()))
            .unwrap();
        log.append(NewGameEvent::new(
            GameEventType::TradeProposed,
            vec![HouseId::new("ordos")],
            gm(),
        ))
        .unwrap();
        log.append(NewGameEvent::new(GameEventType::AttackDeclared, vec![fremen.clone()], gm()))
            .unwrap();

        let feed = log.list_for_house(&fremen, 100).unwrap();
        let kinds: Vec<GameEventType> = feed.iter().map(|e| e.event_type).collect();
        assert_eq!(
            kinds,
            vec![GameEventType::AttackDeclared, GameEventType::AdminAnnouncement]
        );
        assert_eq!(log.list_by_type(GameEventType::TradeProposed).unwrap().len(), 1);
    }

    #[test]
    fn test_mark_notification_sent() {
        let mut log = InMemoryEventRepository::new();
        let loud = log
            .append(NewGameEvent::new(GameEventType::VoteStarted, vec![], gm()))
            .unwrap();
        log.append(NewGameEvent::new(GameEventType::Custom, vec![], gm()).silent())
            .unwrap();

        assert_eq!(log.pending_notifications().unwrap().len(), 1);
        log.mark_notification_sent(&loud.id).unwrap();
        assert!(log.pending_notifications().unwrap().is_empty());
        assert!(log.find_by_id(&loud.id).unwrap().unwrap().notification_sent);

        let err = log.mark_notification_sent(&EventId::new("missing")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert_eq!(log.len().unwrap(), 2);
    }
}
