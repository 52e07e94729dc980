//! Dependency Injection - One in-memory store, every service over it

use std::sync::Arc;

use landsraad_adapter::{
    InMemoryArmyRepository, InMemoryCharacterRepository, InMemoryCycleRepository,
    InMemoryEventRepository, InMemoryHouseRepository, InMemoryTradeRepository,
    InMemoryVoteRepository,
};
use landsraad_domain::Clock;
use landsraad_usecase::{
    ArmyService, CharacterService, CycleService, EconomyService, EventService, TradeService,
    VoteService,
};
use shared::GameConfig;

type SharedClock = Arc<dyn Clock>;
type Houses = InMemoryHouseRepository;
type Events = InMemoryEventRepository;
type Trades = InMemoryTradeRepository;
type Votes = InMemoryVoteRepository;

pub struct Landsraad {
    pub houses: Houses,
    pub economy: EconomyService<Houses, Events>,
    pub trades: TradeService<Trades, Houses, Events, SharedClock>,
    pub votes: VoteService<Votes, Events, SharedClock>,
    pub feed: EventService<Events>,
    pub armies: ArmyService<InMemoryArmyRepository, Houses, Events>,
    pub characters: CharacterService<InMemoryCharacterRepository, Houses, Events>,
    pub cycles: CycleService<InMemoryCycleRepository, Houses, Trades, Votes, Events, SharedClock>,
}

impl Landsraad {
    /// Adapters (could be swapped for a database-backed store)
    pub fn in_memory(config: &GameConfig, clock: SharedClock) -> Self {
        let houses = InMemoryHouseRepository::with_clock(clock.clone());
        let events = InMemoryEventRepository::with_clock(clock.clone());
        let trades = InMemoryTradeRepository::new(&houses);
        let votes = InMemoryVoteRepository::with_clock(clock.clone());

        let cycles = CycleService::new(
            InMemoryCycleRepository::new(),
            EconomyService::new(houses.clone(), events.clone()),
            TradeService::new(trades.clone(), houses.clone(), events.clone(), clock.clone()),
            VoteService::new(votes.clone(), events.clone(), clock.clone()),
            clock.clone(),
        );

        Self {
            economy: EconomyService::new(houses.clone(), events.clone()),
            trades: TradeService::new(trades, houses.clone(), events.clone(), clock.clone()),
            votes: VoteService::new(votes, events.clone(), clock),
            feed: EventService::with_feed_limit(events.clone(), config.events.feed_limit),
            armies: ArmyService::new(InMemoryArmyRepository::new(), houses.clone(), events.clone()),
            characters: CharacterService::new(InMemoryCharacterRepository::new(), houses.clone(), events),
            cycles,
            houses,
        }
    }
}
