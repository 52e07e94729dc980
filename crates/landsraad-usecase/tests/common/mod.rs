//! Shared fixtures: one in-memory store, a hand-driven clock and every
//! service wired over it.
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use landsraad_adapter::{
    InMemoryArmyRepository, InMemoryCharacterRepository, InMemoryCycleRepository,
    InMemoryEventRepository, InMemoryHouseRepository, InMemoryTradeRepository,
    InMemoryVoteRepository, ManualClock,
};
use landsraad_domain::{
    Actor, EconomyState, GameEvent, GameEventType, House, HouseId, HouseRepository, NewHouse,
    NewTradeDeal, NewVote, Timestamp, TradeOffering, UserId, VoteType,
};
use landsraad_domain::{Clock, EventRepository};
use landsraad_usecase::{
    ArmyService, CharacterService, CycleService, EconomyService, EventService, TradeService,
    VoteService,
};

pub type Houses = InMemoryHouseRepository;
pub type Events = InMemoryEventRepository;
pub type Trades = TradeService<InMemoryTradeRepository, Houses, Events, ManualClock>;
pub type Votes = VoteService<InMemoryVoteRepository, Events, ManualClock>;
pub type Cycles = CycleService<
    InMemoryCycleRepository,
    Houses,
    InMemoryTradeRepository,
    InMemoryVoteRepository,
    Events,
    ManualClock,
>;

pub const START: i64 = 1_700_000_000_000;

pub struct Board {
    pub clock: ManualClock,
    pub houses: Houses,
    pub events: Events,
    pub trade_store: InMemoryTradeRepository,
    pub vote_store: InMemoryVoteRepository,
    pub cycle_store: InMemoryCycleRepository,
    pub economy: EconomyService<Houses, Events>,
    pub trades: Trades,
    pub votes: Votes,
    pub feed: EventService<Events>,
    pub armies: ArmyService<InMemoryArmyRepository, Houses, Events>,
    pub characters: CharacterService<InMemoryCharacterRepository, Houses, Events>,
}

impl Board {
    pub fn new() -> Self {
        let clock = ManualClock::at(Timestamp::from_millis(START));
        let shared_clock = Arc::new(clock.clone());
        let houses = InMemoryHouseRepository::with_clock(shared_clock.clone());
        let events = InMemoryEventRepository::with_clock(shared_clock.clone());
        let trade_store = InMemoryTradeRepository::new(&houses);
        let vote_store = InMemoryVoteRepository::with_clock(shared_clock);
        let cycle_store = InMemoryCycleRepository::new();

        Self {
            economy: EconomyService::new(houses.clone(), events.clone()),
            trades: TradeService::new(trade_store.clone(), houses.clone(), events.clone(), clock.clone()),
            votes: VoteService::new(vote_store.clone(), events.clone(), clock.clone()),
            feed: EventService::new(events.clone()),
            armies: ArmyService::new(InMemoryArmyRepository::new(), houses.clone(), events.clone()),
            characters: CharacterService::new(
                InMemoryCharacterRepository::new(),
                houses.clone(),
                events.clone(),
            ),
            clock,
            houses,
            events,
            trade_store,
            vote_store,
            cycle_store,
        }
    }

    /// A cycle driver over the same store
    pub fn driver(&self) -> Cycles {
        CycleService::new(
            self.cycle_store.clone(),
            EconomyService::new(self.houses.clone(), self.events.clone()),
            TradeService::new(
                self.trade_store.clone(),
                self.houses.clone(),
                self.events.clone(),
                self.clock.clone(),
            ),
            VoteService::new(self.vote_store.clone(), self.events.clone(), self.clock.clone()),
            self.clock.clone(),
        )
    }

    pub fn found(&mut self, name: &str, economy: EconomyState) -> House {
        self.houses
            .create(NewHouse {
                name: name.to_string(),
                planetary_fief: format!("{} Prime", name),
                economy,
                political_standing: 0,
            })
            .unwrap()
    }

    pub fn house(&self, id: &HouseId) -> House {
        self.houses.find_by_id(id).unwrap().unwrap()
    }

    pub fn clock_now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn events_of(&self, event_type: GameEventType) -> Vec<GameEvent> {
        self.events.list_by_type(event_type).unwrap()
    }
}

pub fn gm() -> Actor {
    Actor::Admin(UserId::new("game-master"))
}

pub fn ledger(spice: f64, solaris: f64) -> EconomyState {
    EconomyState::new(spice, solaris, 0.0, 0.0)
}

pub fn offer(from: &House, to: &House, offering: TradeOffering, requesting: TradeOffering) -> NewTradeDeal {
    NewTradeDeal {
        vote_id: None,
        from_house_id: from.id.clone(),
        to_house_id: to.id.clone(),
        offering,
        requesting,
        duration: None,
        expires_at: None,
    }
}

pub fn ballot(initiator: &House, participants: &[&House], consensus: bool) -> NewVote {
    NewVote {
        vote_type: VoteType::LandsraadMotion,
        title: "Spice tithe".to_string(),
        description: "Raise the imperial tithe on spice exports".to_string(),
        initiator_house_id: initiator.id.clone(),
        required_participants: participants.iter().map(|h| h.id.clone()).collect::<BTreeSet<_>>(),
        consensus_required: consensus,
        deadline: None,
    }
}
