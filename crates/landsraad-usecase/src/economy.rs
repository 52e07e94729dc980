//! Economy Engine - Cycle ticks and game-master adjustments

use std::collections::BTreeMap;

use landsraad_domain::model::actor::Actor;
use landsraad_domain::model::event::{GameEventType, NewGameEvent};
use landsraad_domain::model::house::{House, HouseId};
use landsraad_domain::repository::event_repository::EventRepository;
use landsraad_domain::repository::house_repository::{EconomyUpdate, HouseRepository};
use landsraad_domain::service::economy::{self, BalanceChange, EconomyAdjustment};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::guard::ensure_admin;

#[derive(Debug, Clone)]
pub struct EconomyService<H, E> {
    houses: H,
    events: E,
}

impl<H, E> EconomyService<H, E>
where
    H: HouseRepository,
    E: EventRepository,
{
    pub fn new(houses: H, events: E) -> Self {
        Self { houses, events }
    }

    /// Advance every house ledger by one cycle.
    ///
    /// All houses are written in one version-checked batch; a concurrent
    /// write to any of them fails the whole cycle with `Conflict`.
    /// Returns the balance movement per house name.
    pub fn execute_cycle(&mut self, admin: &Actor) -> ServiceResult<BTreeMap<String, BalanceChange>> {
        ensure_admin(admin, "execute an economy cycle")?;

        let houses = self.houses.list_all()?;
        let updates: Vec<EconomyUpdate> = houses
            .iter()
            .map(|house| EconomyUpdate::for_house(house, economy::advance_cycle(&house.economy)))
            .collect();
        let written = self.houses.update_economies(&updates)?;

        let mut report = BTreeMap::new();
        for (before, after) in houses.iter().zip(&written) {
            let change = BalanceChange::between(&before.economy, &after.economy);
            self.events.append(
                NewGameEvent::new(GameEventType::EconomyUpdate, vec![after.id.clone()], admin.clone())
                    .with("houseId", &after.id)
                    .with("houseName", &after.name)
                    .with("previousBalance", change.previous_balance)
                    .with("newBalance", change.new_balance)
                    .with("change", change.change),
            )?;
            report.insert(after.name.clone(), change);
        }

        info!(houses = written.len(), "Economy cycle executed");
        Ok(report)
    }

    /// Apply a game master's deltas to one house.
    ///
    /// Each adjusted figure is floored at zero. An event is recorded even
    /// when the adjustment is empty.
    pub fn adjust_economy(
        &mut self,
        house_id: &HouseId,
        adjustment: EconomyAdjustment,
        admin: &Actor,
    ) -> ServiceResult<House> {
        ensure_admin(admin, "adjust a house economy")?;
        if !adjustment.is_finite() {
            return Err(ServiceError::ValidationFailed(
                "Economy adjustments must be finite numbers".to_string(),
            ));
        }

        let house = self.require_house(house_id)?;
        let adjusted = economy::apply_adjustment(&house.economy, &adjustment);
        let stored = self
            .houses
            .update_economy(EconomyUpdate::for_house(&house, adjusted))?;

        let mut event = NewGameEvent::new(GameEventType::EconomyUpdate, vec![house.id.clone()], admin.clone())
            .with("houseId", &house.id)
            .with("houseName", &house.name)
            .with("adjustmentType", "manual")
            .with("spiceAdjustment", adjustment.spice.unwrap_or(0.0))
            .with("solarisAdjustment", adjustment.solaris.unwrap_or(0.0));
        if let Some(income) = adjustment.income {
            event = event.with("incomeAdjustment", income);
        }
        if let Some(expenses) = adjustment.expenses {
            event = event.with("expensesAdjustment", expenses);
        }
        self.events.append(event)?;

        info!(house = %house.id, version = %stored.version, "Economy adjusted");
        Ok(stored)
    }

    /// Every house, as the game master sees them
    pub fn game_state(&self) -> ServiceResult<Vec<House>> {
        let houses = self.houses.list_all()?;
        debug!(houses = houses.len(), "Game state read");
        Ok(houses)
    }

    pub fn house(&self, house_id: &HouseId) -> ServiceResult<House> {
        self.require_house(house_id)
    }

    fn require_house(&self, house_id: &HouseId) -> ServiceResult<House> {
        self.houses
            .find_by_id(house_id)?
            .ok_or_else(|| ServiceError::not_found("House", house_id))
    }
}
