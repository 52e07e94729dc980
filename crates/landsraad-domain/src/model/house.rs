//! House - A player faction and the root aggregate for economy state
//!
//! House is an Entity. Trades, votes, armies and characters refer to it
//! by `HouseId` only; nothing is cascaded when a house goes away.

use std::collections::BTreeMap;

use super::time::Timestamp;

/// Unique identifier for a House
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HouseId(String);

impl HouseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for HouseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optimistic concurrency token carried by mutable aggregates.
///
/// A freshly created record starts at version 1. Every successful write
/// bumps it by one; a write that names an older version is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(u64);

impl Version {
    pub const INITIAL: Version = Version(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl core::fmt::Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The resource ledger of a house
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EconomyState {
    pub spice_reserves: f64,
    pub solari_balance: f64,
    pub income_per_cycle: f64,
    pub expenses_per_cycle: f64,
    /// Named multipliers negotiated through diplomacy (stored, not applied)
    pub trade_modifiers: BTreeMap<String, f64>,
}

impl EconomyState {
    pub fn new(spice: f64, solaris: f64, income: f64, expenses: f64) -> Self {
        Self {
            spice_reserves: spice,
            solari_balance: solaris,
            income_per_cycle: income,
            expenses_per_cycle: expenses,
            trade_modifiers: BTreeMap::new(),
        }
    }

    /// Net change in solaris per cycle, before clamping
    pub fn net_income(&self) -> f64 {
        self.income_per_cycle - self.expenses_per_cycle
    }

    /// Whether this ledger can give up `spice` and `solaris` right now
    pub fn can_afford(&self, spice: f64, solaris: f64) -> bool {
        spice <= self.spice_reserves && solaris <= self.solari_balance
    }
}

/// Fields needed to found a new house; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHouse {
    pub name: String,
    pub planetary_fief: String,
    pub economy: EconomyState,
    pub political_standing: i32,
}

/// House - A player faction
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub id: HouseId,
    pub name: String,
    pub planetary_fief: String,
    pub economy: EconomyState,
    pub political_standing: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_income() {
        let economy = EconomyState::new(0.0, 100.0, 40.0, 55.0);
        assert_eq!(economy.net_income(), -15.0);
    }

    #[test]
    fn test_can_afford_is_inclusive() {
        let economy = EconomyState::new(150.0, 80.0, 0.0, 0.0);
        assert!(economy.can_afford(150.0, 80.0));
        assert!(!economy.can_afford(150.5, 0.0));
        assert!(!economy.can_afford(0.0, 81.0));
    }

    #[test]
    fn test_version_bump() {
        let v = Version::INITIAL;
        assert_eq!(v.next().value(), 2);
        assert!(v < v.next());
    }
}
