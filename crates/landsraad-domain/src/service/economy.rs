//! Economy rules - How a house ledger moves between cycles
//!
//! Balances and per-cycle rates never go below zero. The cycle tick and
//! manual adjustments both clamp, so there is one invariant for both paths.

use crate::model::house::EconomyState;

/// Before/after view of a house's solari balance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceChange {
    pub previous_balance: f64,
    pub new_balance: f64,
    pub change: f64,
}

impl BalanceChange {
    pub fn between(previous: &EconomyState, next: &EconomyState) -> Self {
        Self {
            previous_balance: previous.solari_balance,
            new_balance: next.solari_balance,
            change: next.solari_balance - previous.solari_balance,
        }
    }
}

/// Deltas applied by a game master. `None` leaves the field alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EconomyAdjustment {
    pub spice: Option<f64>,
    pub solaris: Option<f64>,
    pub income: Option<f64>,
    pub expenses: Option<f64>,
}

impl EconomyAdjustment {
    pub fn is_empty(&self) -> bool {
        self.spice.is_none()
            && self.solaris.is_none()
            && self.income.is_none()
            && self.expenses.is_none()
    }

    /// False when any given delta is NaN or infinite
    pub fn is_finite(&self) -> bool {
        [self.spice, self.solaris, self.income, self.expenses]
            .into_iter()
            .flatten()
            .all(f64::is_finite)
    }
}

/// Ledger after one cycle: `max(0, solaris + income - expenses)`
pub fn advance_cycle(state: &EconomyState) -> EconomyState {
    EconomyState {
        solari_balance: floor_at_zero(state.solari_balance + state.net_income()),
        ..state.clone()
    }
}

/// Ledger after a manual adjustment
pub fn apply_adjustment(state: &EconomyState, adjustment: &EconomyAdjustment) -> EconomyState {
    EconomyState {
        spice_reserves: shift(state.spice_reserves, adjustment.spice),
        solari_balance: shift(state.solari_balance, adjustment.solaris),
        income_per_cycle: shift(state.income_per_cycle, adjustment.income),
        expenses_per_cycle: shift(state.expenses_per_cycle, adjustment.expenses),
        trade_modifiers: state.trade_modifiers.clone(),
    }
}

fn shift(value: f64, delta: Option<f64>) -> f64 {
    match delta {
        Some(delta) => floor_at_zero(value + delta),
        None => value,
    }
}

fn floor_at_zero(value: f64) -> f64 {
    value.max(0.0)
}
