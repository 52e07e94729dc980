//! Trade settlement - Moving resources between two house ledgers
//!
//! Funds are checked twice: once when a deal is proposed (proposer only)
//! and again, authoritatively, when it is accepted (both sides). A
//! settlement is computed as a pair of new ledgers and either both are
//! written or neither is.

use crate::model::house::EconomyState;
use crate::model::trade::{TradeDeal, TradeOffering};

/// Which side of the deal came up short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Proposer,
    Recipient,
}

impl core::fmt::Display for Party {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Party::Proposer => write!(f, "proposer"),
            Party::Recipient => write!(f, "recipient"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettlementError {
    InsufficientFunds {
        party: Party,
        spice_needed: f64,
        spice_held: f64,
        solaris_needed: f64,
        solaris_held: f64,
    },
}

impl core::fmt::Display for SettlementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SettlementError::InsufficientFunds {
                party,
                spice_needed,
                spice_held,
                solaris_needed,
                solaris_held,
            } => write!(
                f,
                "The {} cannot cover the deal: needs {} spice / {} solaris, holds {} / {}",
                party, spice_needed, solaris_needed, spice_held, solaris_held
            ),
        }
    }
}

/// The two ledgers after a deal goes through
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub proposer: EconomyState,
    pub recipient: EconomyState,
}

impl Settlement {
    /// Check both parties can cover their side, then swap.
    ///
    /// Each side ends at `balance - given + received`.
    pub fn compute(
        trade: &TradeDeal,
        proposer: &EconomyState,
        recipient: &EconomyState,
    ) -> Result<Self, SettlementError> {
        ensure_covered(Party::Proposer, &trade.offering, proposer)?;
        ensure_covered(Party::Recipient, &trade.requesting, recipient)?;

        Ok(Self {
            proposer: exchange(proposer, &trade.offering, &trade.requesting),
            recipient: exchange(recipient, &trade.requesting, &trade.offering),
        })
    }
}

/// Proposal-time check: can the proposer cover what they are offering?
pub fn ensure_offer_covered(
    offering: &TradeOffering,
    proposer: &EconomyState,
) -> Result<(), SettlementError> {
    ensure_covered(Party::Proposer, offering, proposer)
}

fn ensure_covered(
    party: Party,
    given: &TradeOffering,
    ledger: &EconomyState,
) -> Result<(), SettlementError> {
    if ledger.can_afford(given.spice, given.solaris) {
        Ok(())
    } else {
        Err(SettlementError::InsufficientFunds {
            party,
            spice_needed: given.spice,
            spice_held: ledger.spice_reserves,
            solaris_needed: given.solaris,
            solaris_held: ledger.solari_balance,
        })
    }
}

fn exchange(ledger: &EconomyState, given: &TradeOffering, received: &TradeOffering) -> EconomyState {
    EconomyState {
        spice_reserves: ledger.spice_reserves - given.spice + received.spice,
        solari_balance: ledger.solari_balance - given.solaris + received.solaris,
        ..ledger.clone()
    }
}

impl std::error::Error for SettlementError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::house::{HouseId, Version};
    use crate::model::time::Timestamp;
    use crate::model::trade::{TradeId, TradeStatus};

    fn spice_for_solaris() -> TradeDeal {
        TradeDeal {
            id: TradeId::new("t-1"),
            vote_id: None,
            from_house_id: HouseId::new("x"),
            to_house_id: HouseId::new("y"),
            offering: TradeOffering::spice(100.0),
            requesting: TradeOffering::solaris(50.0),
            duration: None,
            status: TradeStatus::Proposed,
            created_at: Timestamp::from_millis(0),
            expires_at: None,
            cycles_active: 0,
            version: Version::INITIAL,
        }
    }

    #[test]
    fn test_swap() {
        let x = EconomyState::new(150.0, 0.0, 0.0, 0.0);
        let y = EconomyState::new(0.0, 80.0, 0.0, 0.0);

        let settlement = Settlement::compute(&spice_for_solaris(), &x, &y).unwrap();

        assert_eq!(settlement.proposer.spice_reserves, 50.0);
        assert_eq!(settlement.proposer.solari_balance, 50.0);
        assert_eq!(settlement.recipient.spice_reserves, 100.0);
        assert_eq!(settlement.recipient.solari_balance, 30.0);
    }

    #[test]
    fn test_recipient_short() {
        let x = EconomyState::new(150.0, 0.0, 0.0, 0.0);
        let y = EconomyState::new(0.0, 49.0, 0.0, 0.0);

        let err = Settlement::compute(&spice_for_solaris(), &x, &y).unwrap_err();
        assert!(matches!(
            err,
            SettlementError::InsufficientFunds {
                party: Party::Recipient,
                ..
            }
        ));
    }

    #[test]
    fn test_offer_check_ignores_request() {
        let x = EconomyState::new(100.0, 0.0, 0.0, 0.0);
        assert!(ensure_offer_covered(&TradeOffering::spice(100.0), &x).is_ok());
        assert!(ensure_offer_covered(&TradeOffering::new(100.0, 1.0), &x).is_err());
    }
}
