//! TradeDeal - A two-party resource exchange
//!
//! ```text
//!             accept            cycle sweep
//! Proposed ───────────▶ Active ────────────▶ Completed
//!    │  │                  │
//!    │  └── reject ──▶ Rejected
//!    └──── cancel ──────────┴──────────────▶ Cancelled
//! ```
//!
//! Completed, Cancelled and Rejected are terminal.

use super::house::{HouseId, Version};
use super::time::Timestamp;
use super::vote::VoteId;

/// Unique identifier for a TradeDeal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TradeId(String);

impl TradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TradeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The bundle one side contributes to an exchange
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeOffering {
    pub spice: f64,
    pub solaris: f64,
    /// Free-form goods (titles, water rights, hostages). Not ledger-tracked.
    pub other: Vec<String>,
}

impl TradeOffering {
    pub fn new(spice: f64, solaris: f64) -> Self {
        Self {
            spice,
            solaris,
            other: Vec::new(),
        }
    }

    pub fn spice(amount: f64) -> Self {
        Self::new(amount, 0.0)
    }

    pub fn solaris(amount: f64) -> Self {
        Self::new(0.0, amount)
    }

    pub fn with_other(mut self, item: impl Into<String>) -> Self {
        self.other.push(item.into());
        self
    }

    /// True unless both amounts are finite and non-negative
    pub fn has_invalid_amount(&self) -> bool {
        [self.spice, self.solaris]
            .into_iter()
            .any(|amount| !amount.is_finite() || amount < 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeStatus {
    Proposed,
    Active,
    Completed,
    Cancelled,
    Rejected,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Proposed => "PROPOSED",
            TradeStatus::Active => "ACTIVE",
            TradeStatus::Completed => "COMPLETED",
            TradeStatus::Cancelled => "CANCELLED",
            TradeStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TradeStatus::Completed | TradeStatus::Cancelled | TradeStatus::Rejected
        )
    }
}

impl core::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a proposer supplies; the store assigns id and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTradeDeal {
    pub vote_id: Option<VoteId>,
    pub from_house_id: HouseId,
    pub to_house_id: HouseId,
    pub offering: TradeOffering,
    pub requesting: TradeOffering,
    /// Term in cycles; `None` for a one-time exchange
    pub duration: Option<u32>,
    /// When an unanswered proposal lapses
    pub expires_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeDeal {
    pub id: TradeId,
    pub vote_id: Option<VoteId>,
    pub from_house_id: HouseId,
    pub to_house_id: HouseId,
    pub offering: TradeOffering,
    pub requesting: TradeOffering,
    pub duration: Option<u32>,
    pub status: TradeStatus,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    /// Cycle ticks seen while Active
    pub cycles_active: u32,
    pub version: Version,
}

impl TradeDeal {
    /// Whether `house` is one of the two parties
    pub fn involves(&self, house: &HouseId) -> bool {
        &self.from_house_id == house || &self.to_house_id == house
    }

    pub fn parties(&self) -> Vec<HouseId> {
        vec![self.from_house_id.clone(), self.to_house_id.clone()]
    }

    /// An unanswered proposal whose expiry has passed
    pub fn is_lapsed(&self, now: Timestamp) -> bool {
        self.status == TradeStatus::Proposed
            && self.expires_at.is_some_and(|at| now.is_after(at))
    }

    /// Whether an Active deal has served its term.
    ///
    /// A one-time deal counts as a single-cycle term.
    pub fn term_served(&self) -> bool {
        self.status == TradeStatus::Active && self.cycles_active >= self.duration.unwrap_or(1)
    }

    /// Count one elapsed cycle against an Active deal's term
    pub fn tick(&mut self) {
        if self.status == TradeStatus::Active {
            self.cycles_active = self.cycles_active.saturating_add(1);
        }
    }

    // ========== State Transitions ==========

    pub fn accept(&mut self) -> Result<(), TradeError> {
        self.transition(TradeStatus::Active, |s| s == TradeStatus::Proposed)?;
        // Acceptance settles the offer; it can no longer lapse.
        self.expires_at = None;
        self.cycles_active = 0;
        Ok(())
    }

    pub fn reject(&mut self) -> Result<(), TradeError> {
        self.transition(TradeStatus::Rejected, |s| s == TradeStatus::Proposed)
    }

    pub fn cancel(&mut self) -> Result<(), TradeError> {
        self.transition(TradeStatus::Cancelled, |s| {
            matches!(s, TradeStatus::Proposed | TradeStatus::Active)
        })
    }

    pub fn complete(&mut self) -> Result<(), TradeError> {
        self.transition(TradeStatus::Completed, |s| s == TradeStatus::Active)
    }

    fn transition(
        &mut self,
        to: TradeStatus,
        allowed_from: impl Fn(TradeStatus) -> bool,
    ) -> Result<(), TradeError> {
        if !allowed_from(self.status) {
            return Err(TradeError::InvalidStateTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    InvalidStateTransition { from: TradeStatus, to: TradeStatus },
}

impl core::fmt::Display for TradeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TradeError::InvalidStateTransition { from, to } => {
                write!(f, "Invalid trade transition from {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for TradeError {}
