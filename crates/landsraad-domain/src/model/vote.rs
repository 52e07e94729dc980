//! Vote - A multi-house ballot
//!
//! A Vote collects one decision per required participant. Once every
//! participant has spoken it is resolved (see `service::tally`); until
//! then it can be cancelled by its initiator or expire at its deadline.

use std::collections::{BTreeMap, BTreeSet};

use super::house::{HouseId, Version};
use super::time::Timestamp;

/// Unique identifier for a Vote
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoteId(String);

impl VoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for VoteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteType {
    TradeDeal,
    Alliance,
    WarDeclaration,
    LandsraadMotion,
    Custom,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::TradeDeal => "TRADE_DEAL",
            VoteType::Alliance => "ALLIANCE",
            VoteType::WarDeclaration => "WAR_DECLARATION",
            VoteType::LandsraadMotion => "LANDSRAAD_MOTION",
            VoteType::Custom => "CUSTOM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteStatus {
    Pending,
    Passed,
    Failed,
    Expired,
    Cancelled,
}

impl VoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteStatus::Pending => "PENDING",
            VoteStatus::Passed => "PASSED",
            VoteStatus::Failed => "FAILED",
            VoteStatus::Expired => "EXPIRED",
            VoteStatus::Cancelled => "CANCELLED",
        }
    }
}

impl core::fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Approve,
    Reject,
    Abstain,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::Reject => "REJECT",
            Decision::Abstain => "ABSTAIN",
        }
    }
}

/// A recorded ballot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteDecision {
    pub decision: Decision,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteOutcome {
    Passed,
    Failed,
    Expired,
}

impl VoteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteOutcome::Passed => "PASSED",
            VoteOutcome::Failed => "FAILED",
            VoteOutcome::Expired => "EXPIRED",
        }
    }

    /// The status a vote takes when resolved with this outcome
    pub fn status(&self) -> VoteStatus {
        match self {
            VoteOutcome::Passed => VoteStatus::Passed,
            VoteOutcome::Failed => VoteStatus::Failed,
            VoteOutcome::Expired => VoteStatus::Expired,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteResult {
    pub outcome: VoteOutcome,
    pub approval_count: usize,
    pub rejection_count: usize,
    pub abstain_count: usize,
    pub effects: Vec<String>,
}

/// Fields for opening a ballot; the store assigns id and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVote {
    pub vote_type: VoteType,
    pub title: String,
    pub description: String,
    pub initiator_house_id: HouseId,
    pub required_participants: BTreeSet<HouseId>,
    pub consensus_required: bool,
    pub deadline: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub id: VoteId,
    pub vote_type: VoteType,
    pub title: String,
    pub description: String,
    pub initiator_house_id: HouseId,
    pub required_participants: BTreeSet<HouseId>,
    pub votes: BTreeMap<HouseId, VoteDecision>,
    pub consensus_required: bool,
    pub deadline: Option<Timestamp>,
    pub status: VoteStatus,
    pub result: Option<VoteResult>,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub version: Version,
}

impl Vote {
    pub fn is_pending(&self) -> bool {
        self.status == VoteStatus::Pending
    }

    pub fn is_participant(&self, house: &HouseId) -> bool {
        self.required_participants.contains(house)
    }

    /// Every required participant has a recorded decision
    pub fn all_voted(&self) -> bool {
        self.required_participants
            .iter()
            .all(|house| self.votes.contains_key(house))
    }

    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.is_pending() && self.deadline.is_some_and(|deadline| now.is_after(deadline))
    }

    pub fn participants(&self) -> Vec<HouseId> {
        self.required_participants.iter().cloned().collect()
    }

    // ========== State Transitions ==========

    /// Record (or overwrite) a house's decision
    pub fn record(
        &mut self,
        house: &HouseId,
        decision: Decision,
        now: Timestamp,
    ) -> Result<(), VoteError> {
        if !self.is_pending() {
            return Err(VoteError::NotPending {
                status: self.status,
            });
        }
        if !self.is_participant(house) {
            return Err(VoteError::NotParticipant {
                house: house.clone(),
            });
        }
        if self.is_overdue(now) {
            return Err(VoteError::DeadlinePassed);
        }
        self.votes.insert(
            house.clone(),
            VoteDecision {
                decision,
                timestamp: now,
            },
        );
        Ok(())
    }

    /// Close the ballot with a tallied result
    pub fn resolve(&mut self, result: VoteResult, now: Timestamp) -> Result<(), VoteError> {
        if !self.is_pending() {
            return Err(VoteError::NotPending {
                status: self.status,
            });
        }
        self.status = result.outcome.status();
        self.result = Some(result);
        self.resolved_at = Some(now);
        Ok(())
    }

    /// Withdraw the ballot. Only the initiator, only while pending.
    pub fn cancel(&mut self, requesting: &HouseId, now: Timestamp) -> Result<(), VoteError> {
        if &self.initiator_house_id != requesting {
            return Err(VoteError::NotInitiator {
                house: requesting.clone(),
            });
        }
        if !self.is_pending() {
            return Err(VoteError::NotPending {
                status: self.status,
            });
        }
        self.status = VoteStatus::Cancelled;
        self.resolved_at = Some(now);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    NotPending { status: VoteStatus },
    NotParticipant { house: HouseId },
    NotInitiator { house: HouseId },
    DeadlinePassed,
}

impl core::fmt::Display for VoteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VoteError::NotPending { status } => {
                write!(f, "Vote is no longer pending (status {})", status)
            }
            VoteError::NotParticipant { house } => {
                write!(f, "House {} is not a required participant", house)
            }
            VoteError::NotInitiator { house } => {
                write!(f, "House {} did not initiate this vote", house)
            }
            VoteError::DeadlinePassed => write!(f, "Vote deadline has passed"),
        }
    }
}

impl std::error::Error for VoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(participants: &[&str]) -> Vote {
        Vote {
            id: VoteId::new("v-001"),
            vote_type: VoteType::LandsraadMotion,
            title: "Spice tithe".to_string(),
            description: "Raise the tithe".to_string(),
            initiator_house_id: HouseId::new(participants[0]),
            required_participants: participants.iter().map(|h| HouseId::new(*h)).collect(),
            votes: BTreeMap::new(),
            consensus_required: false,
            deadline: Some(Timestamp::from_millis(500)),
            status: VoteStatus::Pending,
            result: None,
            created_at: Timestamp::from_millis(0),
            resolved_at: None,
            version: Version::INITIAL,
        }
    }

    #[test]
    fn test_record_overwrites_previous_decision() {
        let mut vote = ballot(&["a", "b"]);
        let a = HouseId::new("a");
        vote.record(&a, Decision::Reject, Timestamp::from_millis(1)).unwrap();
        vote.record(&a, Decision::Approve, Timestamp::from_millis(2)).unwrap();

        assert_eq!(vote.votes.len(), 1);
        assert_eq!(vote.votes[&a].decision, Decision::Approve);
        assert!(!vote.all_voted());
    }

    #[test]
    fn test_outsider_cannot_vote() {
        let mut vote = ballot(&["a", "b"]);
        let err = vote
            .record(&HouseId::new("z"), Decision::Approve, Timestamp::from_millis(1))
            .unwrap_err();
        assert!(matches!(err, VoteError::NotParticipant { .. }));
        assert!(vote.votes.is_empty());
    }

    #[test]
    fn test_deadline_blocks_votes() {
        let mut vote = ballot(&["a"]);
        let err = vote
            .record(&HouseId::new("a"), Decision::Approve, Timestamp::from_millis(501))
            .unwrap_err();
        assert_eq!(err, VoteError::DeadlinePassed);
    }

    #[test]
    fn test_cancel_guards() {
        let mut vote = ballot(&["a", "b"]);
        assert!(matches!(
            vote.cancel(&HouseId::new("b"), Timestamp::from_millis(1)),
            Err(VoteError::NotInitiator { .. })
        ));

        vote.cancel(&HouseId::new("a"), Timestamp::from_millis(1)).unwrap();
        assert_eq!(vote.status, VoteStatus::Cancelled);

        assert!(matches!(
            vote.cancel(&HouseId::new("a"), Timestamp::from_millis(2)),
            Err(VoteError::NotPending { .. })
        ));
    }
}
