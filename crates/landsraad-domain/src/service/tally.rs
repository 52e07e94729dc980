//! Vote tally - Counting ballots and deciding the outcome
//!
//! Two rules:
//! - Consensus: passes iff nobody rejected and at least one house approved.
//!   Abstentions neither block nor carry; a ballot of pure abstentions fails.
//! - Majority: passes iff approvals strictly outnumber rejections. Ties fail.

use crate::model::vote::{Decision, Vote, VoteOutcome, VoteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub approvals: usize,
    pub rejections: usize,
    pub abstentions: usize,
}

impl Tally {
    pub fn count<I>(decisions: I) -> Self
    where
        I: IntoIterator<Item = Decision>,
    {
        decisions
            .into_iter()
            .fold(Self::default(), |mut tally, decision| {
                match decision {
                    Decision::Approve => tally.approvals += 1,
                    Decision::Reject => tally.rejections += 1,
                    Decision::Abstain => tally.abstentions += 1,
                }
                tally
            })
    }

    /// Count the ballots recorded on a vote
    pub fn of(vote: &Vote) -> Self {
        Self::count(vote.votes.values().map(|ballot| ballot.decision))
    }

    pub fn passes(&self, consensus_required: bool) -> bool {
        if consensus_required {
            self.rejections == 0 && self.approvals > 0
        } else {
            self.approvals > self.rejections
        }
    }

    pub fn outcome(&self, consensus_required: bool) -> VoteOutcome {
        if self.passes(consensus_required) {
            VoteOutcome::Passed
        } else {
            VoteOutcome::Failed
        }
    }

    pub fn into_result(self, outcome: VoteOutcome) -> VoteResult {
        VoteResult {
            outcome,
            approval_count: self.approvals,
            rejection_count: self.rejections,
            abstain_count: self.abstentions,
            effects: Vec::new(),
        }
    }
}
