//! Vote Engine - Ballots among the houses of the Landsraad
//!
//! A ballot resolves the moment its last required participant votes, or
//! expires once its deadline passes with ballots still missing.

use landsraad_domain::model::actor::Actor;
use landsraad_domain::model::event::{GameEventType, NewGameEvent};
use landsraad_domain::model::house::HouseId;
use landsraad_domain::model::time::Timestamp;
use landsraad_domain::model::vote::{Decision, NewVote, Vote, VoteId, VoteOutcome, VoteStatus};
use landsraad_domain::repository::clock::Clock;
use landsraad_domain::repository::event_repository::EventRepository;
use landsraad_domain::repository::vote_repository::VoteRepository;
use landsraad_domain::service::tally::Tally;
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct VoteService<V, E, C> {
    votes: V,
    events: E,
    clock: C,
}

impl<V, E, C> VoteService<V, E, C>
where
    V: VoteRepository,
    E: EventRepository,
    C: Clock,
{
    pub fn new(votes: V, events: E, clock: C) -> Self {
        Self { votes, events, clock }
    }

    /// Open a ballot and notify every participant
    pub fn create_vote(&mut self, vote: NewVote, created_by: &Actor) -> ServiceResult<Vote> {
        let created = self.votes.create(vote)?;
        self.events.append(
            NewGameEvent::new(GameEventType::VoteStarted, created.participants(), created_by.clone())
                .with("voteId", &created.id)
                .with("title", &created.title)
                .with("type", created.vote_type.as_str())
                .with("initiator", &created.initiator_house_id),
        )?;

        info!(
            vote = %created.id,
            participants = created.required_participants.len(),
            consensus = created.consensus_required,
            "Vote opened"
        );
        Ok(created)
    }

    /// Record (or replace) `house`'s decision, resolving the ballot if it
    /// was the last one missing.
    pub fn cast_vote(&mut self, vote_id: &VoteId, house: &HouseId, decision: Decision) -> ServiceResult<Vote> {
        self.cast(vote_id, house, decision)
            .inspect_err(|err| warn!(vote = %vote_id, house = %house, error = %err, "Ballot refused"))
    }

    fn cast(&mut self, vote_id: &VoteId, house: &HouseId, decision: Decision) -> ServiceResult<Vote> {
        let mut vote = self.require_vote(vote_id)?;
        let now = self.clock.now();
        vote.record(house, decision, now)?;
        debug!(vote = %vote.id, house = %house, decision = decision.as_str(), "Ballot recorded");

        if !vote.all_voted() {
            return Ok(self.votes.save(&vote)?);
        }

        let tally = Tally::of(&vote);
        vote.resolve(tally.into_result(tally.outcome(vote.consensus_required)), now)?;
        let stored = self.votes.save(&vote)?;
        self.announce_resolution(&stored, tally)?;
        Ok(stored)
    }

    /// Withdraw a ballot. Only its initiator, only while it is pending.
    pub fn cancel_vote(&mut self, vote_id: &VoteId, requesting: &HouseId) -> ServiceResult<Vote> {
        self.cancel(vote_id, requesting)
            .inspect_err(|err| warn!(vote = %vote_id, house = %requesting, error = %err, "Vote cancellation refused"))
    }

    fn cancel(&mut self, vote_id: &VoteId, requesting: &HouseId) -> ServiceResult<Vote> {
        let mut vote = self.require_vote(vote_id)?;
        vote.cancel(requesting, self.clock.now())?;
        let stored = self.votes.save(&vote)?;
        info!(vote = %stored.id, "Vote cancelled");
        Ok(stored)
    }

    /// Close every pending ballot whose deadline has passed.
    ///
    /// The result keeps whatever was counted so far.
    pub fn expire_overdue(&mut self, now: Timestamp) -> ServiceResult<Vec<Vote>> {
        let mut expired = Vec::new();
        for mut vote in self.votes.find_by_status(VoteStatus::Pending)? {
            if !vote.is_overdue(now) {
                continue;
            }
            let tally = Tally::of(&vote);
            vote.resolve(tally.into_result(VoteOutcome::Expired), now)?;
            let stored = self.votes.save(&vote)?;
            self.announce_resolution(&stored, tally)?;
            expired.push(stored);
        }
        Ok(expired)
    }

    // ========== Queries ==========

    pub fn vote(&self, vote_id: &VoteId) -> ServiceResult<Vote> {
        self.require_vote(vote_id)
    }

    pub fn votes_with_status(&self, status: VoteStatus) -> ServiceResult<Vec<Vote>> {
        Ok(self.votes.find_by_status(status)?)
    }

    /// Open ballots that list `house` as a participant
    pub fn pending_for_house(&self, house: &HouseId) -> ServiceResult<Vec<Vote>> {
        Ok(self.votes.find_pending_for_house(house)?)
    }

    pub fn all_votes(&self) -> ServiceResult<Vec<Vote>> {
        Ok(self.votes.list_all()?)
    }

    // ========== Helpers ==========

    fn require_vote(&self, vote_id: &VoteId) -> ServiceResult<Vote> {
        self.votes
            .find_by_id(vote_id)?
            .ok_or_else(|| ServiceError::not_found("Vote", vote_id))
    }

    fn announce_resolution(&mut self, vote: &Vote, tally: Tally) -> ServiceResult<()> {
        let outcome = vote
            .result
            .as_ref()
            .map(|result| result.outcome.as_str())
            .unwrap_or_else(|| vote.status.as_str());
        self.events.append(
            NewGameEvent::new(
                GameEventType::VoteResolved,
                vote.participants(),
                Actor::House(vote.initiator_house_id.clone()),
            )
            .with("voteId", &vote.id)
            .with("title", &vote.title)
            .with("outcome", outcome)
            .with("approvals", tally.approvals)
            .with("rejections", tally.rejections),
        )?;
        info!(vote = %vote.id, outcome, approvals = tally.approvals, rejections = tally.rejections, "Vote resolved");
        Ok(())
    }
}
