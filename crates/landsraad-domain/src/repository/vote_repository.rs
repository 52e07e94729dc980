//! Vote Repository - Abstract persistence for ballots

use crate::model::house::HouseId;
use crate::model::vote::{NewVote, Vote, VoteId, VoteStatus};
use crate::repository::error::RepositoryError;

pub trait VoteRepository {
    /// Open a new ballot: Pending, no decisions, version 1
    fn create(&mut self, vote: NewVote) -> Result<Vote, RepositoryError>;

    fn find_by_id(&self, id: &VoteId) -> Result<Option<Vote>, RepositoryError>;

    fn find_by_status(&self, status: VoteStatus) -> Result<Vec<Vote>, RepositoryError>;

    fn list_all(&self) -> Result<Vec<Vote>, RepositoryError>;

    /// Write `vote` if the stored version still equals `vote.version`
    fn save(&mut self, vote: &Vote) -> Result<Vote, RepositoryError>;

    /// Pending ballots that still need something from `house`
    fn find_pending_for_house(&self, house: &HouseId) -> Result<Vec<Vote>, RepositoryError> {
        Ok(self
            .find_by_status(VoteStatus::Pending)?
            .into_iter()
            .filter(|vote| vote.is_participant(house))
            .collect())
    }
}
