mod common;

use common::{ballot, gm, ledger, Board, START};
use landsraad_domain::{
    Actor, Decision, GameEventType, House, Timestamp, VoteId, VoteOutcome, VoteStatus,
};
use landsraad_usecase::ServiceError;

use Decision::{Abstain, Approve, Reject};

/// Three houses vote on a fresh ballot; returns the final vote status
fn run_ballot(consensus: bool, decisions: [Decision; 3]) -> VoteStatus {
    let mut board = Board::new();
    let houses: Vec<House> = ["Atreides", "Harkonnen", "Ordos"]
        .iter()
        .map(|name| board.found(name, ledger(0.0, 0.0)))
        .collect();
    let participants: Vec<&House> = houses.iter().collect();

    let vote = board
        .votes
        .create_vote(ballot(&houses[0], &participants, consensus), &gm())
        .unwrap();
    let mut last = vote;
    for (house, decision) in houses.iter().zip(decisions) {
        last = board.votes.cast_vote(&last.id, &house.id, decision).unwrap();
    }
    last.status
}

#[test]
fn test_consensus_matrix() {
    assert_eq!(run_ballot(true, [Approve, Approve, Approve]), VoteStatus::Passed);
    assert_eq!(run_ballot(true, [Approve, Approve, Reject]), VoteStatus::Failed);
    assert_eq!(run_ballot(true, [Approve, Abstain, Abstain]), VoteStatus::Passed);
    assert_eq!(run_ballot(true, [Abstain, Abstain, Abstain]), VoteStatus::Failed);
}

#[test]
fn test_majority_matrix() {
    assert_eq!(run_ballot(false, [Approve, Approve, Reject]), VoteStatus::Passed);
    assert_eq!(run_ballot(false, [Approve, Reject, Abstain]), VoteStatus::Failed);
    assert_eq!(run_ballot(false, [Reject, Reject, Approve]), VoteStatus::Failed);
    assert_eq!(run_ballot(false, [Approve, Abstain, Abstain]), VoteStatus::Passed);
}

#[test]
fn test_opening_a_vote_notifies_participants() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    let b = board.found("Harkonnen", ledger(0.0, 0.0));

    let vote = board.votes.create_vote(ballot(&a, &[&a, &b], true), &gm()).unwrap();
    assert_eq!(vote.status, VoteStatus::Pending);
    assert!(vote.votes.is_empty());

    let started = board.events_of(GameEventType::VoteStarted);
    assert_eq!(started.len(), 1);
    let mut targets = started[0].target_house_ids.clone();
    targets.sort();
    let mut expected = vec![a.id.clone(), b.id.clone()];
    expected.sort();
    assert_eq!(targets, expected);
    assert_eq!(started[0].payload["type"], "LANDSRAAD_MOTION");
    assert_eq!(started[0].payload["initiator"], a.id.as_str());
}

#[test]
fn test_resolution_records_result_and_event() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    let b = board.found("Harkonnen", ledger(0.0, 0.0));

    let vote = board.votes.create_vote(ballot(&a, &[&a, &b], false), &gm()).unwrap();
    let partial = board.votes.cast_vote(&vote.id, &a.id, Approve).unwrap();
    assert_eq!(partial.status, VoteStatus::Pending);
    assert!(board.events_of(GameEventType::VoteResolved).is_empty());

    board.clock.advance_millis(500);
    let resolved = board.votes.cast_vote(&vote.id, &b.id, Reject).unwrap();
    assert_eq!(resolved.status, VoteStatus::Failed);
    assert_eq!(resolved.resolved_at, Some(Timestamp::from_millis(START + 500)));

    let result = resolved.result.unwrap();
    assert_eq!(result.outcome, VoteOutcome::Failed);
    assert_eq!(result.approval_count, 1);
    assert_eq!(result.rejection_count, 1);
    assert_eq!(result.abstain_count, 0);

    let events = board.events_of(GameEventType::VoteResolved);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].created_by, Actor::House(a.id.clone()));
    assert_eq!(events[0].payload["outcome"], "FAILED");
    assert_eq!(events[0].payload["approvals"], "1");
    assert_eq!(events[0].payload["rejections"], "1");
}

#[test]
fn test_revote_overwrites_until_resolution() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    let b = board.found("Harkonnen", ledger(0.0, 0.0));

    let vote = board.votes.create_vote(ballot(&a, &[&a, &b], true), &gm()).unwrap();
    board.votes.cast_vote(&vote.id, &a.id, Reject).unwrap();
    let changed = board.votes.cast_vote(&vote.id, &a.id, Approve).unwrap();
    assert_eq!(changed.votes.len(), 1);
    assert_eq!(changed.votes[&a.id].decision, Approve);

    let resolved = board.votes.cast_vote(&vote.id, &b.id, Approve).unwrap();
    assert_eq!(resolved.status, VoteStatus::Passed);

    assert!(matches!(
        board.votes.cast_vote(&vote.id, &a.id, Reject),
        Err(ServiceError::InvalidState(_))
    ));
}

#[test]
fn test_outsider_cannot_vote() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    let b = board.found("Harkonnen", ledger(0.0, 0.0));
    let outsider = board.found("Moritani", ledger(0.0, 0.0));

    let vote = board.votes.create_vote(ballot(&a, &[&a, &b], true), &gm()).unwrap();
    let err = board.votes.cast_vote(&vote.id, &outsider.id, Approve).unwrap_err();

    assert!(matches!(err, ServiceError::Forbidden(_)));
    let stored = board.votes.vote(&vote.id).unwrap();
    assert!(stored.votes.is_empty());
    assert_eq!(stored.version, vote.version);
}

#[test]
fn test_deadline_closes_the_ballot() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    let b = board.found("Harkonnen", ledger(0.0, 0.0));

    let mut draft = ballot(&a, &[&a, &b], false);
    draft.deadline = Some(Timestamp::from_millis(START + 1_000));
    let vote = board.votes.create_vote(draft, &gm()).unwrap();

    board.votes.cast_vote(&vote.id, &a.id, Approve).unwrap();
    board.clock.advance_millis(1_001);

    assert!(matches!(
        board.votes.cast_vote(&vote.id, &b.id, Approve),
        Err(ServiceError::InvalidState(_))
    ));

    let expired = board.votes.expire_overdue(board.clock_now()).unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].status, VoteStatus::Expired);
    let result = expired[0].result.clone().unwrap();
    assert_eq!(result.outcome, VoteOutcome::Expired);
    assert_eq!(result.approval_count, 1);

    let events = board.events_of(GameEventType::VoteResolved);
    assert_eq!(events[0].payload["outcome"], "EXPIRED");
}

#[test]
fn test_cancel_rules() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    let b = board.found("Harkonnen", ledger(0.0, 0.0));

    let vote = board.votes.create_vote(ballot(&a, &[&a, &b], true), &gm()).unwrap();
    assert!(matches!(
        board.votes.cancel_vote(&vote.id, &b.id),
        Err(ServiceError::Forbidden(_))
    ));

    let cancelled = board.votes.cancel_vote(&vote.id, &a.id).unwrap();
    assert_eq!(cancelled.status, VoteStatus::Cancelled);
    assert!(cancelled.resolved_at.is_some());
    assert!(board.votes.pending_for_house(&b.id).unwrap().is_empty());

    assert!(matches!(
        board.votes.cast_vote(&vote.id, &b.id, Approve),
        Err(ServiceError::InvalidState(_))
    ));
}

#[test]
fn test_cancelling_a_resolved_vote() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));

    let vote = board.votes.create_vote(ballot(&a, &[&a], true), &gm()).unwrap();
    let passed = board.votes.cast_vote(&vote.id, &a.id, Approve).unwrap();
    assert_eq!(passed.status, VoteStatus::Passed);

    let err = board.votes.cancel_vote(&vote.id, &a.id).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));
    assert_eq!(board.votes.vote(&vote.id).unwrap().status, VoteStatus::Passed);
}

#[test]
fn test_unknown_vote() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    assert!(matches!(
        board.votes.cast_vote(&VoteId::new("missing"), &a.id, Approve),
        Err(ServiceError::NotFound { entity: "Vote", .. })
    ));
}

#[test]
fn test_pending_listing() {
    let mut board = Board::new();
    let a = board.found("Atreides", ledger(0.0, 0.0));
    let b = board.found("Harkonnen", ledger(0.0, 0.0));
    let c = board.found("Ordos", ledger(0.0, 0.0));

    board.votes.create_vote(ballot(&a, &[&a, &b], true), &gm()).unwrap();
    board.votes.create_vote(ballot(&b, &[&b, &c], true), &gm()).unwrap();

    assert_eq!(board.votes.pending_for_house(&b.id).unwrap().len(), 2);
    assert_eq!(board.votes.pending_for_house(&c.id).unwrap().len(), 1);
    assert_eq!(board.votes.votes_with_status(VoteStatus::Pending).unwrap().len(), 2);
}
