mod common;

use common::{ballot, gm, ledger, offer, Board, START};
use landsraad_domain::{
    Actor, Decision, EconomyState, GameEventType, Timestamp, TradeOffering, TradeStatus,
    VoteStatus,
};
use landsraad_usecase::ServiceError;

#[test]
fn test_turn_runs_every_sweep() {
    let mut board = Board::new();
    let x = board.found("Ix", EconomyState::new(150.0, 0.0, 10.0, 0.0));
    let y = board.found("Tleilax", ledger(0.0, 80.0));

    let one_time = board
        .trades
        .propose_trade(offer(&x, &y, TradeOffering::spice(100.0), TradeOffering::solaris(50.0)))
        .unwrap();
    board.trades.accept_trade(&one_time.id, &y.id).unwrap();

    let mut stale = offer(&x, &y, TradeOffering::spice(10.0), TradeOffering::default());
    stale.expires_at = Some(Timestamp::from_millis(START + 1_000));
    let stale = board.trades.propose_trade(stale).unwrap();

    let mut draft = ballot(&x, &[&x, &y], false);
    draft.deadline = Some(Timestamp::from_millis(START + 1_000));
    let vote = board.votes.create_vote(draft, &gm()).unwrap();
    board.votes.cast_vote(&vote.id, &x.id, Decision::Approve).unwrap();

    board.clock.advance_millis(5_000);
    let mut driver = board.driver();
    let summary = driver.advance(&gm()).unwrap();

    assert_eq!(summary.cycle, 1);
    assert_eq!(summary.balances["Ix"].change, 10.0);
    assert_eq!(summary.balances["Tleilax"].change, 0.0);

    assert_eq!(summary.completed_trades.len(), 1);
    assert_eq!(summary.completed_trades[0].id, one_time.id);
    assert_eq!(summary.completed_trades[0].status, TradeStatus::Completed);

    assert_eq!(summary.lapsed_proposals.len(), 1);
    assert_eq!(summary.lapsed_proposals[0].id, stale.id);
    assert_eq!(board.trades.trade(&stale.id).unwrap().status, TradeStatus::Cancelled);

    assert_eq!(summary.expired_votes.len(), 1);
    assert_eq!(board.votes.vote(&vote.id).unwrap().status, VoteStatus::Expired);

    let messages: Vec<String> = board
        .events_of(GameEventType::TradeStatusChanged)
        .into_iter()
        .map(|e| e.payload["message"].clone())
        .collect();
    assert!(messages.contains(&"Trade term completed".to_string()));
    assert!(messages.contains(&"Trade proposal expired".to_string()));
}

#[test]
fn test_trade_completes_after_its_term() {
    let mut board = Board::new();
    let x = board.found("Ix", ledger(150.0, 0.0));
    let y = board.found("Tleilax", ledger(0.0, 80.0));

    let mut proposal = offer(&x, &y, TradeOffering::spice(10.0), TradeOffering::solaris(5.0));
    proposal.duration = Some(3);
    let deal = board.trades.propose_trade(proposal).unwrap();
    board.trades.accept_trade(&deal.id, &y.id).unwrap();

    let mut driver = board.driver();
    for cycle in 1..=2 {
        let summary = driver.advance(&gm()).unwrap();
        assert_eq!(summary.cycle, cycle);
        assert!(summary.completed_trades.is_empty());
        assert_eq!(board.trades.trade(&deal.id).unwrap().cycles_active, cycle as u32);
    }

    let third = driver.advance(&gm()).unwrap();
    assert_eq!(third.completed_trades.len(), 1);
    assert_eq!(board.trades.trade(&deal.id).unwrap().status, TradeStatus::Completed);
    assert_eq!(driver.current_cycle().unwrap(), 3);
}

#[test]
fn test_proposals_are_not_swept_before_expiry() {
    let mut board = Board::new();
    let x = board.found("Ix", ledger(150.0, 0.0));
    let y = board.found("Tleilax", ledger(0.0, 80.0));

    let mut proposal = offer(&x, &y, TradeOffering::spice(10.0), TradeOffering::default());
    proposal.expires_at = Some(Timestamp::from_millis(START + 60_000));
    let deal = board.trades.propose_trade(proposal).unwrap();

    let summary = board.driver().advance(&gm()).unwrap();
    assert!(summary.lapsed_proposals.is_empty());
    assert_eq!(board.trades.trade(&deal.id).unwrap().status, TradeStatus::Proposed);
}

#[test]
fn test_only_admin_advances() {
    let mut board = Board::new();
    let x = board.found("Ix", EconomyState::new(0.0, 0.0, 10.0, 0.0));

    let mut driver = board.driver();
    let err = driver.advance(&Actor::House(x.id.clone())).unwrap_err();

    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert_eq!(driver.current_cycle().unwrap(), 0);
    assert_eq!(board.house(&x.id).economy.solari_balance, 0.0);
}
