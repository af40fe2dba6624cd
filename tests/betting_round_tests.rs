// tests/betting_round_tests.rs
//
// Раунд ставок в изоляции: без колоды и HandEngine, только игроки + банк.
//
//  1) все чекают с места 2 → раунд закрывается ровно после 4-го чека
//  2) рейз места 2 и коллы 3, 0, 1 → закрытие только после колла места 1
//  3) три фолда подряд → раунд закрыт сразу, независимо от ставок
//  4) check / raise: легальность и отсутствие побочных эффектов при отказе
//  5) ход не в очередь, якорь-сфолдивший, ре-рейз, короткий all-in

use holdem_table::domain::{Chips, PlayerAtTable, PlayerStatus, SeatIndex, Street};
use holdem_table::engine::{
    BettingRound, EngineError, IllegalAction, PlayerAction, PlayerActionKind, Pot, RoundState,
};

// -----------------------------
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
// -----------------------------

fn players(n: usize, stack: u64) -> Vec<PlayerAtTable> {
    (0..n)
        .map(|i| PlayerAtTable::new(i as u64 + 1, format!("P{i}"), Chips(stack)))
        .collect()
}

fn act(
    round: &mut BettingRound,
    seats: &mut [PlayerAtTable],
    pot: &mut Pot,
    seat: SeatIndex,
    kind: PlayerActionKind,
) -> Result<RoundState, EngineError> {
    let action = PlayerAction::new(seats[seat as usize].player_id, seat, kind);
    round.apply(seats, pot, &action)
}

fn flop_round(seats: &[PlayerAtTable], start: SeatIndex) -> BettingRound {
    BettingRound::new(Street::Flop, seats, Chips::ZERO, start)
}

// -----------------------------
// ЗАВЕРШЕНИЕ РАУНДА
// -----------------------------

#[test]
fn all_check_from_seat_two_completes_after_fourth_check() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    assert_eq!(round.state, RoundState::AwaitingAction(2));
    assert_eq!(round.first_actor, Some(2));

    let s = act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Check).unwrap();
    assert_eq!(s, RoundState::AwaitingAction(3));
    let s = act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Check).unwrap();
    assert_eq!(s, RoundState::AwaitingAction(0));
    let s = act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Check).unwrap();
    assert_eq!(s, RoundState::AwaitingAction(1));
    let s = act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Check).unwrap();
    assert_eq!(s, RoundState::Complete);

    assert_eq!(round.table_bet, Chips::ZERO);
    assert_eq!(pot.total, Chips::ZERO);
}

#[test]
fn raise_then_call_around_completes_only_after_seat_before_raiser() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    let s = act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(30))).unwrap();
    assert_eq!(s, RoundState::AwaitingAction(3));
    assert_eq!(round.table_bet, Chips(30));

    act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Call).unwrap();
    let s = act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Call).unwrap();
    // Места 2, 3 и 0 уже уравняли 30, но место 1 ещё не ходило.
    assert_eq!(s, RoundState::AwaitingAction(1));

    let s = act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Call).unwrap();
    assert_eq!(s, RoundState::Complete);

    assert_eq!(pot.total, Chips(120));
    assert!(seats.iter().all(|p| p.current_bet == Chips(30)));
    assert!(seats.iter().all(|p| p.stack == Chips(970)));
    assert_eq!(round.anchor, 2);
}

#[test]
fn three_folds_complete_round_immediately() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(50))).unwrap();
    act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Fold).unwrap();
    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Fold).unwrap();
    let s = act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Fold).unwrap();

    assert_eq!(s, RoundState::Complete);
    assert_eq!(seats.iter().filter(|p| p.is_in_hand()).count(), 1);
    assert!(seats[2].is_in_hand());
}

#[test]
fn preflop_big_blind_gets_option_after_limpers() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    pot.add(seats[0].commit(Chips(5)));
    pot.add(seats[1].commit(Chips(10)));
    let mut round = BettingRound::new(Street::Preflop, &seats, Chips(10), 2);

    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Call).unwrap();
    act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Call).unwrap();
    let s = act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Call).unwrap();
    // Ставки уже равны, но большой блайнд ещё не высказался.
    assert_eq!(s, RoundState::AwaitingAction(1));

    let s = act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Check).unwrap();
    assert_eq!(s, RoundState::Complete);
    assert_eq!(pot.total, Chips(40));
}

#[test]
fn folded_first_actor_still_closes_the_circle() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Fold).unwrap();
    act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Check).unwrap();
    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Check).unwrap();
    let s = act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Check).unwrap();

    assert_eq!(s, RoundState::Complete);
}

#[test]
fn reraise_moves_anchor_to_last_raiser() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(30))).unwrap();
    act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Raise(Chips(60))).unwrap();
    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Call).unwrap();
    act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Fold).unwrap();
    let s = act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Call).unwrap();

    assert_eq!(s, RoundState::Complete);
    assert_eq!(round.anchor, 3);
    assert_eq!(round.table_bet, Chips(60));
    assert_eq!(pot.total, Chips(180));
}

#[test]
fn folded_player_is_skipped_until_round_ends() {
    let mut seats = players(3, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 0);

    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Raise(Chips(20))).unwrap();
    let s = act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Fold).unwrap();
    assert_eq!(s, RoundState::AwaitingAction(2));

    let s = act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(40))).unwrap();
    // Место 1 сфолдило – ход сразу у места 0.
    assert_eq!(s, RoundState::AwaitingAction(0));
    assert!(seats[1].is_folded());

    let s = act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Call).unwrap();
    assert_eq!(s, RoundState::Complete);
    assert!(seats[1].is_folded());
}

// -----------------------------
// ЛЕГАЛЬНОСТЬ ДЕЙСТВИЙ
// -----------------------------

#[test]
fn check_facing_bet_is_rejected_without_side_effects() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);
    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(30))).unwrap();

    let before_seats = seats.clone();
    let before_round = round.clone();
    let before_pot = pot.clone();

    let err = act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Check).unwrap_err();
    assert!(matches!(
        err,
        EngineError::IllegalAction(IllegalAction::CannotCheck { to_call: Chips(30) })
    ));
    assert!(err.is_recoverable());

    assert_eq!(seats, before_seats);
    assert_eq!(round, before_round);
    assert_eq!(pot, before_pot);
}

#[test]
fn raise_must_exceed_table_bet() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);
    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(30))).unwrap();

    let err = act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Raise(Chips(30))).unwrap_err();
    assert!(matches!(
        err,
        EngineError::IllegalAction(IllegalAction::RaiseNotAboveTableBet { .. })
    ));
    assert_eq!(round.table_bet, Chips(30));
    assert_eq!(round.current_actor(), Some(3));

    let s = act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Raise(Chips(31))).unwrap();
    assert_eq!(s, RoundState::AwaitingAction(0));
    assert_eq!(round.table_bet, Chips(31));
}

#[test]
fn raise_to_zero_on_fresh_street_is_illegal() {
    let mut seats = players(2, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 0);

    let err = act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Raise(Chips::ZERO)).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction(_)));
}

#[test]
fn call_when_already_matched_acts_as_check() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    let s = act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Call).unwrap();
    assert_eq!(s, RoundState::AwaitingAction(3));
    assert_eq!(pot.total, Chips::ZERO);
    assert_eq!(seats[2].stack, Chips(1000));

    let last = round.last_action.clone().unwrap();
    assert_eq!(last.committed, Chips::ZERO);
    assert_eq!(last.kind, PlayerActionKind::Call);
}

#[test]
fn out_of_turn_action_is_rejected() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    let err = act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Check).unwrap_err();
    assert!(matches!(
        err,
        EngineError::OutOfTurn {
            seat: 0,
            expected: Some(2)
        }
    ));
    assert_eq!(round.current_actor(), Some(2));
}

#[test]
fn wrong_player_id_for_seat_is_rejected() {
    let mut seats = players(4, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    let action = PlayerAction::new(99, 2, PlayerActionKind::Check);
    let err = round.apply(&mut seats, &mut pot, &action).unwrap_err();
    assert!(matches!(err, EngineError::PlayerNotAtTable(99)));
}

#[test]
fn acting_after_round_complete_is_rejected() {
    let mut seats = players(2, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 0);

    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Check).unwrap();
    act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Check).unwrap();
    assert!(round.is_complete());

    let err = act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Check).unwrap_err();
    assert!(matches!(
        err,
        EngineError::IllegalAction(IllegalAction::RoundComplete)
    ));
}

#[test]
fn last_action_records_raise_target_and_table_bet() {
    let mut seats = players(3, 1000);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 0);

    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Raise(Chips(25))).unwrap();
    let last = round.last_action.clone().unwrap();
    assert_eq!(last.amount, Chips(25));
    assert_eq!(last.committed, Chips(25));

    act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Fold).unwrap();
    let last = round.last_action.clone().unwrap();
    assert_eq!(last.seat, 1);
    assert_eq!(last.kind, PlayerActionKind::Fold);
    assert_eq!(last.amount, Chips(25));
}

// -----------------------------
// КОРОТКИЕ СТЕКИ
// -----------------------------

#[test]
fn capped_raise_records_bet_actually_made() {
    let mut seats = players(4, 1000);
    seats[2].stack = Chips(35);
    let mut pot = Pot::new();
    pot.add(seats[0].commit(Chips(5)));
    pot.add(seats[1].commit(Chips(10)));
    let mut round = BettingRound::new(Street::Preflop, &seats, Chips(10), 2);

    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(100))).unwrap();

    let last = round.last_action.clone().unwrap();
    assert_eq!(last.kind, PlayerActionKind::Raise(Chips(100)));
    assert_eq!(last.amount, Chips(35));
    assert_eq!(last.committed, Chips(35));
    assert_eq!(round.table_bet, Chips(35));
    assert_eq!(seats[2].status, PlayerStatus::AllIn);
}

#[test]
fn short_call_goes_all_in_and_counts_as_settled() {
    let mut seats = players(4, 1000);
    seats[3].stack = Chips(20);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 2);

    act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Raise(Chips(30))).unwrap();
    act(&mut round, &mut seats, &mut pot, 3, PlayerActionKind::Call).unwrap();
    assert_eq!(seats[3].status, PlayerStatus::AllIn);
    assert_eq!(seats[3].stack, Chips::ZERO);
    assert_eq!(seats[3].current_bet, Chips(20));

    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Call).unwrap();
    let s = act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Call).unwrap();

    assert_eq!(s, RoundState::Complete);
    assert_eq!(pot.total, Chips(110));
}

#[test]
fn all_in_raise_below_table_bet_does_not_reopen_action() {
    let mut seats = players(3, 1000);
    seats[1].stack = Chips(15);
    let mut pot = Pot::new();
    let mut round = flop_round(&seats, 0);

    act(&mut round, &mut seats, &mut pot, 0, PlayerActionKind::Raise(Chips(40))).unwrap();
    act(&mut round, &mut seats, &mut pot, 1, PlayerActionKind::Raise(Chips(100))).unwrap();

    assert_eq!(round.table_bet, Chips(40));
    assert_eq!(round.anchor, 0);
    assert_eq!(seats[1].status, PlayerStatus::AllIn);

    let s = act(&mut round, &mut seats, &mut pot, 2, PlayerActionKind::Call).unwrap();
    assert_eq!(s, RoundState::Complete);
}

#[test]
fn round_with_single_player_able_to_act_starts_complete() {
    let mut seats = players(2, 100);
    seats[0].commit(Chips(100));
    // Новая улица: ставки обнулены, у места 0 пустой стек.
    seats[0].current_bet = Chips::ZERO;

    let round = flop_round(&seats, 0);
    assert!(round.is_complete());
    assert_eq!(round.current_actor(), None);
}
