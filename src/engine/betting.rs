use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::SeatIndex;
use crate::engine::actions::{ActionRecord, PlayerAction, PlayerActionKind};
use crate::engine::errors::{EngineError, IllegalAction};
use crate::engine::positions::{count_can_act, count_in_hand, next_actor_seat};
use crate::engine::pot::Pot;
use crate::engine::validation::{diff_to_call, validate_action};

/// Состояние раунда ставок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundState {
    /// Ждём хода от этого места.
    AwaitingAction(SeatIndex),
    /// Раунд закрыт: круг замкнулся или в раздаче остался один игрок.
    Complete,
}

/// Раунд ставок на одной улице.
///
/// Завершённость определяется не равенством ставок в моменте, а полным
/// кругом: ход должен вернуться к `anchor` (первому ходящему улицы или
/// последнему рейзеру), и к этому моменту все участники раздачи должны
/// уравнять `table_bet` (или быть в all-in).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    pub street: Street,
    pub state: RoundState,
    /// Ставка, до которой должен дотянуться каждый игрок в раздаче.
    pub table_bet: Chips,
    /// Кто открыл торговлю на этой улице.
    pub first_actor: Option<SeatIndex>,
    /// Место, возвращение хода к которому замыкает круг.
    pub anchor: SeatIndex,
    pub last_action: Option<ActionRecord>,
}

impl BettingRound {
    /// Открыть раунд. Первым ходит ближайший к `start` (включительно) игрок,
    /// который может ходить. Если торговаться некому, раунд сразу закрыт.
    pub fn new(street: Street, seats: &[PlayerAtTable], table_bet: Chips, start: SeatIndex) -> Self {
        let first_actor = next_actor_seat(seats, start, true);
        let mut round = Self {
            street,
            state: RoundState::Complete,
            table_bet,
            first_actor,
            anchor: first_actor.unwrap_or(start),
            last_action: None,
        };

        let nothing_to_decide = count_in_hand(seats) <= 1
            || (count_can_act(seats) <= 1 && round.all_settled(seats));

        if let (Some(seat), false) = (first_actor, nothing_to_decide) {
            round.state = RoundState::AwaitingAction(seat);
        }
        round
    }

    pub fn current_actor(&self) -> Option<SeatIndex> {
        match self.state {
            RoundState::AwaitingAction(seat) => Some(seat),
            RoundState::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == RoundState::Complete
    }

    /// Применить действие текущего игрока.
    ///
    /// Сначала все проверки, потом мутации: отклонённое действие
    /// не меняет ни игроков, ни банк, ни состояние раунда.
    pub fn apply(
        &mut self,
        seats: &mut [PlayerAtTable],
        pot: &mut Pot,
        action: &PlayerAction,
    ) -> Result<RoundState, EngineError> {
        let seat_idx = action.seat as usize;
        let player_ref = seats
            .get(seat_idx)
            .ok_or(EngineError::InvalidSeat(action.seat))?;

        if player_ref.player_id != action.player_id {
            return Err(EngineError::PlayerNotAtTable(action.player_id));
        }

        let expected = match self.state {
            RoundState::Complete => return Err(IllegalAction::RoundComplete.into()),
            RoundState::AwaitingAction(seat) => seat,
        };
        if action.seat != expected {
            return Err(EngineError::OutOfTurn {
                seat: action.seat,
                expected: Some(expected),
            });
        }

        validate_action(player_ref, &action.kind, self.table_bet)?;

        let player = &mut seats[seat_idx];
        let committed = match action.kind {
            PlayerActionKind::Fold => {
                player.fold();
                Chips::ZERO
            }
            PlayerActionKind::Check => Chips::ZERO,
            PlayerActionKind::Call => {
                let to_call = diff_to_call(player, self.table_bet);
                player.commit(to_call)
            }
            PlayerActionKind::Raise(target) => {
                let diff = target - player.current_bet;
                player.commit(diff)
            }
        };
        pot.add(committed);

        let mut amount = self.table_bet;
        if let PlayerActionKind::Raise(_) = action.kind {
            // Стек мог не покрыть заявку – в записи реальная ставка.
            amount = player.current_bet;
            // Короткий all-in может не дотянуть даже до текущей ставки – тогда это не рейз.
            if player.current_bet > self.table_bet {
                self.table_bet = player.current_bet;
                self.anchor = action.seat;
            }
        }

        self.last_action = Some(ActionRecord {
            seat: action.seat,
            player_id: action.player_id,
            kind: action.kind,
            amount,
            committed,
        });

        self.state = self.next_state(seats, action.seat);
        Ok(self.state)
    }

    /// Все участники раздачи уравняли ставку стола (all-in считается уравнявшим).
    pub fn all_settled(&self, seats: &[PlayerAtTable]) -> bool {
        seats
            .iter()
            .filter(|p| p.is_in_hand())
            .all(|p| p.current_bet == self.table_bet || p.status == PlayerStatus::AllIn)
    }

    /// Передать ход по часовой стрелке от `from`.
    ///
    /// Якорь ловим при проходе через его место, даже если он уже сфолдил.
    fn next_state(&self, seats: &[PlayerAtTable], from: SeatIndex) -> RoundState {
        if count_in_hand(seats) <= 1 {
            return RoundState::Complete;
        }

        let settled = self.all_settled(seats);
        let n = seats.len();
        for step in 1..=n {
            let seat = ((from as usize + step) % n) as SeatIndex;
            if seat == self.anchor && settled {
                return RoundState::Complete;
            }
            if seats[seat as usize].can_act() {
                return RoundState::AwaitingAction(seat);
            }
        }

        RoundState::Complete
    }
}
