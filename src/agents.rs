//! Простые боты, которые ходят через тот же интерфейс, что и человек.
//!
//! Бот видит только публичный снимок стола (`TableViewDto`) и возвращает
//! `PlayerActionKind`; легальность хода всё равно проверяет движок.

use crate::api::{self, ApiError, Command, CommandResponse, HandResultDto, TableViewDto};
use crate::domain::{Chips, SeatIndex};
use crate::engine::{HandEngine, PlayerActionKind, RandomSource};

pub trait Agent {
    fn decide(&mut self, view: &TableViewDto, seat: SeatIndex) -> PlayerActionKind;
}

/// Бот со взвешенным случайным выбором.
///
/// Можно чекнуть: fold 10%, check 60%, raise 30%.
/// Есть ставка: fold 30%, call 50%, raise 20%.
/// Raise – до `table_bet + 10..=table_bet + 50`.
#[derive(Clone, Debug)]
pub struct WeightedRandomAgent<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> WeightedRandomAgent<R> {
    pub const CHECK_WEIGHTS: [u64; 3] = [10, 60, 30];
    pub const CALL_WEIGHTS: [u64; 3] = [30, 50, 20];
    pub const RAISE_MIN: u64 = 10;
    pub const RAISE_MAX: u64 = 50;

    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Индекс по весам.
    fn pick(&mut self, weights: &[u64; 3]) -> usize {
        let total: u64 = weights.iter().sum();
        let mut roll = self.rng.below(total);
        for (idx, w) in weights.iter().enumerate() {
            if roll < *w {
                return idx;
            }
            roll -= w;
        }
        weights.len() - 1
    }

    fn raise_target(&mut self, table_bet: Chips) -> PlayerActionKind {
        let extra = Self::RAISE_MIN + self.rng.below(Self::RAISE_MAX - Self::RAISE_MIN + 1);
        PlayerActionKind::Raise(table_bet + Chips(extra))
    }
}

impl<R: RandomSource> Agent for WeightedRandomAgent<R> {
    fn decide(&mut self, view: &TableViewDto, seat: SeatIndex) -> PlayerActionKind {
        let my_bet = view
            .players
            .get(seat as usize)
            .map(|p| p.current_bet)
            .unwrap_or(Chips::ZERO);

        if my_bet == view.table_bet {
            match self.pick(&Self::CHECK_WEIGHTS) {
                0 => PlayerActionKind::Fold,
                1 => PlayerActionKind::Check,
                _ => self.raise_target(view.table_bet),
            }
        } else {
            match self.pick(&Self::CALL_WEIGHTS) {
                0 => PlayerActionKind::Fold,
                1 => PlayerActionKind::Call,
                _ => self.raise_target(view.table_bet),
            }
        }
    }
}

/// Сыграть одну раздачу ботами: по агенту на каждое место.
///
/// Отклонённый ход повторяется с тем же снимком. Каждая попытка, включая
/// отклонённые, идёт в счёт `max_actions`; по исчерпании лимита раздача
/// снимается с возвратом взносов и возвращается `ApiError::HandAborted`.
pub fn play_hand<R: RandomSource, A: Agent>(
    engine: &mut HandEngine<R>,
    agents: &mut [A],
    max_actions: usize,
) -> Result<(TableViewDto, HandResultDto), ApiError> {
    let mut response = api::execute(engine, Command::StartHand, None)?;

    for _ in 0..max_actions {
        let view = match response {
            CommandResponse::HandFinished { table, result } => return Ok((table, result)),
            CommandResponse::TableState(view) => view,
        };

        let Some(seat) = view.current_actor_seat else {
            response = api::execute(engine, Command::Advance, None)?;
            continue;
        };
        let agent = agents
            .get_mut(seat as usize)
            .ok_or_else(|| ApiError::Internal(format!("нет агента для места {seat}")))?;

        let action = agent.decide(&view, seat);
        log::debug!("seat {} ({}) -> {}", seat, view.street, action);

        response = match api::submit_action(engine, seat, action, None) {
            Ok(resp) => resp,
            Err(ApiError::Rejected(msg)) => {
                log::debug!("seat {} rejected: {}", seat, msg);
                CommandResponse::TableState(view)
            }
            Err(e) => return Err(e),
        };
    }

    if let CommandResponse::HandFinished { table, result } = response {
        return Ok((table, result));
    }

    let reason = format!("лимит в {max_actions} действий исчерпан");
    engine.cancel_hand(&reason)?;
    Err(ApiError::HandAborted(reason))
}
