//! Покерный движок: ставки, переход улиц, шоудаун.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` / `act` – применить действие игрока
//!   - `advance_if_needed` – авто-переход улиц/завершение раздачи

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod validation;

pub use actions::{ActionRecord, PlayerAction, PlayerActionKind};
pub use betting::{BettingRound, RoundState};
pub use errors::{EngineError, IllegalAction};
pub use game_loop::{HandEngine, HandStatus};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use showdown::{Contender, RandomShowdown, ShowdownResolver};

/// RNG интерфейс для engine. Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерное число в `0..bound` (0 при `bound == 0`).
    fn below(&mut self, bound: u64) -> u64;
    /// Независимый поток из текущего: его выдача не повторяет выдачу родителя.
    fn fork(&mut self) -> Self
    where
        Self: Sized;
}
