use crate::domain::{Chips, ConfigError, DeckError, PlayerId, SeatIndex, Street};

use thiserror::Error;

/// Почему действие нарушает правила торговли.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("check невозможен – нужно доставить {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("raise до {amount} не превышает ставку стола {table_bet}")]
    RaiseNotAboveTableBet { amount: Chips, table_bet: Chips },

    #[error("раунд торговли уже завершён")]
    RoundComplete,
}

/// Ошибки движка покера.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Недопустимое действие: {0}")]
    IllegalAction(#[from] IllegalAction),

    #[error("Сейчас ход места {expected:?}, а не {seat}")]
    OutOfTurn {
        seat: SeatIndex,
        expected: Option<SeatIndex>,
    },

    #[error("В колоде закончились карты, раздача прервана")]
    EmptyDeck,

    #[error("Недостаточно игроков с фишками для раздачи")]
    InsufficientPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Раунд торговли ещё не завершён")]
    RoundNotComplete,

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Игрок {0} не сидит на указанном месте")]
    PlayerNotAtTable(PlayerId),

    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Операция {op} недоступна на улице {street}")]
    IllegalState { op: &'static str, street: Street },

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl From<DeckError> for EngineError {
    fn from(err: DeckError) -> Self {
        match err {
            DeckError::Empty => EngineError::EmptyDeck,
        }
    }
}

impl EngineError {
    /// Ошибка хода, после которой игрок может просто выбрать другое действие.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalAction(_)
                | EngineError::OutOfTurn { .. }
                | EngineError::InvalidSeat(_)
                | EngineError::PlayerNotAtTable(_)
        )
    }
}
