use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Raise *до* указанной суммы (итоговая ставка игрока в раунде).
    Raise(Chips),
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// В каком месте он сидит.
    pub seat: SeatIndex,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, seat: SeatIndex, kind: PlayerActionKind) -> Self {
        Self {
            player_id,
            seat,
            kind,
        }
    }
}

/// Запись о последнем принятом действии (для UI).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub kind: PlayerActionKind,
    /// Для raise – итоговая ставка игрока (с учётом стека), для остальных – ставка стола.
    pub amount: Chips,
    /// Сколько фишек реально ушло в банк этим действием.
    pub committed: Chips,
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => f.write_str("fold"),
            PlayerActionKind::Check => f.write_str("check"),
            PlayerActionKind::Call => f.write_str("call"),
            PlayerActionKind::Raise(to) => write!(f, "raise to {to}"),
        }
    }
}
