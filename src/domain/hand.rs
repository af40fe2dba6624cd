use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex};

/// Улица раздачи. `Waiting` – раздача не идёт.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Street {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица внутри раздачи.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Waiting | Street::Showdown => None,
        }
    }

    /// Сколько карт борда открывается при переходе на эту улицу.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }

    /// Сколько карт борда должно быть открыто на этой улице.
    pub fn board_size(self) -> usize {
        match self {
            Street::Waiting | Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }

    /// Идёт ли на этой улице торговля.
    pub fn is_betting(self) -> bool {
        matches!(self, Street::Preflop | Street::Flop | Street::Turn | Street::River)
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Waiting => "waiting",
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    /// Сколько игрок внёс в банк за раздачу.
    pub contributed: Chips,
    /// Сколько забрал из банка (0 у проигравших).
    pub won: Chips,
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    /// Улица, на которой раздача закончилась.
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub winner_seat: SeatIndex,
    pub winner_id: PlayerId,
    /// true – победитель выбран на шоудауне, false – все остальные сфолдили.
    pub went_to_showdown: bool,
    pub results: Vec<PlayerHandResult>,
}
