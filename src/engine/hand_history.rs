use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_id: HandId },

    /// Блайнды: (место, сколько реально внесено).
    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Игрок получил карманную карту.
    HoleCardDealt { seat: SeatIndex, card: Card },

    /// Действие игрока.
    PlayerActed {
        player_id: PlayerId,
        seat: SeatIndex,
        action: PlayerActionKind,
        committed: Chips,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Сожжённая карта перед флопом/тёрном/ривером.
    CardBurned,

    /// Открыты общие карты (весь борд после открытия).
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Выплата банка.
    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
        showdown: bool,
    },

    /// Раздача прервана, взносы возвращены игрокам.
    HandAborted { reason: String },

    /// Раздача завершена.
    HandFinished { hand_id: HandId },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история одной раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все действия игроков за раздачу, по порядку.
    pub fn actions(&self) -> impl Iterator<Item = (SeatIndex, PlayerActionKind)> + '_ {
        self.events.iter().filter_map(|e| match &e.kind {
            HandEventKind::PlayerActed { seat, action, .. } => Some((*seat, *action)),
            _ => None,
        })
    }
}
