use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус игрока в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче и может ходить.
    Active,
    /// Игрок сфолдил и больше не участвует в банке до следующей раздачи.
    Folded,
    /// Стек ушёл в банк целиком – игрок в раздаче, но больше не ходит.
    AllIn,
    /// На старте раздачи стек был пустым – раздачу пропускает.
    Busted,
}

/// Состояние игрока за столом. Стек переживает раздачи,
/// всё остальное сбрасывается в `reset_for_hand`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    pub name: String,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Ставка в текущем раунде торговли.
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Карманные карты (0–2).
    pub hole_cards: Vec<Card>,
}

impl PlayerAtTable {
    pub fn new(player_id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            player_id,
            name: name.into(),
            stack,
            current_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
        }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.hole_cards.push(card);
    }

    /// Подготовить игрока к новой раздаче. Стек не трогаем.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = Chips::ZERO;
        self.status = if self.stack.is_zero() {
            PlayerStatus::Busted
        } else {
            PlayerStatus::Active
        };
    }

    /// Переложить из стека в `current_bet` не более `amount`.
    /// Возвращает реально внесённую сумму; опустевший стек = all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.current_bet += real;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        real
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    /// Участвует в банке (не сфолдил и не пропускает раздачу).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может сделать ход в раунде торговли.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}
