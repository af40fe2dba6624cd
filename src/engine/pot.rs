use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Банк раздачи. Сайд-потов нет – банк целиком уходит одному победителю.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self { total: Chips::ZERO }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать весь банк (для выплаты), банк обнуляется.
    pub fn take_all(&mut self) -> Chips {
        std::mem::take(&mut self.total)
    }

    pub fn reset(&mut self) {
        self.total = Chips::ZERO;
    }
}
