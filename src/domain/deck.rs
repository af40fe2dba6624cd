use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Колода закончилась – при корректном учёте недостижимо.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("В колоде не осталось карт")]
    Empty,
}

/// Колода карт: упорядоченный список, "верх" колоды – конец вектора.
/// Сама колода случайность не генерирует, перемешивание делает переданный RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Hearts 2..A, Diamonds 2..A, Clubs 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Пересобрать полную колоду и перемешать её.
    /// Всё, что было вытянуто раньше, возвращается в колоду.
    pub fn reset<R: RandomSource>(&mut self, rng: &mut R) {
        *self = Deck::standard_52();
        rng.shuffle(&mut self.cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::standard_52()
    }
}
