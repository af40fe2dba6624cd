//! Выбор победителя на шоудауне.
//!
//! Движок не оценивает руки сам: он передаёт оставшихся игроков и борд
//! реализации `ShowdownResolver`. Базовая реализация выбирает победителя
//! случайно; настоящий эвалюатор подключается без изменений в движке.

use crate::domain::{Card, PlayerAtTable, SeatIndex};
use crate::engine::RandomSource;

/// Игрок, дошедший до шоудауна.
#[derive(Clone, Copy, Debug)]
pub struct Contender<'a> {
    pub seat: SeatIndex,
    pub player: &'a PlayerAtTable,
}

pub trait ShowdownResolver {
    /// Вернуть место победителя. `contenders` никогда не пуст.
    fn resolve(&mut self, contenders: &[Contender<'_>], board: &[Card]) -> SeatIndex;
}

/// Равновероятный выбор среди оставшихся игроков.
#[derive(Clone, Debug, Default)]
pub struct RandomShowdown<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> RandomShowdown<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> ShowdownResolver for RandomShowdown<R> {
    fn resolve(&mut self, contenders: &[Contender<'_>], _board: &[Card]) -> SeatIndex {
        let idx = self.rng.below(contenders.len() as u64) as usize;
        contenders[idx].seat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Chips;
    use crate::infra::rng::DeterministicRng;

    #[test]
    fn random_showdown_only_picks_contenders() {
        let players: Vec<PlayerAtTable> = (0..4)
            .map(|i| PlayerAtTable::new(i + 1, format!("P{i}"), Chips(100)))
            .collect();
        let contenders = [
            Contender { seat: 1, player: &players[1] },
            Contender { seat: 3, player: &players[3] },
        ];

        let mut resolver = RandomShowdown::new(DeterministicRng::from_seed(7));
        for _ in 0..50 {
            let seat = resolver.resolve(&contenders, &[]);
            assert!(seat == 1 || seat == 3);
        }
    }
}
