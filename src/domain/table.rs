use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerAtTable;

/// Индекс места за столом (0..seats-1), по часовой стрелке.
pub type SeatIndex = u8;

/// Больше мест колода не обслужит с запасом (2 карты на игрока + 3 burn + 5 борд).
pub const MAX_SEATS: usize = 10;

/// Ошибки конфигурации стола.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("За столом должно быть от 2 до {MAX_SEATS} мест, задано {0}")]
    SeatCount(usize),

    #[error("Малый блайнд должен быть больше нуля")]
    ZeroSmallBlind,

    #[error("Большой блайнд ({big}) меньше малого ({small})")]
    BlindsOutOfOrder { small: Chips, big: Chips },

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Блайнды стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

/// Конфиг стола: имя, блайнды, стартовый стек и имена игроков по местам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub name: String,
    pub stakes: TableStakes,
    pub starting_stack: Chips,
    /// Имя игрока на каждом месте; длина = количество мест.
    pub seats: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Texas Hold'em".to_string(),
            stakes: TableStakes::new(Chips(5), Chips(10)),
            starting_stack: Chips(1000),
            seats: ["Player", "CPU1", "CPU2", "CPU3"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TableConfig {
    /// Загрузить конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.seats.len();
        if !(2..=MAX_SEATS).contains(&n) {
            return Err(ConfigError::SeatCount(n));
        }
        if self.stakes.small_blind.is_zero() {
            return Err(ConfigError::ZeroSmallBlind);
        }
        if self.stakes.big_blind < self.stakes.small_blind {
            return Err(ConfigError::BlindsOutOfOrder {
                small: self.stakes.small_blind,
                big: self.stakes.big_blind,
            });
        }
        Ok(())
    }
}

/// Состояние стола: игроки, борд, улица.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    pub seats: Vec<PlayerAtTable>,

    /// Общие карты борда (0–5 карт).
    pub board: Vec<Card>,

    /// Текущая улица; `Waiting` между раздачами.
    pub street: Street,
}

impl Table {
    /// Посадить игроков из конфига; player_id = номер места + 1.
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats = config
            .seats
            .iter()
            .enumerate()
            .map(|(idx, name)| PlayerAtTable::new(idx as u64 + 1, name.clone(), config.starting_stack))
            .collect();
        Ok(Self {
            config,
            seats,
            board: Vec::new(),
            street: Street::Waiting,
        })
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(seat as usize)
    }

    pub fn hand_in_progress(&self) -> bool {
        self.street != Street::Waiting
    }

    /// Игроки, у которых есть фишки (могут сесть в раздачу).
    pub fn funded_count(&self) -> usize {
        self.seats.iter().filter(|p| !p.stack.is_zero()).count()
    }

    /// Сумма всех стеков (без банка).
    pub fn total_stacks(&self) -> Chips {
        self.seats.iter().map(|p| p.stack).sum()
    }
}
