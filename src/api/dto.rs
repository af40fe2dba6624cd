use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandSummary, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::{HandStatus, PlayerActionKind};

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTableDto {
    pub player_id: PlayerId,
    pub display_name: String,
    pub seat_index: SeatIndex,
    pub stack: Chips,
    pub current_bet: Chips,
    pub folded: bool,
    pub status: PlayerStatus,
    /// Карманные карты – только для "героя" или после шоудауна.
    pub hole_cards: Option<Vec<Card>>,
}

/// Последнее действие за столом в виде для UI.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastActionDto {
    pub seat_index: SeatIndex,
    pub display_name: String,
    pub action: PlayerActionKind,
    pub amount: Chips,
}

/// Публичный снимок стола – всё, что нужно внешнему UI для отрисовки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub name: String,
    pub hand_id: HandId,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub street: Street,
    pub pot: Chips,
    pub table_bet: Chips,
    pub board: Vec<Card>,
    pub players: Vec<PlayerAtTableDto>,
    /// Есть ли активная раздача.
    pub hand_in_progress: bool,
    /// Текущий игрок, чей ход (если идёт торговля).
    pub current_actor_seat: Option<SeatIndex>,
    /// Кто открыл торговлю на текущей улице.
    pub first_actor_seat: Option<SeatIndex>,
    pub last_action: Option<LastActionDto>,
}

/// Результат одного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandPlayerResultDto {
    pub player_id: PlayerId,
    pub seat_index: SeatIndex,
    pub contributed: Chips,
    pub won: Chips,
    pub is_winner: bool,
}

/// DTO одной сыгранной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResultDto {
    pub hand_id: HandId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub winner_seat: SeatIndex,
    pub winner_id: PlayerId,
    pub went_to_showdown: bool,
    pub players: Vec<HandPlayerResultDto>,
}

impl From<HandSummary> for HandResultDto {
    fn from(summary: HandSummary) -> Self {
        let players = summary
            .results
            .into_iter()
            .map(|r| HandPlayerResultDto {
                player_id: r.player_id,
                seat_index: r.seat,
                contributed: r.contributed,
                won: r.won,
                is_winner: r.is_winner,
            })
            .collect();

        HandResultDto {
            hand_id: summary.hand_id,
            street_reached: summary.street_reached,
            board: summary.board,
            total_pot: summary.total_pot,
            winner_seat: summary.winner_seat,
            winner_id: summary.winner_id,
            went_to_showdown: summary.went_to_showdown,
            players,
        }
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Раздача продолжается – обновлённое состояние стола.
    TableState(TableViewDto),

    /// Раздача закончилась этим действием.
    HandFinished {
        table: TableViewDto,
        result: HandResultDto,
    },
}

impl CommandResponse {
    pub fn table(&self) -> &TableViewDto {
        match self {
            CommandResponse::TableState(table) => table,
            CommandResponse::HandFinished { table, .. } => table,
        }
    }
}

/// Помощник: преобразование HandStatus движка в DTO.
pub fn map_hand_status_to_response(status: HandStatus, table_dto: TableViewDto) -> CommandResponse {
    match status {
        HandStatus::Ongoing => CommandResponse::TableState(table_dto),
        HandStatus::Finished(summary) => CommandResponse::HandFinished {
            table: table_dto,
            result: summary.into(),
        },
    }
}
