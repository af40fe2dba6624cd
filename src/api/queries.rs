use serde::{Deserialize, Serialize};

use crate::domain::hand::Street;
use crate::domain::SeatIndex;
use crate::engine::{HandEngine, RandomSource};

use super::dto::{HandResultDto, LastActionDto, PlayerAtTableDto, TableViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние стола глазами игрока `hero` (None – наблюдатель).
    GetTable { hero: Option<SeatIndex> },

    /// Итог последней завершённой раздачи.
    LastHand,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Table(TableViewDto),
    LastHand(Option<HandResultDto>),
}

pub fn handle_query<R: RandomSource>(engine: &HandEngine<R>, query: Query) -> QueryResponse {
    match query {
        Query::GetTable { hero } => QueryResponse::Table(build_table_view(engine, hero)),
        Query::LastHand => QueryResponse::LastHand(engine.last_summary.clone().map(Into::into)),
    }
}

/// Сформировать снимок стола. Чужие карманные карты открываются
/// только после шоудауна.
pub fn build_table_view<R: RandomSource>(engine: &HandEngine<R>, hero: Option<SeatIndex>) -> TableViewDto {
    let table = &engine.table;

    let showdown_reached = match table.street {
        Street::Showdown => true,
        Street::Waiting => engine
            .last_summary
            .as_ref()
            .map_or(false, |s| s.went_to_showdown),
        _ => false,
    };

    let players = table
        .seats
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let seat = idx as SeatIndex;
            let show_cards = hero == Some(seat) || (showdown_reached && p.is_in_hand());
            PlayerAtTableDto {
                player_id: p.player_id,
                display_name: p.name.clone(),
                seat_index: seat,
                stack: p.stack,
                current_bet: p.current_bet,
                folded: p.is_folded(),
                status: p.status,
                hole_cards: if show_cards {
                    Some(p.hole_cards.clone())
                } else {
                    None
                },
            }
        })
        .collect();

    let round = engine.betting.as_ref();
    let last_action = round
        .and_then(|b| b.last_action.as_ref())
        .map(|a| LastActionDto {
            seat_index: a.seat,
            display_name: table
                .player(a.seat)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            action: a.kind,
            amount: a.amount,
        });

    TableViewDto {
        name: table.config.name.clone(),
        hand_id: engine.hand_id,
        small_blind: table.config.stakes.small_blind,
        big_blind: table.config.stakes.big_blind,
        street: table.street,
        pot: engine.pot.total,
        table_bet: engine.table_bet(),
        board: table.board.clone(),
        players,
        hand_in_progress: table.hand_in_progress(),
        current_actor_seat: engine.current_actor(),
        first_actor_seat: round.and_then(|b| b.first_actor),
        last_action,
    }
}
