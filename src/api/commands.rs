use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;
use crate::engine::{HandEngine, HandStatus, PlayerActionKind, RandomSource};

use super::dto::{map_hand_status_to_response, CommandResponse};
use super::errors::ApiError;
use super::queries::build_table_view;

/// Команда верхнего уровня – всё, что меняет состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Запустить новую раздачу (если сейчас нет активной).
    StartHand,

    /// Действие игрока на месте `seat`.
    PlayerAction {
        seat: SeatIndex,
        action: PlayerActionKind,
    },

    /// Прогнать автоматические шаги (улицы/шоудаун), если они ожидают.
    Advance,
}

/// Выполнить команду. `hero` – чьими глазами строить снимок в ответе.
pub fn execute<R: RandomSource>(
    engine: &mut HandEngine<R>,
    command: Command,
    hero: Option<SeatIndex>,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::StartHand => {
            engine.start_hand()?;
            let status = drive_until_decision(engine)?;
            Ok(map_hand_status_to_response(status, build_table_view(engine, hero)))
        }
        Command::PlayerAction { seat, action } => submit_action(engine, seat, action, hero),
        Command::Advance => {
            let status = drive_until_decision(engine)?;
            Ok(map_hand_status_to_response(status, build_table_view(engine, hero)))
        }
    }
}

/// Интерфейс актёра (человек или бот): применить ход и вернуть новый снимок.
/// Если ход закрыл раунд, движок сам открывает улицы до следующего решения
/// или до конца раздачи.
pub fn submit_action<R: RandomSource>(
    engine: &mut HandEngine<R>,
    seat: SeatIndex,
    action: PlayerActionKind,
    hero: Option<SeatIndex>,
) -> Result<CommandResponse, ApiError> {
    engine.act(seat, action)?;
    let status = drive_until_decision(engine)?;
    Ok(map_hand_status_to_response(status, build_table_view(engine, hero)))
}

/// Крутить `advance_if_needed`, пока не понадобится ход игрока или раздача не кончится.
fn drive_until_decision<R: RandomSource>(engine: &mut HandEngine<R>) -> Result<HandStatus, ApiError> {
    while engine.needs_advance() {
        if let HandStatus::Finished(summary) = engine.advance_if_needed()? {
            return Ok(HandStatus::Finished(summary));
        }
    }
    Ok(HandStatus::Ongoing)
}
