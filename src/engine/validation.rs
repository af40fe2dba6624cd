use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::{EngineError, IllegalAction};

/// Проверка, может ли игрок выполнить это действие при текущей ставке стола.
/// Ничего не меняет – движок применяет действие только после успешной проверки.
pub fn validate_action(
    player: &PlayerAtTable,
    action: &PlayerActionKind,
    table_bet: Chips,
) -> Result<(), EngineError> {
    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if player.current_bet == table_bet {
                Ok(())
            } else {
                Err(IllegalAction::CannotCheck {
                    to_call: diff_to_call(player, table_bet),
                }
                .into())
            }
        }

        // Call при уже уравненной ставке – это check, не ошибка.
        PlayerActionKind::Call => Ok(()),

        PlayerActionKind::Raise(amount) => {
            if *amount > table_bet {
                Ok(())
            } else {
                Err(IllegalAction::RaiseNotAboveTableBet {
                    amount: *amount,
                    table_bet,
                }
                .into())
            }
        }
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять ставку стола.
pub fn diff_to_call(player: &PlayerAtTable, table_bet: Chips) -> Chips {
    player.current_bet.shortfall_to(table_bet)
}
