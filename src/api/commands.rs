use serde::{Deserialize, Serialize};

use crate::domain::player::UserProfile;
use crate::domain::table::TableConfig;
use crate::domain::{TableId, UserId};
use crate::engine::actions::PlayerAction;
use crate::engine::{RandomSource, TableManager};

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::{build_table_view, list_seats};

/// Команды, которые относятся к существующему столу.
///
/// Разбор текста команд чата – забота транспорта; сюда приходят уже
/// типизированные команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableCommand {
    /// Сесть за стол.
    Join(UserProfile),

    /// Встать из-за стола.
    Leave { user_id: UserId },

    /// Список игроков.
    ListSeats,

    /// Начать новый раунд.
    StartRound,

    /// Шаг автоматических стадий.
    AdvanceStage,

    /// Действие игрока в раунде.
    Act(PlayerAction),
}

/// Открыть стол и посадить создателя.
pub fn open_table(
    manager: &TableManager,
    table_id: TableId,
    config: TableConfig,
    rng: impl RandomSource + Send + 'static,
    creator: &UserProfile,
) -> Result<CommandResponse, ApiError> {
    let chips = manager.open_table(table_id, config, rng, creator)?;
    Ok(CommandResponse::Seated { chips })
}

/// Выполнить команду над столом.
///
/// Действие не в свой ход не считается ошибкой: возвращается `Ignored`.
pub fn execute(
    manager: &TableManager,
    table_id: TableId,
    command: TableCommand,
) -> Result<CommandResponse, ApiError> {
    match command {
        TableCommand::Join(profile) => {
            let chips = manager.with_session(table_id, |s| s.join(&profile))??;
            Ok(CommandResponse::Seated { chips })
        }

        TableCommand::Leave { user_id } => {
            let chips = manager.with_session(table_id, |s| s.leave(user_id))??;
            let table_closed = manager.close_if_empty(table_id)?;
            Ok(CommandResponse::Left {
                chips,
                table_closed,
            })
        }

        TableCommand::ListSeats => {
            let seats = manager.with_session(table_id, |s| list_seats(s))?;
            Ok(CommandResponse::Seats(seats))
        }

        TableCommand::StartRound => manager.with_session(table_id, |s| -> Result<_, ApiError> {
            s.start_round()?;
            Ok(CommandResponse::View(build_table_view(s, None)))
        })?,

        TableCommand::AdvanceStage => manager.with_session(table_id, |s| -> Result<_, ApiError> {
            s.advance_stage()?;
            Ok(CommandResponse::View(build_table_view(s, None)))
        })?,

        TableCommand::Act(action) => manager.with_session(table_id, |s| -> Result<_, ApiError> {
            match s.apply_action(action) {
                Ok(()) => Ok(CommandResponse::View(build_table_view(s, Some(action.user_id)))),
                Err(e) if e.is_silent() => Ok(CommandResponse::Ignored),
                Err(e) => Err(e.into()),
            }
        })?,
    }
}
