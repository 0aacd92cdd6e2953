use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Stage;
use crate::domain::player::SeatStatus;
use crate::domain::table::SeatIndex;
use crate::domain::{TableId, UserId};
use crate::eval::HandCategory;

/// Что может сделать игрок, чей сейчас ход.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LegalAction {
    Check,
    /// Колл с суммой доплаты.
    Call(Chips),
    Raise,
    AllIn,
    Fold,
}

/// DTO места за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatViewDto {
    pub seat_index: SeatIndex,
    pub user_id: UserId,
    pub display_name: String,
    pub username: String,
    /// Статус в текущем раунде (Out, если раунда нет или игрок подсел позже).
    pub status: SeatStatus,
    pub stack: Chips,
    pub stage_bet: Chips,
    pub total_bet: Chips,
    pub all_in: bool,
    /// Выигрыш – только после завершения раунда.
    pub earn: Option<Chips>,
    /// Карманные карты – только для смотрящего или после вскрытия.
    pub hole_cards: Option<[Card; 2]>,
    pub best_hand: Option<HandCategory>,
}

/// DTO стола: всё, что нужно, чтобы нарисовать статус.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub table_id: TableId,
    pub name: String,
    pub stage: Option<Stage>,
    pub stage_name: String,
    pub pot: Chips,
    pub community: [Option<Card>; 5],
    pub dealer: Option<SeatIndex>,
    /// Чей ход (если раунд ждёт действия).
    pub actor: Option<SeatIndex>,
    pub round_in_progress: bool,
    pub halted: bool,
    pub seats: Vec<SeatViewDto>,
    /// Доступные действия для `actor`.
    pub legal_actions: Vec<LegalAction>,
}

/// Строка списка игроков за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatListingDto {
    pub seat_index: SeatIndex,
    pub user_id: UserId,
    pub display_name: String,
    pub stack: Chips,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Команда не от того игрока: молча игнорируется.
    Ignored,

    /// Игрок сел за стол с таким стеком.
    Seated { chips: Chips },

    /// Игрок ушёл, фишки вернулись на кошелёк.
    Left { chips: Chips, table_closed: bool },

    /// Список игроков.
    Seats(Vec<SeatListingDto>),

    /// Обновлённое состояние стола.
    View(TableViewDto),
}
