use core::fmt;

use thiserror::Error;

use crate::domain::chips::Chips;

/// Почему нельзя сесть за стол.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatUnavailableReason {
    /// Все места заняты.
    NoEmptySeat,
    /// Игрок уже сидит за этим столом.
    AlreadySeated,
    /// На кошельке нечего ставить на бай-ин.
    InsufficientFunds,
    /// Нет адреса для личных уведомлений.
    NotRegistered,
}

/// Ошибки движка покера.
///
/// Пользовательские ошибки ничего не меняют в состоянии раунда.
/// Фатальные (`is_fatal`) означают баг движка: раунд прерывается.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Нельзя сесть за стол: {reason}")]
    SeatUnavailable { reason: SeatUnavailableReason },

    #[error("Игрок не сидит за столом")]
    NotSeated,

    #[error("Раунд не активен")]
    RoundNotActive,

    #[error("Раунд ещё идёт")]
    RoundAlreadyActive,

    #[error("Недостаточно игроков для нового раунда")]
    NotEnoughPlayers,

    #[error("Сейчас не ваш ход")]
    OutOfTurn,

    #[error("Нечего уравнивать: можно только check, raise или fold")]
    NothingToCall,

    #[error("Нужно ответить на ставку: call, raise или fold")]
    MustAct,

    #[error("Рейз {amount} меньше минимального {minimum}")]
    RaiseTooSmall { amount: Chips, minimum: Chips },

    #[error("Недостаточно фишек для рейза, попробуйте all-in")]
    InsufficientChips,

    #[error("Рука должна состоять из 5 карт, а не из {0}")]
    InvalidHandSize(usize),

    #[error("Открыто только {0} общих карт, нужно минимум 3")]
    InsufficientCommunityCards(usize),

    #[error("У игрока нет двух карманных карт")]
    MissingHoleCards,

    #[error("Ошибка хранилища: {0}")]
    Storage(String),

    #[error("Колода пуста")]
    EmptyDeck,

    #[error("За столом не осталось активных игроков")]
    EmptyTable,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Нарушение инварианта движка, а не ошибка игрока.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::EmptyDeck | EngineError::EmptyTable | EngineError::Internal(_)
        )
    }

    /// Ошибка, которую не показываем игроку (чужой ход).
    pub fn is_silent(&self) -> bool {
        matches!(self, EngineError::OutOfTurn)
    }
}

impl fmt::Display for SeatUnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SeatUnavailableReason::NoEmptySeat => "свободных мест нет",
            SeatUnavailableReason::AlreadySeated => "вы уже за столом",
            SeatUnavailableReason::InsufficientFunds => "слишком мало фишек на кошельке",
            SeatUnavailableReason::NotRegistered => "сначала напишите боту в личные сообщения",
        };
        f.write_str(text)
    }
}
