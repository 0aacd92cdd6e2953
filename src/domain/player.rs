use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::UserId;

/// Профиль пользователя – то, что приходит от транспорта при посадке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub display_name: String,
    pub username: String,
}

impl UserProfile {
    pub fn new(user_id: UserId, display_name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            username: username.into(),
        }
    }
}

/// Статус места в контексте одного раунда.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeatStatus {
    /// Место пустое на старте раунда или игрок выбыл посреди раунда.
    /// Такие места не получают карт и не ходят.
    #[default]
    Out,
    /// Игрок участвует в раунде.
    InGame,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
}

/// Занятое место за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub user_id: UserId,
    pub display_name: String,
    pub username: String,
    /// Текущий стек за столом.
    pub stack: Chips,
}

impl Seat {
    pub fn new(profile: &UserProfile, stack: Chips) -> Self {
        Self {
            user_id: profile.user_id,
            display_name: profile.display_name.clone(),
            username: profile.username.clone(),
            stack,
        }
    }

    /// Весь стек уже в банке.
    pub fn is_all_in(&self) -> bool {
        self.stack.is_zero()
    }
}
