use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, UserId};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Рейз на указанную сумму сверх колла (не итоговая ставка).
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => f.write_str("fold"),
            PlayerActionKind::Check => f.write_str("check"),
            PlayerActionKind::Call => f.write_str("call"),
            PlayerActionKind::Raise(amount) => write!(f, "raise {amount}"),
            PlayerActionKind::AllIn => f.write_str("allin"),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует. Место определяется по столу.
    pub user_id: UserId,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(user_id: UserId, kind: PlayerActionKind) -> Self {
        Self { user_id, kind }
    }
}
