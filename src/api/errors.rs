use serde::{Deserialize, Serialize};

use crate::domain::TableId;
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Стол не найден.
    TableNotFound(TableId),

    /// Стол с таким id уже открыт.
    TableExists(TableId),

    /// Игрок не сидит за этим столом.
    NotSeated,

    /// Команда отклонена движком (ход, ставка, посадка). Текст – для игрока.
    EngineError(String),

    /// Внутренняя ошибка движка: раунд прерван, нужен оператор.
    Fatal(String),

    /// Внутренняя ошибка сервера.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotSeated => ApiError::NotSeated,
            e if e.is_fatal() => ApiError::Fatal(e.to_string()),
            e => ApiError::EngineError(e.to_string()),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(id) => ApiError::TableNotFound(id),
            ManagerError::TableExists(id) => ApiError::TableExists(id),
            ManagerError::Engine(e) => e.into(),
            e @ ManagerError::Poisoned => ApiError::Internal(e.to_string()),
        }
    }
}
