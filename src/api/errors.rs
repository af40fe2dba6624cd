use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём UI / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Ход отклонён по правилам – можно выбрать другое действие.
    #[error("Ход отклонён: {0}")]
    Rejected(String),

    /// Команда не может быть выполнена в текущем состоянии стола.
    #[error("Команда недоступна: {0}")]
    InvalidCommand(String),

    /// Раздача прервана (например, кончилась колода), фишки возвращены.
    #[error("Раздача прервана: {0}")]
    HandAborted(String),

    /// Внутренняя ошибка движка.
    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let msg = err.to_string();
        if err.is_recoverable() {
            return ApiError::Rejected(msg);
        }
        match err {
            EngineError::EmptyDeck => ApiError::HandAborted(msg),
            EngineError::Internal(_) => ApiError::Internal(msg),
            _ => ApiError::InvalidCommand(msg),
        }
    }
}
