use thiserror::Error;

use crate::errors::{ErrorCode, Rejection};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Invalid game action: {0}")]
    InvalidAction(#[from] Rejection),
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Machine-readable code surfaced to clients.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Forbidden { code, .. } => *code,
            AppError::InvalidAction(_) => ErrorCode::InvalidGameAction,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail.clone(),
            AppError::InvalidAction(rejection) => rejection.to_string(),
        }
    }

    /// The engine-level reason when this wraps a rejected action.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            AppError::InvalidAction(r) => Some(r),
            _ => None,
        }
    }

    pub fn game_doesnt_exist(detail: impl Into<String>) -> Self {
        Self::NotFound {
            code: ErrorCode::GameDoesntExist,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_in_game(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            code: ErrorCode::UserNotInGame,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<actix::MailboxError> for AppError {
    fn from(e: actix::MailboxError) -> Self {
        AppError::internal(format!("table mailbox error: {e}"))
    }
}
