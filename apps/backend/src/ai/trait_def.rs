//! AI player trait definition.

use thiserror::Error;

use crate::domain::{GameAction, GameView};
use crate::error::AppError;

/// Errors that can occur during AI decision-making.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI internal error: {0}")]
    Internal(String),
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// Trait for automated players.
///
/// Implementations see only the view projected for their seat and the list
/// of actions the engine would accept from them right now. Returning an
/// action outside `legal` is a bug in the implementation.
pub trait AiPlayer: Send + Sync {
    fn choose_action(&self, view: &GameView, legal: &[GameAction])
        -> Result<GameAction, AiError>;
}
