//! Error codes for the Scapegoat backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! surfaced to clients.

use core::fmt;

/// Centralized, machine-readable error codes.
///
/// Game-rule rejections and table-level failures share this enum so that
/// every outcome a client can see has exactly one canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Game-rule rejections
    /// Actor is not allowed to act right now
    OutOfTurn,
    /// Action kind does not match the expected substate
    UnexpectedAction,
    /// Player is already standing on that location
    SameLocation,
    /// PREPARE with an empty pool
    NoPreparationTokens,
    /// FRAME/STEAL while tokens remain in the pool
    PreparationTokensRemain,
    /// Target location does not exist in this game
    UnknownLocation,
    /// No seated player has the given color
    UnknownPlayer,
    /// Player targeted themselves
    SelfTarget,
    /// Steal target holds no tokens
    TargetHasNoTokens,
    /// Stealer already holds the maximum number of tokens
    TokenLimitReached,
    /// Submitter is not one of the two trade parties
    NotTradeParticipant,
    /// Trade or frame card already submitted by this player
    AlreadyChosen,
    /// Hand index past the end of the hand
    CardIndexOutOfBounds,
    /// Stash index past the end of the stash
    StashIndexOutOfBounds,
    /// Actor id does not belong to a seated player
    NotSeated,

    // Table lifecycle
    /// No table for the given code or id
    GameDoesntExist,
    /// Join attempted after activation
    GameNotWaitingForPlayers,
    /// Lobby already seats the maximum
    GameFull,
    /// Start attempted below the minimum table size
    GameNotEnoughPlayersToStart,
    /// Action sent while the game is not ONGOING
    GameNotInProgress,
    /// Remake requested before the game finished
    GameNotFinished,
    /// Requester is not part of this game
    UserNotInGame,
    /// Turn engine rejected the action
    InvalidGameAction,

    // System
    /// Internal error (mailbox closed, actor gone)
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::UnexpectedAction => "UNEXPECTED_ACTION",
            Self::SameLocation => "SAME_LOCATION",
            Self::NoPreparationTokens => "NO_PREPARATION_TOKENS",
            Self::PreparationTokensRemain => "PREPARATION_TOKENS_REMAIN",
            Self::UnknownLocation => "UNKNOWN_LOCATION",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::SelfTarget => "SELF_TARGET",
            Self::TargetHasNoTokens => "TARGET_HAS_NO_TOKENS",
            Self::TokenLimitReached => "TOKEN_LIMIT_REACHED",
            Self::NotTradeParticipant => "NOT_TRADE_PARTICIPANT",
            Self::AlreadyChosen => "ALREADY_CHOSEN",
            Self::CardIndexOutOfBounds => "CARD_INDEX_OUT_OF_BOUNDS",
            Self::StashIndexOutOfBounds => "STASH_INDEX_OUT_OF_BOUNDS",
            Self::NotSeated => "NOT_SEATED",

            Self::GameDoesntExist => "GAME_DOESNT_EXIST",
            Self::GameNotWaitingForPlayers => "GAME_NOT_WAITING_FOR_PLAYERS",
            Self::GameFull => "GAME_FULL",
            Self::GameNotEnoughPlayersToStart => "GAME_NOT_ENOUGH_PLAYERS_TO_START",
            Self::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            Self::GameNotFinished => "GAME_NOT_FINISHED",
            Self::UserNotInGame => "USER_NOT_IN_GAME",
            Self::InvalidGameAction => "INVALID_GAME_ACTION",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for exhaustiveness checks in tests and tooling.
    pub const ALL: [ErrorCode; 25] = [
        Self::OutOfTurn,
        Self::UnexpectedAction,
        Self::SameLocation,
        Self::NoPreparationTokens,
        Self::PreparationTokensRemain,
        Self::UnknownLocation,
        Self::UnknownPlayer,
        Self::SelfTarget,
        Self::TargetHasNoTokens,
        Self::TokenLimitReached,
        Self::NotTradeParticipant,
        Self::AlreadyChosen,
        Self::CardIndexOutOfBounds,
        Self::StashIndexOutOfBounds,
        Self::NotSeated,
        Self::GameDoesntExist,
        Self::GameNotWaitingForPlayers,
        Self::GameFull,
        Self::GameNotEnoughPlayersToStart,
        Self::GameNotInProgress,
        Self::GameNotFinished,
        Self::UserNotInGame,
        Self::InvalidGameAction,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
