use serde::{Deserialize, Serialize};

use crate::domain::state::LocationName;
use crate::domain::PlayerColor;

/// A claimed player action, as decoded from a client payload.
///
/// The actor id is never part of the payload; the transport binds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameAction {
    GoToLocation { location: LocationName },
    TradeChoosePlayer { player_color: PlayerColor },
    TradeChooseCard { player_card_index: usize },
    SpyOnPlayer { player_color: PlayerColor },
    SpyOnPlayerConfirm,
    StashChooseCard { stash_card_index: usize },
    StashReturnCard { player_card_index: usize },
    SwapEvidence { player_card_index: usize },
    FrameChooseCard { player_card_index: usize },
    StealChoosePlayer { player_color: PlayerColor },
}

impl GameAction {
    pub const fn name(&self) -> &'static str {
        match self {
            GameAction::GoToLocation { .. } => "GO_TO_LOCATION",
            GameAction::TradeChoosePlayer { .. } => "TRADE_CHOOSE_PLAYER",
            GameAction::TradeChooseCard { .. } => "TRADE_CHOOSE_CARD",
            GameAction::SpyOnPlayer { .. } => "SPY_ON_PLAYER",
            GameAction::SpyOnPlayerConfirm => "SPY_ON_PLAYER_CONFIRM",
            GameAction::StashChooseCard { .. } => "STASH_CHOOSE_CARD",
            GameAction::StashReturnCard { .. } => "STASH_RETURN_CARD",
            GameAction::SwapEvidence { .. } => "SWAP_EVIDENCE",
            GameAction::FrameChooseCard { .. } => "FRAME_CHOOSE_CARD",
            GameAction::StealChoosePlayer { .. } => "STEAL_CHOOSE_PLAYER",
        }
    }
}
