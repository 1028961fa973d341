// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::actions::GameAction;
use crate::domain::state::LocationName;
use crate::domain::PlayerColor;

/// A valid table size.
pub fn player_count() -> impl Strategy<Value = usize> {
    3usize..=6
}

pub fn color() -> impl Strategy<Value = PlayerColor> {
    prop_oneof![
        Just(PlayerColor::Blue),
        Just(PlayerColor::Red),
        Just(PlayerColor::Yellow),
        Just(PlayerColor::Green),
        Just(PlayerColor::Orange),
        Just(PlayerColor::Purple),
    ]
}

pub fn location() -> impl Strategy<Value = LocationName> {
    prop_oneof![
        Just(LocationName::Prepare),
        Just(LocationName::FrameSteal),
        Just(LocationName::Trade),
        Just(LocationName::Spy),
        Just(LocationName::Stash),
        Just(LocationName::Cops),
    ]
}

/// Any action payload, legal or not. Indices run a little past real hand
/// and stash sizes so out-of-bounds paths get exercised.
pub fn any_action() -> impl Strategy<Value = GameAction> {
    let idx = 0usize..12;
    prop_oneof![
        location().prop_map(|location| GameAction::GoToLocation { location }),
        color().prop_map(|player_color| GameAction::TradeChoosePlayer { player_color }),
        idx.clone()
            .prop_map(|player_card_index| GameAction::TradeChooseCard { player_card_index }),
        color().prop_map(|player_color| GameAction::SpyOnPlayer { player_color }),
        Just(GameAction::SpyOnPlayerConfirm),
        (0usize..5).prop_map(|stash_card_index| GameAction::StashChooseCard { stash_card_index }),
        idx.clone()
            .prop_map(|player_card_index| GameAction::StashReturnCard { player_card_index }),
        idx.clone()
            .prop_map(|player_card_index| GameAction::SwapEvidence { player_card_index }),
        idx.prop_map(|player_card_index| GameAction::FrameChooseCard { player_card_index }),
        color().prop_map(|player_color| GameAction::StealChoosePlayer { player_color }),
    ]
}

/// Table size, activation seed and play-out seed.
pub fn game_seeds() -> impl Strategy<Value = (usize, u64, u64)> {
    (player_count(), any::<u64>(), any::<u64>())
}
