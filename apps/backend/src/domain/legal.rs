//! Enumeration of the actions a player may submit right now.

use crate::domain::actions::GameAction;
use crate::domain::rules::{may_call_cops_out_of_turn, PREPARATION_TOKENS};
use crate::domain::state::{Area, Game, LocationName, Seat, StartedGame, Substate};

const DESTINATIONS: [LocationName; 6] = [
    LocationName::Prepare,
    LocationName::FrameSteal,
    LocationName::Trade,
    LocationName::Spy,
    LocationName::Stash,
    LocationName::Cops,
];

/// Every action `player_id` could submit that the turn engine would accept.
///
/// Empty for games that are not ONGOING and for unseated players.
pub fn legal_actions(game: &Game, player_id: &str) -> Vec<GameAction> {
    let Game::Ongoing(g) = game else {
        return Vec::new();
    };
    let Some(seat) = g.seat_of(player_id) else {
        return Vec::new();
    };

    if seat == g.active_player {
        active_actions(g, seat)
    } else {
        responder_actions(g, seat)
    }
}

fn hand_indices(g: &StartedGame, seat: Seat) -> std::ops::Range<usize> {
    0..g.players[seat].hand.len()
}

fn other_seats(g: &StartedGame, seat: Seat) -> impl Iterator<Item = Seat> + '_ {
    (0..g.player_count()).filter(move |&s| s != seat)
}

fn active_actions(g: &StartedGame, seat: Seat) -> Vec<GameAction> {
    let me = &g.players[seat];
    match &g.substate {
        Substate::GoToLocation => DESTINATIONS
            .into_iter()
            .filter(|&loc| loc != me.location)
            .filter(|&loc| match loc {
                LocationName::Prepare => {
                    g.preparation_token_pool > 0 && me.preparation_tokens < PREPARATION_TOKENS
                }
                LocationName::FrameSteal => g.preparation_token_pool == 0,
                _ => true,
            })
            .map(|location| GameAction::GoToLocation { location })
            .collect(),
        Substate::TradeChoosePlayer => other_seats(g, seat)
            .map(|s| GameAction::TradeChoosePlayer {
                player_color: g.players[s].color,
            })
            .collect(),
        Substate::SpyOnPlayer => other_seats(g, seat)
            .map(|s| GameAction::SpyOnPlayer {
                player_color: g.players[s].color,
            })
            .collect(),
        Substate::TradeChooseCard {
            main_player_card_index: None,
            ..
        } => hand_indices(g, seat)
            .map(|player_card_index| GameAction::TradeChooseCard { player_card_index })
            .collect(),
        Substate::TradeChooseCard { .. } => Vec::new(),
        Substate::SpyOnPlayerConfirm { .. } => vec![GameAction::SpyOnPlayerConfirm],
        Substate::StashChooseCard => match g.location(LocationName::Stash).map(|l| &l.area) {
            Some(Area::Stash { hidden, .. }) => hidden
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_some())
                .map(|(stash_card_index, _)| GameAction::StashChooseCard { stash_card_index })
                .collect(),
            _ => Vec::new(),
        },
        Substate::StashReturnCard { .. } => hand_indices(g, seat)
            .map(|player_card_index| GameAction::StashReturnCard { player_card_index })
            .collect(),
        Substate::SwapEvidence { .. } => hand_indices(g, seat)
            .map(|player_card_index| GameAction::SwapEvidence { player_card_index })
            .collect(),
        Substate::FrameChooseCard { .. } => frame_actions(g, seat),
        Substate::StealChoosePlayer if me.preparation_tokens < PREPARATION_TOKENS => {
            other_seats(g, seat)
                .filter(|&s| g.players[s].preparation_tokens > 0)
                .map(|s| GameAction::StealChoosePlayer {
                    player_color: g.players[s].color,
                })
                .collect()
        }
        Substate::StealChoosePlayer => Vec::new(),
    }
}

fn responder_actions(g: &StartedGame, seat: Seat) -> Vec<GameAction> {
    let mut actions = Vec::new();
    if may_call_cops_out_of_turn(seat, g.active_player, g.player_count())
        && g.players[seat].location != LocationName::Cops
    {
        actions.push(GameAction::GoToLocation {
            location: LocationName::Cops,
        });
    }

    match &g.substate {
        Substate::TradeChooseCard {
            other_player_id,
            other_player_card_index: None,
            ..
        } if g.players[seat].info.id == *other_player_id => {
            actions.extend(
                hand_indices(g, seat)
                    .map(|player_card_index| GameAction::TradeChooseCard { player_card_index }),
            );
        }
        Substate::FrameChooseCard { .. } => actions.extend(frame_actions(g, seat)),
        _ => {}
    }
    actions
}

fn frame_actions(g: &StartedGame, seat: Seat) -> Vec<GameAction> {
    let id = &g.players[seat].info.id;
    if g.committed_frame_cards().iter().any(|fc| &fc.player_id == id) {
        return Vec::new();
    }
    hand_indices(g, seat)
        .map(|player_card_index| GameAction::FrameChooseCard { player_card_index })
        .collect()
}
