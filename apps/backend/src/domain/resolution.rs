//! Resolution of paused games: the cops-check and the frame-check.
//!
//! These functions are pure; the delay before calling them is owned by the
//! table actor.

use time::OffsetDateTime;

use crate::domain::events::{GameEvent, Resolution};
use crate::domain::rules::frame_threshold;
use crate::domain::state::{FrameCard, Game, LocationName, PlayerId, StartedGame, Substate};
use crate::domain::{Card, PlayerColor};

/// Whether a frame attempt succeeds against `scapegoat`.
///
/// Counts card content only, independent of who contributed each card.
pub fn frame_verdict(cards: &[Card], scapegoat: PlayerColor, player_count: usize) -> bool {
    let incriminating = cards.iter().filter(|c| c.incriminates(scapegoat)).count();
    incriminating >= frame_threshold(player_count)
}

/// Look up the card behind each commitment in the committing player's hand.
///
/// Commitments that no longer point at a card are skipped.
pub(crate) fn committed_cards(game: &StartedGame, frame_cards: &[FrameCard]) -> Vec<Card> {
    frame_cards
        .iter()
        .filter_map(|fc| {
            let seat = game.seat_of(&fc.player_id)?;
            game.players[seat].hand.get(fc.player_card_index).copied()
        })
        .collect()
}

/// Resolve a PAUSED_FOR_COPS_CHECK game: the Scapegoat is the sole winner.
///
/// # Panics
///
/// Panics if `game` is not PAUSED_FOR_COPS_CHECK.
pub fn resolve_cops_check(game: Game, now: OffsetDateTime) -> Game {
    let (mut started, caller_id) = match game {
        Game::PausedForCopsCheck { game, caller_id } => (game, caller_id),
        other => panic!(
            "cops check on game {} in state {}",
            other.id(),
            other.status()
        ),
    };
    let winner_player_ids: Vec<PlayerId> = started
        .scapegoat_seat()
        .map(|seat| started.players[seat].info.id.clone())
        .into_iter()
        .collect();
    started.events.push(GameEvent::resolution(
        Resolution::CopsCalled { caller_id },
        now,
    ));
    Game::Finished {
        game: started,
        winner_player_ids,
    }
}

/// Resolve a PAUSED_FOR_FRAME_CHECK game.
///
/// Success finishes the game with every non-Scapegoat as winner. Failure
/// returns to ONGOING with the active player still owing an evidence swap at
/// FRAME/STEAL.
///
/// # Panics
///
/// Panics if `game` is not PAUSED_FOR_FRAME_CHECK.
pub fn resolve_frame_check(game: Game, now: OffsetDateTime) -> Game {
    let (mut started, frame_cards) = match game {
        Game::PausedForFrameCheck { game, frame_cards } => (game, frame_cards),
        other => panic!(
            "frame check on game {} in state {}",
            other.id(),
            other.status()
        ),
    };

    let cards = committed_cards(&started, &frame_cards);
    if frame_verdict(&cards, started.scapegoat, started.player_count()) {
        let winner_player_ids = started
            .players
            .iter()
            .filter(|p| p.color != started.scapegoat)
            .map(|p| p.info.id.clone())
            .collect();
        started
            .events
            .push(GameEvent::resolution(Resolution::FrameSuccess, now));
        Game::Finished {
            game: started,
            winner_player_ids,
        }
    } else {
        started.events.push(GameEvent::resolution(
            Resolution::FrameFailure { frame_cards },
            now,
        ));
        started.substate = Substate::SwapEvidence {
            location: LocationName::FrameSteal,
        };
        Game::Ongoing(started)
    }
}

/// Resolve whichever pause `game` is in. Non-paused games pass through.
pub fn resolve_pause(game: Game, now: OffsetDateTime) -> Game {
    match game {
        Game::PausedForCopsCheck { .. } => resolve_cops_check(game, now),
        Game::PausedForFrameCheck { .. } => resolve_frame_check(game, now),
        other => other,
    }
}
