//! Turn engine: validates a claimed action and produces the next state.
//!
//! The reducer works on a clone of the ongoing game and only hands it back
//! when every check has passed, so a rejection can never leave a partially
//! mutated state behind.

use time::OffsetDateTime;
use tracing::debug;

use crate::domain::actions::GameAction;
use crate::domain::events::GameEvent;
use crate::domain::rules::{may_call_cops_out_of_turn, next_seat, PREPARATION_TOKENS, STASH_SIZE};
use crate::domain::state::{
    Area, FrameCard, Game, Location, LocationName, Seat, StartedGame, Substate,
};
use crate::domain::{Card, PlayerColor};
use crate::errors::{ErrorCode, Rejection};

/// Result of submitting an action.
///
/// On rejection the caller keeps its input game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Accepted { game: Game, event: GameEvent },
    Rejected(Rejection),
}

impl ActionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ActionOutcome::Accepted { .. })
    }

    pub fn into_result(self) -> Result<(Game, GameEvent), Rejection> {
        match self {
            ActionOutcome::Accepted { game, event } => Ok((game, event)),
            ActionOutcome::Rejected(r) => Err(r),
        }
    }
}

/// Apply `action` claimed by `actor_id`, timestamped now.
///
/// # Panics
///
/// See [`apply_action_at`].
pub fn apply_action(game: &Game, actor_id: &str, action: GameAction) -> ActionOutcome {
    apply_action_at(game, actor_id, action, OffsetDateTime::now_utc())
}

/// Apply `action` claimed by `actor_id` with an explicit event timestamp.
///
/// # Panics
///
/// Panics if `game` is not ONGOING. Sending actions to a paused, finished or
/// waiting game is a caller contract violation.
pub fn apply_action_at(
    game: &Game,
    actor_id: &str,
    action: GameAction,
    now: OffsetDateTime,
) -> ActionOutcome {
    let Game::Ongoing(current) = game else {
        panic!(
            "turn engine called on game {} in state {}",
            game.id(),
            game.status()
        );
    };

    let mut next = current.clone();
    match reduce(&mut next, actor_id, action) {
        Ok(step) => {
            let event = GameEvent::action(action, actor_id, step.taken_card, now);
            next.events.push(event.clone());
            next.debug_assert_invariants();
            let game = match step.advance {
                Advance::Continue => Game::Ongoing(next),
                Advance::PauseForCops => Game::PausedForCopsCheck {
                    game: next,
                    caller_id: actor_id.to_owned(),
                },
                Advance::PauseForFrame(frame_cards) => Game::PausedForFrameCheck {
                    game: next,
                    frame_cards,
                },
            };
            ActionOutcome::Accepted { game, event }
        }
        Err(rejection) => {
            debug!(
                game_id = %current.id,
                actor_id,
                action = action.name(),
                code = rejection.code.as_str(),
                detail = %rejection.detail,
                "action rejected"
            );
            ActionOutcome::Rejected(rejection)
        }
    }
}

/// How the top-level game state moves after an accepted action.
enum Advance {
    Continue,
    PauseForCops,
    PauseForFrame(Vec<FrameCard>),
}

struct Step {
    advance: Advance,
    taken_card: Option<Card>,
}

impl Step {
    fn next() -> Self {
        Self {
            advance: Advance::Continue,
            taken_card: None,
        }
    }
}

fn reject(code: ErrorCode, detail: impl Into<String>) -> Rejection {
    Rejection::new(code, detail)
}

fn reduce(g: &mut StartedGame, actor_id: &str, action: GameAction) -> Result<Step, Rejection> {
    let actor = g.seat_of(actor_id).ok_or_else(|| {
        reject(
            ErrorCode::NotSeated,
            format!("player {actor_id} is not seated in this game"),
        )
    })?;
    authorize(g, actor, &action)?;

    match action {
        GameAction::GoToLocation { location } => go_to_location(g, actor, location),
        GameAction::TradeChoosePlayer { player_color } => {
            expect(g, &action, |s| matches!(s, Substate::TradeChoosePlayer))?;
            let target = choose_other_player(g, actor, player_color)?;
            g.substate = Substate::TradeChooseCard {
                other_player_id: g.players[target].info.id.clone(),
                main_player_card_index: None,
                other_player_card_index: None,
            };
            Ok(Step::next())
        }
        GameAction::TradeChooseCard { player_card_index } => {
            trade_choose_card(g, actor, player_card_index)
        }
        GameAction::SpyOnPlayer { player_color } => {
            expect(g, &action, |s| matches!(s, Substate::SpyOnPlayer))?;
            let target = choose_other_player(g, actor, player_color)?;
            g.substate = Substate::SpyOnPlayerConfirm {
                other_player_id: g.players[target].info.id.clone(),
            };
            Ok(Step::next())
        }
        GameAction::SpyOnPlayerConfirm => {
            expect(g, &action, |s| matches!(s, Substate::SpyOnPlayerConfirm { .. }))?;
            g.substate = Substate::SwapEvidence {
                location: LocationName::Spy,
            };
            Ok(Step::next())
        }
        GameAction::StashChooseCard { stash_card_index } => {
            stash_choose_card(g, actor, &action, stash_card_index)
        }
        GameAction::StashReturnCard { player_card_index } => {
            stash_return_card(g, actor, &action, player_card_index)
        }
        GameAction::SwapEvidence { player_card_index } => {
            swap_evidence(g, actor, &action, player_card_index)
        }
        GameAction::FrameChooseCard { player_card_index } => {
            frame_choose_card(g, actor, &action, player_card_index)
        }
        GameAction::StealChoosePlayer { player_color } => {
            steal_choose_player(g, actor, &action, player_color)
        }
    }
}

/// Only the active seat may act, except for the three responder cases.
fn authorize(g: &StartedGame, actor: Seat, action: &GameAction) -> Result<(), Rejection> {
    if actor == g.active_player {
        return Ok(());
    }

    match (action, &g.substate) {
        (
            GameAction::GoToLocation {
                location: LocationName::Cops,
            },
            _,
        ) if may_call_cops_out_of_turn(actor, g.active_player, g.player_count()) => Ok(()),
        (
            GameAction::TradeChooseCard { .. },
            Substate::TradeChooseCard {
                other_player_id,
                other_player_card_index,
                ..
            },
        ) => {
            if g.players[actor].info.id != *other_player_id {
                Err(reject(
                    ErrorCode::NotTradeParticipant,
                    "player is not either of the trade participants",
                ))
            } else if other_player_card_index.is_some() {
                Err(reject(
                    ErrorCode::AlreadyChosen,
                    "player has already chosen a card to trade",
                ))
            } else {
                Ok(())
            }
        }
        (GameAction::FrameChooseCard { .. }, Substate::FrameChooseCard { .. }) => Ok(()),
        _ => Err(reject(
            ErrorCode::OutOfTurn,
            format!(
                "seat {actor} cannot {} on seat {}'s turn",
                action.name(),
                g.active_player
            ),
        )),
    }
}

fn expect(
    g: &StartedGame,
    action: &GameAction,
    matches: impl FnOnce(&Substate) -> bool,
) -> Result<(), Rejection> {
    if matches(&g.substate) {
        Ok(())
    } else {
        Err(reject(
            ErrorCode::UnexpectedAction,
            format!(
                "expecting {}, got {}",
                g.substate.expected_action(),
                action.name()
            ),
        ))
    }
}

fn check_hand_index(g: &StartedGame, seat: Seat, index: usize) -> Result<(), Rejection> {
    let len = g.players[seat].hand.len();
    if index < len {
        Ok(())
    } else {
        Err(reject(
            ErrorCode::CardIndexOutOfBounds,
            format!("card index {index} out of bounds for hand of {len}"),
        ))
    }
}

/// Resolve a target color to a seat other than the actor's.
fn choose_other_player(
    g: &StartedGame,
    actor: Seat,
    color: PlayerColor,
) -> Result<Seat, Rejection> {
    let target = g.seat_of_color(color).ok_or_else(|| {
        reject(
            ErrorCode::UnknownPlayer,
            format!("no seated player is {color}"),
        )
    })?;
    if target == actor {
        return Err(reject(ErrorCode::SelfTarget, "cannot target yourself"));
    }
    Ok(target)
}

fn take_token_from_pool(g: &mut StartedGame, seat: Seat) -> Result<(), Rejection> {
    if g.preparation_token_pool == 0 {
        return Err(reject(
            ErrorCode::NoPreparationTokens,
            "no preparation tokens left",
        ));
    }
    if g.players[seat].preparation_tokens >= PREPARATION_TOKENS {
        return Err(reject(
            ErrorCode::TokenLimitReached,
            "player already holds both tokens",
        ));
    }
    g.preparation_token_pool -= 1;
    g.players[seat].preparation_tokens += 1;
    Ok(())
}

fn go_to_location(
    g: &mut StartedGame,
    actor: Seat,
    location: LocationName,
) -> Result<Step, Rejection> {
    let out_of_turn = actor != g.active_player;
    if !out_of_turn && !matches!(g.substate, Substate::GoToLocation) {
        return Err(reject(
            ErrorCode::UnexpectedAction,
            format!(
                "expecting {}, got GO_TO_LOCATION",
                g.substate.expected_action()
            ),
        ));
    }
    if g.players[actor].location == location {
        return Err(reject(
            ErrorCode::SameLocation,
            format!("already at {location}"),
        ));
    }

    match location {
        LocationName::Cops => Ok(Step {
            advance: Advance::PauseForCops,
            taken_card: None,
        }),
        LocationName::FrameSteal => {
            if g.preparation_token_pool > 0 {
                return Err(reject(
                    ErrorCode::PreparationTokensRemain,
                    format!(
                        "{} preparation tokens still in the pool",
                        g.preparation_token_pool
                    ),
                ));
            }
            let player = &mut g.players[actor];
            player.location = LocationName::FrameSteal;
            g.substate = if player.preparation_tokens > 0 {
                Substate::FrameChooseCard { cards: Vec::new() }
            } else {
                Substate::StealChoosePlayer
            };
            Ok(Step::next())
        }
        LocationName::Prepare => match g.preparation_token_pool {
            0 => Err(reject(
                ErrorCode::NoPreparationTokens,
                "no preparation tokens left",
            )),
            1 => {
                take_token_from_pool(g, actor)?;
                if let Some(prepare) = g.location_mut(LocationName::Prepare) {
                    prepare.name = LocationName::FrameSteal;
                }
                for (seat, player) in g.players.iter_mut().enumerate() {
                    if seat == actor || player.location == LocationName::Prepare {
                        player.location = LocationName::FrameSteal;
                    }
                }
                g.substate = Substate::SwapEvidence {
                    location: LocationName::FrameSteal,
                };
                Ok(Step::next())
            }
            _ => {
                take_token_from_pool(g, actor)?;
                g.players[actor].location = LocationName::Prepare;
                g.substate = Substate::SwapEvidence {
                    location: LocationName::Prepare,
                };
                Ok(Step::next())
            }
        },
        LocationName::Trade | LocationName::Spy | LocationName::Stash => {
            g.players[actor].location = location;
            g.substate = match location {
                LocationName::Trade => Substate::TradeChoosePlayer,
                LocationName::Spy => Substate::SpyOnPlayer,
                _ => Substate::StashChooseCard,
            };
            Ok(Step::next())
        }
    }
}

fn trade_choose_card(g: &mut StartedGame, actor: Seat, index: usize) -> Result<Step, Rejection> {
    let Substate::TradeChooseCard {
        other_player_id,
        main_player_card_index,
        other_player_card_index,
    } = &g.substate
    else {
        return Err(reject(
            ErrorCode::UnexpectedAction,
            format!(
                "expecting {}, got TRADE_CHOOSE_CARD",
                g.substate.expected_action()
            ),
        ));
    };
    let other = g.seat_of(other_player_id).ok_or_else(|| {
        reject(
            ErrorCode::UnknownPlayer,
            format!("trade partner {other_player_id} is not seated"),
        )
    })?;
    let (mut main_idx, mut other_idx) = (*main_player_card_index, *other_player_card_index);

    let is_active = actor == g.active_player;
    if !is_active && actor != other {
        return Err(reject(
            ErrorCode::NotTradeParticipant,
            "player is not either of the trade participants",
        ));
    }
    let slot = if is_active { &mut main_idx } else { &mut other_idx };
    if slot.is_some() {
        return Err(reject(
            ErrorCode::AlreadyChosen,
            "player has already chosen a card to trade",
        ));
    }
    check_hand_index(g, actor, index)?;
    *slot = Some(index);

    match (main_idx, other_idx) {
        (Some(mi), Some(oi)) => {
            let active = g.active_player;
            let main_card = g.players[active].hand[mi];
            let other_card = g.players[other].hand[oi];
            g.players[active].hand[mi] = other_card;
            g.players[other].hand[oi] = main_card;
            g.substate = Substate::SwapEvidence {
                location: LocationName::Trade,
            };
        }
        _ => {
            if let Substate::TradeChooseCard {
                main_player_card_index,
                other_player_card_index,
                ..
            } = &mut g.substate
            {
                *main_player_card_index = main_idx;
                *other_player_card_index = other_idx;
            }
        }
    }
    Ok(Step::next())
}

fn stash_choose_card(
    g: &mut StartedGame,
    actor: Seat,
    action: &GameAction,
    stash_card_index: usize,
) -> Result<Step, Rejection> {
    expect(g, action, |s| matches!(s, Substate::StashChooseCard))?;
    let out_of_bounds = || {
        reject(
            ErrorCode::StashIndexOutOfBounds,
            format!("stash index {stash_card_index} out of bounds"),
        )
    };
    if stash_card_index >= STASH_SIZE {
        return Err(out_of_bounds());
    }
    let taken = match g.location_mut(LocationName::Stash).map(|l| &mut l.area) {
        Some(Area::Stash { hidden, .. }) => hidden[stash_card_index].take(),
        _ => None,
    }
    .ok_or_else(out_of_bounds)?;

    g.players[actor].hand.push(taken);
    g.substate = Substate::StashReturnCard { stash_card_index };
    Ok(Step::next())
}

fn stash_return_card(
    g: &mut StartedGame,
    actor: Seat,
    action: &GameAction,
    player_card_index: usize,
) -> Result<Step, Rejection> {
    let Substate::StashReturnCard { stash_card_index } = g.substate else {
        return Err(reject(
            ErrorCode::UnexpectedAction,
            format!(
                "expecting {}, got {}",
                g.substate.expected_action(),
                action.name()
            ),
        ));
    };
    check_hand_index(g, actor, player_card_index)?;

    let card = g.players[actor].hand.remove(player_card_index);
    match g.location_mut(LocationName::Stash).map(|l| &mut l.area) {
        Some(Area::Stash { hidden, .. }) if hidden[stash_card_index].is_none() => {
            hidden[stash_card_index] = Some(card);
        }
        _ => {
            return Err(reject(
                ErrorCode::StashIndexOutOfBounds,
                format!("stash slot {stash_card_index} is not open"),
            ))
        }
    }
    g.substate = Substate::SwapEvidence {
        location: LocationName::Stash,
    };
    Ok(Step::next())
}

fn swap_evidence(
    g: &mut StartedGame,
    actor: Seat,
    action: &GameAction,
    player_card_index: usize,
) -> Result<Step, Rejection> {
    let Substate::SwapEvidence { location } = g.substate else {
        return Err(reject(
            ErrorCode::UnexpectedAction,
            format!(
                "expecting {}, got {}",
                g.substate.expected_action(),
                action.name()
            ),
        ));
    };
    check_hand_index(g, actor, player_card_index)?;

    let face_up = g
        .locations
        .iter_mut()
        .find(|l| l.name == location)
        .and_then(Location::face_up_card_mut)
        .ok_or_else(|| {
            reject(
                ErrorCode::UnknownLocation,
                format!("{location} has no card to swap"),
            )
        })?;
    let hand_card = &mut g.players[actor].hand[player_card_index];
    std::mem::swap(face_up, hand_card);
    let taken = *hand_card;

    g.active_player = next_seat(g.active_player, g.player_count());
    g.substate = Substate::GoToLocation;
    Ok(Step {
        advance: Advance::Continue,
        taken_card: Some(taken),
    })
}

fn steal_choose_player(
    g: &mut StartedGame,
    actor: Seat,
    action: &GameAction,
    color: PlayerColor,
) -> Result<Step, Rejection> {
    expect(g, action, |s| matches!(s, Substate::StealChoosePlayer))?;
    let target = choose_other_player(g, actor, color)?;
    if g.players[target].preparation_tokens == 0 {
        return Err(reject(
            ErrorCode::TargetHasNoTokens,
            format!("{color} holds no preparation tokens"),
        ));
    }
    if g.players[actor].preparation_tokens >= PREPARATION_TOKENS {
        return Err(reject(
            ErrorCode::TokenLimitReached,
            "player already holds both tokens",
        ));
    }
    g.players[target].preparation_tokens -= 1;
    g.players[actor].preparation_tokens += 1;
    g.substate = Substate::SwapEvidence {
        location: LocationName::FrameSteal,
    };
    Ok(Step::next())
}

fn frame_choose_card(
    g: &mut StartedGame,
    actor: Seat,
    action: &GameAction,
    player_card_index: usize,
) -> Result<Step, Rejection> {
    expect(g, action, |s| matches!(s, Substate::FrameChooseCard { .. }))?;
    let player_id = g.players[actor].info.id.clone();
    if g
        .committed_frame_cards()
        .iter()
        .any(|fc| fc.player_id == player_id)
    {
        return Err(reject(
            ErrorCode::AlreadyChosen,
            "player has already chosen a card for the frame",
        ));
    }
    check_hand_index(g, actor, player_card_index)?;

    let player_count = g.player_count();
    let Substate::FrameChooseCard { cards } = &mut g.substate else {
        unreachable!("substate checked above");
    };
    cards.push(FrameCard {
        player_id,
        player_card_index,
    });

    let advance = if cards.len() == player_count {
        Advance::PauseForFrame(cards.clone())
    } else {
        Advance::Continue
    };
    Ok(Step {
        advance,
        taken_card: None,
    })
}
